use super::context::RequestContext;
use super::ScoreOutcome;
use crate::models::Event;
use chrono::Duration;

/// Capacity assumed for events that never set one.
const DEFAULT_CAPACITY: u32 = 100;

/// Boost for events created inside the last week.
const FRESHNESS_BOOST: f32 = 0.2;

/// Boost for events starting inside the next week.
const IMMINENCE_BOOST: f32 = 0.15;

const BOOST_WINDOW_DAYS: i64 = 7;

/// Scores a candidate by its fill ratio plus freshness and imminence boosts.
/// Pure function of the event and the request clock; no profile dependency
/// and no store reads, so it can never fault.
#[derive(Debug, Clone, Default)]
pub struct PopularityScorer;

impl PopularityScorer {
    pub fn score(&self, ctx: &RequestContext, event: &Event) -> ScoreOutcome {
        // Overfull events divide by their own attendee count, pinning the
        // ratio at 1.0 instead of letting it exceed the unit interval.
        let denominator = event
            .capacity
            .unwrap_or(DEFAULT_CAPACITY)
            .max(event.attendee_count)
            .max(1);
        let fill_ratio = event.attendee_count as f32 / denominator as f32;

        let window = Duration::days(BOOST_WINDOW_DAYS);
        let mut score = fill_ratio;

        if ctx.now - event.created_at <= window {
            score += FRESHNESS_BOOST;
        }

        let until_start = event.starts_at - ctx.now;
        if until_start >= Duration::zero() && until_start <= window {
            score += IMMINENCE_BOOST;
        }

        ScoreOutcome::Computed(score.min(1.0))
    }
}
