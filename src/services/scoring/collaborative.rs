use super::context::{RequestContext, SupportData};
use super::ScoreOutcome;
use crate::models::Event;

/// Neutral score when the user has no history, no neighbors exist, or the
/// neighbor fetch faulted.
pub const NEUTRAL_COLLABORATIVE_SCORE: f32 = 0.5;

/// Divisor cap: with 10+ neighbors the score saturates once 10 of them are
/// registered for the candidate.
const NEIGHBOR_DIVISOR_CAP: usize = 10;

/// Scores a candidate by how many of the user's neighbors (users sharing at
/// least one registration with them) are engaged with it. The neighbor index
/// is built once per request in [`RequestContext`]; this scorer never touches
/// a store.
#[derive(Debug, Clone, Default)]
pub struct CollaborativeScorer;

impl CollaborativeScorer {
    pub fn score(&self, ctx: &RequestContext, event: &Event) -> ScoreOutcome {
        let index = match &ctx.neighbors {
            SupportData::Ready(index) => index,
            SupportData::Faulted => return ScoreOutcome::Defaulted(NEUTRAL_COLLABORATIVE_SCORE),
        };

        if index.neighbor_count == 0 {
            return ScoreOutcome::Computed(NEUTRAL_COLLABORATIVE_SCORE);
        }

        let on_candidate = index.event_counts.get(&event.id).copied().unwrap_or(0);
        let divisor = index.neighbor_count.min(NEIGHBOR_DIVISOR_CAP);

        ScoreOutcome::Computed((on_candidate as f32 / divisor as f32).min(1.0))
    }
}
