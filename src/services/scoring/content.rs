use super::context::{RequestContext, SupportData};
use super::ScoreOutcome;
use crate::models::Event;

/// Neutral score when the user has no engagement history, or when the
/// history fetch faulted.
pub const NEUTRAL_CONTENT_SCORE: f32 = 0.5;

/// Boost per same-category registration inside the recency window.
const RECENCY_BOOST_STEP: f32 = 0.1;
const MAX_RECENCY_BOOST: f32 = 0.3;

/// Scores how well a candidate's category matches the user's past
/// registrations, with a boost for recent same-category activity.
#[derive(Debug, Clone, Default)]
pub struct ContentScorer;

impl ContentScorer {
    pub fn score(&self, ctx: &RequestContext, event: &Event) -> ScoreOutcome {
        let history = match &ctx.history {
            SupportData::Ready(history) => history,
            SupportData::Faulted => return ScoreOutcome::Defaulted(NEUTRAL_CONTENT_SCORE),
        };

        if history.total == 0 {
            return ScoreOutcome::Computed(NEUTRAL_CONTENT_SCORE);
        }

        let same_category = history.counts.get(&event.category).copied().unwrap_or(0);
        let category_score = same_category as f32 / history.total as f32;

        let recent = history
            .recent_counts
            .get(&event.category)
            .copied()
            .unwrap_or(0);
        let recency_boost = (RECENCY_BOOST_STEP * recent as f32).min(MAX_RECENCY_BOOST);

        ScoreOutcome::Computed((category_score + recency_boost).min(1.0))
    }
}
