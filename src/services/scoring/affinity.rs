use super::context::RequestContext;
use super::ScoreOutcome;
use crate::models::Event;

/// Score when the user belongs to no groups at all.
pub const NO_MEMBERSHIP_SCORE: f32 = 0.3;

/// Score when the candidate is owned by one of the user's groups.
const OWN_GROUP_SCORE: f32 = 1.0;

/// Score when the user has groups but the candidate's owner is not one.
const OTHER_GROUP_SCORE: f32 = 0.4;

/// Scores a candidate by exact group membership: events from the user's own
/// groups rank far ahead of the rest.
///
/// Generalizing to category-level group similarity (users in "nearby" groups
/// getting partial credit) is a known extension point; only exact membership
/// is implemented.
#[derive(Debug, Clone, Default)]
pub struct AffinityScorer;

impl AffinityScorer {
    pub fn score(&self, ctx: &RequestContext, event: &Event) -> ScoreOutcome {
        let memberships = &ctx.profile.memberships;

        let score = if memberships.is_empty() {
            NO_MEMBERSHIP_SCORE
        } else if memberships.contains(&event.group_id) {
            OWN_GROUP_SCORE
        } else {
            OTHER_GROUP_SCORE
        };

        ScoreOutcome::Computed(score)
    }
}
