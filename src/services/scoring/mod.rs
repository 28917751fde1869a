//! Hybrid scoring: four independent component scorers evaluated as a pure
//! mapping over the candidate pool.

pub mod affinity;
pub mod collaborative;
pub mod content;
pub mod context;
pub mod popularity;

pub use affinity::AffinityScorer;
pub use collaborative::CollaborativeScorer;
pub use content::ContentScorer;
pub use context::{CategoryHistory, NeighborIndex, RequestContext, SupportData};
pub use popularity::PopularityScorer;

use crate::models::{Event, ScoreBreakdown};
use std::sync::Arc;
use tracing::{debug, error};

/// How a component arrived at its score: computed from data, or substituted
/// with its neutral default after an absorbed fault. Either way the value is
/// in [0, 1] and aggregation proceeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreOutcome {
    Computed(f32),
    Defaulted(f32),
}

impl ScoreOutcome {
    pub fn value(&self) -> f32 {
        match *self {
            ScoreOutcome::Computed(v) | ScoreOutcome::Defaulted(v) => v,
        }
    }
}

/// Candidate pools larger than this are scored across spawned tasks.
const PARALLEL_CHUNK_SIZE: usize = 64;

/// Evaluates the four component scorers per candidate. Scorers are pure
/// functions of (request context, event); the pool is scored as an
/// order-preserving map, chunked across tasks when it is large enough to
/// matter.
#[derive(Debug, Clone, Default)]
pub struct HybridScorer {
    content: ContentScorer,
    collaborative: CollaborativeScorer,
    popularity: PopularityScorer,
    affinity: AffinityScorer,
}

impl HybridScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score_event(&self, ctx: &RequestContext, event: &Event) -> ScoreBreakdown {
        let breakdown = ScoreBreakdown {
            content: self.content.score(ctx, event).value(),
            collaborative: self.collaborative.score(ctx, event).value(),
            popularity: self.popularity.score(ctx, event).value(),
            affinity: self.affinity.score(ctx, event).value(),
        };

        debug!(
            event_id = %event.id,
            content = breakdown.content,
            collaborative = breakdown.collaborative,
            popularity = breakdown.popularity,
            affinity = breakdown.affinity,
            "Component scores computed"
        );

        breakdown
    }

    /// Score the whole pool, preserving its order. Context is shared
    /// read-only across tasks; there is no cross-candidate state.
    pub async fn score_all(
        &self,
        ctx: Arc<RequestContext>,
        candidates: Vec<Event>,
    ) -> Vec<(Event, ScoreBreakdown)> {
        if candidates.len() <= PARALLEL_CHUNK_SIZE {
            return self.score_chunk(&ctx, candidates);
        }

        let handles: Vec<_> = candidates
            .chunks(PARALLEL_CHUNK_SIZE)
            .map(|chunk| {
                let scorer = self.clone();
                let ctx = Arc::clone(&ctx);
                let chunk = chunk.to_vec();
                tokio::spawn(async move { scorer.score_chunk(&ctx, chunk) })
            })
            .collect();

        let mut scored = Vec::new();
        for result in futures::future::join_all(handles).await {
            match result {
                Ok(mut chunk_scores) => scored.append(&mut chunk_scores),
                Err(e) => {
                    // Only reachable if a scoring task panicked
                    error!(error = %e, "Scoring task failed, dropping its chunk");
                }
            }
        }
        scored
    }

    fn score_chunk(
        &self,
        ctx: &RequestContext,
        candidates: Vec<Event>,
    ) -> Vec<(Event, ScoreBreakdown)> {
        candidates
            .into_iter()
            .map(|event| {
                let breakdown = self.score_event(ctx, &event);
                (event, breakdown)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;
    use chrono::{Duration, Utc};
    use std::collections::HashSet;
    use uuid::Uuid;

    fn new_user_ctx() -> RequestContext {
        RequestContext {
            profile: UserProfile {
                user_id: Uuid::new_v4(),
                registrations: vec![],
                memberships: HashSet::new(),
            },
            now: Utc::now(),
            history: SupportData::Ready(Default::default()),
            neighbors: SupportData::Ready(Default::default()),
        }
    }

    fn quiet_event(now: chrono::DateTime<chrono::Utc>) -> Event {
        Event {
            id: Uuid::new_v4(),
            category: "Tech".to_string(),
            group_id: Uuid::new_v4(),
            created_at: now - Duration::days(30),
            starts_at: now + Duration::days(30),
            registration_deadline: now + Duration::days(25),
            attendee_count: 0,
            capacity: Some(100),
            is_active: true,
        }
    }

    #[test]
    fn test_new_user_gets_neutral_breakdown() {
        let ctx = new_user_ctx();
        let event = quiet_event(ctx.now);

        let breakdown = HybridScorer::new().score_event(&ctx, &event);
        assert_eq!(breakdown.content, 0.5);
        assert_eq!(breakdown.collaborative, 0.5);
        assert_eq!(breakdown.affinity, 0.3);
        assert_eq!(breakdown.popularity, 0.0);
    }

    #[test]
    fn test_all_components_in_unit_interval() {
        let ctx = new_user_ctx();
        let mut event = quiet_event(ctx.now);
        event.attendee_count = 500;
        event.capacity = Some(10);
        event.created_at = ctx.now;
        event.starts_at = ctx.now + Duration::days(1);

        let breakdown = HybridScorer::new().score_event(&ctx, &event);
        for component in [
            breakdown.content,
            breakdown.collaborative,
            breakdown.popularity,
            breakdown.affinity,
        ] {
            assert!((0.0..=1.0).contains(&component));
        }
    }

    #[test]
    fn test_score_all_preserves_pool_order() {
        tokio_test::block_on(async {
            let ctx = Arc::new(new_user_ctx());
            let now = ctx.now;

            // Enough candidates to force the chunked path
            let candidates: Vec<Event> = (0..200).map(|_| quiet_event(now)).collect();
            let expected_ids: Vec<Uuid> = candidates.iter().map(|e| e.id).collect();

            let scored = HybridScorer::new().score_all(ctx, candidates).await;
            let scored_ids: Vec<Uuid> = scored.iter().map(|(e, _)| e.id).collect();

            assert_eq!(scored_ids, expected_ids);
        });
    }

    #[test]
    fn test_score_outcome_value() {
        assert_eq!(ScoreOutcome::Computed(0.7).value(), 0.7);
        assert_eq!(ScoreOutcome::Defaulted(0.5).value(), 0.5);
    }
}
