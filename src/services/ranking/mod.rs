//! Aggregation and ranking: fixed-weight linear combination of the four
//! component scores, stable descending sort, truncation.

use crate::config::ScoreWeights;
use crate::models::{Event, ScoreBreakdown, ScoredEvent};
use crate::utils::unit_interval;
use tracing::info;

pub struct Ranker {
    weights: ScoreWeights,
}

impl Ranker {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Weighted sum of the component scores. With the default weights
    /// (0.3, 0.3, 0.2, 0.2) and components in [0, 1], the total is in [0, 1];
    /// the clamp guards against misconfigured weights.
    pub fn total(&self, breakdown: &ScoreBreakdown) -> f32 {
        unit_interval(
            self.weights.content * breakdown.content
                + self.weights.collaborative * breakdown.collaborative
                + self.weights.popularity * breakdown.popularity
                + self.weights.affinity * breakdown.affinity,
        )
    }

    /// Sort by total descending and take the top `limit`. The sort is stable,
    /// so equal totals keep the candidate pool's discovery order; no other
    /// tie-break is applied.
    pub fn rank(&self, scored: Vec<(Event, ScoreBreakdown)>, limit: usize) -> Vec<ScoredEvent> {
        let mut ranked: Vec<ScoredEvent> = scored
            .into_iter()
            .map(|(event, breakdown)| ScoredEvent {
                total: self.total(&breakdown),
                event,
                breakdown,
            })
            .collect();

        // Note: NaN totals are treated as equal and left in place
        ranked.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(limit);

        info!(
            result_count = ranked.len(),
            top_score = ranked.first().map(|r| r.total),
            "Ranking completed"
        );

        ranked
    }
}
