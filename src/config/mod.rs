use serde::Deserialize;
use std::env;

/// Fixed weights for the hybrid score. Must sum to at most 1.0 so that the
/// total stays inside [0, 1] when every component is in [0, 1].
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreWeights {
    pub content: f32,
    pub collaborative: f32,
    pub popularity: f32,
    pub affinity: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            content: 0.3,
            collaborative: 0.3,
            popularity: 0.2,
            affinity: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub weights: ScoreWeights,
    /// Result size when the caller does not supply one (personalized and
    /// trending paths).
    pub default_limit: usize,
    /// Lookback for the trending registration count, in days.
    pub trending_window_days: i64,
    /// Lookback for the content recency boost, in days.
    pub recency_window_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            default_limit: 10,
            trending_window_days: 7,
            recency_window_days: 30,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = EngineConfig::default();
        let default_weights = ScoreWeights::default();

        EngineConfig {
            weights: ScoreWeights {
                content: env_f32("CONTENT_WEIGHT", default_weights.content),
                collaborative: env_f32("COLLABORATIVE_WEIGHT", default_weights.collaborative),
                popularity: env_f32("POPULARITY_WEIGHT", default_weights.popularity),
                affinity: env_f32("AFFINITY_WEIGHT", default_weights.affinity),
            },
            default_limit: env::var("RECOMMENDATION_LIMIT")
                .unwrap_or_else(|_| defaults.default_limit.to_string())
                .parse()
                .expect("RECOMMENDATION_LIMIT must be a valid usize"),
            trending_window_days: env::var("TRENDING_WINDOW_DAYS")
                .unwrap_or_else(|_| defaults.trending_window_days.to_string())
                .parse()
                .expect("TRENDING_WINDOW_DAYS must be a valid i64"),
            recency_window_days: env::var("RECENCY_WINDOW_DAYS")
                .unwrap_or_else(|_| defaults.recency_window_days.to_string())
                .parse()
                .expect("RECENCY_WINDOW_DAYS must be a valid i64"),
        }
    }

    /// Reject configurations that could push the total score out of [0, 1]
    /// or make the windows meaningless.
    pub fn validate(&self) -> Result<(), String> {
        let w = &self.weights;
        for (name, value) in [
            ("content", w.content),
            ("collaborative", w.collaborative),
            ("popularity", w.popularity),
            ("affinity", w.affinity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} weight must be in [0, 1], got {}", name, value));
            }
        }

        let sum = w.content + w.collaborative + w.popularity + w.affinity;
        if sum > 1.0 + f32::EPSILON {
            return Err(format!("weights must sum to at most 1.0, got {}", sum));
        }

        if self.trending_window_days <= 0 || self.recency_window_days <= 0 {
            return Err("window lengths must be positive".to_string());
        }

        Ok(())
    }
}

fn env_f32(key: &str, default: f32) -> f32 {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or_else(|_| panic!("{} must be a valid f32", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.trending_window_days, 7);
        assert_eq!(config.recency_window_days, 30);

        let sum = config.weights.content
            + config.weights.collaborative
            + config.weights.popularity
            + config.weights.affinity;
        assert!((sum - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_validate_rejects_heavy_weights() {
        let mut config = EngineConfig::default();
        config.weights.content = 0.9;
        assert!(config.validate().is_err());

        config.weights.content = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_windows() {
        let mut config = EngineConfig::default();
        config.trending_window_days = 0;
        assert!(config.validate().is_err());
    }
}
