//! Hybrid event recommendation engine.
//!
//! Combines four weak signals (content match, collaborative overlap,
//! popularity, group affinity) into a single ranked list per user, and
//! separately surfaces events trending by recent registration activity.
//! Collaborator data stores are consumed through read-only traits; the
//! engine holds no mutable state between requests.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;
pub mod stores;
pub mod utils;

pub use config::{EngineConfig, ScoreWeights};
pub use engine::RecommendationEngine;
pub use error::{EngineError, Result};
pub use models::{
    Event, RegistrationRecord, RegistrationStatus, ScoreBreakdown, ScoredEvent, TrendingEvent,
    UserProfile,
};
pub use services::{CandidateSelector, CategoryFilter, HybridScorer, Ranker, TrendingAggregator};
