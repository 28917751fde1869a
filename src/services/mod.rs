pub mod category;
pub mod ranking;
pub mod scoring;
pub mod selection;
pub mod trending;

pub use category::CategoryFilter;
pub use ranking::Ranker;
pub use scoring::HybridScorer;
pub use selection::CandidateSelector;
pub use trending::TrendingAggregator;
