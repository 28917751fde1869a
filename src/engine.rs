//! The engine façade: composes selection, scoring, ranking, trending and
//! category pipelines behind the operations the API layer calls.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::models::{Event, ScoredEvent, TrendingEvent, UserProfile};
use crate::services::scoring::RequestContext;
use crate::services::{
    CandidateSelector, CategoryFilter, HybridScorer, Ranker, TrendingAggregator,
};
use crate::stores::{CatalogStore, EligibilityFilter, ProfileStore, RegistrationStore};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct RecommendationEngine {
    config: EngineConfig,
    profiles: Arc<dyn ProfileStore>,
    catalog: Arc<dyn CatalogStore>,
    registrations: Arc<dyn RegistrationStore>,
    selector: CandidateSelector,
    scorer: HybridScorer,
    ranker: Ranker,
    trending: TrendingAggregator,
    category: CategoryFilter,
}

impl RecommendationEngine {
    pub fn new(
        config: EngineConfig,
        profiles: Arc<dyn ProfileStore>,
        catalog: Arc<dyn CatalogStore>,
        registrations: Arc<dyn RegistrationStore>,
    ) -> Self {
        let selector = CandidateSelector::new(Arc::clone(&catalog));
        let ranker = Ranker::new(config.weights.clone());
        let trending = TrendingAggregator::new(
            Arc::clone(&catalog),
            Arc::clone(&registrations),
            config.trending_window_days,
        );
        let category = CategoryFilter::new(Arc::clone(&catalog));

        Self {
            config,
            profiles,
            catalog,
            registrations,
            selector,
            scorer: HybridScorer::new(),
            ranker,
            trending,
            category,
        }
    }

    /// Personalized recommendations: candidate selection, per-request
    /// support-data build, hybrid scoring, weighted ranking.
    ///
    /// Fails only for a missing user or a store outage before scoring;
    /// component-level faults degrade to neutral scores instead.
    pub async fn get_recommendations(
        &self,
        user_id: Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<ScoredEvent>> {
        let now = Utc::now();
        let profile = self.fetch_profile(user_id).await?;

        let candidates = self.selector.eligible_candidates(&profile, now).await?;
        if candidates.is_empty() {
            info!(user_id = %user_id, "No eligible candidates");
            return Ok(Vec::new());
        }

        let ctx = Arc::new(
            RequestContext::build(
                profile,
                now,
                self.config.recency_window_days,
                &*self.catalog,
                &*self.registrations,
            )
            .await,
        );

        let scored = self.scorer.score_all(ctx, candidates).await;
        let limit = limit.unwrap_or(self.config.default_limit);

        Ok(self.ranker.rank(scored, limit))
    }

    /// Events trending by registration activity in the configured window.
    pub async fn get_trending_events(&self, limit: Option<usize>) -> Result<Vec<TrendingEvent>> {
        let limit = limit.unwrap_or(self.config.default_limit);
        let trending = self.trending.trending_events(Utc::now(), limit).await?;
        Ok(trending)
    }

    /// Open events in one category the user is not registered for, newest
    /// first. No scoring.
    pub async fn get_category_recommendations(
        &self,
        user_id: Uuid,
        category: &str,
        limit: usize,
    ) -> Result<Vec<Event>> {
        let now = Utc::now();
        let profile = self.fetch_profile(user_id).await?;
        let events = self
            .category
            .events_in_category(&profile, category, now, limit)
            .await?;
        Ok(events)
    }

    /// Distinct category tags among currently-open events, for the category
    /// browser. Plain passthrough.
    pub async fn list_categories(&self) -> Result<Vec<String>> {
        let categories = self
            .catalog
            .distinct_categories(EligibilityFilter::open_at(Utc::now()))
            .await?;
        Ok(categories)
    }

    async fn fetch_profile(&self, user_id: Uuid) -> Result<UserProfile> {
        self.profiles
            .get(user_id)
            .await?
            .ok_or(EngineError::UserNotFound(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::{MockCatalogStore, MockProfileStore, MockRegistrationStore};
    use anyhow::anyhow;
    use std::collections::HashSet;

    fn engine_with(
        profiles: MockProfileStore,
        catalog: MockCatalogStore,
        registrations: MockRegistrationStore,
    ) -> RecommendationEngine {
        RecommendationEngine::new(
            EngineConfig::default(),
            Arc::new(profiles),
            Arc::new(catalog),
            Arc::new(registrations),
        )
    }

    #[tokio::test]
    async fn test_unknown_user_fails_request() {
        let mut profiles = MockProfileStore::new();
        profiles.expect_get().returning(|_| Ok(None));

        let engine = engine_with(
            profiles,
            MockCatalogStore::new(),
            MockRegistrationStore::new(),
        );

        let result = engine.get_recommendations(Uuid::new_v4(), None).await;
        assert!(matches!(result, Err(EngineError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_profile_store_outage_fails_request() {
        let mut profiles = MockProfileStore::new();
        profiles
            .expect_get()
            .returning(|_| Err(anyhow!("profile store down")));

        let engine = engine_with(
            profiles,
            MockCatalogStore::new(),
            MockRegistrationStore::new(),
        );

        let result = engine.get_recommendations(Uuid::new_v4(), None).await;
        assert!(matches!(result, Err(EngineError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_empty_pool_returns_empty_list() {
        let mut profiles = MockProfileStore::new();
        profiles.expect_get().returning(|user_id| {
            Ok(Some(UserProfile {
                user_id,
                registrations: vec![],
                memberships: HashSet::new(),
            }))
        });

        let mut catalog = MockCatalogStore::new();
        catalog.expect_query_eligible().returning(|_| Ok(vec![]));

        let engine = engine_with(profiles, catalog, MockRegistrationStore::new());

        let recommendations = engine
            .get_recommendations(Uuid::new_v4(), None)
            .await
            .unwrap();
        assert!(recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_list_categories_passthrough() {
        let mut catalog = MockCatalogStore::new();
        catalog
            .expect_distinct_categories()
            .returning(|_| Ok(vec!["Workshop".to_string(), "Social".to_string()]));

        let engine = engine_with(
            MockProfileStore::new(),
            catalog,
            MockRegistrationStore::new(),
        );

        let categories = engine.list_categories().await.unwrap();
        assert_eq!(categories, vec!["Workshop", "Social"]);
    }
}
