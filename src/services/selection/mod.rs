//! Candidate selection: the eligible event pool for one user.

use crate::models::{Event, UserProfile};
use crate::stores::{CatalogStore, EligibilityFilter};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

pub struct CandidateSelector {
    catalog: Arc<dyn CatalogStore>,
}

impl CandidateSelector {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    /// Build the candidate pool: open events the user holds no registration
    /// on (any status). The store may prefilter on the open-at predicates;
    /// they are re-applied here so eligibility never depends on the backend.
    ///
    /// An empty pool is a normal outcome, not an error. Pool ordering is the
    /// catalog's discovery order and is the tie-break for equal scores
    /// downstream.
    pub async fn eligible_candidates(
        &self,
        profile: &UserProfile,
        now: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        let pool = self
            .catalog
            .query_eligible(EligibilityFilter::open_at(now))
            .await?;

        let fetched = pool.len();
        let registered = profile.registered_event_ids();

        let candidates: Vec<Event> = pool
            .into_iter()
            .filter(|event| event.is_open_at(now) && !registered.contains(&event.id))
            .collect();

        info!(
            user_id = %profile.user_id,
            fetched = fetched,
            candidate_count = candidates.len(),
            "Candidate pool selected"
        );

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RegistrationRecord, RegistrationStatus};
    use crate::stores::MockCatalogStore;
    use chrono::Duration;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn open_event(now: DateTime<Utc>) -> Event {
        Event {
            id: Uuid::new_v4(),
            category: "Social".to_string(),
            group_id: Uuid::new_v4(),
            created_at: now - Duration::days(2),
            starts_at: now + Duration::days(5),
            registration_deadline: now + Duration::days(4),
            attendee_count: 0,
            capacity: None,
            is_active: true,
        }
    }

    fn profile_with(registered: &[Uuid]) -> UserProfile {
        let user_id = Uuid::new_v4();
        UserProfile {
            user_id,
            registrations: registered
                .iter()
                .map(|&event_id| RegistrationRecord {
                    user_id,
                    event_id,
                    status: RegistrationStatus::Cancelled,
                    registered_at: Utc::now(),
                })
                .collect(),
            memberships: HashSet::new(),
        }
    }

    #[tokio::test]
    async fn test_excludes_registered_and_ineligible() {
        let now = Utc::now();

        let open = open_event(now);
        let already_registered = open_event(now);
        let mut inactive = open_event(now);
        inactive.is_active = false;
        let mut past_deadline = open_event(now);
        past_deadline.registration_deadline = now - Duration::hours(1);
        let mut already_started = open_event(now);
        already_started.starts_at = now - Duration::hours(1);

        let pool = vec![
            open.clone(),
            already_registered.clone(),
            inactive,
            past_deadline,
            already_started,
        ];

        let mut catalog = MockCatalogStore::new();
        catalog
            .expect_query_eligible()
            .returning(move |_| Ok(pool.clone()));

        let selector = CandidateSelector::new(Arc::new(catalog));
        let profile = profile_with(&[already_registered.id]);

        let candidates = selector.eligible_candidates(&profile, now).await.unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, open.id);
    }

    #[tokio::test]
    async fn test_empty_pool_is_ok() {
        let mut catalog = MockCatalogStore::new();
        catalog.expect_query_eligible().returning(|_| Ok(vec![]));

        let selector = CandidateSelector::new(Arc::new(catalog));
        let profile = profile_with(&[]);

        let candidates = selector
            .eligible_candidates(&profile, Utc::now())
            .await
            .unwrap();
        assert!(candidates.is_empty());
    }
}
