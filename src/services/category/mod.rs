//! Category browsing: a filtered, recency-sorted listing with no scoring.

use crate::models::{Event, UserProfile};
use crate::stores::{CatalogStore, EligibilityFilter};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

pub struct CategoryFilter {
    catalog: Arc<dyn CatalogStore>,
}

impl CategoryFilter {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    /// Open events in `category` the user is not registered for, newest
    /// first by creation time, truncated to `limit`.
    pub async fn events_in_category(
        &self,
        profile: &UserProfile,
        category: &str,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Event>> {
        let pool = self
            .catalog
            .query_eligible(EligibilityFilter::with_category(now, category))
            .await?;

        let registered = profile.registered_event_ids();

        let mut events: Vec<Event> = pool
            .into_iter()
            .filter(|event| {
                event.is_open_at(now)
                    && event.category == category
                    && !registered.contains(&event.id)
            })
            .collect();

        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events.truncate(limit);

        info!(
            user_id = %profile.user_id,
            category = category,
            result_count = events.len(),
            "Category listing completed"
        );

        Ok(events)
    }
}
