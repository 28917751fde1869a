//! Trending: a separate pipeline over recent registration activity, with no
//! scoring involved. Windowed count → sort → truncate → catalog join →
//! eligibility filter.

use crate::models::{Event, RegistrationStatus, TrendingEvent};
use crate::stores::{ActivityWindow, CatalogStore, RegistrationStore};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct TrendingAggregator {
    catalog: Arc<dyn CatalogStore>,
    registrations: Arc<dyn RegistrationStore>,
    window_days: i64,
}

impl TrendingAggregator {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        registrations: Arc<dyn RegistrationStore>,
        window_days: i64,
    ) -> Self {
        Self {
            catalog,
            registrations,
            window_days,
        }
    }

    /// Top events by registration count over the trending window. The count
    /// list is truncated to `limit` before the catalog join, and joined
    /// events that are closed at `now` are dropped afterwards, so a hot but
    /// ineligible event shrinks the result rather than being replaced.
    pub async fn trending_events(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<TrendingEvent>> {
        let window = ActivityWindow {
            since: now - Duration::days(self.window_days),
            statuses: vec![RegistrationStatus::Registered, RegistrationStatus::Attended],
        };

        let mut counts = self.registrations.aggregate_by_window(window).await?;
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(limit);

        if counts.is_empty() {
            info!("No trending activity in window");
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = counts.iter().map(|(id, _)| *id).collect();
        let events: HashMap<Uuid, Event> = self
            .catalog
            .query_by_ids(ids)
            .await?
            .into_iter()
            .map(|e| (e.id, e))
            .collect();

        let counted = counts.len();
        let trending: Vec<TrendingEvent> = counts
            .into_iter()
            .filter_map(|(event_id, count)| {
                events
                    .get(&event_id)
                    .filter(|event| event.is_open_at(now))
                    .map(|event| TrendingEvent {
                        event: event.clone(),
                        recent_registrations: count,
                    })
            })
            .collect();

        info!(
            window_days = self.window_days,
            counted = counted,
            trending_count = trending.len(),
            "Trending aggregation completed"
        );

        Ok(trending)
    }
}
