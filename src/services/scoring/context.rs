//! Per-request support data for the component scorers.
//!
//! The category history and the neighbor index depend only on the user, not
//! on any candidate, so both are fetched exactly once per request and shared
//! read-only across every candidate evaluation. A failed support fetch marks
//! that component `Faulted`; its scorer then substitutes the neutral default
//! for the whole request instead of failing it.

use crate::models::{RegistrationStatus, UserProfile};
use crate::stores::{CatalogStore, RegistrationFilter, RegistrationStore};
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};
use uuid::Uuid;

/// Maximum neighbors considered for collaborative scoring.
const MAX_NEIGHBORS: usize = 50;

/// Support data for one score component: either ready, or faulted during
/// fetch and absorbed.
#[derive(Debug, Clone)]
pub enum SupportData<T> {
    Ready(T),
    Faulted,
}

/// Category-frequency distribution of the user's engaged registrations.
#[derive(Debug, Clone, Default)]
pub struct CategoryHistory {
    /// Engaged registrations successfully joined with the catalog.
    pub total: usize,
    /// Registrations per category.
    pub counts: HashMap<String, usize>,
    /// Registrations per category inside the recency window.
    pub recent_counts: HashMap<String, usize>,
}

/// Neighbor overlap index: how many of the user's top neighbors hold an
/// engaged registration on each event.
#[derive(Debug, Clone, Default)]
pub struct NeighborIndex {
    pub neighbor_count: usize,
    pub event_counts: HashMap<Uuid, usize>,
}

/// Immutable snapshot scoped to one recommendation request.
#[derive(Debug)]
pub struct RequestContext {
    pub profile: UserProfile,
    pub now: DateTime<Utc>,
    pub history: SupportData<CategoryHistory>,
    pub neighbors: SupportData<NeighborIndex>,
}

impl RequestContext {
    /// Fetch and index all support data. History and neighbor fetches run
    /// concurrently; either one failing degrades only its own component.
    pub async fn build(
        profile: UserProfile,
        now: DateTime<Utc>,
        recency_window_days: i64,
        catalog: &dyn CatalogStore,
        registrations: &dyn RegistrationStore,
    ) -> Self {
        let recency_cutoff = now - Duration::days(recency_window_days);

        let (history, neighbors) = tokio::join!(
            build_category_history(&profile, recency_cutoff, catalog),
            build_neighbor_index(&profile, registrations),
        );

        Self {
            profile,
            now,
            history,
            neighbors,
        }
    }
}

async fn build_category_history(
    profile: &UserProfile,
    recency_cutoff: DateTime<Utc>,
    catalog: &dyn CatalogStore,
) -> SupportData<CategoryHistory> {
    let engaged: Vec<_> = profile.engaged_registrations().collect();
    if engaged.is_empty() {
        return SupportData::Ready(CategoryHistory::default());
    }

    let ids: Vec<Uuid> = engaged
        .iter()
        .map(|r| r.event_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let events = match catalog.query_by_ids(ids).await {
        Ok(events) => events,
        Err(e) => {
            warn!(
                user_id = %profile.user_id,
                error = %e,
                "Category history fetch failed, content scoring will default"
            );
            return SupportData::Faulted;
        }
    };

    let categories: HashMap<Uuid, &str> = events
        .iter()
        .map(|e| (e.id, e.category.as_str()))
        .collect();

    let mut history = CategoryHistory::default();
    for record in engaged {
        // Records whose event no longer exists in the catalog carry no
        // category signal and are skipped.
        let Some(&category) = categories.get(&record.event_id) else {
            continue;
        };
        history.total += 1;
        *history.counts.entry(category.to_string()).or_insert(0) += 1;
        if record.registered_at >= recency_cutoff {
            *history.recent_counts.entry(category.to_string()).or_insert(0) += 1;
        }
    }

    debug!(
        user_id = %profile.user_id,
        history_total = history.total,
        category_count = history.counts.len(),
        "Category history built"
    );

    SupportData::Ready(history)
}

async fn build_neighbor_index(
    profile: &UserProfile,
    registrations: &dyn RegistrationStore,
) -> SupportData<NeighborIndex> {
    let own_events: Vec<Uuid> = profile
        .engaged_registrations()
        .map(|r| r.event_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    if own_events.is_empty() {
        return SupportData::Ready(NeighborIndex::default());
    }

    let engaged_statuses = vec![RegistrationStatus::Registered, RegistrationStatus::Attended];

    // Everyone else engaged with any of the user's events, ranked by how many
    // events they share with the user.
    let shared = match registrations
        .find(RegistrationFilter {
            event_ids: Some(own_events),
            user_ids: None,
            statuses: engaged_statuses.clone(),
        })
        .await
    {
        Ok(records) => records,
        Err(e) => {
            warn!(
                user_id = %profile.user_id,
                error = %e,
                "Neighbor discovery failed, collaborative scoring will default"
            );
            return SupportData::Faulted;
        }
    };

    let mut overlaps: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
    for record in shared {
        if record.user_id == profile.user_id {
            continue;
        }
        overlaps
            .entry(record.user_id)
            .or_default()
            .insert(record.event_id);
    }

    if overlaps.is_empty() {
        return SupportData::Ready(NeighborIndex::default());
    }

    let mut ranked: Vec<(Uuid, usize)> = overlaps
        .into_iter()
        .map(|(user_id, events)| (user_id, events.len()))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(MAX_NEIGHBORS);

    let neighbor_ids: Vec<Uuid> = ranked.iter().map(|(id, _)| *id).collect();
    let neighbor_count = neighbor_ids.len();

    // All engaged registrations of the top neighbors, indexed by event.
    let neighbor_records = match registrations
        .find(RegistrationFilter {
            user_ids: Some(neighbor_ids),
            event_ids: None,
            statuses: engaged_statuses,
        })
        .await
    {
        Ok(records) => records,
        Err(e) => {
            warn!(
                user_id = %profile.user_id,
                error = %e,
                "Neighbor registration fetch failed, collaborative scoring will default"
            );
            return SupportData::Faulted;
        }
    };

    let mut per_event: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
    for record in neighbor_records {
        per_event
            .entry(record.event_id)
            .or_default()
            .insert(record.user_id);
    }

    let event_counts: HashMap<Uuid, usize> = per_event
        .into_iter()
        .map(|(event_id, users)| (event_id, users.len()))
        .collect();

    debug!(
        user_id = %profile.user_id,
        neighbor_count = neighbor_count,
        indexed_events = event_counts.len(),
        "Neighbor index built"
    );

    SupportData::Ready(NeighborIndex {
        neighbor_count,
        event_counts,
    })
}
