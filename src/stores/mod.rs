//! Read-only collaborator traits the engine consumes. Concrete backends
//! (SQL, cache, remote services) live outside this crate; tests drive the
//! engine through mocks and in-memory fixtures.

use crate::models::{Event, RegistrationRecord, RegistrationStatus, UserProfile};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

/// Filter for catalog queries. `now` bounds the schedule/deadline predicates;
/// `category` narrows to a single tag when set.
#[derive(Debug, Clone)]
pub struct EligibilityFilter {
    pub now: DateTime<Utc>,
    pub category: Option<String>,
}

impl EligibilityFilter {
    pub fn open_at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            category: None,
        }
    }

    pub fn with_category(now: DateTime<Utc>, category: &str) -> Self {
        Self {
            now,
            category: Some(category.to_string()),
        }
    }
}

/// Filter for registration lookups. `None` on an axis means unrestricted.
#[derive(Debug, Clone, Default)]
pub struct RegistrationFilter {
    pub user_ids: Option<Vec<Uuid>>,
    pub event_ids: Option<Vec<Uuid>>,
    pub statuses: Vec<RegistrationStatus>,
}

/// Time window for registration-count aggregation.
#[derive(Debug, Clone)]
pub struct ActivityWindow {
    pub since: DateTime<Utc>,
    pub statuses: Vec<RegistrationStatus>,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a user snapshot. `Ok(None)` means the user does not exist;
    /// `Err` means the store itself is unavailable.
    async fn get(&self, user_id: Uuid) -> Result<Option<UserProfile>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Events matching the filter. Backends may prefilter on the open-at
    /// predicates; the engine re-applies them either way.
    async fn query_eligible(&self, filter: EligibilityFilter) -> Result<Vec<Event>>;

    /// Batch lookup by id. Unknown ids are silently absent from the result.
    async fn query_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<Event>>;

    /// Distinct category tags among events matching the filter.
    async fn distinct_categories(&self, filter: EligibilityFilter) -> Result<Vec<String>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn find(&self, filter: RegistrationFilter) -> Result<Vec<RegistrationRecord>>;

    /// Registration counts per event, restricted to the window's statuses and
    /// to records with `registered_at >= since`.
    async fn aggregate_by_window(&self, window: ActivityWindow) -> Result<Vec<(Uuid, u64)>>;
}
