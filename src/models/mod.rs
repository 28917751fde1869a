use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Registration lifecycle states as stored by the registration service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Registered,
    Attended,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Attended => "attended",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }

    /// Statuses that count as real engagement with an event.
    pub fn is_engaged(&self) -> bool {
        matches!(
            self,
            RegistrationStatus::Registered | RegistrationStatus::Attended
        )
    }
}

/// One (user, event) registration. The store guarantees at most one record
/// per pair; the engine assumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
}

/// Immutable per-request snapshot of a user: their own registrations (any
/// status) and the groups they belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub registrations: Vec<RegistrationRecord>,
    pub memberships: HashSet<Uuid>,
}

impl UserProfile {
    /// Event ids the user holds any registration on, regardless of status.
    /// Used for candidate exclusion.
    pub fn registered_event_ids(&self) -> HashSet<Uuid> {
        self.registrations.iter().map(|r| r.event_id).collect()
    }

    /// Records that count as engagement (registered or attended).
    pub fn engaged_registrations(&self) -> impl Iterator<Item = &RegistrationRecord> {
        self.registrations.iter().filter(|r| r.status.is_engaged())
    }
}

/// A catalog event as seen by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub category: String,
    pub group_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub starts_at: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    pub attendee_count: u32,
    pub capacity: Option<u32>,
    pub is_active: bool,
}

impl Event {
    /// Whether the event is still open for recommendation at `now`:
    /// active, not yet started, and the registration window has not closed.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.starts_at >= now && self.registration_deadline >= now
    }
}

/// Per-component score breakdown, retained on every ranked result so callers
/// can see why an event placed where it did.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub content: f32,
    pub collaborative: f32,
    pub popularity: f32,
    pub affinity: f32,
}

/// An event together with its hybrid score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredEvent {
    pub event: Event,
    pub total: f32,
    pub breakdown: ScoreBreakdown,
}

/// An event together with its registration count over the trending window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingEvent {
    pub event: Event,
    pub recent_registrations: u64,
}
