//! Team data structures: the participants of a tournament.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in fixtures and standings).
pub type TeamId = Uuid;

/// Registration status of a team. Only approved teams are scheduled and ranked.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamStatus {
    Pending,
    #[default]
    Approved,
    Rejected,
}

/// A team registered to a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Abbreviation for tight displays (e.g. "NTR").
    pub short_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub status: TeamStatus,
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team with the given name. Organizer-added teams start approved.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            short_name: None,
            contact_email: None,
            contact_phone: None,
            status: TeamStatus::Approved,
            created_at: Utc::now(),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == TeamStatus::Approved
    }
}
