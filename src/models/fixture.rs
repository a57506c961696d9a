//! Fixture (scheduled match), MatchSlot (scheduler output), and FixtureStatus.

use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fixture.
pub type FixtureId = Uuid;

/// Lifecycle of a fixture. Only completed fixtures count towards standings.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FixtureStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Postponed,
    Cancelled,
}

/// One pairing produced by the fixture scheduler: who plays whom, in which
/// round, at which position within the round. Rounds and match numbers are
/// 1-indexed; match numbers are unique within a round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchSlot {
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub round: u32,
    pub match_number: u32,
}

/// A scheduled match: pairing plus score and lifecycle state.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub round: u32,
    pub match_number: u32,
    /// None until a score has been entered.
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub status: FixtureStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub venue: Option<String>,
}

impl Fixture {
    /// Persist a scheduler slot as a fresh fixture: scheduled, no score.
    pub fn from_slot(slot: MatchSlot) -> Self {
        Self {
            id: Uuid::new_v4(),
            home_team: slot.home_team,
            away_team: slot.away_team,
            round: slot.round,
            match_number: slot.match_number,
            home_score: None,
            away_score: None,
            status: FixtureStatus::Scheduled,
            scheduled_at: None,
            venue: None,
        }
    }

    /// Whether this fixture's result is final (full time).
    pub fn is_final(&self) -> bool {
        self.status == FixtureStatus::Completed
    }

    /// Final score as (home goals, away goals). None unless the fixture is
    /// completed AND both scores were entered - a completed fixture missing a
    /// score contributes nothing to standings.
    pub fn result(&self) -> Option<(u32, u32)> {
        if !self.is_final() {
            return None;
        }
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }
}
