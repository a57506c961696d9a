//! StandingsRow: one team's line in the league table (for API / display).

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// One row of the league table. `goal_difference` is always recomputed from
/// goals for/against, never tracked independently. It is `i64` so the
/// subtraction is exact for any pair of `u32` totals.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl StandingsRow {
    /// Zeroed row for a team that has not completed any match yet.
    pub fn new(team_id: TeamId, team_name: impl Into<String>) -> Self {
        Self {
            team_id,
            team_name: team_name.into(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }
}
