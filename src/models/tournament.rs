//! Tournament aggregate: configuration, lifecycle, teams, and fixtures.

use crate::models::fixture::{Fixture, FixtureId, FixtureStatus};
use crate::models::team::{Team, TeamId, TeamStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Too few distinct teams to generate a schedule (need at least 2).
    NotEnoughTeams { required: usize },
    /// The same team was passed to the scheduler more than once.
    DuplicateTeam(TeamId),
    /// Fixtures have already been generated for this tournament.
    FixturesAlreadyExist,
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName,
    /// Team name too short after trimming (need at least 2 characters).
    InvalidTeamName,
    /// Tournament name too short after trimming (need at least 3 characters).
    InvalidTournamentName,
    /// The tournament has reached its team capacity.
    TournamentFull { max_teams: u32 },
    /// Team not found in this tournament.
    TeamNotFound(TeamId),
    /// Fixture not found in this tournament.
    FixtureNotFound(FixtureId),
    /// The requested lifecycle move is not allowed from the current status.
    InvalidStatusTransition {
        from: TournamentStatus,
        to: TournamentStatus,
    },
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughTeams { required } => {
                write!(f, "Need at least {} approved teams to generate fixtures", required)
            }
            TournamentError::DuplicateTeam(_) => {
                write!(f, "A team appears more than once in the scheduling input")
            }
            TournamentError::FixturesAlreadyExist => {
                write!(f, "Fixtures already exist. Delete them first before regenerating.")
            }
            TournamentError::DuplicateTeamName => {
                write!(f, "A team with this name already exists in this tournament")
            }
            TournamentError::InvalidTeamName => write!(f, "Team name must be at least 2 characters"),
            TournamentError::InvalidTournamentName => {
                write!(f, "Tournament name must be at least 3 characters")
            }
            TournamentError::TournamentFull { max_teams } => {
                write!(f, "Tournament is full (max {} teams)", max_teams)
            }
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::FixtureNotFound(_) => write!(f, "Fixture not found"),
            TournamentError::InvalidStatusTransition { from, to } => {
                write!(f, "Cannot transition from {} to {}", from, to)
            }
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// How fixtures are generated for a tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentFormat {
    /// Every team plays every other team once (circle method).
    #[default]
    RoundRobin,
    /// Knockout bracket; only round 1 is generated, later rounds follow results.
    SingleElimination,
    /// Group stage then knockout. Scheduled identically to round-robin; group
    /// splits and advancement are managed by the organizer.
    GroupKnockout,
}

/// Sport being played. Affects labels only, never scheduling.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SportType {
    #[default]
    Football,
    Basketball,
    Volleyball,
    Netball,
    Rugby,
    Cricket,
    Athletics,
    Other,
}

/// Lifecycle of a tournament, from draft through completion.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStatus {
    #[default]
    Draft,
    RegistrationOpen,
    RegistrationClosed,
    InProgress,
    Completed,
    Cancelled,
}

impl TournamentStatus {
    /// Statuses an organizer may move to from this one. Completed and
    /// Cancelled are terminal.
    pub fn allowed_transitions(self) -> &'static [TournamentStatus] {
        use TournamentStatus::*;
        match self {
            Draft => &[RegistrationOpen, Cancelled],
            RegistrationOpen => &[RegistrationClosed, InProgress, Cancelled],
            RegistrationClosed => &[InProgress, Cancelled],
            InProgress => &[Completed, Cancelled],
            Completed | Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, next: TournamentStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TournamentStatus::Draft => "DRAFT",
            TournamentStatus::RegistrationOpen => "REGISTRATION_OPEN",
            TournamentStatus::RegistrationClosed => "REGISTRATION_CLOSED",
            TournamentStatus::InProgress => "IN_PROGRESS",
            TournamentStatus::Completed => "COMPLETED",
            TournamentStatus::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

/// Full tournament state: configuration, registered teams, and fixtures.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// URL-safe identifier for the public view (unique across the store).
    pub slug: String,
    pub description: Option<String>,
    pub sport: SportType,
    pub format: TournamentFormat,
    pub status: TournamentStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub registration_start: Option<DateTime<Utc>>,
    pub registration_end: Option<DateTime<Utc>>,
    /// Registration capacity.
    pub max_teams: u32,
    pub points_for_win: u32,
    pub points_for_draw: u32,
    pub points_for_loss: u32,
    pub venue: Option<String>,
    pub location: Option<String>,
    /// Registered teams, in registration order.
    pub teams: Vec<Team>,
    /// Generated fixtures, ordered by round then match number.
    pub fixtures: Vec<Fixture>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new draft tournament with standard 3/1/0 points and room for
    /// 16 teams. Callers adjust fields afterwards as needed.
    pub fn new(name: impl Into<String>, slug: impl Into<String>, format: TournamentFormat) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            slug: slug.into(),
            description: None,
            sport: SportType::default(),
            format,
            status: TournamentStatus::Draft,
            start_date: None,
            end_date: None,
            registration_start: None,
            registration_end: None,
            max_teams: 16,
            points_for_win: 3,
            points_for_draw: 1,
            points_for_loss: 0,
            venue: None,
            location: None,
            teams: Vec::new(),
            fixtures: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Tournament names must be at least 3 characters after trimming,
    /// counted in characters rather than bytes.
    pub fn validate_name(name: &str) -> Result<(), TournamentError> {
        if name.trim().chars().count() < 3 {
            return Err(TournamentError::InvalidTournamentName);
        }
        Ok(())
    }

    /// Teams currently approved to play, in registration order.
    pub fn approved_teams(&self) -> Vec<&Team> {
        self.teams.iter().filter(|t| t.is_approved()).collect()
    }

    pub fn get_team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn get_team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    pub fn get_fixture(&self, id: FixtureId) -> Option<&Fixture> {
        self.fixtures.iter().find(|x| x.id == id)
    }

    pub fn get_fixture_mut(&mut self, id: FixtureId) -> Option<&mut Fixture> {
        self.fixtures.iter_mut().find(|x| x.id == id)
    }

    /// Register a team. Names must be unique (case-insensitive) and at least
    /// 2 characters after trimming; capacity is bounded by `max_teams`.
    pub fn add_team(&mut self, name: impl Into<String>) -> Result<TeamId, TournamentError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.chars().count() < 2 {
            return Err(TournamentError::InvalidTeamName);
        }
        if self.teams.len() >= self.max_teams as usize {
            return Err(TournamentError::TournamentFull {
                max_teams: self.max_teams,
            });
        }
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName);
        }
        let team = Team::new(name_trimmed);
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Remove a team by id. Fixtures that reference it are left in place;
    /// standings skip results whose teams are no longer on the roster.
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        Ok(())
    }

    /// Approve or reject a registration.
    pub fn set_team_status(
        &mut self,
        team_id: TeamId,
        status: TeamStatus,
    ) -> Result<(), TournamentError> {
        let team = self
            .get_team_mut(team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        team.status = status;
        Ok(())
    }

    /// Move the tournament through its lifecycle; only the transitions in
    /// `TournamentStatus::allowed_transitions` are accepted.
    pub fn set_status(&mut self, next: TournamentStatus) -> Result<(), TournamentError> {
        if !self.status.can_transition_to(next) {
            return Err(TournamentError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Enter a final score: sets both scores and marks the fixture completed
    /// in one step.
    pub fn record_score(
        &mut self,
        fixture_id: FixtureId,
        home_score: u32,
        away_score: u32,
    ) -> Result<(), TournamentError> {
        let fixture = self
            .get_fixture_mut(fixture_id)
            .ok_or(TournamentError::FixtureNotFound(fixture_id))?;
        fixture.home_score = Some(home_score);
        fixture.away_score = Some(away_score);
        fixture.status = FixtureStatus::Completed;
        Ok(())
    }

    /// Set a fixture's lifecycle status without touching its score. Marking a
    /// fixture completed with no score entered keeps it out of standings.
    pub fn set_fixture_status(
        &mut self,
        fixture_id: FixtureId,
        status: FixtureStatus,
    ) -> Result<(), TournamentError> {
        let fixture = self
            .get_fixture_mut(fixture_id)
            .ok_or(TournamentError::FixtureNotFound(fixture_id))?;
        fixture.status = status;
        Ok(())
    }

    /// Delete all fixtures so a fresh schedule can be generated. Returns how
    /// many were removed.
    pub fn clear_fixtures(&mut self) -> usize {
        let removed = self.fixtures.len();
        self.fixtures.clear();
        removed
    }
}

/// URL-safe slug: lowercase, alphanumeric runs joined by single hyphens,
/// other punctuation dropped. Falls back to "tournament" for degenerate names.
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    for c in text.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if (c.is_whitespace() || c == '_' || c == '-')
            && !slug.is_empty()
            && !slug.ends_with('-')
        {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "tournament".to_string()
    } else {
        slug
    }
}

/// Slugify `name`, then append `-2`, `-3`, ... until `taken` no longer
/// reports a collision.
pub fn unique_slug<F>(name: &str, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let base = slugify(name);
    if !taken(&base) {
        return base;
    }
    let mut suffix = 2;
    loop {
        let candidate = format!("{}-{}", base, suffix);
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
