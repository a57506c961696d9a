//! Sports tournament organizer: library with models and business logic.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    compute_standings, generate_fixtures, schedule_fixtures, schedule_knockout_round_one,
    schedule_round_robin, tournament_standings,
};
pub use models::{
    slugify, unique_slug, Fixture, FixtureId, FixtureStatus, MatchSlot, SportType, StandingsRow,
    Team, TeamId, TeamStatus, Tournament, TournamentError, TournamentFormat, TournamentId,
    TournamentStatus,
};
