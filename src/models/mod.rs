//! Data structures for the tournament organizer: teams, fixtures, standings.

mod fixture;
mod standings;
mod team;
mod tournament;

pub use fixture::{Fixture, FixtureId, FixtureStatus, MatchSlot};
pub use standings::StandingsRow;
pub use team::{Team, TeamId, TeamStatus};
pub use tournament::{
    slugify, unique_slug, SportType, Tournament, TournamentError, TournamentFormat, TournamentId,
    TournamentStatus,
};
