//! Tournament business logic: fixture scheduling and standings computation.

mod scheduling;
mod standings;

pub use scheduling::{
    generate_fixtures, schedule_fixtures, schedule_knockout_round_one, schedule_round_robin,
};
pub use standings::{compute_standings, tournament_standings};
