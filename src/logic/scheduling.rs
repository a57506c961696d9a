//! Fixture scheduling: round-robin (circle method) and single-elimination
//! round 1 seeding. Pure functions; the caller owns persistence and guards.

use crate::models::{Fixture, MatchSlot, TeamId, Tournament, TournamentError, TournamentFormat};
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Generate the match slots for a set of teams under the given format.
/// Deterministic: the same team order always produces the same slots.
pub fn schedule_fixtures(
    teams: &[TeamId],
    format: TournamentFormat,
) -> Result<Vec<MatchSlot>, TournamentError> {
    match format {
        TournamentFormat::RoundRobin | TournamentFormat::GroupKnockout => {
            schedule_round_robin(teams)
        }
        TournamentFormat::SingleElimination => schedule_knockout_round_one(teams),
    }
}

/// Round-robin schedule via the circle method.
///
/// 1. An odd team count gets one bye seat so the working list has even length n.
/// 2. n-1 rounds; in each round, seat i plays seat n-1-i.
/// 3. Seat 0 is fixed; the remaining n-1 seats rotate one step per round
///    (last seat to seat 1, the rest shifting right). The rotation is pure
///    index arithmetic over the starting order; nothing is mutated.
/// 4. Pairings involving the bye are dropped. Match numbers restart at 1
///    each round and are assigned in pairing order, skipping byes.
///
/// Every pair of teams meets exactly once: n(n-1)/2 matches overall.
pub fn schedule_round_robin(teams: &[TeamId]) -> Result<Vec<MatchSlot>, TournamentError> {
    validate_roster(teams)?;

    let mut seats: Vec<Option<TeamId>> = teams.iter().copied().map(Some).collect();
    if seats.len() % 2 != 0 {
        seats.push(None);
    }
    let n = seats.len();
    let rotating = n - 1;

    let mut slots = Vec::with_capacity(teams.len() * (teams.len() - 1) / 2);
    for round in 0..rotating {
        // Seat k after `round` rotations, reading from the starting order.
        let seat = |k: usize| {
            if k == 0 {
                seats[0]
            } else {
                seats[1 + (k - 1 + rotating - round) % rotating]
            }
        };
        let mut match_number = 1;
        for i in 0..n / 2 {
            if let (Some(home), Some(away)) = (seat(i), seat(n - 1 - i)) {
                slots.push(MatchSlot {
                    home_team: home,
                    away_team: away,
                    round: (round + 1) as u32,
                    match_number,
                });
                match_number += 1;
            }
        }
    }
    Ok(slots)
}

/// Single-elimination round 1. Teams are taken in the order given (no
/// ranking or seeding), padded with byes to the next power of two, and seat i
/// plays seat size-1-i. A pairing against a bye produces no fixture, so the
/// first size-n teams in the list advance without playing. Rounds beyond the
/// first are never generated; organizers fill them in from results.
pub fn schedule_knockout_round_one(teams: &[TeamId]) -> Result<Vec<MatchSlot>, TournamentError> {
    validate_roster(teams)?;

    let size = teams.len().next_power_of_two();
    let mut seats: Vec<Option<TeamId>> = teams.iter().copied().map(Some).collect();
    seats.resize(size, None);

    let mut slots = Vec::new();
    let mut match_number = 1;
    for i in 0..size / 2 {
        if let (Some(home), Some(away)) = (seats[i], seats[size - 1 - i]) {
            slots.push(MatchSlot {
                home_team: home,
                away_team: away,
                round: 1,
                match_number,
            });
            match_number += 1;
        }
    }
    Ok(slots)
}

/// At least 2 teams and no team listed twice. The schedule never pairs a
/// team against itself, which only holds for distinct inputs.
fn validate_roster(teams: &[TeamId]) -> Result<(), TournamentError> {
    if teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams { required: 2 });
    }
    let mut seen = HashSet::with_capacity(teams.len());
    for &id in teams {
        if !seen.insert(id) {
            return Err(TournamentError::DuplicateTeam(id));
        }
    }
    Ok(())
}

/// Generate and store fixtures for a tournament's approved teams.
///
/// The regeneration guard lives here, not in the scheduler: a tournament
/// with existing fixtures must have them deleted first. Teams enter the
/// draw in registration order; `shuffle` randomizes that order beforehand
/// (a drawn-from-a-hat knockout bracket, for example).
pub fn generate_fixtures(
    tournament: &mut Tournament,
    shuffle: bool,
) -> Result<usize, TournamentError> {
    if !tournament.fixtures.is_empty() {
        return Err(TournamentError::FixturesAlreadyExist);
    }

    let mut team_ids: Vec<TeamId> = tournament
        .teams
        .iter()
        .filter(|t| t.is_approved())
        .map(|t| t.id)
        .collect();
    if shuffle {
        team_ids.shuffle(&mut rand::thread_rng());
    }

    let slots = schedule_fixtures(&team_ids, tournament.format)?;
    tournament.fixtures = slots.into_iter().map(Fixture::from_slot).collect();
    Ok(tournament.fixtures.len())
}
