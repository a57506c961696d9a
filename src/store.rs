//! In-memory tournament store: entries keyed by id, expired by inactivity.

use crate::models::{Tournament, TournamentId};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// A stored tournament plus the moment it was last looked at. Reads count
/// as activity just like writes, so open scoreboards keep an entry alive.
pub struct TournamentEntry {
    pub tournament: Tournament,
    last_activity: Instant,
}

impl TournamentEntry {
    pub fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            last_activity: Instant::now(),
        }
    }

    /// Mark the entry as just used, resetting its idle clock.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Time since the entry was last touched.
    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }
}

pub type TournamentMap = HashMap<TournamentId, TournamentEntry>;

/// Drop every entry idle for `timeout` or longer. Returns how many were
/// removed.
pub fn sweep_inactive(map: &mut TournamentMap, timeout: Duration) -> usize {
    let before = map.len();
    map.retain(|_, entry| entry.idle_for() < timeout);
    before - map.len()
}
