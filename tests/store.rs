//! Integration tests for the in-memory store: idle tracking and sweeping.

use std::thread::sleep;
use std::time::Duration;
use tournapilot::store::{sweep_inactive, TournamentEntry, TournamentMap};
use tournapilot::{Tournament, TournamentFormat};

fn entry(name: &str, slug: &str) -> TournamentEntry {
    TournamentEntry::new(Tournament::new(name, slug, TournamentFormat::RoundRobin))
}

#[test]
fn fresh_entries_survive_a_sweep() {
    let mut map = TournamentMap::new();
    let e = entry("Spring Cup", "spring-cup");
    map.insert(e.tournament.id, e);

    assert_eq!(sweep_inactive(&mut map, Duration::from_secs(60)), 0);
    assert_eq!(map.len(), 1);
}

#[test]
fn touching_an_entry_resets_its_idle_clock() {
    let mut map = TournamentMap::new();
    let kept = entry("Kept", "kept");
    let kept_id = kept.tournament.id;
    let dropped = entry("Dropped", "dropped");
    map.insert(kept_id, kept);
    map.insert(dropped.tournament.id, dropped);

    // let both go idle, then touch only one
    sleep(Duration::from_millis(100));
    map.get_mut(&kept_id).unwrap().touch();

    assert_eq!(sweep_inactive(&mut map, Duration::from_millis(50)), 1);
    assert!(map.contains_key(&kept_id));
}

#[test]
fn zero_timeout_treats_every_entry_as_idle() {
    let mut map = TournamentMap::new();
    for (name, slug) in [("A Cup", "a-cup"), ("B Cup", "b-cup")] {
        let e = entry(name, slug);
        map.insert(e.tournament.id, e);
    }

    assert_eq!(sweep_inactive(&mut map, Duration::ZERO), 2);
    assert!(map.is_empty());
}
