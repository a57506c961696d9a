//! League standings: fold completed results into a ranked table.

use crate::models::{Fixture, StandingsRow, Team, TeamId, Tournament};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Compute the league table for a roster from a set of fixtures.
///
/// Every team in `teams` gets a row, including teams with no completed
/// match. A fixture contributes only when it is final with both scores
/// entered and both its teams are on the roster; anything else is skipped
/// without error, so results referencing since-removed teams simply drop
/// out. Rows are sorted by points, then goal difference, then goals for,
/// then team name ascending - no further tie-break is applied.
pub fn compute_standings(
    teams: &[Team],
    fixtures: &[Fixture],
    points_for_win: u32,
    points_for_draw: u32,
    points_for_loss: u32,
) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = Vec::with_capacity(teams.len());
    let mut index: HashMap<TeamId, usize> = HashMap::with_capacity(teams.len());
    for team in teams {
        if index.contains_key(&team.id) {
            continue;
        }
        index.insert(team.id, rows.len());
        rows.push(StandingsRow::new(team.id, team.name.clone()));
    }

    for fixture in fixtures {
        if let Some((home_goals, away_goals)) = fixture.result() {
            let home = index.get(&fixture.home_team).copied();
            let away = index.get(&fixture.away_team).copied();
            // Both sides must be on the roster; a half-known result counts
            // for neither team.
            if let (Some(home), Some(away)) = (home, away) {
                apply_result(
                    &mut rows[home],
                    home_goals,
                    away_goals,
                    points_for_win,
                    points_for_draw,
                    points_for_loss,
                );
                apply_result(
                    &mut rows[away],
                    away_goals,
                    home_goals,
                    points_for_win,
                    points_for_draw,
                    points_for_loss,
                );
            }
        }
    }

    for row in &mut rows {
        row.goal_difference = i64::from(row.goals_for) - i64::from(row.goals_against);
    }

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });
    rows
}

/// Fold one side of a completed match into its row. Goal and point totals
/// saturate instead of wrapping when a score pushes them past `u32::MAX`.
fn apply_result(
    row: &mut StandingsRow,
    scored: u32,
    conceded: u32,
    points_for_win: u32,
    points_for_draw: u32,
    points_for_loss: u32,
) {
    row.played += 1;
    row.goals_for = row.goals_for.saturating_add(scored);
    row.goals_against = row.goals_against.saturating_add(conceded);
    match scored.cmp(&conceded) {
        Ordering::Greater => {
            row.won += 1;
            row.points = row.points.saturating_add(points_for_win);
        }
        Ordering::Equal => {
            row.drawn += 1;
            row.points = row.points.saturating_add(points_for_draw);
        }
        Ordering::Less => {
            row.lost += 1;
            row.points = row.points.saturating_add(points_for_loss);
        }
    }
}

/// Standings for a tournament: approved teams only, with the tournament's
/// configured point values.
pub fn tournament_standings(tournament: &Tournament) -> Vec<StandingsRow> {
    let approved: Vec<Team> = tournament
        .teams
        .iter()
        .filter(|t| t.is_approved())
        .cloned()
        .collect();
    compute_standings(
        &approved,
        &tournament.fixtures,
        tournament.points_for_win,
        tournament.points_for_draw,
        tournament.points_for_loss,
    )
}
