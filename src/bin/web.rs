//! Single binary web server: JSON REST API for organizer and public tournament views.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::RwLock;
use std::time::Duration;
use tournapilot::store::{sweep_inactive, TournamentEntry, TournamentMap};
use tournapilot::{
    generate_fixtures, tournament_standings, unique_slug, Fixture, FixtureId, FixtureStatus,
    SportType, StandingsRow, TeamId, TeamStatus, Tournament, TournamentFormat, TournamentId,
    TournamentStatus,
};

/// In-memory state: many tournaments by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<TournamentMap>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    sport: SportType,
    #[serde(default)]
    format: TournamentFormat,
    #[serde(default)]
    start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    registration_start: Option<DateTime<Utc>>,
    #[serde(default)]
    registration_end: Option<DateTime<Utc>>,
    #[serde(default = "default_max_teams")]
    max_teams: u32,
    #[serde(default = "default_points_for_win")]
    points_for_win: u32,
    #[serde(default = "default_points_for_draw")]
    points_for_draw: u32,
    #[serde(default)]
    points_for_loss: u32,
    #[serde(default)]
    venue: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

fn default_max_teams() -> u32 {
    16
}

fn default_points_for_win() -> u32 {
    3
}

fn default_points_for_draw() -> u32 {
    1
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    contact_email: Option<String>,
    #[serde(default)]
    contact_phone: Option<String>,
}

#[derive(Deserialize)]
struct TournamentStatusBody {
    status: TournamentStatus,
}

#[derive(Deserialize)]
struct TeamStatusBody {
    status: TeamStatus,
}

#[derive(Deserialize)]
struct GenerateFixturesBody {
    #[serde(default)]
    shuffle: bool,
}

#[derive(Deserialize)]
struct ScoreBody {
    home_score: u32,
    away_score: u32,
}

#[derive(Deserialize)]
struct FixtureStatusBody {
    status: FixtureStatus,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and team id (e.g. /api/tournaments/{id}/teams/{team_id})
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: TeamId,
}

/// Path segments: tournament id and fixture id (e.g. /api/tournaments/{id}/fixtures/{fixture_id})
#[derive(Deserialize)]
struct TournamentFixturePath {
    id: TournamentId,
    fixture_id: FixtureId,
}

/// Path segment: public tournament slug (e.g. /api/t/{slug})
#[derive(Deserialize)]
struct SlugPath {
    slug: String,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournapilot",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new tournament (returns it with id and a unique slug).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let name = body.name.trim().to_string();
    if let Err(e) = Tournament::validate_name(&name) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let slug = unique_slug(&name, |candidate| {
        g.values().any(|e| e.tournament.slug == candidate)
    });
    let mut tournament = Tournament::new(name, slug, body.format);
    tournament.description = body.description.clone();
    tournament.sport = body.sport;
    tournament.start_date = body.start_date;
    tournament.end_date = body.end_date;
    tournament.registration_start = body.registration_start;
    tournament.registration_end = body.registration_end;
    tournament.max_teams = body.max_teams;
    tournament.points_for_win = body.points_for_win;
    tournament.points_for_draw = body.points_for_draw;
    tournament.points_for_loss = body.points_for_loss;
    tournament.venue = body.venue.clone();
    tournament.location = body.location.clone();
    let id = tournament.id;
    log::info!("Created tournament {} (slug {})", id, tournament.slug);
    g.insert(id, TournamentEntry::new(tournament));
    HttpResponse::Ok().json(&g.get(&id).unwrap().tournament)
}

#[derive(serde::Serialize)]
struct TournamentSummary {
    id: TournamentId,
    name: String,
    slug: String,
    sport: SportType,
    format: TournamentFormat,
    status: TournamentStatus,
    team_count: usize,
    fixture_count: usize,
    created_at: DateTime<Utc>,
}

/// List all tournaments, newest first.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut summaries: Vec<TournamentSummary> = g
        .values()
        .map(|entry| {
            let t = &entry.tournament;
            TournamentSummary {
                id: t.id,
                name: t.name.clone(),
                slug: t.slug.clone(),
                sport: t.sport,
                format: t.format,
                status: t.status,
                team_count: t.teams.len(),
                fixture_count: t.fixtures.len(),
                created_at: t.created_at,
            }
        })
        .collect();
    summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    HttpResponse::Ok().json(summaries)
}

/// Get a tournament by id (404 if not found). Touching it resets the idle clock.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.touch();
            HttpResponse::Ok().json(&entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    }
}

/// Move the tournament through its lifecycle (e.g. DRAFT -> REGISTRATION_OPEN).
#[put("/api/tournaments/{id}/status")]
async fn api_set_tournament_status(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TournamentStatusBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    };
    entry.touch();
    let t = &mut entry.tournament;
    match t.set_status(body.status) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Register a team. New teams start out approved; organizers can reject later.
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<TournamentPath>, body: Json<AddTeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    };
    entry.touch();
    let t = &mut entry.tournament;
    match t.add_team(body.name.trim()) {
        Ok(team_id) => {
            if let Some(team) = t.get_team_mut(team_id) {
                team.short_name = body.short_name.clone();
                team.contact_email = body.contact_email.clone();
                team.contact_phone = body.contact_phone.clone();
            }
            HttpResponse::Ok().json(t)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Remove a team by id. Fixtures that reference it become orphaned and are
/// ignored by the standings.
#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    };
    entry.touch();
    let t = &mut entry.tournament;
    match t.remove_team(path.team_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Approve or reject a registered team.
#[put("/api/tournaments/{id}/teams/{team_id}/status")]
async fn api_set_team_status(
    state: AppState,
    path: Path<TournamentTeamPath>,
    body: Json<TeamStatusBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    };
    entry.touch();
    let t = &mut entry.tournament;
    match t.set_team_status(path.team_id, body.status) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Generate the fixture list for all approved teams (format decides the shape).
#[post("/api/tournaments/{id}/fixtures/generate")]
async fn api_generate_fixtures(
    state: AppState,
    path: Path<TournamentPath>,
    body: Option<Json<GenerateFixturesBody>>,
) -> HttpResponse {
    let shuffle = body.map(|b| b.shuffle).unwrap_or(false);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    };
    entry.touch();
    let t = &mut entry.tournament;
    match generate_fixtures(t, shuffle) {
        Ok(count) => {
            log::info!("Generated {} fixture(s) for tournament {}", count, t.id);
            HttpResponse::Ok().json(serde_json::json!({ "count": count }))
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Delete all fixtures so the schedule can be regenerated.
#[delete("/api/tournaments/{id}/fixtures")]
async fn api_delete_fixtures(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    };
    entry.touch();
    let removed = entry.tournament.clear_fixtures();
    log::info!("Removed {} fixture(s) from tournament {}", removed, entry.tournament.id);
    HttpResponse::Ok().json(serde_json::json!({ "removed": removed }))
}

/// List fixtures in schedule order (round, then match number).
#[get("/api/tournaments/{id}/fixtures")]
async fn api_list_fixtures(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.touch();
            HttpResponse::Ok().json(&entry.tournament.fixtures)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    }
}

/// Record a final score. Marks the fixture completed.
#[put("/api/tournaments/{id}/fixtures/{fixture_id}/score")]
async fn api_record_score(
    state: AppState,
    path: Path<TournamentFixturePath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    };
    entry.touch();
    let t = &mut entry.tournament;
    match t.record_score(path.fixture_id, body.home_score, body.away_score) {
        Ok(()) => {
            log::info!(
                "Recorded {}-{} for fixture {} in tournament {}",
                body.home_score,
                body.away_score,
                path.fixture_id,
                t.id
            );
            HttpResponse::Ok().json(t)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Set a fixture's status (postpone, cancel, kick off, ...).
#[put("/api/tournaments/{id}/fixtures/{fixture_id}/status")]
async fn api_set_fixture_status(
    state: AppState,
    path: Path<TournamentFixturePath>,
    body: Json<FixtureStatusBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    };
    entry.touch();
    let t = &mut entry.tournament;
    match t.set_fixture_status(path.fixture_id, body.status) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Ranked league table over all completed fixtures.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.touch();
            HttpResponse::Ok().json(tournament_standings(&entry.tournament))
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    }
}

/// Render the ranked table as CSV, one row per team, best first.
fn standings_csv(rows: &[StandingsRow]) -> Option<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "position",
        "team",
        "played",
        "won",
        "drawn",
        "lost",
        "goals_for",
        "goals_against",
        "goal_difference",
        "points",
    ])
    .ok()?;
    for (i, row) in rows.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            row.team_name.clone(),
            row.played.to_string(),
            row.won.to_string(),
            row.drawn.to_string(),
            row.lost.to_string(),
            row.goals_for.to_string(),
            row.goals_against.to_string(),
            row.goal_difference.to_string(),
            row.points.to_string(),
        ])
        .ok()?;
    }
    wtr.into_inner().ok()
}

/// Standings as a downloadable CSV file.
#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    };
    entry.touch();
    let rows = tournament_standings(&entry.tournament);
    match standings_csv(&rows) {
        Some(data) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"standings.csv\""))
            .body(data),
        None => HttpResponse::InternalServerError().body("csv error"),
    }
}

#[derive(serde::Serialize)]
struct PublicTeam {
    id: TeamId,
    name: String,
    short_name: Option<String>,
}

/// Public page data for a tournament. Team contact details stay private.
#[derive(serde::Serialize)]
struct PublicTournamentResponse {
    id: TournamentId,
    name: String,
    slug: String,
    description: Option<String>,
    sport: SportType,
    format: TournamentFormat,
    status: TournamentStatus,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    venue: Option<String>,
    location: Option<String>,
    teams: Vec<PublicTeam>,
    fixtures: Vec<Fixture>,
    standings: Vec<StandingsRow>,
}

/// Public tournament view by slug: approved teams, fixtures, standings.
#[get("/api/t/{slug}")]
async fn api_public_tournament(state: AppState, path: Path<SlugPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.values_mut().find(|e| e.tournament.slug == path.slug) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" })),
    };
    entry.touch();
    let t = &entry.tournament;
    let response = PublicTournamentResponse {
        id: t.id,
        name: t.name.clone(),
        slug: t.slug.clone(),
        description: t.description.clone(),
        sport: t.sport,
        format: t.format,
        status: t.status,
        start_date: t.start_date,
        end_date: t.end_date,
        venue: t.venue.clone(),
        location: t.location.clone(),
        teams: t
            .approved_teams()
            .into_iter()
            .map(|team| PublicTeam {
                id: team.id,
                name: team.name.clone(),
                short_name: team.short_name.clone(),
            })
            .collect(),
        fixtures: t.fixtures.clone(),
        standings: tournament_standings(t),
    };
    HttpResponse::Ok().json(response)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(TournamentMap::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let removed = sweep_inactive(&mut g, INACTIVITY_TIMEOUT);
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_set_tournament_status)
            .service(api_add_team)
            .service(api_remove_team)
            .service(api_set_team_status)
            .service(api_generate_fixtures)
            .service(api_delete_fixtures)
            .service(api_list_fixtures)
            .service(api_record_score)
            .service(api_set_fixture_status)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_public_tournament)
    })
    .bind(bind)?
    .run()
    .await
}
