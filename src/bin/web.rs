//! Single binary web server: dashboard HTML, static files from /static, API via REST.
//! Run with: cargo run --bin web
//! Settings come from the environment, see `ServerConfig`.

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use padel_tournament_web::{
    generate_bracket, import_teams, record_score, record_walkover, rerank, reset_bracket,
    seed_teams, start_match, BracketOptions, MatchId, ScoringRules, SeedingMethod, ServerConfig,
    SetScore, Team, TeamId, Tournament, TournamentError, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after the inactivity timeout.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    options: BracketOptions,
    #[serde(default)]
    scoring: ScoringRules,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
    #[serde(default)]
    players: Vec<String>,
    #[serde(default)]
    ranking: Option<u32>,
}

#[derive(Deserialize)]
struct SeedBody {
    seed: u32,
}

#[derive(Deserialize)]
struct ScoreBody {
    sets: Vec<SetScore>,
}

#[derive(Deserialize)]
struct WalkoverBody {
    winner: TeamId,
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

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

/// Run `op` on one tournament under the write lock and answer with the updated tournament.
/// Touching a tournament refreshes its last_activity.
fn with_tournament<T>(
    state: &AppState,
    id: TournamentId,
    op: impl FnOnce(&mut Tournament) -> Result<T, TournamentError>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match op(t) {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => {
            log::debug!("tournament {id}: rejected: {e}");
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    if body.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Tournament name must not be empty" }));
    }
    let tournament = Tournament::new(body.name.trim(), body.options, body.scoring);
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("created tournament {id} ({})", tournament.name);
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_| Ok(()))
}

/// Register a team (Setup only).
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<TournamentPath>, body: Json<AddTeamBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut team = Team::new(body.name).with_players(body.players);
    team.ranking = body.ranking;
    with_tournament(&state, path.id, |t| t.add_team(team))
}

/// Register teams from a CSV body (`name,players,ranking`; Setup only).
#[post("/api/tournaments/{id}/teams/import")]
async fn api_import_teams(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    with_tournament(&state, path.id, |t| import_teams(t, &body))
}

/// Remove a team by id (Setup only).
#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.remove_team(path.team_id))
}

/// Set one team's seed by hand (Setup only).
#[put("/api/tournaments/{id}/teams/{team_id}/seed")]
async fn api_set_seed(state: AppState, path: Path<TournamentTeamPath>, body: Json<SeedBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.set_seed(path.team_id, body.seed))
}

/// Toggle options such as the third-place match (Setup only).
#[put("/api/tournaments/{id}/options")]
async fn api_set_options(state: AppState, path: Path<TournamentPath>, body: Json<BracketOptions>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.set_options(body.into_inner()))
}

/// Seed all teams by ranking (Setup only).
#[post("/api/tournaments/{id}/seeding/ranking")]
async fn api_seed_by_ranking(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| seed_teams(t, SeedingMethod::Ranking))
}

/// Seed all teams by random draw (Setup only).
#[post("/api/tournaments/{id}/seeding/draw")]
async fn api_seed_by_draw(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| seed_teams(t, SeedingMethod::Draw))
}

/// Generate the bracket (Setup -> Playing).
#[post("/api/tournaments/{id}/bracket")]
async fn api_generate_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, generate_bracket)
}

/// Mark a scheduled match as in progress.
#[post("/api/tournaments/{id}/matches/{match_id}/start")]
async fn api_start_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| start_match(t, path.match_id))
}

/// Record set scores for a match; the winner advances.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_record_score(state: AppState, path: Path<TournamentMatchPath>, body: Json<ScoreBody>) -> HttpResponse {
    let sets = body.into_inner().sets;
    with_tournament(&state, path.id, |t| record_score(t, path.match_id, sets))
}

/// Award a match without play; the winner advances.
#[put("/api/tournaments/{id}/matches/{match_id}/walkover")]
async fn api_record_walkover(state: AppState, path: Path<TournamentMatchPath>, body: Json<WalkoverBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| record_walkover(t, path.match_id, body.winner))
}

/// Recompute the final ranking after corrections.
#[post("/api/tournaments/{id}/ranking")]
async fn api_rerank(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, rerank)
}

/// Delete the bracket and go back to Setup with the same teams.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, reset_bracket)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: periodically remove tournaments with no recent activity
    let state_cleanup = state.clone();
    let (cleanup_interval, inactivity_timeout) = (config.cleanup_interval, config.inactivity_timeout);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for {}h)",
                    removed,
                    inactivity_timeout.as_secs() / 3600
                );
            }
        }
    });

    let static_dir = config.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_team)
            .service(api_import_teams)
            .service(api_remove_team)
            .service(api_set_seed)
            .service(api_set_options)
            .service(api_seed_by_ranking)
            .service(api_seed_by_draw)
            .service(api_generate_bracket)
            .service(api_start_match)
            .service(api_record_score)
            .service(api_record_walkover)
            .service(api_rerank)
            .service(api_reset)
            .service(Files::new("/static", static_dir.clone()))
    })
    .keep_alive(Duration::from_secs(75))
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
