//! Thin JSON API over the competition engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! BATCH_DELAY_MS paces batch score entry.

use actix_web::{
    delete, get, patch, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use club_tournament::{
    draw_groups, read_groups_csv, BracketCommand, EngineError, ErrorKind, Group, GroupCommand,
    MatchId, MatchKey, MatchUpdate, MemoryStore, PacingPolicy, Round, ServerConfig, Team,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

/// Store plus the pacing applied to batch writes.
struct AppData {
    store: MemoryStore,
    pacing: PacingPolicy,
}

type AppState = Data<AppData>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Path segments: tournament id and division (e.g. /api/tournaments/{id}/divisions/{division})
#[derive(Deserialize)]
struct DivisionPath {
    id: String,
    division: String,
}

#[derive(Deserialize)]
struct GroupMatchPath {
    id: String,
    division: String,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct BracketMatchPath {
    id: String,
    division: String,
    key: MatchKey,
}

#[derive(Deserialize)]
struct RoundPath {
    id: String,
    division: String,
    round: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrawBody {
    teams: Vec<Team>,
    group_count: usize,
    /// Fixed seed for a reproducible draw.
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize, Default)]
struct CreateBracketBody {
    #[serde(default)]
    overwrite: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NextRoundBody {
    current_round: String,
    #[serde(default)]
    expected_version: Option<u64>,
}

#[derive(Deserialize)]
struct BatchItem {
    key: MatchKey,
    update: MatchUpdate,
}

fn error_response(e: EngineError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::Input => HttpResponse::BadRequest().json(body),
        ErrorKind::Conflict => HttpResponse::Conflict().json(body),
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::Store => {
            log::error!("Store failure: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn respond<T: serde::Serialize>(result: Result<T, EngineError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "club-tournament",
    })
}

/// Replace the division's groups.
#[put("/api/tournaments/{id}/divisions/{division}/groups")]
async fn api_put_groups(
    state: AppState,
    path: Path<DivisionPath>,
    body: Json<Vec<Group>>,
) -> HttpResponse {
    respond(state.store.put_groups(&path.id, &path.division, body.into_inner()))
}

/// Import groups from CSV (`group_id,team_id,team_name,members`).
#[post("/api/tournaments/{id}/divisions/{division}/groups/import")]
async fn api_import_groups(
    state: AppState,
    path: Path<DivisionPath>,
    body: String,
) -> HttpResponse {
    let result = read_groups_csv(body.as_bytes(), &path.division)
        .and_then(|groups| state.store.put_groups(&path.id, &path.division, groups));
    respond(result)
}

/// Random draw of the given teams into groups.
#[post("/api/tournaments/{id}/divisions/{division}/groups/draw")]
async fn api_draw_groups(
    state: AppState,
    path: Path<DivisionPath>,
    body: Json<DrawBody>,
) -> HttpResponse {
    let mut rng = match body.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let result = draw_groups(&path.division, &body.teams, body.group_count, &mut rng)
        .and_then(|groups| state.store.put_groups(&path.id, &path.division, groups));
    respond(result)
}

/// Move one team between groups.
#[post("/api/tournaments/{id}/divisions/{division}/groups/commands")]
async fn api_group_command(
    state: AppState,
    path: Path<DivisionPath>,
    body: Json<GroupCommand>,
) -> HttpResponse {
    respond(state.store.apply_group_command(&path.id, &path.division, body.into_inner()))
}

/// Discard existing group matches and generate the round robin.
#[post("/api/tournaments/{id}/divisions/{division}/matches/generate")]
async fn api_generate_matches(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    respond(state.store.regenerate_group_matches(&path.id, &path.division))
}

#[get("/api/tournaments/{id}/divisions/{division}/matches")]
async fn api_get_matches(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    respond(
        state
            .store
            .group_stage(&path.id, &path.division)
            .map(|(_, matches)| matches),
    )
}

#[patch("/api/tournaments/{id}/divisions/{division}/matches/{match_id}")]
async fn api_patch_match(
    state: AppState,
    path: Path<GroupMatchPath>,
    body: Json<MatchUpdate>,
) -> HttpResponse {
    respond(
        state
            .store
            .patch_group_match(&path.id, &path.division, path.match_id, body.into_inner()),
    )
}

#[get("/api/tournaments/{id}/divisions/{division}/standings")]
async fn api_standings(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    respond(state.store.standings(&path.id, &path.division))
}

#[get("/api/tournaments/{id}/divisions/{division}/qualified")]
async fn api_qualified(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    respond(state.store.qualified(&path.id, &path.division))
}

#[get("/api/tournaments/{id}/divisions/{division}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    respond(state.store.bracket(&path.id, &path.division))
}

/// Seed the bracket from the qualified pool (409 if one exists and overwrite is not set).
#[post("/api/tournaments/{id}/divisions/{division}/bracket")]
async fn api_create_bracket(
    state: AppState,
    path: Path<DivisionPath>,
    body: Option<Json<CreateBracketBody>>,
) -> HttpResponse {
    let overwrite = body.map(|b| b.overwrite).unwrap_or_default();
    respond(state.store.create_bracket(&path.id, &path.division, overwrite))
}

/// Generate the round after `currentRound`.
#[put("/api/tournaments/{id}/divisions/{division}/bracket")]
async fn api_next_round(
    state: AppState,
    path: Path<DivisionPath>,
    body: Json<NextRoundBody>,
) -> HttpResponse {
    let current = match body.current_round.parse::<Round>() {
        Ok(round) => round,
        Err(e) => return error_response(e),
    };
    let command = BracketCommand::GenerateNextRound {
        current,
        expected_version: body.expected_version,
    };
    respond(state.store.apply_bracket_command(&path.id, &path.division, command))
}

#[delete("/api/tournaments/{id}/divisions/{division}/bracket")]
async fn api_delete_bracket(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    match state.store.delete_bracket(&path.id, &path.division) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "deleted": true })),
        Err(e) => error_response(e),
    }
}

/// Delete a round and every later round.
#[delete("/api/tournaments/{id}/divisions/{division}/bracket/rounds/{round}")]
async fn api_delete_round(state: AppState, path: Path<RoundPath>) -> HttpResponse {
    let round = match path.round.parse::<Round>() {
        Ok(round) => round,
        Err(e) => return error_response(e),
    };
    let command = BracketCommand::DeleteRound {
        round,
        expected_version: None,
    };
    respond(state.store.apply_bracket_command(&path.id, &path.division, command))
}

#[patch("/api/tournaments/{id}/divisions/{division}/bracket/matches/{key}")]
async fn api_patch_bracket_match(
    state: AppState,
    path: Path<BracketMatchPath>,
    body: Json<MatchUpdate>,
) -> HttpResponse {
    let command = BracketCommand::PatchMatch {
        key: path.key,
        update: body.into_inner(),
    };
    respond(state.store.apply_bracket_command(&path.id, &path.division, command))
}

/// Apply many score updates in order, pausing between writes per the pacing policy.
/// Stops at the first failing update.
#[post("/api/tournaments/{id}/divisions/{division}/bracket/matches/batch")]
async fn api_batch_bracket_matches(
    state: AppState,
    path: Path<DivisionPath>,
    body: Json<Vec<BatchItem>>,
) -> HttpResponse {
    let mut matches = Vec::new();
    for (i, item) in body.into_inner().into_iter().enumerate() {
        if let Some(delay) = state.pacing.delay_before(i) {
            tokio::time::sleep(delay).await;
        }
        let command = BracketCommand::PatchMatch {
            key: item.key,
            update: item.update,
        };
        match state.store.apply_bracket_command(&path.id, &path.division, command) {
            Ok(updated) => matches = updated,
            Err(e) => return error_response(e),
        }
    }
    HttpResponse::Ok().json(matches)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);
    if !config.pacing.delay.is_zero() {
        log::info!("Batch score entry paced at {:?} per write", config.pacing.delay);
    }

    let state = Data::new(AppData {
        store: MemoryStore::new(),
        pacing: config.pacing,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_put_groups)
            .service(api_import_groups)
            .service(api_draw_groups)
            .service(api_group_command)
            .service(api_generate_matches)
            .service(api_get_matches)
            .service(api_patch_match)
            .service(api_standings)
            .service(api_qualified)
            .service(api_get_bracket)
            .service(api_create_bracket)
            .service(api_next_round)
            .service(api_delete_bracket)
            .service(api_delete_round)
            .service(api_batch_bracket_matches)
            .service(api_patch_bracket_match)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
