use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::clubs::handlers::list_clubs,
        features::clubs::handlers::get_club,
        features::clubs::handlers::create_club,
        features::clubs::handlers::update_club,
        features::clubs::handlers::delete_club,
        features::seasons::handlers::list_seasons,
        features::seasons::handlers::get_season,
        features::seasons::handlers::create_season,
        features::seasons::handlers::update_season,
        features::seasons::handlers::delete_season,
        features::players::handlers::list_players,
        features::players::handlers::list_duplicate_players,
        features::players::handlers::get_player,
        features::players::handlers::get_player_teams,
        features::players::handlers::get_player_statistics,
        features::players::handlers::create_player,
        features::players::handlers::update_player,
        features::players::handlers::delete_player,
        features::teams::handlers::list_teams,
        features::teams::handlers::get_team,
        features::teams::handlers::create_team,
        features::teams::handlers::update_team,
        features::teams::handlers::delete_team,
        features::teams::handlers::get_roster,
        features::teams::handlers::add_roster_player,
        features::teams::handlers::remove_roster_player,
        features::matches::handlers::list_matches,
        features::matches::handlers::get_match,
        features::matches::handlers::create_match,
        features::matches::handlers::update_match,
        features::matches::handlers::delete_match,
        features::matches::handlers::get_clock,
        features::matches::handlers::apply_clock_action,
        features::matches::handlers::get_match_statistics,
        features::game_events::handlers::list_match_events,
        features::game_events::handlers::get_event,
        features::game_events::handlers::create_event,
        features::game_events::handlers::delete_event,
    ),
    components(
        schemas(
            storage::dto::club::ClubResponse,
            storage::dto::club::CreateClubRequest,
            storage::dto::club::UpdateClubRequest,
            storage::dto::season::SeasonResponse,
            storage::dto::season::CreateSeasonRequest,
            storage::dto::season::UpdateSeasonRequest,
            storage::dto::player::PlayerResponse,
            storage::dto::player::CreatePlayerRequest,
            storage::dto::player::UpdatePlayerRequest,
            storage::dto::player::DuplicatePlayerPair,
            storage::dto::player::PlayerTeamHistoryEntry,
            storage::dto::team::TeamResponse,
            storage::dto::team::TeamDetailResponse,
            storage::dto::team::ClubInfo,
            storage::dto::team::SeasonInfo,
            storage::dto::team::RosterEntry,
            storage::dto::team::CreateTeamRequest,
            storage::dto::team::UpdateTeamRequest,
            storage::dto::team::AddRosterPlayerRequest,
            storage::dto::handball_match::MatchResponse,
            storage::dto::handball_match::CreateMatchRequest,
            storage::dto::handball_match::UpdateMatchRequest,
            storage::dto::handball_match::ClockActionRequest,
            storage::dto::handball_match::ClockStateResponse,
            storage::dto::game_event::GameEventResponse,
            storage::dto::game_event::CreateGameEventRequest,
            storage::dto::statistics::TeamStatistics,
            storage::dto::statistics::PlayerStatistics,
            storage::dto::statistics::ScorePoint,
            storage::dto::statistics::MatchStatisticsResponse,
            storage::dto::common::PaginationMeta,
            storage::models::EventType,
            storage::models::ShotOutcome,
            storage::models::TurnoverKind,
            storage::models::SanctionType,
            storage::models::ShotPosition,
            storage::models::ShotDistance,
            storage::models::GoalZone,
            storage::models::Handedness,
            storage::models::MatchStatus,
            storage::services::match_clock::ClockAction,
            storage::services::match_clock::MatchPeriod,
        )
    ),
    tags(
        (name = "clubs", description = "Club management"),
        (name = "seasons", description = "Season management"),
        (name = "players", description = "Players, team history and duplicate detection"),
        (name = "teams", description = "Teams and rosters"),
        (name = "matches", description = "Matches, live clock and statistics"),
        (name = "game-events", description = "In-match events"),
    )
)]
pub struct ApiDoc;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Full API router with its state applied.
pub fn build_router(db: Database) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .nest("/clubs", features::clubs::routes::routes())
        .nest("/seasons", features::seasons::routes::routes())
        .nest("/players", features::players::routes::routes())
        .nest("/teams", features::teams::routes::routes())
        .nest("/matches", features::matches::routes::routes())
        .nest("/game-events", features::game_events::routes::routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(db)
}
