use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use arena_core::storage::{Entity, RepositoryError};
use arena_core::tournament::Tournament;

use crate::{
    handlers::AppError,
    models::{BonusQuote, CreateTournament, UpdateTournament},
    state::AppState,
};

/// Query parameters for listing tournaments.
#[derive(Debug, Deserialize)]
pub struct ListTournamentsQuery {
    /// Only return tournaments for this game.
    pub game_id: Option<Uuid>,
}

/// Rejects tournaments that point at a game the store does not know.
async fn ensure_game_exists(state: &AppState, game_id: Uuid) -> Result<(), AppError> {
    if state.game_repo.find_by_id(game_id).await?.is_none() {
        return Err(RepositoryError::InvalidData(format!("unknown game: {game_id}")).into());
    }
    Ok(())
}

async fn load_tournament(state: &AppState, id: Uuid) -> Result<Tournament, AppError> {
    let tournament = state
        .tournament_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found(Tournament::KIND, id))?;
    Ok(tournament)
}

/// List tournaments (GET /api/tournaments?game_id=...).
///
/// The filter is applied to the cached collection, so it costs no extra
/// store round trip.
pub async fn list_tournaments(
    State(state): State<AppState>,
    Query(query): Query<ListTournamentsQuery>,
) -> Result<Json<Vec<Tournament>>, AppError> {
    let mut tournaments = state.tournament_repo.find_all().await?;

    if let Some(game_id) = query.game_id {
        tournaments.retain(|t| t.game_id == game_id);
    }

    Ok(Json(tournaments))
}

/// Create a new tournament (POST /api/tournaments).
///
/// Creation observers run before the response is sent.
pub async fn create_tournament(
    State(state): State<AppState>,
    Json(payload): Json<CreateTournament>,
) -> Result<impl IntoResponse, AppError> {
    ensure_game_exists(&state, payload.game_id).await?;

    let tournament = payload.into_tournament();
    state.tournament_repo.create(&tournament).await?;

    tracing::info!(
        tournament_id = %tournament.id,
        game_id = %tournament.game_id,
        "Created new tournament"
    );

    state.tournament_notifier.notify(&tournament);

    Ok((StatusCode::CREATED, Json(tournament)))
}

/// Get a single tournament by ID (GET /api/tournaments/{id}).
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Tournament>, AppError> {
    Ok(Json(load_tournament(&state, id).await?))
}

/// Replace a tournament by ID (PUT /api/tournaments/{id}).
pub async fn update_tournament(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTournament>,
) -> Result<Json<Tournament>, AppError> {
    ensure_game_exists(&state, payload.game_id).await?;

    let tournament = payload.into_tournament(id);
    state.tournament_repo.update(&tournament).await?;

    tracing::info!(tournament_id = %id, "Updated tournament");

    Ok(Json(tournament))
}

/// Delete a tournament by ID (DELETE /api/tournaments/{id}).
pub async fn delete_tournament(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.tournament_repo.delete(id).await?;

    tracing::info!(tournament_id = %id, "Deleted tournament");

    Ok(StatusCode::NO_CONTENT)
}

/// Prize bonus for a tournament's start date (GET /api/tournaments/{id}/bonus).
pub async fn tournament_bonus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BonusQuote>, AppError> {
    let tournament = load_tournament(&state, id).await?;
    Ok(Json(BonusQuote::from(&tournament)))
}
