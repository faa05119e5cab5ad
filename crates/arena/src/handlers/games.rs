use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use arena_core::game::Game;
use arena_core::storage::{Entity, RepositoryError};

use crate::{
    handlers::AppError,
    models::{CreateGame, UpdateGame},
    state::AppState,
};

/// List all games (GET /api/games).
pub async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<Game>>, AppError> {
    let games = state.game_repo.find_all().await?;
    Ok(Json(games))
}

/// Create a new game (POST /api/games).
pub async fn create_game(
    State(state): State<AppState>,
    Json(payload): Json<CreateGame>,
) -> Result<impl IntoResponse, AppError> {
    let game = payload.into_game();

    state.game_repo.create(&game).await?;

    tracing::info!(game_id = %game.id, name = %game.name, "Created new game");

    Ok((StatusCode::CREATED, Json(game)))
}

/// Get a single game by ID (GET /api/games/{id}).
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Game>, AppError> {
    let game = state
        .game_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found(Game::KIND, id))?;

    Ok(Json(game))
}

/// Replace a game by ID (PUT /api/games/{id}).
pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGame>,
) -> Result<Json<Game>, AppError> {
    let game = payload.into_game(id);

    state.game_repo.update(&game).await?;

    tracing::info!(game_id = %id, "Updated game");

    Ok(Json(game))
}

/// Delete a game by ID (DELETE /api/games/{id}).
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.game_repo.delete(id).await?;

    tracing::info!(game_id = %id, "Deleted game");

    Ok(StatusCode::NO_CONTENT)
}
