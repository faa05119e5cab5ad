use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        games::{create_game, delete_game, get_game, list_games, update_game},
        health::{healthz, livez},
        tournaments::{
            create_tournament, delete_tournament, get_tournament, list_tournaments,
            tournament_bonus, update_tournament,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        // Game routes
        .route("/games", get(list_games).post(create_game))
        .route(
            "/games/{id}",
            get(get_game).put(update_game).delete(delete_game),
        )
        // Tournament routes
        .route("/tournaments", get(list_tournaments).post(create_tournament))
        .route(
            "/tournaments/{id}",
            get(get_tournament)
                .put(update_tournament)
                .delete(delete_tournament),
        )
        .route("/tournaments/{id}/bonus", get(tournament_bonus))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
