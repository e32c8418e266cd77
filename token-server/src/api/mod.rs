mod cors;
pub(crate) mod health;
pub(crate) mod sfu;
pub(crate) mod token;

use crate::api::cors::cors_layer;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Combines all API routes into a single router
pub(super) fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(token_routes())
        // Answers every OPTIONS request itself, before routing
        .layer(cors_layer())
}

/// Token issuing routes, one per transport
fn token_routes() -> Router<AppState> {
    Router::new()
        .route("/token", get(token::token_handler))
        .route("/sfu/get", post(sfu::sfu_config_handler))
}
