use crate::api::{health, sfu, token};
use crate::models::{SfuConfigResponse, SfuRequest, TokenResponse};
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

pub(crate) const HEALTH_TAG: &str = "Health API";
pub(crate) const TOKEN_TAG: &str = "Token API";

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        token::token_handler,
        sfu::sfu_config_handler,
    ),
    components(schemas(TokenResponse, SfuRequest, SfuConfigResponse)),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = TOKEN_TAG, description = "LiveKit room access tokens. Identities are taken from the request unauthenticated."),
    ),
    info(
        title = "LiveKit Token Server API",
        description = "Issues signed LiveKit room access tokens",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;

/// Handler for the OpenAPI JSON specification endpoint
async fn openapi_json_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates a router for OpenAPI documentation routes
pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json_handler))
}
