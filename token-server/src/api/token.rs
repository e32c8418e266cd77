use crate::errors::ApiError;
use crate::models::{JoinRequest, TokenQuery, TokenResponse};
use crate::openapi::TOKEN_TAG;
use crate::state::AppState;
use crate::token::issue_token;
use axum::extract::rejection::QueryRejection;
use axum::extract::{ConnectInfo, Json, Query, State};
use log::{debug, info};
use std::net::SocketAddr;

#[utoipa::path(
    get,
    path = "/token",
    tag = TOKEN_TAG,
    params(TokenQuery),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "A required query parameter is missing or empty"),
        (status = 500, description = "The token could not be signed")
    )
)]
pub(crate) async fn token_handler(
    State(state): State<AppState>,
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    query: Result<Query<TokenQuery>, QueryRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Query(query) = query.inspect_err(|rejection| {
        info!("Token request from {remote_addr} rejected: {rejection}");
    })?;

    info!(
        "Token request from {remote_addr} for room '{}'",
        query.room_name
    );
    debug!("identity: '{}', name: '{}'", query.identity, query.name);

    let access_token = issue_token(state.signer.as_ref(), JoinRequest::from(query))?;
    Ok(Json(TokenResponse { access_token }))
}
