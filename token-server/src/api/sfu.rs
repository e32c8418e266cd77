use crate::errors::ApiError;
use crate::models::{JoinRequest, SfuConfigResponse, SfuRequest};
use crate::openapi::TOKEN_TAG;
use crate::state::AppState;
use crate::token::issue_token;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, Json, State};
use log::{debug, info};
use std::net::SocketAddr;

/// Issues a token for a device of a user and tells the client which SFU to use.
///
/// The user identifier is taken as sent: the OpenID token is not verified.
#[utoipa::path(
    post,
    path = "/sfu/get",
    tag = TOKEN_TAG,
    request_body = SfuRequest,
    responses(
        (status = 200, description = "SFU configuration with an access token", body = SfuConfigResponse),
        (status = 400, description = "Malformed body or empty room"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "The token could not be signed")
    )
)]
pub(crate) async fn sfu_config_handler(
    State(state): State<AppState>,
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    payload: Result<Json<SfuRequest>, JsonRejection>,
) -> Result<Json<SfuConfigResponse>, ApiError> {
    let Json(request) = payload.inspect_err(|rejection| {
        info!("SFU config request from {remote_addr} rejected: {rejection}");
    })?;

    info!(
        "SFU config request from {remote_addr} for room '{}'",
        request.room
    );
    debug!(
        "user: '{}', device: '{}', openid token present: {}",
        request.remove_me_user_id,
        request.device_id,
        request.openid_token.is_some()
    );

    let jwt = issue_token(state.signer.as_ref(), JoinRequest::from(request))?;

    Ok(Json(SfuConfigResponse {
        url: state.settings.livekit.url.clone(),
        jwt,
    }))
}
