use crate::token::TokenError;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A participant asking to join a room, common to both transports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub room_name: String,
    pub identity: String,
    /// Required when the transport carries one, absent when it is derived
    pub display_name: Option<String>,
}

impl JoinRequest {
    /// Every field that is present must be non-empty before a grant is signed
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.room_name.is_empty() {
            return Err(TokenError::MissingField("room"));
        }
        if self.identity.is_empty() {
            return Err(TokenError::MissingField("identity"));
        }
        if self.display_name.as_deref() == Some("") {
            return Err(TokenError::MissingField("name"));
        }
        Ok(())
    }
}

/// Query parameters of `GET /token`
#[derive(Debug, Default, Serialize, Deserialize, IntoParams, Clone, PartialEq)]
#[into_params(parameter_in = Query)]
pub struct TokenQuery {
    /// Room to join
    #[serde(rename = "roomName", default)]
    pub room_name: String,
    /// Display name of the participant
    #[serde(default)]
    pub name: String,
    /// Participant identity
    #[serde(default)]
    pub identity: String,
}

impl From<TokenQuery> for JoinRequest {
    fn from(query: TokenQuery) -> Self {
        Self {
            room_name: query.room_name,
            identity: query.identity,
            display_name: Some(query.name),
        }
    }
}

/// Response of `GET /token`
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct TokenResponse {
    /// Signed LiveKit access token
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Body of `POST /sfu/get`
#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct SfuRequest {
    /// Room to join
    #[serde(default)]
    pub room: String,
    /// OpenID token of the caller. Accepted for client compatibility, not verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub openid_token: Option<serde_json::Value>,
    /// Device of the caller
    #[serde(default)]
    pub device_id: String,
    /// User of the caller, trusted as sent. Clients may omit it.
    #[serde(default)]
    pub remove_me_user_id: String,
}

/// Only the room is required: the identity is `<user>:<device>` built from
/// whatever was sent, and the display name is the user when there is one.
impl From<SfuRequest> for JoinRequest {
    fn from(request: SfuRequest) -> Self {
        let identity = format!("{}:{}", request.remove_me_user_id, request.device_id);
        let display_name = Some(request.remove_me_user_id).filter(|user| !user.is_empty());

        Self {
            room_name: request.room,
            identity,
            display_name,
        }
    }
}

/// Response of `POST /sfu/get`
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct SfuConfigResponse {
    /// SFU the client should connect to
    pub url: String,
    /// Signed LiveKit access token
    pub jwt: String,
}
