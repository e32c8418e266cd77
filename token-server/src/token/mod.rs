//! Room access token issuance
//!
//! Both HTTP transports funnel into [`issue_token`], which validates the join
//! request, builds the [`GrantDescriptor`] and hands it to a [`TokenSigner`].
//! The signer is a trait so the state can carry the LiveKit implementation in
//! production and a recording one in tests.

pub mod livekit;

pub use crate::token::livekit::LiveKitSigner;
use crate::models::JoinRequest;
use log::debug;
use std::time::Duration;
use thiserror::Error;

/// Validity of every issued token
pub const TOKEN_VALIDITY: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("failed to sign access token: {0}")]
    Signing(String),
}

/// Everything the signer needs to mint a room token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantDescriptor {
    pub room: String,
    pub identity: String,
    pub display_name: String,
    pub can_publish: bool,
    pub can_subscribe: bool,
    pub room_join: bool,
    pub room_create: bool,
    pub valid_for: Duration,
}

impl GrantDescriptor {
    /// Full participant grant for a room: join, create, publish and subscribe,
    /// valid for [`TOKEN_VALIDITY`]
    pub fn for_room(
        room: impl Into<String>,
        identity: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            room: room.into(),
            identity: identity.into(),
            display_name: display_name.into(),
            can_publish: true,
            can_subscribe: true,
            room_join: true,
            room_create: true,
            valid_for: TOKEN_VALIDITY,
        }
    }
}

/// Turns a grant into a signed, opaque token string
pub trait TokenSigner: Send + Sync {
    fn sign(&self, grant: GrantDescriptor) -> Result<String, TokenError>;
}

/// Validates the join request and signs a full participant grant for it.
///
/// The signer is never invoked when a field is empty.
pub fn issue_token(signer: &dyn TokenSigner, request: JoinRequest) -> Result<String, TokenError> {
    request.validate()?;

    let JoinRequest {
        room_name,
        identity,
        display_name,
    } = request;

    debug!("Signing grant for '{identity}' in room '{room_name}'");
    signer.sign(GrantDescriptor::for_room(
        room_name,
        identity,
        display_name.unwrap_or_default(),
    ))
}
