use crate::config::LiveKitConfig;
use crate::token::{GrantDescriptor, TokenError, TokenSigner};
use livekit_api::access_token::{AccessToken, VideoGrants};

/// Signs grants as LiveKit access tokens (HS256 JWTs keyed by the API secret)
#[derive(Clone)]
pub struct LiveKitSigner {
    api_key: String,
    api_secret: String,
}

impl LiveKitSigner {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn from_config(config: &LiveKitConfig) -> Self {
        Self::new(config.api_key.clone(), config.api_secret.clone())
    }
}

impl TokenSigner for LiveKitSigner {
    fn sign(&self, grant: GrantDescriptor) -> Result<String, TokenError> {
        let video = VideoGrants {
            room: grant.room,
            room_join: grant.room_join,
            room_create: grant.room_create,
            can_publish: grant.can_publish,
            can_subscribe: grant.can_subscribe,
            ..Default::default()
        };

        AccessToken::with_api_key(&self.api_key, &self.api_secret)
            .with_identity(&grant.identity)
            .with_name(&grant.display_name)
            .with_grants(video)
            .with_ttl(grant.valid_for)
            .to_jwt()
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

impl std::fmt::Debug for LiveKitSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveKitSigner")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}
