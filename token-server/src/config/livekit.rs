use confique::Config;

/// Credentials and endpoint of the LiveKit deployment tokens are issued for
#[derive(Config, Clone)]
pub struct LiveKitConfig {
    /// API key used as the token issuer
    #[config(env = "LIVEKIT_KEY")]
    pub api_key: String,

    /// API secret used to sign tokens
    #[config(env = "LIVEKIT_SECRET")]
    pub api_secret: String,

    /// Public URL of the SFU returned to clients of `/sfu/get` (default: ws://localhost:7880)
    #[config(env = "LIVEKIT_URL", default = "ws://localhost:7880")]
    pub url: String,
}

impl LiveKitConfig {
    /// Returns true when both the key and the secret are set
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

// The secret must never end up in logs
impl std::fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("url", &self.url)
            .finish()
    }
}
