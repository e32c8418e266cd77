pub(crate) use crate::config::livekit::LiveKitConfig;
use confique::Config;
use thiserror::Error;
use url::Url;

pub mod livekit;

/// Optional configuration file read from the working directory.
/// Environment variables take precedence over values found in it.
pub const CONFIG_FILE: &str = "token-server.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] confique::Error),

    #[error("LIVEKIT_KEY and LIVEKIT_SECRET environment variables must be set")]
    MissingCredentials,

    #[error("invalid LIVEKIT_URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Main configuration structure for the token server
#[derive(Debug, Config, Clone)]
pub struct Settings {
    /// The port the token server will listen to (default: 8080)
    #[config(env = "TOKEN_SERVER_PORT", default = 8080)]
    pub port: u16,

    /// LiveKit credentials and SFU endpoint
    #[config(nested)]
    pub livekit: LiveKitConfig,
}

impl Settings {
    /// Loads the configuration from the environment and the optional config file,
    /// then validates it
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Settings::builder().env().file(CONFIG_FILE).load()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the values that cannot be expressed as confique defaults
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.livekit.has_credentials() {
            return Err(ConfigError::MissingCredentials);
        }

        Url::parse(&self.livekit.url).map_err(|source| ConfigError::InvalidUrl {
            url: self.livekit.url.clone(),
            source,
        })?;

        Ok(())
    }

    #[cfg(test)]
    pub fn for_test() -> Self {
        Self {
            port: 0, // Let the OS choose a port
            livekit: LiveKitConfig {
                api_key: "test_api_key".to_string(),
                api_secret: "test_api_secret_that_is_long_enough".to_string(),
                url: "wss://sfu.example.test".to_string(),
            },
        }
    }
}
