use crate::config::Settings;
use crate::token::{LiveKitSigner, TokenSigner};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub signer: Arc<dyn TokenSigner>,
}

impl AppState {
    /// State signing with the LiveKit credentials from the settings
    pub fn new(settings: Settings) -> Self {
        let signer = LiveKitSigner::from_config(&settings.livekit);
        Self::with_signer(settings, Arc::new(signer))
    }

    pub fn with_signer(settings: Settings, signer: Arc<dyn TokenSigner>) -> Self {
        Self {
            settings: Arc::new(settings),
            signer,
        }
    }
}
