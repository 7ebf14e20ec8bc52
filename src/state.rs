use crate::catalog::{load_catalog_file, RecordStore};
use crate::chat::{ChatBackend, GeminiClient};
use crate::config::Config;
use crate::error::{AppError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all request handlers.
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub chat: Arc<dyn ChatBackend>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Load the bundled catalog and build the upstream chat client.
    pub fn new(config: Config) -> Result<Self> {
        let records = load_catalog_file(&config.catalog_path)?;
        let store = RecordStore::new(records);

        tracing::info!(
            records = store.len(),
            categories = store.get_categories().len(),
            fingerprint = %store.fingerprint(),
            "Record store initialized"
        );

        if !config.chat_enabled() {
            tracing::warn!("No chat API key configured; chat will answer with fallback text");
        }

        let chat = GeminiClient::new(
            config.chat_api_key.clone(),
            &config.chat_api_base,
            &config.chat_model,
            config.chat_timeout_secs.map(Duration::from_secs),
        )
        .map_err(|e| AppError::ConfigError(format!("Failed to build chat client: {}", e)))?;

        Ok(Self::with_parts(config, store, Arc::new(chat)))
    }

    /// Assemble state from pre-built parts.
    pub fn with_parts(config: Config, store: RecordStore, chat: Arc<dyn ChatBackend>) -> Self {
        Self {
            store: Arc::new(store),
            chat,
            config: Arc::new(config),
        }
    }

    /// Ready once there is a catalog to serve. An empty catalog (for example
    /// a bundled file holding `[]`) leaves every browse endpoint empty.
    pub fn is_ready(&self) -> bool {
        !self.store.is_empty()
    }
}
