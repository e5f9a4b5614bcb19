use std::sync::Arc;
use anyhow::Result;
use tracing::{info, warn};
use crate::config_manager::translate::TranslateConfig;
use super::client::GoogleTranslateClient;
use super::interface::TranslateInterface;

/// Factory for creating translation clients
pub struct TranslateFactory;

impl TranslateFactory {
    /// Create a translation client based on configuration
    ///
    /// # Arguments
    /// * `config` - translate section of the service config
    ///
    /// # Returns
    /// Shared TranslateInterface implementation
    pub fn create_translator(config: &TranslateConfig) -> Result<Arc<dyn TranslateInterface>> {
        info!("Initializing translation provider: {}", config.provider);

        match config.provider.as_str() {
            "google_translate" | "google" | "google_translate_v2" => {
                let api_key = Self::resolve_api_key(config, |name| std::env::var(name).ok())?;
                if api_key.is_none() {
                    warn!("No Google API key configured, requests will be sent unauthenticated");
                }
                Ok(Arc::new(GoogleTranslateClient::new(
                    config.base_url.clone(),
                    api_key,
                )))
            }
            _ => Err(anyhow::anyhow!(
                "Unsupported translation provider: {}",
                config.provider
            )),
        }
    }

    /// Pick the API key from config, then the key file, then `GOOGLE_API_KEY`
    fn resolve_api_key<F>(config: &TranslateConfig, env: F) -> Result<Option<String>>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = config.api_key.as_deref().and_then(usable_key) {
            return Ok(Some(key));
        }

        if let Some(path) = &config.api_key_file {
            let content = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read api_key_file {}: {}", path, e))?;
            if let Some(key) = usable_key(&content) {
                return Ok(Some(key));
            }
        }

        Ok(env("GOOGLE_API_KEY").as_deref().and_then(usable_key))
    }
}

/// Blank values and unresolved `${VAR}` placeholders count as unset
fn usable_key(raw: &str) -> Option<String> {
    let key = raw.trim();
    if key.is_empty() || key.starts_with("${") {
        None
    } else {
        Some(key.to_string())
    }
}
