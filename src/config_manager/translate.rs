use serde::{Deserialize, Serialize};

/// Configuration for the external translation provider.
///
/// The language pair and format are fixed in the client, not configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Google API key. Supports `${VAR}` substitution.
    #[serde(default)]
    pub api_key: Option<String>,

    /// File holding the API key, read once at startup
    #[serde(default)]
    pub api_key_file: Option<String>,
}

fn default_provider() -> String {
    "google_translate".to_string()
}

fn default_base_url() -> String {
    "https://translation.googleapis.com".to_string()
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            api_key: None,
            api_key_file: None,
        }
    }
}
