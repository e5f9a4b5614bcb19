use serde::{Deserialize, Serialize};
use crate::config_manager::system::SystemConfig;
use crate::config_manager::translate::TranslateConfig;

/// Main configuration for the service, loaded from JSON or YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "system_config")]
    #[serde(default)]
    pub system_config: SystemConfig,

    #[serde(rename = "translate_config")]
    #[serde(default)]
    pub translate_config: TranslateConfig,
}

impl Config {
    /// Load configuration from a JSON or YAML file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        use crate::config_manager::utils::{read_config_file, validate_config};
        let value = read_config_file(path)?;
        validate_config(value)
    }

    /// Apply the `PORT` environment variable on top of the loaded values.
    ///
    /// An unset or blank variable leaves the configured port untouched.
    pub fn apply_port_override(&mut self, port: Option<String>) -> anyhow::Result<()> {
        let Some(raw) = port else {
            return Ok(());
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(());
        }

        self.system_config.port = raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid PORT value {:?}: {}", raw, e))?;
        Ok(())
    }
}
