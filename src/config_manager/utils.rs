use std::fs;
use std::path::Path;
use anyhow::Result;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::config_manager::main::Config;

/// Files probed when `CONFIG_PATH` is not set
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["conf.yaml", "conf.json"];

/// Read a JSON or YAML configuration file with environment variable substitution
pub fn read_config_file(config_path: &str) -> Result<Value> {
    if !Path::new(config_path).exists() {
        anyhow::bail!("Configuration file not found: {}", config_path);
    }

    let content = load_text_file(config_path)?;
    let content = substitute_env_vars(&content, |name| std::env::var(name).ok())?;

    let path_lower = config_path.to_lowercase();
    let value = if content.trim().is_empty() {
        Value::Null
    } else if path_lower.ends_with(".yaml") || path_lower.ends_with(".yml") {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(value)
}

/// Validate configuration data against the Config model
pub fn validate_config(config_data: Value) -> Result<Config> {
    // Empty documents read as null
    if config_data.is_null() {
        return Ok(Config::default());
    }
    let config: Config = serde_json::from_value(config_data)?;
    Ok(config)
}

/// Replace `${VAR_NAME}` with the value returned by `lookup`.
///
/// Unknown variables are left in place.
pub fn substitute_env_vars<F>(content: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &regex::Captures| {
        lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}

/// Load a text file, stripping a UTF-8 BOM.
///
/// Files that are not valid UTF-8 are decoded as Windows-1251, the usual
/// legacy encoding for Cyrillic text.
pub fn load_text_file(file_path: &str) -> Result<String> {
    let mut buffer = fs::read(file_path)?;
    if buffer.starts_with(&[0xEF, 0xBB, 0xBF]) {
        buffer.drain(0..3);
    }

    match String::from_utf8(buffer) {
        Ok(text) => Ok(text),
        Err(e) => {
            debug!("{} is not valid UTF-8, decoding as windows-1251", file_path);
            let bytes = e.into_bytes();
            let (cow, _, _) = encoding_rs::WINDOWS_1251.decode(&bytes);
            Ok(cow.into_owned())
        }
    }
}

/// Resolve the service configuration.
///
/// An explicit path must load. Otherwise the default locations are probed
/// and built-in defaults are used when none of them exist.
pub fn resolve_config(explicit_path: Option<String>) -> Result<(Config, Option<String>)> {
    resolve_config_from(explicit_path, &DEFAULT_CONFIG_PATHS)
}

/// Like [`resolve_config`] with an explicit list of probed files.
///
/// A probed file that exists but fails to load is an error.
fn resolve_config_from(
    explicit_path: Option<String>,
    candidates: &[&str],
) -> Result<(Config, Option<String>)> {
    if let Some(path) = explicit_path {
        let config = Config::load(&path)?;
        return Ok((config, Some(path)));
    }

    for path in candidates {
        if !Path::new(path).exists() {
            debug!("No config at {}", path);
            continue;
        }
        let config = Config::load(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path, e))?;
        return Ok((config, Some(path.to_string())));
    }

    Ok((Config::default(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(extension: &str, content: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "kappa-translate-{}.{}",
            uuid::Uuid::new_v4(),
            extension
        ));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_substitute_env_vars() {
        let out = substitute_env_vars("key: ${API_KEY}, other: ${MISSING}", |name| {
            (name == "API_KEY").then(|| "secret".to_string())
        })
        .unwrap();
        assert_eq!(out, "key: secret, other: ${MISSING}");
    }

    #[test]
    fn test_load_yaml_config() {
        let path = temp_file(
            "yaml",
            b"system_config:\n  port: 9000\ntranslate_config:\n  api_key: abc\n",
        );
        let config = Config::load(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.system_config.port, 9000);
        assert_eq!(config.system_config.host, "0.0.0.0");
        assert_eq!(config.translate_config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.translate_config.provider, "google_translate");
    }

    #[test]
    fn test_load_json_config_with_bom() {
        let mut content = vec![0xEF, 0xBB, 0xBF];
        content.extend_from_slice(br#"{"translate_config": {"base_url": "http://localhost:1"}}"#);
        let path = temp_file("json", &content);
        let config = Config::load(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.translate_config.base_url, "http://localhost:1");
        assert_eq!(config.system_config.port, 1488);
    }

    #[test]
    fn test_load_empty_yaml_gives_defaults() {
        let path = temp_file("yaml", b"");
        let config = Config::load(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.system_config.port, 1488);
        assert_eq!(config.translate_config.provider, "google_translate");
    }

    #[test]
    fn test_windows_1251_fallback() {
        // "привет" in windows-1251
        let path = temp_file("txt", &[0xEF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2]);
        let text = load_text_file(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(text, "привет");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Config::load("/nonexistent/kappa/conf.yaml").unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }

    #[test]
    fn test_explicit_path_must_load() {
        assert!(resolve_config(Some("/nonexistent/kappa/conf.json".to_string())).is_err());
    }

    #[test]
    fn test_malformed_default_config_fails() {
        let path = temp_file("yaml", b"system_config:\n  port: [not a port\n");
        let path_str = path.to_string_lossy().into_owned();
        let result = resolve_config_from(None, &[path_str.as_str()]);
        fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to load config from"));
    }

    #[test]
    fn test_probed_config_loads_first_existing() {
        let path = temp_file("json", br#"{"system_config": {"port": 7000}}"#);
        let path_str = path.to_string_lossy().into_owned();
        let result = resolve_config_from(None, &["/nonexistent/kappa/conf.yaml", path_str.as_str()]);
        fs::remove_file(&path).unwrap();

        let (config, loaded) = result.unwrap();
        assert_eq!(config.system_config.port, 7000);
        assert_eq!(loaded, Some(path_str));
    }

    #[test]
    fn test_no_config_files_gives_defaults() {
        let (config, loaded) = resolve_config_from(None, &["/nonexistent/kappa/conf.yaml"]).unwrap();
        assert!(loaded.is_none());
        assert_eq!(config.system_config.port, 1488);
    }
}
