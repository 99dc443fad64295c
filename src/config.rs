//! API configuration discovery and loading
//!
//! Configuration is resolved through a discovery hierarchy:
//! 1. Current directory: ./quill.toml or ./.quill/config.toml
//! 2. User config: ~/.quill/config.toml
//! 3. `COHERE_API_KEY` environment variable (credential only)
//! 4. Built-in defaults
//!
//! Loading never fails: a missing file, malformed TOML, or a malformed field
//! degrades to the built-in defaults, and a missing credential leaves the
//! configuration in a valid "unconfigured" state that callers must handle.

use std::env as std_env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;

/// Default Cohere chat endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.cohere.ai/v1/chat";
/// Default response length budget in tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 500;
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Environment variable consulted when no credential is found in a config file.
pub const API_KEY_ENV_VAR: &str = "COHERE_API_KEY";

/// Resolved API configuration, immutable after load.
///
/// One value is constructed at startup and shared (via `Arc`) with the
/// transport and the generator. `api_key == None` is the "unconfigured"
/// state; everything else always carries usable values.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ApiConfig {
    /// Discover and load configuration using the hierarchy.
    pub fn load() -> Self {
        let mut config = match find_config_file() {
            Some(path) => {
                info!("Loading configuration from: {:?}", path);
                Self::load_from(&path)
            }
            None => {
                info!("No configuration file found, using defaults");
                Self::default()
            }
        };

        config.api_key = resolve_api_key(
            config.api_key.take(),
            std_env::var(API_KEY_ENV_VAR).ok(),
        );
        config
    }

    /// Load from a specific TOML file, falling back to defaults on any error.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Parse configuration from TOML content.
    ///
    /// Recognized keys: `api.key`, `api.endpoint`, `max.tokens`,
    /// `temperature`. Each field is extracted leniently so one malformed
    /// value never poisons the rest.
    pub fn from_toml_str(content: &str) -> Self {
        let value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => {
                warn!("Malformed configuration file, using defaults: {}", e);
                return Self::default();
            }
        };

        let api_key = value
            .get("api")
            .and_then(|api| api.get("key"))
            .and_then(|key| key.as_str())
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        let endpoint = value
            .get("api")
            .and_then(|api| api.get("endpoint"))
            .and_then(|endpoint| endpoint.as_str())
            .and_then(|endpoint| match Url::parse(endpoint) {
                Ok(_) => Some(endpoint.to_string()),
                Err(e) => {
                    warn!("Invalid api.endpoint {:?}, using default: {}", endpoint, e);
                    None
                }
            })
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let max_tokens = value
            .get("max")
            .and_then(|max| max.get("tokens"))
            .and_then(|tokens| match tokens.as_integer() {
                Some(n) if n > 0 => u32::try_from(n).ok(),
                _ => {
                    warn!("Invalid max.tokens, using default {}", DEFAULT_MAX_TOKENS);
                    None
                }
            })
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let temperature = value
            .get("temperature")
            .and_then(|t| t.as_float().or_else(|| t.as_integer().map(|n| n as f64)))
            .map(|t| {
                if !(0.0..=1.0).contains(&t) {
                    warn!("temperature {} outside [0, 1], clamping", t);
                }
                t.clamp(0.0, 1.0)
            })
            .unwrap_or(DEFAULT_TEMPERATURE);

        Self {
            endpoint,
            api_key,
            max_tokens,
            temperature,
        }
    }

    /// Whether a usable credential was resolved.
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

/// Pick the credential: file wins, environment is the fallback.
fn resolve_api_key(file_key: Option<String>, env_key: Option<String>) -> Option<String> {
    file_key.or_else(|| env_key.map(|key| key.trim().to_string()).filter(|key| !key.is_empty()))
}

/// Find a configuration file using the discovery hierarchy.
pub fn find_config_file() -> Option<PathBuf> {
    for candidate in config_candidates() {
        debug!("Checking for config file: {:?}", candidate);
        if candidate.is_file() {
            debug!("Found config file: {:?}", candidate);
            return Some(candidate);
        }
    }

    debug!("No config file found in discovery hierarchy");
    None
}

/// Configuration file candidates in priority order.
fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(current_dir) = std_env::current_dir() {
        candidates.push(current_dir.join("quill.toml"));
        candidates.push(current_dir.join(".quill").join("config.toml"));
    }

    if let Some(home_dir) = home_dir() {
        candidates.push(home_dir.join(".quill").join("config.toml"));
    }

    candidates
}

fn home_dir() -> Option<PathBuf> {
    std_env::var("HOME")
        .ok()
        .or_else(|| std_env::var("USERPROFILE").ok())
        .map(PathBuf::from)
}

/// Show configuration discovery information for debugging.
pub fn show_discovery_info() {
    println!("Configuration discovery hierarchy:");
    println!();

    for (i, candidate) in config_candidates().iter().enumerate() {
        let status = if candidate.is_file() {
            "EXISTS"
        } else {
            "NOT FOUND"
        };
        println!("  {}. {:?} - {}", i + 1, candidate, status);
    }

    println!();
    if let Some(found) = find_config_file() {
        println!("Active configuration: {:?}", found);
    } else {
        println!("Active configuration: built-in defaults");
    }

    let config = ApiConfig::load();
    println!("Endpoint: {}", config.endpoint);
    println!("Max tokens: {}", config.max_tokens);
    println!("Temperature: {}", config.temperature);
    println!(
        "Credential: {}",
        if config.is_configured() {
            "configured"
        } else {
            "NOT configured (set api.key or COHERE_API_KEY)"
        }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.endpoint.starts_with("http"));
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.temperature, 0.7);
        assert!(!config.is_configured());
    }

    #[test]
    fn test_full_config_parsing() {
        let config = ApiConfig::from_toml_str(
            r#"
            api.key = "test-key"
            api.endpoint = "https://example.com/v2/chat"
            max.tokens = 250
            temperature = 0.3
            "#,
        );

        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.endpoint, "https://example.com/v2/chat");
        assert_eq!(config.max_tokens, 250);
        assert_eq!(config.temperature, 0.3);
        assert!(config.is_configured());
    }

    #[test]
    fn test_malformed_numeric_fields_fall_back_to_defaults() {
        let config = ApiConfig::from_toml_str(
            r#"
            api.key = "test-key"
            max.tokens = "lots"
            temperature = "warm"
            "#,
        );

        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        // The well-formed credential still loads.
        assert!(config.is_configured());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let config = ApiConfig::from_toml_str("this is not { toml");
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_invalid_endpoint_falls_back_to_defaults() {
        let config = ApiConfig::from_toml_str(r#"api.endpoint = "not a url""#);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_empty_key_is_unconfigured() {
        let config = ApiConfig::from_toml_str(r#"api.key = """#);
        assert!(!config.is_configured());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_temperature_is_clamped() {
        let config = ApiConfig::from_toml_str("temperature = 3.5");
        assert_eq!(config.temperature, 1.0);

        let config = ApiConfig::from_toml_str("temperature = -0.5");
        assert_eq!(config.temperature, 0.0);
    }

    #[test]
    fn test_env_fallback_applies_to_credential_only() {
        assert_eq!(
            resolve_api_key(None, Some("env-key".to_string())),
            Some("env-key".to_string())
        );
        // A credential from the file wins over the environment.
        assert_eq!(
            resolve_api_key(Some("file-key".to_string()), Some("env-key".to_string())),
            Some("file-key".to_string())
        );
        assert_eq!(resolve_api_key(None, Some("   ".to_string())), None);
        assert_eq!(resolve_api_key(None, None), None);
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = ApiConfig::load_from(&temp_dir.path().join("missing.toml"));
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quill.toml");
        std::fs::write(&path, "max.tokens = 123\n").unwrap();

        let config = ApiConfig::load_from(&path);
        assert_eq!(config.max_tokens, 123);
    }

    #[test]
    fn test_load_is_idempotent() {
        let a = ApiConfig::load();
        let b = ApiConfig::load();
        assert_eq!(a, b);
    }
}
