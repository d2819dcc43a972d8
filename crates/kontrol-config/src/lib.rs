//! KONTROL widget configuration.
//!
//! TOML-based configuration for the assistant widget, its responder and the
//! persisted theme preference. All sections use sensible defaults so partial
//! configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kontrol_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod preferences;
pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;

pub use preferences::{MemoryPreferenceStore, PreferenceStore, TomlPreferenceStore};
pub use schema::{KontrolConfig, CONFIG_SCHEMA_VERSION};
pub use toml_writer::{save_config, save_config_to_path};

use std::path::Path;

use kontrol_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a default `config.toml` if none exists.
pub fn load_config() -> Result<KontrolConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path and validate it.
pub fn load_config_from(path: &Path) -> Result<KontrolConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &KontrolConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = KontrolConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"assistant\""));
        assert!(json.contains("\"responder\""));
        assert!(json.contains("\"theme\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn load_config_from_missing_path_is_file_not_found() {
        let err = load_config_from(Path::new("/tmp/kontrol_missing_config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[assistant]\nmax_input_len = 0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("assistant.max_input_len"));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = KontrolConfig::default();
        let json = config_to_json(&config);
        let parsed: KontrolConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.assistant.max_input_len, 4096);
        assert_eq!(parsed.theme.name, kontrol_common::Theme::Dark);
    }
}
