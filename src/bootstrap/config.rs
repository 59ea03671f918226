//! # Configuration Loader
//!
//! ## Responsibilities
//!
//! - Read TOML configuration files
//! - Parse TOML into the `AppConfig` DTO
//! - Report I/O and parsing errors with context
//!
//! ## Prohibited
//!
//! No validation and no default values. Defaults belong to `WizardConfig`
//! and to [`resolve_app_config`](super::wiring::resolve_app_config).

use std::path::Path;

use anyhow::Context;
use ll_core::AppConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: impl AsRef<Path>) -> anyhow::Result<AppConfig> {
    let config_path = config_path.as_ref();
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [storage]
            data_dir = "/srv/locumlink"

            [auth]
            session_file = "/srv/locumlink/session.json"

            [autosave]
            debounce_ms = 0

            [uploads]
            timeout_secs = 60
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/locumlink"));
        assert_eq!(
            config.session_file,
            PathBuf::from("/srv/locumlink/session.json")
        );
        assert_eq!(config.autosave_debounce_ms, Some(0));
        assert_eq!(config.upload_timeout_secs, Some(60));
        assert_eq!(config.log_dir, PathBuf::new());
    }

    #[test]
    fn test_load_config_returns_empty_values_when_missing() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[storage]\n[autosave]\n").unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let err = load_config("/nonexistent/locumlink.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_reports_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[storage\ndata_dir = ").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }
}
