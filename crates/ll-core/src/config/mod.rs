//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML -> DTO mapping
//!
//! ## Prohibited
//!
//! **No business logic, no validation, no default value calculation.**
//! Absent optional keys stay `None`; the wizard decides what that means.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root for profile documents and uploaded files (path only, no existence check)
    pub data_dir: PathBuf,

    /// Session file read by the file-backed auth adapter
    pub session_file: PathBuf,

    /// Autosave debounce; `Some(0)` is a valid fact meaning "write immediately"
    pub autosave_debounce_ms: Option<u64>,

    /// Client-side upload timeout
    pub upload_timeout_secs: Option<u64>,

    /// Directory for log files; empty means stdout only
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |table: &str, key: &str| {
            toml_value
                .get(table)
                .and_then(|t| t.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let u64_at = |table: &str, key: &str| {
            toml_value
                .get(table)
                .and_then(|t| t.get(key))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
        };

        Ok(Self {
            data_dir: PathBuf::from(str_at("storage", "data_dir")),
            session_file: PathBuf::from(str_at("auth", "session_file")),
            autosave_debounce_ms: u64_at("autosave", "debounce_ms"),
            upload_timeout_secs: u64_at("uploads", "timeout_secs"),
            log_dir: PathBuf::from(str_at("logging", "log_dir")),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            data_dir: PathBuf::new(),
            session_file: PathBuf::new(),
            autosave_debounce_ms: None,
            upload_timeout_secs: None,
            log_dir: PathBuf::new(),
        }
    }

    /// Create AppConfig with system-default paths for production use
    ///
    /// The base directory should be computed by the caller using platform-specific
    /// logic (e.g., the `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            session_file: data_dir.join("session.json"),
            log_dir: data_dir.join("logs"),
            data_dir,
            autosave_debounce_ms: None,
            upload_timeout_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_parses_all_sections() {
        let toml_str = r#"
            [storage]
            data_dir = "/var/lib/locumlink"

            [auth]
            session_file = "/var/lib/locumlink/session.json"

            [autosave]
            debounce_ms = 250

            [uploads]
            timeout_secs = 45

            [logging]
            log_dir = "/var/log/locumlink"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/locumlink"));
        assert_eq!(
            config.session_file,
            PathBuf::from("/var/lib/locumlink/session.json")
        );
        assert_eq!(config.autosave_debounce_ms, Some(250));
        assert_eq!(config.upload_timeout_secs, Some(45));
        assert_eq!(config.log_dir, PathBuf::from("/var/log/locumlink"));
    }

    #[test]
    fn test_from_toml_keeps_missing_values_empty() {
        let toml_value: Value = toml::from_str("[storage]\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_from_toml_keeps_explicit_zero_debounce() {
        let toml_value: Value = toml::from_str("[autosave]\ndebounce_ms = 0\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.autosave_debounce_ms, Some(0));
    }

    #[test]
    fn test_with_system_defaults_creates_paths() {
        let config = AppConfig::with_system_defaults(PathBuf::from("/tmp/ll"));

        assert_eq!(config.session_file, PathBuf::from("/tmp/ll/session.json"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/ll/logs"));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/ll"));
        assert_eq!(config.autosave_debounce_ms, None);
    }
}
