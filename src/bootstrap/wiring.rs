//! # Dependency Injection
//!
//! ## Responsibilities
//!
//! - Create the file-backed adapters (auth session, profile store, document store)
//! - Inject them into the wizard through its port traits
//!
//! ## Prohibited
//!
//! **No business logic**
//! - Do not decide what happens when nobody is signed in
//! - Do not pick autosave or upload defaults; `WizardConfig` owns those
//!
//! **No configuration validation**
//! - Config is already loaded in config.rs
//!
//! This is the only place allowed to depend on ll-infra and ll-app at the same
//! time, and only for assembly.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use ll_app::{ProfileWizard, WizardConfig, WizardDeps, WizardError};
use ll_core::AppConfig;
use ll_infra::{FileAuthSession, FileProfileRepository, FsDocumentStore};
use tracing::info;

const APP_DIR_NAME: &str = "locumlink";

/// Platform data directory for LocumLink, e.g. `~/.local/share/locumlink`.
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .context("Failed to determine the platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

/// Fill every empty path in `config` from the defaults rooted at its data dir.
///
/// When `data_dir` itself is empty the platform directory is used.
pub fn resolve_app_config(config: AppConfig) -> anyhow::Result<AppConfig> {
    let data_dir = if config.data_dir.as_os_str().is_empty() {
        default_data_dir()?
    } else {
        config.data_dir.clone()
    };
    let defaults = AppConfig::with_system_defaults(data_dir.clone());

    Ok(AppConfig {
        data_dir,
        session_file: pick(config.session_file, defaults.session_file),
        log_dir: pick(config.log_dir, defaults.log_dir),
        ..config
    })
}

fn pick(configured: PathBuf, fallback: PathBuf) -> PathBuf {
    if configured.as_os_str().is_empty() {
        fallback
    } else {
        configured
    }
}

/// Build the port implementations for the wizard.
pub fn build_wizard_deps(config: &AppConfig) -> WizardDeps {
    WizardDeps {
        auth: Arc::new(FileAuthSession::new(config.session_file.clone())),
        profiles: Arc::new(FileProfileRepository::new(config.data_dir.clone())),
        documents: Arc::new(FsDocumentStore::new(config.data_dir.clone())),
    }
}

/// Wire the adapters and load the signed-in user's wizard.
pub async fn open_wizard(config: &AppConfig) -> Result<ProfileWizard, WizardError> {
    let deps = build_wizard_deps(config);
    let wizard_config = WizardConfig::from_app_config(config);
    info!(data_dir = %config.data_dir.display(), "opening profile wizard");
    ProfileWizard::load(deps, wizard_config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use ll_core::section::PersonalIdentifiers;
    use ll_core::{SectionId, UserIdentity};
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::with_system_defaults(dir.path().to_path_buf());
        config.autosave_debounce_ms = Some(0);
        config
    }

    #[test]
    fn test_resolve_fills_empty_paths_from_data_dir() {
        let mut config = AppConfig::empty();
        config.data_dir = PathBuf::from("/srv/ll");
        config.log_dir = PathBuf::from("/var/log/ll");

        let resolved = resolve_app_config(config).unwrap();

        assert_eq!(resolved.session_file, PathBuf::from("/srv/ll/session.json"));
        assert_eq!(resolved.log_dir, PathBuf::from("/var/log/ll"));
    }

    #[test]
    fn test_resolve_keeps_timing_values() {
        let mut config = AppConfig::empty();
        config.data_dir = PathBuf::from("/srv/ll");
        config.autosave_debounce_ms = Some(0);

        let resolved = resolve_app_config(config).unwrap();

        assert_eq!(resolved.autosave_debounce_ms, Some(0));
        assert_eq!(resolved.upload_timeout_secs, None);
    }

    #[tokio::test]
    async fn test_open_wizard_without_session_is_not_authenticated() {
        let temp_dir = TempDir::new().unwrap();

        let result = open_wizard(&config_in(&temp_dir)).await;

        assert!(matches!(result, Err(WizardError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_open_wizard_edits_reach_disk() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        FileAuthSession::new(config.session_file.clone())
            .sign_in(&UserIdentity::new("u-7", "foreman@ppth.org", "Eric Foreman"))
            .await
            .unwrap();

        let wizard = open_wizard(&config).await.unwrap();
        let mut editor = wizard.editor::<PersonalIdentifiers>().await;
        editor.update(|p| p.phone = "609-555-0107".into()).await;
        wizard.flush_all().await;

        assert!(temp_dir.path().join("profiles").join("u-7.json").exists());

        let reopened = open_wizard(&config).await.unwrap();
        assert!(reopened.draft().await.contains(SectionId::PersonalIdentifiers));
    }
}
