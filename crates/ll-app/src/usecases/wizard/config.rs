use std::time::Duration;

use ll_core::documents::DEFAULT_UPLOAD_TIMEOUT_SECS;
use ll_core::{AppConfig, DocumentPolicy};

pub const DEFAULT_AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(400);

/// Runtime settings for [`ProfileWizard`](super::ProfileWizard).
///
/// This is where absent configuration values turn into defaults; `AppConfig`
/// itself carries only what the file said.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardConfig {
    /// Quiet period before a section is written. Zero writes on every change.
    pub autosave_debounce: Duration,
    pub upload_timeout: Duration,
    pub document_policy: DocumentPolicy,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            autosave_debounce: DEFAULT_AUTOSAVE_DEBOUNCE,
            upload_timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
            document_policy: DocumentPolicy::default(),
        }
    }
}

impl WizardConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        let defaults = Self::default();
        Self {
            autosave_debounce: config
                .autosave_debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.autosave_debounce),
            upload_timeout: match config.upload_timeout_secs {
                Some(secs) if secs > 0 => Duration::from_secs(secs),
                _ => defaults.upload_timeout,
            },
            document_policy: defaults.document_policy,
        }
    }
}
