//! Profile wizard.
//!
//! The wizard owns the aggregate draft. Section editors push every change to it
//! through [`SectionUpdateSink`](crate::SectionUpdateSink); the wizard merges the
//! change, recomputes completion and schedules a debounced write of that section.

mod autosave;
mod config;
mod context;
mod orchestrator;

pub use autosave::AutosaveScheduler;
pub use config::{WizardConfig, DEFAULT_AUTOSAVE_DEBOUNCE};
pub use context::{WizardContext, WizardState};
pub use orchestrator::ProfileWizard;

use ll_core::DocumentError;

/// Errors produced by the profile wizard.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("no signed-in user")]
    NotAuthenticated,
    #[error("document upload failed: {0}")]
    Upload(#[from] DocumentError),
}
