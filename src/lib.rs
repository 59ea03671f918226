//! LocumLink profile engine.
//!
//! Assembles the profile wizard from the file-backed adapters: configuration,
//! logging and dependency wiring live in [`bootstrap`].

pub mod bootstrap;

pub use bootstrap::{
    build_wizard_deps, default_data_dir, init_tracing_subscriber, load_config, open_wizard,
    resolve_app_config,
};
pub use ll_app::{ProfileWizard, SectionEditor, SubmitOutcome, WizardConfig, WizardError};
pub use ll_core::AppConfig;
