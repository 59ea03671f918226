//! LocumLink Application Orchestration Layer
//!
//! This crate contains the profile-completion use cases: section editors, the
//! wizard that owns the aggregate draft, and the persistence flows around it.

pub mod deps;
pub mod usecases;

pub use deps::WizardDeps;
pub use usecases::{
    EditorError, LoadProfile, ProfileWizard, SectionEditor, SectionUpdateSink, SubmitOutcome,
    SubmitProfile, UploadDocument, WizardConfig, WizardError,
};
