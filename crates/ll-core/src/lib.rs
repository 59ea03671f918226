//! # ll-core
//!
//! Core domain models and business logic for LocumLink profile completion.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod config;
pub mod documents;
pub mod identity;
pub mod ids;
pub mod lifecycle;
pub mod ports;
pub mod section;
pub mod stepper;
pub mod validation;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use documents::{DocumentCategory, DocumentError, DocumentFile, DocumentPolicy, UploadedDocument};
pub use identity::{ProfileSession, UserIdentity};
pub use ids::UserId;
pub use lifecycle::{Disposition, SectionEvent, SectionLifecycle, SectionPhase};
pub use section::{
    CompletionMap, ProfileDraft, SectionData, SectionForm, SectionId, SectionUpdate, StoredProfile,
};
pub use stepper::{StepAction, StepEvent, WizardStep, WizardStepper};
pub use validation::FieldErrors;
