//! Business logic use cases
//!
//! [SectionEditor] --on_update--> [ProfileWizard] --debounced--> ProfileRepositoryPort
//!                                       |
//!                        LoadProfile / SubmitProfile / UploadDocument

pub mod editor;
pub mod load_profile;
pub mod submit_profile;
pub mod upload_document;
pub mod wizard;

pub use editor::{EditorError, SectionEditor, SectionUpdateSink};
pub use load_profile::LoadProfile;
pub use submit_profile::{SubmitOutcome, SubmitProfile};
pub use upload_document::UploadDocument;
pub use wizard::{ProfileWizard, WizardConfig, WizardError};
