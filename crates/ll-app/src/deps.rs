//! # Wizard Dependencies
//!
//! Dependency grouping for wizard construction.
//!
//! **Note**: This is NOT a Builder pattern.
//! - No build steps
//! - No default values
//! - Just parameter grouping

use std::sync::Arc;

use ll_core::ports::{AuthSessionPort, DocumentStoragePort, ProfileRepositoryPort};

/// All dependencies are required - no defaults, no optional fields.
#[derive(Clone)]
pub struct WizardDeps {
    pub auth: Arc<dyn AuthSessionPort>,
    pub profiles: Arc<dyn ProfileRepositoryPort>,
    pub documents: Arc<dyn DocumentStoragePort>,
}
