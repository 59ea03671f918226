//! Port interfaces for the application layer
//!
//! Ports define the contract between the wizard use cases and the hosted
//! auth/database/storage service. Adapters live in `ll-infra`; tests provide
//! their own recording doubles.
//!
//! Every adapter returns canonical domain types. Field-shape differences in the
//! underlying store (camelCase vs snake_case, nested vs flattened address) are
//! resolved inside the adapter and never leak past these traits.

pub mod auth_session;
pub mod document_storage;
pub mod profile_repository;

pub use auth_session::AuthSessionPort;
pub use document_storage::DocumentStoragePort;
pub use profile_repository::ProfileRepositoryPort;
