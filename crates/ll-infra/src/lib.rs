pub mod auth;
pub mod fs;
pub mod profile;

pub use auth::FileAuthSession;
pub use fs::FsDocumentStore;
pub use profile::{normalize_profile, FileProfileRepository};
