pub mod file_repo;
pub mod normalizer;

pub use file_repo::FileProfileRepository;
pub use normalizer::normalize_profile;
