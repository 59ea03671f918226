pub mod file_session;

pub use file_session::FileAuthSession;
