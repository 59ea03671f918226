pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::load_config;
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{build_wizard_deps, default_data_dir, open_wizard, resolve_app_config};
