//! Per-section editing lifecycle.
//!
//! Replaces ad hoc "dirty" booleans with an explicit state machine. Both the
//! section editor (for its local copy) and the wizard (for the authoritative
//! draft) drive the same transition function.

pub mod state_machine;

pub use state_machine::{Disposition, SectionEvent, SectionLifecycle, SectionPhase};
