//! Server crate for the trend picker.
//!
//! This crate contains the orchestrator that owns the picker state and
//! sequences the two text-generation calls behind `next_newest_pick`.

pub mod error;
pub mod orchestrator;

pub use error::PickError;
pub use orchestrator::PickOrchestrator;
pub use pipeline::PickerSettings;
