//! Per-step logic for producing a trending-song pick.
//!
//! This crate provides:
//! - Prompt construction for the metadata and description requests
//! - Decoding of untrusted generator replies
//! - `StepOutcome`, the fresh-or-fallback result of each step
//! - Assembly of the final `PickResult`
//!
//! ## Architecture
//! A pick moves through these stages:
//! 1. `prompts::metadata_request` builds the first request
//! 2. `decode::song_pick_outcome` decodes the reply (or substitutes the placeholder)
//! 3. `prompts::description_request` builds the second request
//! 4. `decode::description_outcome` cleans the reply (or substitutes the fixed line)
//! 5. `assemble::combine` produces the `PickResult`
//!
//! Nothing here does I/O; the orchestrator in the `server` crate makes the calls.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{prompts, decode, assemble, PickerSettings};
//!
//! let settings = PickerSettings::default();
//! let request = prompts::metadata_request(&history, &banned, &settings);
//! let reply = generator.complete(request).await?;
//! let song = decode::song_pick_outcome(&reply);
//! ```

pub mod outcome;
pub mod settings;
pub mod prompts;
pub mod decode;
pub mod assemble;

// Re-export main types
pub use outcome::StepOutcome;
pub use settings::PickerSettings;
pub use decode::DecodeError;
pub use prompts::{description_request, metadata_request};
pub use assemble::{assemble_result, combine};
