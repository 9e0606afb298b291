//! Errors that abort a pick.
//!
//! These never reach callers of `next_newest_pick`; they are turned into the
//! fallback result at the top of the orchestrator.

use llm_client::LlmClientError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickError {
    /// The metadata call failed outright (transport, auth, client setup).
    #[error("metadata generation failed: {0}")]
    Generation(#[from] LlmClientError),
}
