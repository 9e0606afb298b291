//! Per-step results.
//!
//! Every step of a pick either got a usable value from the generator or fell
//! back to a local default. Keeping that distinction in the type lets the
//! orchestrator log each fallback and lets tests check each path on its own.

/// The result of one pick step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome<T> {
    /// The generator produced a usable value.
    Fresh(T),
    /// A local default was substituted.
    Fallback { value: T, reason: String },
}

impl<T> StepOutcome<T> {
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        StepOutcome::Fallback {
            value,
            reason: reason.into(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, StepOutcome::Fallback { .. })
    }

    pub fn value(&self) -> &T {
        match self {
            StepOutcome::Fresh(value) => value,
            StepOutcome::Fallback { value, .. } => value,
        }
    }

    /// Why the step fell back, if it did.
    pub fn reason(&self) -> Option<&str> {
        match self {
            StepOutcome::Fresh(_) => None,
            StepOutcome::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn into_value(self) -> T {
        match self {
            StepOutcome::Fresh(value) => value,
            StepOutcome::Fallback { value, .. } => value,
        }
    }
}
