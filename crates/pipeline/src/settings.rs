//! Tunables for a pick: which model, how hot, how long to wait.

use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_METADATA_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_DESCRIPTION_TEMPERATURE: f32 = 0.8;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct PickerSettings {
    /// Model identifier sent with both requests.
    pub model: String,
    pub metadata_temperature: f32,
    pub description_temperature: f32,
    /// Upper bound on each remote call. Expiry counts as an empty reply.
    pub request_timeout: Duration,
}

impl PickerSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            metadata_temperature: DEFAULT_METADATA_TEMPERATURE,
            description_temperature: DEFAULT_DESCRIPTION_TEMPERATURE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
