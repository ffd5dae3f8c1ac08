use thiserror::Error;

use super::request::{KeyRequest, KeyType};

/// Reasons a request is refused before anything is sent.
///
/// The `Display` text is what the status area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Select at least 1 package")]
    NoPackages,

    #[error("Invalid quantity")]
    InvalidQuantity,

    #[error("Invalid duration")]
    InvalidDuration,

    #[error("activateCount must be ≥ 2 for multi")]
    ActivateCountTooLow,
}

impl KeyRequest {
    /// First failing rule wins
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.package_ids.is_empty() {
            return Err(ValidationError::NoPackages);
        }
        if self.quantity < 1 {
            return Err(ValidationError::InvalidQuantity);
        }
        if self.duration < 1 {
            return Err(ValidationError::InvalidDuration);
        }
        if self.key_type == KeyType::Multi && self.activate_count.unwrap_or(0) < 2 {
            return Err(ValidationError::ActivateCountTooLow);
        }
        Ok(())
    }
}
