//! Password overlay in front of the key form.
//!
//! The reference digest ships with the client, so this only deters casual
//! use. Access control for key generation has to be enforced by the endpoint.

use sha2::{Digest, Sha256};
use thiserror::Error;

/// SHA-256 of the default password
pub const DEFAULT_GATE_SHA256: &str =
    "f313abbf309b9090992ce960e46c3f6e7e5fc7ba5de80998482cb687f14a33a3";

/// sessionStorage key recording that the gate was passed
pub const UNLOCK_SESSION_KEY: &str = "vlk_unlocked";
pub const UNLOCK_SESSION_VALUE: &str = "1";

/// DOM id of the overlay, watched by the tamper monitor
pub const GATE_ELEMENT_ID: &str = "access-gate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Incorrect password")]
    Mismatch,
}

/// Lowercase hex SHA-256 of `input`
pub fn sha256_hex(input: &str) -> String {
    Sha256::digest(input.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGate {
    reference_digest: String,
    unlocked: bool,
}

impl AccessGate {
    pub fn new(reference_digest: impl AsRef<str>) -> Self {
        Self {
            reference_digest: reference_digest.as_ref().trim().to_ascii_lowercase(),
            unlocked: false,
        }
    }

    /// Start unlocked when this browser session already passed the gate
    pub fn with_session_marker(mut self, marker: Option<&str>) -> Self {
        if marker == Some(UNLOCK_SESSION_VALUE) {
            self.unlocked = true;
        }
        self
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn matches(&self, password: &str) -> bool {
        sha256_hex(password) == self.reference_digest
    }

    /// Unlock on a digest match. Once unlocked the gate stays open.
    pub fn attempt(&mut self, password: &str) -> Result<(), GateError> {
        if self.unlocked {
            return Ok(());
        }
        if self.matches(password) {
            self.unlocked = true;
            log::info!("Access gate unlocked");
            Ok(())
        } else {
            log::warn!("Access gate: wrong password");
            Err(GateError::Mismatch)
        }
    }

    /// The overlay vanished while still locked
    pub fn requires_reload(&self, overlay_present: bool) -> bool {
        !self.unlocked && !overlay_present
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(DEFAULT_GATE_SHA256)
    }
}
