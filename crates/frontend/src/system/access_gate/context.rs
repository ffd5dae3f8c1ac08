use contracts::system::access_gate::{AccessGate, GateError};
use leptos::prelude::*;

use super::storage;
use crate::shared::config::AppConfig;

/// Reactive handle on the access gate, provided once at the app root
#[derive(Clone, Copy)]
pub struct GateContext {
    gate: RwSignal<AccessGate>,
}

impl GateContext {
    pub fn new(config: &AppConfig) -> Self {
        let marker = storage::get_unlock_marker();
        let gate = AccessGate::new(&config.gate_sha256).with_session_marker(marker.as_deref());
        if gate.is_unlocked() {
            log::debug!("Access gate already passed in this session");
        }
        Self {
            gate: RwSignal::new(gate),
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.gate.with(|g| g.is_unlocked())
    }

    pub fn is_unlocked_untracked(&self) -> bool {
        self.gate.with_untracked(|g| g.is_unlocked())
    }

    /// `None` once the owning reactive scope is gone
    pub fn requires_reload(&self, overlay_present: bool) -> Option<bool> {
        self.gate
            .try_with_untracked(|g| g.requires_reload(overlay_present))
    }

    /// Check a password; on success the unlock is also recorded for the session
    pub fn try_unlock(&self, password: &str) -> Result<(), GateError> {
        let mut result = Err(GateError::Mismatch);
        self.gate.update(|g| result = g.attempt(password));
        if result.is_ok() {
            storage::save_unlock_marker();
        }
        result
    }
}

/// Hook to access the gate
pub fn use_gate() -> GateContext {
    use_context::<GateContext>().expect("GateContext not provided at the app root")
}
