//! Application shell: the key form, covered by the access gate overlay while
//! the gate is locked.

use crate::system::access_gate::{start_tamper_monitor, use_gate, AccessGateOverlay};
use crate::usecases::u601_generate_keys::KeyGenPage;
use leptos::prelude::*;

#[component]
pub fn AppShell() -> impl IntoView {
    let gate = use_gate();

    if !gate.is_unlocked_untracked() {
        start_tamper_monitor(gate);
    }

    view! {
        <KeyGenPage />
        <Show when=move || !gate.is_unlocked()>
            <AccessGateOverlay />
        </Show>
    }
}
