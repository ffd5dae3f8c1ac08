use contracts::system::access_gate::GATE_ELEMENT_ID;
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;

use super::context::GateContext;

const CHECK_INTERVAL_MS: u32 = 1000;

/// Reload the page if the overlay is removed from the document while the
/// gate is still locked. Stops once the gate opens.
pub fn start_tamper_monitor(gate: GateContext) {
    spawn_local(async move {
        loop {
            TimeoutFuture::new(CHECK_INTERVAL_MS).await;
            match gate.requires_reload(overlay_present()) {
                Some(true) => {
                    log::warn!("Access gate overlay removed while locked, reloading");
                    reload_page();
                    break;
                }
                Some(false) if gate.is_unlocked_untracked() => break,
                Some(false) => {}
                None => break,
            }
        }
    });
}

fn overlay_present() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(GATE_ELEMENT_ID))
        .is_some()
}

fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            log::error!("Page reload failed: {:?}", e);
        }
    }
}
