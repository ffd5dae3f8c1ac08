use contracts::system::access_gate::{UNLOCK_SESSION_KEY, UNLOCK_SESSION_VALUE};
use web_sys::window;

fn get_session_storage() -> Option<web_sys::Storage> {
    window()?.session_storage().ok()?
}

/// Marker left by a successful unlock earlier in this browser session
pub fn get_unlock_marker() -> Option<String> {
    get_session_storage()?.get_item(UNLOCK_SESSION_KEY).ok()?
}

/// Remember the unlock until the browser session ends
pub fn save_unlock_marker() {
    match get_session_storage() {
        Some(storage) => {
            if let Err(e) = storage.set_item(UNLOCK_SESSION_KEY, UNLOCK_SESSION_VALUE) {
                log::warn!("Failed to persist unlock marker: {:?}", e);
            }
        }
        None => log::warn!("sessionStorage unavailable, unlock lasts for this page only"),
    }
}
