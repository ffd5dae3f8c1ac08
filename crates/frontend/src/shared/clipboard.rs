//! Clipboard access through the Web Clipboard API.

use wasm_bindgen_futures::spawn_local;

/// Copy `text` and run `on_copied` once the browser confirms the write.
///
/// Failures are logged and otherwise ignored.
pub fn copy_text<F>(text: &str, on_copied: F)
where
    F: FnOnce() + 'static,
{
    let text = text.to_owned();
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            log::warn!("Clipboard unavailable: no window");
            return;
        };
        let clipboard = window.navigator().clipboard();
        match wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&text)).await {
            Ok(_) => on_copied(),
            Err(e) => log::warn!("Clipboard write failed: {:?}", e),
        }
    });
}
