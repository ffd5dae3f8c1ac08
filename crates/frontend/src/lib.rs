//! Browser front end of the license key generator.

pub mod app;
pub mod app_shell;
pub mod shared;
pub mod system;
pub mod usecases;

use wasm_bindgen::prelude::wasm_bindgen;

fn log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

/// Set up console logging and mount the key generator into `<body>`
#[wasm_bindgen(start)]
pub fn start() {
    _ = console_log::init_with_level(log_level());
    console_error_panic_hook::set_once();

    log::info!("Key generator starting");
    leptos::mount::mount_to_body(app::App);
}
