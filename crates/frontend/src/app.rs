use crate::app_shell::AppShell;
use crate::shared::config::AppConfig;
use crate::system::access_gate::GateContext;
use crate::usecases::u601_generate_keys::KeyFormController;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();

    // Gate and form controller are created once and shared through context.
    provide_context(GateContext::new(&config));
    provide_context(KeyFormController::new(&config));

    view! {
        <AppShell />
    }
}
