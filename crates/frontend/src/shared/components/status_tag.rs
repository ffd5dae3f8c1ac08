use contracts::usecases::u601_generate_keys::StatusLine;
use leptos::prelude::*;

/// Success/failure tag for the status area. Renders nothing when empty.
#[component]
pub fn StatusTag(
    /// Current status, if any
    #[prop(into)]
    status: Signal<Option<StatusLine>>,
) -> impl IntoView {
    move || {
        status.get().map(|line| {
            let variant_class = if line.ok { "tag--ok" } else { "tag--bad" };
            view! {
                <span class=format!("tag {}", variant_class) role="status">
                    {line.message}
                </span>
            }
        })
    }
}
