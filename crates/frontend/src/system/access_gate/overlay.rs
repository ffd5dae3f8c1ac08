use contracts::system::access_gate::GATE_ELEMENT_ID;
use leptos::prelude::*;

use super::context::use_gate;

/// Password prompt covering the page until the gate opens
#[component]
pub fn AccessGateOverlay() -> impl IntoView {
    let gate = use_gate();
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let attempt = password.get_untracked();
        // The input is cleared either way
        set_password.set(String::new());

        match gate.try_unlock(&attempt) {
            Ok(()) => set_error_message.set(None),
            Err(e) => set_error_message.set(Some(e.to_string())),
        }
    };

    view! {
        <div id=GATE_ELEMENT_ID class="gate" role="dialog" aria-modal="true">
            <div class="gate__box">
                <h2>"Restricted access"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="gate__error">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form__group">
                        <label class="form__label" for="gate-password">"Password"</label>
                        <input
                            type="password"
                            id="gate-password"
                            class="form__input"
                            autocomplete="off"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" class="button button--primary">
                        "Unlock"
                    </button>
                </form>
            </div>
        </div>
    }
}
