use contracts::usecases::u601_generate_keys::{FormField, PACKAGE_CATALOG};
use leptos::prelude::*;
use thaw::*;

use super::fields::{CheckField, SelectField, TextField};
use super::state::use_key_form;
use crate::shared::components::status_tag::StatusTag;
use crate::system::access_gate::use_gate;

#[component]
pub fn KeyGenPage() -> impl IntoView {
    let controller = use_key_form();
    let gate = use_gate();

    let on_send = move |_| controller.submit(gate.is_unlocked_untracked());
    let on_copy_json = move |_| controller.copy_preview();
    let on_copy_keys = move |_| controller.copy_all_keys();

    let type_options = vec![
        ("single".to_string(), "Single".to_string()),
        ("multi".to_string(), "Multi".to_string()),
    ];
    let unit_options: Vec<(String, String)> = controller
        .form
        .with_untracked(|f| f.unit_choices())
        .into_iter()
        .map(|u| (u.clone(), u))
        .collect();

    view! {
        <div class="page page--keygen">
            <div class="page__header">
                <h1 class="page__title">"Key generator"</h1>
                <div class="status-area">
                    <StatusTag status=controller.status />
                </div>
            </div>

            <Flex vertical=false gap=FlexGap::Large align=FlexAlign::Start>
                <div class="card">
                    <div class="card__body">
                        <TextField field=FormField::Api label="API endpoint" placeholder="/api/key" />

                        <div class="form__group" id="pkgList">
                            <span class="form__label">"Packages"</span>
                            {PACKAGE_CATALOG
                                .iter()
                                .map(|id| {
                                    view! {
                                        <CheckField
                                            field=FormField::Package(*id)
                                            label=format!("Package {}", id)
                                            data_id=*id
                                        />
                                    }
                                })
                                .collect_view()}
                            <TextField
                                field=FormField::PackageExtra
                                label="Other package ids"
                                placeholder="e.g. 12, 7"
                            />
                        </div>

                        <SelectField field=FormField::Type label="Type" options=type_options />
                        <Show when=move || controller.is_multi()>
                            <TextField
                                field=FormField::ActivateCount
                                label="Activations per key"
                                input_type="number"
                            />
                        </Show>

                        <TextField field=FormField::Quantity label="Quantity" input_type="number" />
                        <Flex gap=FlexGap::Medium>
                            <TextField field=FormField::Duration label="Duration" input_type="number" />
                            <SelectField field=FormField::Unit label="Unit" options=unit_options />
                        </Flex>
                        <TextField field=FormField::Alias label="Alias" />
                        <TextField field=FormField::EndDate label="End date" input_type="date" />
                        <CheckField field=FormField::IsCleanable label="Cleanable" />

                        <button
                            class="button button--primary"
                            disabled=move || controller.loading.get()
                            on:click=on_send
                        >
                            {move || {
                                if controller.loading.get() {
                                    view! { <Spinner size=SpinnerSize::Small /> }.into_any()
                                } else {
                                    view! { "Generate keys" }.into_any()
                                }
                            }}
                        </button>
                    </div>
                </div>

                <div class="card">
                    <div class="card__body">
                        <div class="card__header">
                            <h3>"Payload"</h3>
                            <button class="button button--ghost" on:click=on_copy_json>
                                "Copy JSON"
                            </button>
                        </div>
                        <pre class="json-viewer__content">{move || controller.preview()}</pre>

                        <div class="card__header">
                            <h3>"Response"</h3>
                            <button class="button button--secondary" on:click=on_copy_keys>
                                "Copy all keys"
                            </button>
                        </div>
                        {move || match controller.response.get() {
                            Some(text) => {
                                view! { <pre class="json-viewer__content">{text}</pre> }.into_any()
                            }
                            None => {
                                view! { <div class="empty">"No response yet"</div> }.into_any()
                            }
                        }}

                        <KeysBox />
                    </div>
                </div>
            </Flex>
        </div>
    }
}

/// One row per extracted key, each copyable on its own
#[component]
fn KeysBox() -> impl IntoView {
    let controller = use_key_form();

    view! {
        <div class="keys" style:display=move || {
            if controller.keys.with(|k| k.is_empty()) { "none" } else { "" }
        }>
            <h3>"Keys"</h3>
            <For
                each=move || controller.keys.get().into_iter().enumerate()
                key=|(i, key)| format!("{}:{}", i, key)
                children=move |(_, key)| {
                    let key_for_copy = key.clone();
                    view! {
                        <div class="key">
                            <code>{key}</code>
                            <button
                                class="button button--ghost"
                                on:click=move |_| controller.copy_key(&key_for_copy)
                            >
                                "copy"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
