//! Inputs bound to a single [`FormField`] of the key form controller.

use contracts::usecases::u601_generate_keys::FormField;
use leptos::prelude::*;

use super::state::use_key_form;

fn input_id(field: FormField) -> String {
    format!("f-{}", field.key())
}

/// Text-like input (text, number, date)
#[component]
pub fn TextField(
    field: FormField,
    #[prop(into)] label: String,
    /// Input type: "text" (default), "number", "date", ...
    #[prop(optional, into)]
    input_type: MaybeProp<String>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
) -> impl IntoView {
    let controller = use_key_form();
    let id = input_id(field);
    let input_t = move || input_type.get().unwrap_or_else(|| "text".to_string());
    let input_placeholder = move || placeholder.get().unwrap_or_default();

    view! {
        <div class="form__group">
            <label class="form__label" for=id.clone()>{label}</label>
            <input
                id=id
                class="form__input"
                type=input_t
                placeholder=input_placeholder
                prop:value=move || controller.text(field)
                on:input=move |ev| controller.set_text(field, event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn CheckField(
    field: FormField,
    #[prop(into)] label: String,
    /// Package id exposed as `data-id` on catalogue checkboxes
    #[prop(optional)]
    data_id: Option<i64>,
) -> impl IntoView {
    let controller = use_key_form();
    let id = input_id(field);

    view! {
        <div class="form__checkbox-wrapper">
            <input
                id=id.clone()
                type="checkbox"
                class="form__checkbox"
                data-id=data_id.map(|v| v.to_string())
                prop:checked=move || controller.checked(field)
                on:change=move |ev| controller.set_checked(field, event_target_checked(&ev))
            />
            <label class="form__checkbox-label" for=id>{label}</label>
        </div>
    }
}

/// Select over `(value, label)` options
#[component]
pub fn SelectField(
    field: FormField,
    #[prop(into)] label: String,
    options: Vec<(String, String)>,
) -> impl IntoView {
    let controller = use_key_form();
    let id = input_id(field);

    view! {
        <div class="form__group">
            <label class="form__label" for=id.clone()>{label}</label>
            <select
                id=id
                class="form__select"
                prop:value=move || controller.text(field)
                on:change=move |ev| controller.set_text(field, event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(value, label)| {
                        let option_value = value.clone();
                        view! {
                            <option
                                value=value
                                selected=move || controller.text(field) == option_value
                            >
                                {label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
