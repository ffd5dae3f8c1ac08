use contracts::usecases::u601_generate_keys::{FormState, FORM_STORAGE_KEY};

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Last saved form, or defaults
pub fn load_form() -> FormState {
    let saved = storage().and_then(|s| s.get_item(FORM_STORAGE_KEY).ok().flatten());
    FormState::restore(saved.as_deref())
}

/// Overwrite the saved snapshot with the whole form
pub fn save_form(form: &FormState) {
    let json = match form.snapshot_json() {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Failed to serialize form snapshot: {}", e);
            return;
        }
    };
    if let Some(s) = storage() {
        if let Err(e) = s.set_item(FORM_STORAGE_KEY, &json) {
            log::warn!("Failed to save form snapshot: {:?}", e);
        }
    }
}
