use contracts::usecases::u601_generate_keys::{
    keys_clipboard_text, FormField, FormState, KeyRequest, KeyService, StatusLine,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api::GlooTransport;
use super::storage;
use crate::shared::clipboard::copy_text;
use crate::shared::config::AppConfig;

const STATUS_CLEAR_MS: u32 = 2500;
const KEY_COPIED_CLEAR_MS: u32 = 2000;

/// Form controller: the form values plus everything the page renders from a
/// submission. Created once at the app root and shared through context.
#[derive(Clone, Copy)]
pub struct KeyFormController {
    pub form: RwSignal<FormState>,
    pub status: RwSignal<Option<StatusLine>>,
    /// Pretty response body or transport error text
    pub response: RwSignal<Option<String>>,
    pub keys: RwSignal<Vec<String>>,
    /// True while a request is in flight
    pub loading: RwSignal<bool>,
    api_url: StoredValue<String>,
    status_epoch: StoredValue<u64>,
}

impl KeyFormController {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            form: RwSignal::new(storage::load_form()),
            status: RwSignal::new(None),
            response: RwSignal::new(None),
            keys: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            api_url: StoredValue::new(config.api_url.clone()),
            status_epoch: StoredValue::new(0),
        }
    }

    pub fn text(&self, field: FormField) -> String {
        self.form.with(|f| f.text(field))
    }

    pub fn checked(&self, field: FormField) -> bool {
        self.form.with(|f| f.checked(field))
    }

    pub fn is_multi(&self) -> bool {
        self.form.with(|f| f.is_multi())
    }

    pub fn set_text(&self, field: FormField, value: String) {
        self.form.update(|f| f.set_text(field, &value));
        self.persist();
    }

    pub fn set_checked(&self, field: FormField, checked: bool) {
        self.form.update(|f| f.set_checked(field, checked));
        self.persist();
    }

    fn persist(&self) {
        self.form.with_untracked(storage::save_form);
    }

    /// Pretty payload as it would be sent right now
    pub fn preview(&self) -> String {
        self.form.with(render_preview)
    }

    pub fn show_status(&self, line: StatusLine) {
        self.status_epoch.update_value(|n| *n += 1);
        self.status.set(Some(line));
    }

    /// Show a status that clears itself unless replaced in the meantime
    pub fn flash_status(&self, line: StatusLine, clear_after_ms: u32) {
        self.show_status(line);
        let epoch = self.status_epoch.get_value();
        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(clear_after_ms).await;
            if this.status_epoch.try_get_value() == Some(epoch) {
                this.status.set(None);
            }
        });
    }

    pub fn copy_preview(&self) {
        let this = *self;
        let preview = self.form.with_untracked(render_preview);
        copy_text(&preview, move || {
            this.flash_status(StatusLine::json_copied(), STATUS_CLEAR_MS)
        });
    }

    pub fn copy_key(&self, key: &str) {
        let this = *self;
        copy_text(key, move || {
            this.flash_status(StatusLine::key_copied(), KEY_COPIED_CLEAR_MS)
        });
    }

    pub fn copy_all_keys(&self) {
        let Some((text, count)) = self.keys.with_untracked(|keys| keys_clipboard_text(keys)) else {
            self.show_status(StatusLine::no_keys_to_copy());
            return;
        };
        let this = *self;
        copy_text(&text, move || {
            this.flash_status(StatusLine::keys_copied(count), STATUS_CLEAR_MS)
        });
    }

    /// Validate and send the form. Refusals only update the status area.
    pub fn submit(&self, unlocked: bool) {
        if self.loading.get_untracked() {
            return;
        }

        let form = self.form.get_untracked();
        let service = KeyService::new(GlooTransport).with_default_url(self.api_url.get_value());

        let prepared = match service.prepare(unlocked, &form) {
            Ok(prepared) => prepared,
            Err(outcome) => {
                self.show_status(outcome.status_line());
                return;
            }
        };

        self.loading.set(true);
        self.show_status(StatusLine::sending());
        self.response.set(None);
        self.keys.set(Vec::new());

        let this = *self;
        spawn_local(async move {
            let outcome = service.send(&prepared).await;
            this.response.set(outcome.rendered());
            this.keys.set(outcome.keys().to_vec());
            this.show_status(outcome.status_line());
            this.loading.set(false);
        });
    }
}

fn render_preview(form: &FormState) -> String {
    KeyRequest::from_form(form)
        .to_pretty_json()
        .unwrap_or_else(|_| "{}".to_string())
}

/// Hook to access the key form controller
pub fn use_key_form() -> KeyFormController {
    use_context::<KeyFormController>().expect("KeyFormController not provided at the app root")
}
