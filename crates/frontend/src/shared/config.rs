//! Build-time configuration with an optional runtime override read from
//! `window.KEYGEN_CONFIG`, so a static deployment can point at another
//! endpoint without rebuilding. Values here are public.

use contracts::system::access_gate::DEFAULT_GATE_SHA256;
use contracts::usecases::u601_generate_keys::DEFAULT_API_URL;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Endpoint used when the form's API field is empty
    pub api_url: String,
    /// Hex SHA-256 the access gate compares against
    pub gate_sha256: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let api_url = option_env!("KEYGEN_API_URL").unwrap_or(DEFAULT_API_URL);
        let gate_sha256 = option_env!("KEYGEN_GATE_SHA256").unwrap_or(DEFAULT_GATE_SHA256);

        let mut config = Self {
            api_url: api_url.to_string(),
            gate_sha256: gate_sha256.to_string(),
        };

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        log::debug!("Key endpoint: {}", config.api_url);
        config
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_url: Option<String>,
    gate_sha256: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_url {
        config.api_url = value;
    }
    if let Some(value) = runtime.gate_sha256 {
        config.gate_sha256 = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("KEYGEN_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_url: read_runtime_value(&object, "api_url"),
        gate_sha256: read_runtime_value(&object, "gate_sha256"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
