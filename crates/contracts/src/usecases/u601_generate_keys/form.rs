use serde_json::{Map, Value};

use super::request::KeyType;

/// localStorage key holding the JSON snapshot of the form
pub const FORM_STORAGE_KEY: &str = "vlk_form";

/// Packages offered as checkboxes; anything else goes through the free-text field
pub const PACKAGE_CATALOG: [i64; 3] = [3652, 3559, 3496];

/// Units offered by the duration selector
pub const DURATION_UNITS: [&str; 5] = ["minutes", "hours", "days", "months", "years"];

/// Identifier of a single form control.
///
/// `key()` is the name used in the persisted snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Api,
    Package(i64),
    PackageExtra,
    Type,
    Quantity,
    Duration,
    Unit,
    Alias,
    IsCleanable,
    EndDate,
    ActivateCount,
}

impl FormField {
    pub fn key(&self) -> String {
        match self {
            FormField::Api => "api".to_string(),
            FormField::Package(id) => format!("pkg{}", id),
            FormField::PackageExtra => "pkgExtra".to_string(),
            FormField::Type => "type".to_string(),
            FormField::Quantity => "quantity".to_string(),
            FormField::Duration => "duration".to_string(),
            FormField::Unit => "unit".to_string(),
            FormField::Alias => "alias".to_string(),
            FormField::IsCleanable => "isCleanable".to_string(),
            FormField::EndDate => "endDate".to_string(),
            FormField::ActivateCount => "activateCount".to_string(),
        }
    }

    /// Resolve a snapshot key. Package keys are only known for catalogue ids.
    pub fn from_key(key: &str) -> Option<Self> {
        let field = match key {
            "api" => FormField::Api,
            "pkgExtra" => FormField::PackageExtra,
            "type" => FormField::Type,
            "quantity" => FormField::Quantity,
            "duration" => FormField::Duration,
            "unit" => FormField::Unit,
            "alias" => FormField::Alias,
            "isCleanable" => FormField::IsCleanable,
            "endDate" => FormField::EndDate,
            "activateCount" => FormField::ActivateCount,
            other => {
                let id: i64 = other.strip_prefix("pkg")?.parse().ok()?;
                if !PACKAGE_CATALOG.contains(&id) {
                    return None;
                }
                FormField::Package(id)
            }
        };
        Some(field)
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self, FormField::Package(_) | FormField::IsCleanable)
    }

    /// Every known field, in display order
    pub fn all() -> Vec<FormField> {
        let mut fields = vec![FormField::Api];
        fields.extend(PACKAGE_CATALOG.iter().map(|id| FormField::Package(*id)));
        fields.extend([
            FormField::PackageExtra,
            FormField::Type,
            FormField::Quantity,
            FormField::Duration,
            FormField::Unit,
            FormField::Alias,
            FormField::IsCleanable,
            FormField::EndDate,
            FormField::ActivateCount,
        ]);
        fields
    }
}

/// Current values of every control on the key form.
///
/// Text inputs are kept exactly as typed; numbers are only interpreted when
/// the request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub api: String,
    /// Catalogue packages with their checkbox state, in catalogue order
    pub packages: Vec<(i64, bool)>,
    pub package_extra: String,
    pub key_type: KeyType,
    pub quantity: String,
    pub duration: String,
    pub unit: String,
    pub alias: String,
    pub is_cleanable: bool,
    pub end_date: String,
    pub activate_count: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            api: String::new(),
            packages: PACKAGE_CATALOG.iter().map(|id| (*id, false)).collect(),
            package_extra: String::new(),
            key_type: KeyType::Single,
            quantity: "1".to_string(),
            duration: "30".to_string(),
            unit: "days".to_string(),
            alias: String::new(),
            is_cleanable: false,
            end_date: String::new(),
            activate_count: "2".to_string(),
        }
    }
}

impl FormState {
    /// Restore the form from a stored snapshot, falling back to defaults when
    /// nothing usable was saved.
    pub fn restore(saved: Option<&str>) -> Self {
        let mut state = Self::default();
        let Some(raw) = saved else {
            return state;
        };
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(snapshot)) => state.apply_snapshot(&snapshot),
            Ok(_) => log::warn!("Ignoring form snapshot: not a JSON object"),
            Err(e) => log::warn!("Ignoring unreadable form snapshot: {}", e),
        }
        state
    }

    /// Apply saved values. Keys outside the known field set are skipped.
    pub fn apply_snapshot(&mut self, snapshot: &Map<String, Value>) {
        for (key, value) in snapshot {
            let Some(field) = FormField::from_key(key) else {
                continue;
            };
            if field.is_checkbox() {
                self.set_checked(field, is_truthy(value));
            } else {
                self.set_text(field, &coerce_text(value));
            }
        }
    }

    /// Snapshot of every field, as written to storage
    pub fn to_snapshot(&self) -> Map<String, Value> {
        FormField::all()
            .into_iter()
            .map(|field| {
                let value = if field.is_checkbox() {
                    Value::Bool(self.checked(field))
                } else {
                    Value::String(self.text(field))
                };
                (field.key(), value)
            })
            .collect()
    }

    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&Value::Object(self.to_snapshot()))
    }

    pub fn text(&self, field: FormField) -> String {
        match field {
            FormField::Api => self.api.clone(),
            FormField::PackageExtra => self.package_extra.clone(),
            FormField::Type => self.key_type.as_str().to_string(),
            FormField::Quantity => self.quantity.clone(),
            FormField::Duration => self.duration.clone(),
            FormField::Unit => self.unit.clone(),
            FormField::Alias => self.alias.clone(),
            FormField::EndDate => self.end_date.clone(),
            FormField::ActivateCount => self.activate_count.clone(),
            FormField::Package(_) | FormField::IsCleanable => String::new(),
        }
    }

    pub fn checked(&self, field: FormField) -> bool {
        match field {
            FormField::Package(id) => self
                .packages
                .iter()
                .any(|(pkg, checked)| *pkg == id && *checked),
            FormField::IsCleanable => self.is_cleanable,
            _ => false,
        }
    }

    pub fn set_text(&mut self, field: FormField, value: &str) {
        let value = value.to_string();
        match field {
            FormField::Api => self.api = value,
            FormField::PackageExtra => self.package_extra = value,
            FormField::Type => self.key_type = KeyType::from_form_value(&value),
            FormField::Quantity => self.quantity = value,
            FormField::Duration => self.duration = value,
            FormField::Unit => self.unit = value,
            FormField::Alias => self.alias = value,
            FormField::EndDate => self.end_date = value,
            FormField::ActivateCount => self.activate_count = value,
            FormField::Package(_) | FormField::IsCleanable => {
                log::debug!("set_text ignored for checkbox field {}", field.key());
            }
        }
    }

    pub fn set_checked(&mut self, field: FormField, checked: bool) {
        match field {
            FormField::Package(id) => {
                if let Some(entry) = self.packages.iter_mut().find(|(pkg, _)| *pkg == id) {
                    entry.1 = checked;
                }
            }
            FormField::IsCleanable => self.is_cleanable = checked,
            _ => log::debug!("set_checked ignored for text field {}", field.key()),
        }
    }

    /// Catalogue ids whose checkbox is ticked
    pub fn checked_packages(&self) -> impl Iterator<Item = i64> + '_ {
        self.packages
            .iter()
            .filter(|(_, checked)| *checked)
            .map(|(id, _)| *id)
    }

    /// The activate count box is only shown for multi keys
    pub fn is_multi(&self) -> bool {
        self.key_type == KeyType::Multi
    }

    /// Unit select options. A restored unit outside [`DURATION_UNITS`] is
    /// appended so the select shows what will actually be sent.
    pub fn unit_choices(&self) -> Vec<String> {
        let mut choices: Vec<String> = DURATION_UNITS.iter().map(|u| u.to_string()).collect();
        let current = self.unit.as_str();
        if !current.is_empty() && !DURATION_UNITS.contains(&current) {
            choices.push(current.to_string());
        }
        choices
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
