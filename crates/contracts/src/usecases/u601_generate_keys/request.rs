use std::collections::HashSet;

use chrono::{NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};

use super::form::FormState;

/// Kind of key being issued
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// One activation per key
    #[default]
    Single,
    /// Several activations per key, see `activate_count`
    Multi,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Single => "single",
            KeyType::Multi => "multi",
        }
    }

    /// Anything the selector does not recognise is treated as `single`
    pub fn from_form_value(value: &str) -> Self {
        match value.trim() {
            "multi" => KeyType::Multi,
            _ => KeyType::Single,
        }
    }
}

/// Body POSTed to the key endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRequest {
    #[serde(rename = "type")]
    pub key_type: KeyType,
    pub quantity: i64,
    pub package_ids: Vec<i64>,
    pub duration: i64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub is_cleanable: bool,
    /// End-of-day UTC instant, `YYYY-MM-DDT23:59:59.000Z`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Only sent for multi keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activate_count: Option<i64>,
}

impl KeyRequest {
    pub fn from_form(form: &FormState) -> Self {
        let alias = form.alias.trim();
        let activate_count = match form.key_type {
            KeyType::Multi => Some(int_or(&form.activate_count, 2)),
            KeyType::Single => None,
        };

        Self {
            key_type: form.key_type,
            quantity: int_or(&form.quantity, 1),
            package_ids: collect_package_ids(form.checked_packages(), &form.package_extra),
            duration: int_or(&form.duration, 1),
            unit: form.unit.clone(),
            alias: (!alias.is_empty()).then(|| alias.to_string()),
            is_cleanable: form.is_cleanable,
            end_date: end_of_day_utc(&form.end_date),
            activate_count,
        }
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Union of checked catalogue ids and the comma separated extras, without
/// duplicates. Extras that do not start with an integer are dropped.
pub fn collect_package_ids<I>(checked: I, extra: &str) -> Vec<i64>
where
    I: IntoIterator<Item = i64>,
{
    let mut seen = HashSet::new();
    checked
        .into_iter()
        .chain(extra.split(',').filter_map(parse_leading_int))
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Leading-integer parse: optional whitespace and sign, then at least one digit.
/// Trailing garbage is ignored, so `"7x"` yields 7. Digit runs beyond the
/// `i64` range saturate instead of being treated as non-numeric.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value = rest[..digits_len]
        .bytes()
        .try_fold(0i64, |acc, d| {
            let digit = i64::from(d - b'0');
            acc.checked_mul(10).and_then(|v| {
                if negative {
                    v.checked_sub(digit)
                } else {
                    v.checked_add(digit)
                }
            })
        })
        .unwrap_or(if negative { i64::MIN } else { i64::MAX });
    Some(value)
}

fn int_or(raw: &str, default: i64) -> i64 {
    parse_leading_int(raw).unwrap_or(default)
}

/// `"2025-03-15"` -> `"2025-03-15T23:59:59.000Z"`; blank or invalid dates give `None`
pub fn end_of_day_utc(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => {
            log::warn!("Dropping invalid end date '{}': {}", raw, e);
            return None;
        }
    };
    let end_of_day = date.and_hms_opt(23, 59, 59)?.and_utc();
    Some(end_of_day.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u601_generate_keys::form::FormField;
    use serde_json::json;

    fn form_with_package() -> FormState {
        let mut form = FormState::default();
        form.set_checked(FormField::Package(3652), true);
        form
    }

    #[test]
    fn test_collect_package_ids_drops_garbage_and_duplicates() {
        let ids = collect_package_ids(Vec::new(), "12, abc, 7,7");
        assert_eq!(ids, vec![12, 7]);
    }

    #[test]
    fn test_collect_package_ids_merges_checked_and_extra() {
        let ids = collect_package_ids(vec![3652, 3559], "3652, 10 ,, 3559x, -");
        assert_eq!(ids, vec![3652, 3559, 10]);
    }

    #[test]
    fn test_collect_package_ids_empty() {
        assert!(collect_package_ids(Vec::new(), "").is_empty());
        assert!(collect_package_ids(Vec::new(), " , ,abc").is_empty());
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int(" 12"), Some(12));
        assert_eq!(parse_leading_int("7x"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+4"), Some(4));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999x"), Some(i64::MIN));
    }

    #[test]
    fn test_oversized_extra_id_is_kept() {
        assert_eq!(
            collect_package_ids(Vec::<i64>::new(), "99999999999999999999, 5"),
            vec![i64::MAX, 5]
        );
    }

    #[test]
    fn test_numeric_defaults() {
        let mut form = form_with_package();
        form.set_text(FormField::Quantity, "");
        form.set_text(FormField::Duration, "soon");
        form.set_text(FormField::Type, "multi");
        form.set_text(FormField::ActivateCount, "");

        let request = KeyRequest::from_form(&form);
        assert_eq!(request.quantity, 1);
        assert_eq!(request.duration, 1);
        assert_eq!(request.activate_count, Some(2));

        form.set_text(FormField::Quantity, "99999999999999999999");
        form.set_text(FormField::Duration, "-99999999999999999999");
        let request = KeyRequest::from_form(&form);
        assert_eq!(request.quantity, i64::MAX);
        assert_eq!(request.duration, i64::MIN);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_activate_count_only_for_multi() {
        let mut form = form_with_package();
        form.set_text(FormField::ActivateCount, "5");
        assert_eq!(KeyRequest::from_form(&form).activate_count, None);

        form.set_text(FormField::Type, "multi");
        assert_eq!(KeyRequest::from_form(&form).activate_count, Some(5));
    }

    #[test]
    fn test_end_date_is_end_of_day_utc() {
        assert_eq!(
            end_of_day_utc("2025-03-15"),
            Some("2025-03-15T23:59:59.000Z".to_string())
        );
        assert_eq!(end_of_day_utc(""), None);
        assert_eq!(end_of_day_utc("15/03/2025"), None);
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut form = form_with_package();
        form.set_text(FormField::PackageExtra, "1, 2, 2");
        form.set_text(FormField::EndDate, "2024-12-31");
        form.set_text(FormField::Alias, " promo ");

        let first = KeyRequest::from_form(&form);
        let second = KeyRequest::from_form(&form);
        assert_eq!(first, second);
        assert_eq!(first.to_pretty_json().unwrap(), second.to_pretty_json().unwrap());
    }

    #[test]
    fn test_wire_format() {
        let mut form = form_with_package();
        form.set_text(FormField::Quantity, "3");
        form.set_text(FormField::Alias, "   ");

        let value = serde_json::to_value(KeyRequest::from_form(&form)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "single",
                "quantity": 3,
                "packageIds": [3652],
                "duration": 30,
                "unit": "days",
                "isCleanable": false
            })
        );
    }

    #[test]
    fn test_wire_format_optional_fields() {
        let mut form = form_with_package();
        form.set_text(FormField::Type, "multi");
        form.set_text(FormField::ActivateCount, "4");
        form.set_text(FormField::Alias, " vip ");
        form.set_text(FormField::EndDate, "2025-01-31");
        form.set_checked(FormField::IsCleanable, true);

        let value = serde_json::to_value(KeyRequest::from_form(&form)).unwrap();
        assert_eq!(value["type"], json!("multi"));
        assert_eq!(value["alias"], json!("vip"));
        assert_eq!(value["endDate"], json!("2025-01-31T23:59:59.000Z"));
        assert_eq!(value["activateCount"], json!(4));
        assert_eq!(value["isCleanable"], json!(true));
    }
}
