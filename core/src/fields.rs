//! Applies the formatted value envelope to known fields of a JSON response.
//!
//! Each endpoint declares the paths of its formattable fields. Paths are
//! dot-separated object keys; `*` steps into every element of an array.
//! Fields that are missing, `null` or of an unexpected type are left as-is.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::format::{FormattedValue, ValueKind};
use crate::locale::LocaleContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub path: &'static str,
    pub kind: ValueKind,
}

pub const fn price(path: &'static str) -> FieldRule {
    FieldRule {
        path,
        kind: ValueKind::Price,
    }
}

pub const fn count(path: &'static str) -> FieldRule {
    FieldRule {
        path,
        kind: ValueKind::Count,
    }
}

pub const fn time(path: &'static str) -> FieldRule {
    FieldRule {
        path,
        kind: ValueKind::Time,
    }
}

/// Format every field named by `rules`. A top-level array applies the rules
/// to each element.
pub fn format_fields(value: &mut Value, rules: &[FieldRule], locale: &LocaleContext, now: DateTime<Utc>) {
    if let Value::Array(items) = value {
        for item in items {
            format_fields(item, rules, locale, now);
        }
        return;
    }
    for rule in rules {
        let segments: Vec<&str> = rule.path.split('.').collect();
        walk(value, &segments, rule.kind, locale, now);
    }
}

fn walk(value: &mut Value, segments: &[&str], kind: ValueKind, locale: &LocaleContext, now: DateTime<Utc>) {
    match segments.split_first() {
        None => format_leaf(value, kind, locale, now),
        Some((&"*", rest)) => {
            if let Value::Array(items) = value {
                for item in items {
                    walk(item, rest, kind, locale, now);
                }
            }
        }
        Some((key, rest)) => {
            if let Some(child) = value.get_mut(*key) {
                walk(child, rest, kind, locale, now);
            }
        }
    }
}

fn format_leaf(value: &mut Value, kind: ValueKind, locale: &LocaleContext, now: DateTime<Utc>) {
    // An already formatted envelope is rendered again from its raw value.
    let raw = match &*value {
        Value::Object(object) => match object.get("raw") {
            Some(raw) => raw.clone(),
            None => return,
        },
        other => other.clone(),
    };

    let formatted = match (kind, raw) {
        (ValueKind::Price, Value::Number(raw)) => to_value(FormattedValue::price(raw, locale)),
        (ValueKind::Count, Value::Number(raw)) => to_value(FormattedValue::count(raw, locale)),
        (ValueKind::Time, Value::String(raw)) => to_value(FormattedValue::time_at(raw, locale, now)),
        _ => None,
    };
    if let Some(formatted) = formatted {
        *value = formatted;
    }
}

fn to_value<T: Serialize>(envelope: FormattedValue<T>) -> Option<Value> {
    serde_json::to_value(envelope).ok()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    const PRODUCT: &[FieldRule] = &[
        price("price.original"),
        price("variants.*.price.sale"),
        count("rating.count"),
        count("variants.*.quantity"),
        time("createdAt"),
    ];

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 9, 19, 4, 25, 30).unwrap()
    }

    #[test]
    fn formats_nested_and_array_fields() {
        let mut value = json!({
            "name": "Shirt",
            "price": {"original": 10000},
            "rating": {"count": 1200},
            "variants": [
                {"price": {"sale": 9000}, "quantity": 3},
                {"price": {"sale": null}, "quantity": 0}
            ],
            "createdAt": "2018-09-19T04:22:30Z"
        });
        format_fields(&mut value, PRODUCT, &LocaleContext::default(), now());

        assert_eq!(value["name"], "Shirt");
        assert_eq!(value["price"]["original"]["raw"], 10000);
        assert_eq!(value["price"]["original"]["formatted"], "10,000원");
        assert_eq!(value["rating"]["count"]["formatted"], "1,200");
        assert_eq!(value["variants"][0]["price"]["sale"]["converted"], "9,000원");
        assert_eq!(value["variants"][1]["price"]["sale"], Value::Null);
        assert_eq!(value["variants"][1]["quantity"]["formatted"], "0");
        assert_eq!(value["createdAt"]["raw"], "2018-09-19T04:22:30Z");
        assert_eq!(value["createdAt"]["ago"], "3 minutes ago");
    }

    #[test]
    fn top_level_arrays_apply_rules_per_element() {
        let mut value = json!([{"rating": {"count": 1}}, {"rating": {"count": 2}}]);
        format_fields(&mut value, PRODUCT, &LocaleContext::default(), now());
        assert_eq!(value[0]["rating"]["count"]["formatted"], "1");
        assert_eq!(value[1]["rating"]["count"]["formatted"], "2");
    }

    #[test]
    fn existing_envelope_is_recomputed_from_raw() {
        let mut value = json!({"rating": {"count": {"raw": 4321, "formatted": "stale"}}});
        format_fields(&mut value, PRODUCT, &LocaleContext::default(), now());
        assert_eq!(value["rating"]["count"]["formatted"], "4,321");
    }

    #[test]
    fn mismatched_types_are_untouched() {
        let mut value = json!({"price": {"original": "free"}, "createdAt": 12});
        format_fields(&mut value, PRODUCT, &LocaleContext::default(), now());
        assert_eq!(value["price"]["original"], "free");
        assert_eq!(value["createdAt"], 12);
    }
}
