//! Normalization of untrusted booking JSON.
//!
//! Persisted payloads may come from older releases (legacy `id` key, legacy
//! class names, stale menu items) or from hand-edited files. Every record is
//! validated and repaired independently: what can be coerced is coerced,
//! what cannot is rejected with a [`Rejection`] naming the reason. Nothing
//! here panics.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::model::booking::{BookingRecord, EventClass, Status};
use crate::model::menu;
use crate::model::orders::Orders;
use crate::time;

/// Why an input could not be normalized into a [`BookingRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The input is not a JSON object.
    #[error("record is not an object")]
    NotAnObject,

    /// A required text field is absent or not a string.
    #[error("field `{0}` is missing or not a string")]
    MissingField(&'static str),

    /// Neither `contactNumber` nor legacy `id` holds a non-blank string.
    #[error("contact number is missing or blank")]
    MissingContactNumber,

    /// `status` is not one of the fixed wire values.
    #[error("unknown status '{0}'")]
    InvalidStatus(String),

    /// `eventClass` matches neither a current nor a legacy class name.
    #[error("unknown event class '{0}'")]
    InvalidEventClass(String),

    /// `date` does not parse to an instant.
    #[error("date '{0}' is not a valid instant")]
    InvalidDate(String),

    /// `headcount` is not a number and does not start with an integer.
    #[error("headcount is not a number")]
    InvalidHeadcount,

    /// An earlier record in the same collection already uses this key.
    #[error("duplicate contact number '{0}'")]
    DuplicateContactNumber(String),
}

/// Outcome of normalizing a whole collection.
#[derive(Debug, Clone, Default)]
pub struct NormalizeReport {
    /// Records that survived normalization, in input order.
    pub records: Vec<BookingRecord>,
    /// Index into the input and the reason each dropped entry was rejected.
    pub rejected: Vec<(usize, Rejection)>,
}

/// Validate and repair a single untrusted value into a [`BookingRecord`].
///
/// # Errors
///
/// Returns the first [`Rejection`] encountered; field checks run in the
/// order text fields, contact number, status, class, date, headcount.
pub fn normalize(input: &Value) -> Result<BookingRecord, Rejection> {
    let Value::Object(fields) = input else {
        return Err(Rejection::NotAnObject);
    };

    let title = required_str(fields, "title")?;
    let booker = required_str(fields, "booker")?;
    let raw_date = required_str(fields, "date")?;
    let location = required_str(fields, "location")?;

    let contact_number = resolve_contact_number(fields)?;
    let status = resolve_status(fields.get("status"))?;
    let event_class = resolve_event_class(fields.get("eventClass"))?;
    let date =
        time::parse_instant(raw_date).ok_or_else(|| Rejection::InvalidDate(raw_date.to_string()))?;
    let headcount = resolve_headcount(fields.get("headcount"))?;

    Ok(BookingRecord {
        contact_number,
        title: title.to_string(),
        booker: booker.to_string(),
        status,
        event_class,
        date,
        location: location.to_string(),
        headcount,
        notes: coerce_notes(fields.get("notes")),
        orders: normalize_orders(fields.get("orders")),
    })
}

/// Normalize every entry of a persisted array independently.
///
/// One bad entry never invalidates the rest. A contact number already taken
/// by an earlier surviving entry rejects the later one, keeping keys unique.
#[must_use]
pub fn normalize_all(values: &[Value]) -> NormalizeReport {
    let mut report = NormalizeReport::default();
    let mut seen = HashSet::new();

    for (index, value) in values.iter().enumerate() {
        match normalize(value) {
            Ok(record) => {
                if seen.insert(record.contact_number.clone()) {
                    report.records.push(record);
                } else {
                    report.rejected.push((
                        index,
                        Rejection::DuplicateContactNumber(record.contact_number),
                    ));
                }
            }
            Err(rejection) => report.rejected.push((index, rejection)),
        }
    }

    report
}

/// Build an orders map over the current catalog from untrusted input.
///
/// Total: missing or malformed input yields all zeros. Numbers are floored
/// and clamped at zero; strings are read with [`parse_int_prefix`]. Keys
/// outside the catalog are dropped.
#[must_use]
pub fn normalize_orders(input: Option<&Value>) -> Orders {
    let mut orders = Orders::empty();
    let Some(Value::Object(raw)) = input else {
        return orders;
    };

    for id in menu::item_ids() {
        if let Some(quantity) = raw.get(id).and_then(coerce_quantity) {
            orders.set(id, quantity);
        }
    }

    orders
}

/// Read a leading base-10 integer the way a lenient form parser does:
/// leading whitespace and one sign are allowed, parsing stops at the first
/// non-digit, and at least one digit is required. `"42 guests"` is `42`;
/// `"guests"` is `None`. Out-of-range values saturate.
#[must_use]
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = digits.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }

    let magnitude = digits[..digit_count].bytes().fold(0_i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

fn required_str<'a>(fields: &'a Map<String, Value>, key: &'static str) -> Result<&'a str, Rejection> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .ok_or(Rejection::MissingField(key))
}

fn resolve_contact_number(fields: &Map<String, Value>) -> Result<String, Rejection> {
    let raw = ["contactNumber", "id"]
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))
        .ok_or(Rejection::MissingContactNumber)?;

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Rejection::MissingContactNumber);
    }
    Ok(trimmed.to_string())
}

fn resolve_status(value: Option<&Value>) -> Result<Status, Rejection> {
    let raw = value
        .and_then(Value::as_str)
        .ok_or(Rejection::MissingField("status"))?;
    Status::from_wire(raw).ok_or_else(|| Rejection::InvalidStatus(raw.to_string()))
}

fn resolve_event_class(value: Option<&Value>) -> Result<EventClass, Rejection> {
    let raw = value
        .and_then(Value::as_str)
        .ok_or(Rejection::MissingField("eventClass"))?;
    EventClass::from_wire(raw)
        .or_else(|| EventClass::from_legacy(raw))
        .ok_or_else(|| Rejection::InvalidEventClass(raw.to_string()))
}

#[allow(clippy::cast_possible_truncation)]
fn resolve_headcount(value: Option<&Value>) -> Result<i64, Rejection> {
    match value {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or(Rejection::InvalidHeadcount),
        Some(Value::String(text)) => parse_int_prefix(text).ok_or(Rejection::InvalidHeadcount),
        _ => Err(Rejection::InvalidHeadcount),
    }
}

fn coerce_notes(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        // Scalars print as their JSON text; arrays and objects as compact JSON.
        Some(other) => other.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coerce_quantity(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => {
            let raw = number.as_f64().filter(|f| f.is_finite())?;
            Some(raw.floor().max(0.0) as u32)
        }
        Value::String(text) if !text.trim().is_empty() => {
            let parsed = parse_int_prefix(text)?;
            Some(u32::try_from(parsed.max(0)).unwrap_or(u32::MAX))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Value {
        json!({
            "contactNumber": "202-555-0101",
            "title": "Azure Skyline Gala",
            "booker": "Maya Chen",
            "status": "Approved",
            "eventClass": "live station",
            "date": "2025-11-02T18:30:00Z",
            "location": "Skyline Ballroom · Chicago",
            "headcount": 320,
            "notes": "VIP arrivals staggered.",
            "orders": { "carving-station": 120 }
        })
    }

    fn with(key: &str, value: Value) -> Value {
        let mut v = base();
        v[key] = value;
        v
    }

    fn without(key: &str) -> Value {
        let mut v = base();
        v.as_object_mut().expect("object").remove(key);
        v
    }

    #[test]
    fn accepts_a_well_formed_record() {
        let record = normalize(&base()).expect("valid");
        assert_eq!(record.contact_number, "202-555-0101");
        assert_eq!(record.status, Status::Approved);
        assert_eq!(record.event_class, EventClass::LiveStation);
        assert_eq!(record.headcount, 320);
        assert_eq!(record.orders.get("carving-station"), 120);
        assert_eq!(record.orders.total(), 120);
    }

    #[test]
    fn rejects_non_objects() {
        assert_eq!(normalize(&json!(null)), Err(Rejection::NotAnObject));
        assert_eq!(normalize(&json!([1, 2])), Err(Rejection::NotAnObject));
        assert_eq!(normalize(&json!("record")), Err(Rejection::NotAnObject));
    }

    #[test]
    fn rejects_missing_or_non_string_text_fields() {
        for key in ["title", "booker", "date", "location"] {
            assert_eq!(normalize(&without(key)), Err(Rejection::MissingField(key)));
        }
        assert_eq!(
            normalize(&with("title", json!(42))),
            Err(Rejection::MissingField("title"))
        );
    }

    #[test]
    fn contact_number_falls_back_to_legacy_id_and_is_trimmed() {
        let mut legacy = without("contactNumber");
        legacy["id"] = json!("  EVT-2401  ");
        assert_eq!(normalize(&legacy).expect("valid").contact_number, "EVT-2401");

        assert_eq!(
            normalize(&with("contactNumber", json!("   "))),
            Err(Rejection::MissingContactNumber)
        );
        assert_eq!(
            normalize(&without("contactNumber")),
            Err(Rejection::MissingContactNumber)
        );
    }

    #[test]
    fn status_must_match_exactly() {
        assert_eq!(
            normalize(&with("status", json!("Not Paid"))).map(|r| r.status),
            Ok(Status::NotPaid)
        );
        assert_eq!(
            normalize(&with("status", json!("approved"))),
            Err(Rejection::InvalidStatus("approved".into()))
        );
        assert_eq!(
            normalize(&with("status", json!(1))),
            Err(Rejection::MissingField("status"))
        );
    }

    #[test]
    fn legacy_classes_map_onto_current_ones() {
        let cases = [
            ("Signature Experience", EventClass::Grazing),
            ("Premier Affair", EventClass::LiveStation),
            ("Elevated Social", EventClass::PreOrder),
        ];
        for (legacy, expected) in cases {
            let record = normalize(&with("eventClass", json!(legacy))).expect("valid");
            assert_eq!(record.event_class, expected, "legacy class {legacy}");
        }
        assert_eq!(
            normalize(&with("eventClass", json!("Banquet"))),
            Err(Rejection::InvalidEventClass("Banquet".into()))
        );
    }

    #[test]
    fn date_must_parse() {
        assert_eq!(
            normalize(&with("date", json!("someday"))),
            Err(Rejection::InvalidDate("someday".into()))
        );
    }

    #[test]
    fn headcount_accepts_numbers_and_numeric_strings() {
        assert_eq!(normalize(&with("headcount", json!("185"))).map(|r| r.headcount), Ok(185));
        assert_eq!(
            normalize(&with("headcount", json!(" 90 guests"))).map(|r| r.headcount),
            Ok(90)
        );
        assert_eq!(normalize(&with("headcount", json!(12.9))).map(|r| r.headcount), Ok(12));
        assert_eq!(
            normalize(&with("headcount", json!("many"))),
            Err(Rejection::InvalidHeadcount)
        );
        assert_eq!(
            normalize(&without("headcount")),
            Err(Rejection::InvalidHeadcount)
        );
        assert_eq!(
            normalize(&with("headcount", json!(true))),
            Err(Rejection::InvalidHeadcount)
        );
    }

    #[test]
    fn non_positive_headcount_survives_normalization() {
        assert_eq!(normalize(&with("headcount", json!(0))).map(|r| r.headcount), Ok(0));
        assert_eq!(normalize(&with("headcount", json!("-4"))).map(|r| r.headcount), Ok(-4));
    }

    #[test]
    fn notes_are_coerced_to_text() {
        assert_eq!(normalize(&without("notes")).expect("valid").notes, "");
        assert_eq!(normalize(&with("notes", json!(null))).expect("valid").notes, "");
        assert_eq!(normalize(&with("notes", json!(42))).expect("valid").notes, "42");
        assert_eq!(normalize(&with("notes", json!(false))).expect("valid").notes, "false");
        assert_eq!(normalize(&with("notes", json!(2.5))).expect("valid").notes, "2.5");
        assert_eq!(
            normalize(&with("notes", json!(["gate", 4]))).expect("valid").notes,
            r#"["gate",4]"#
        );
        assert_eq!(
            normalize(&with("notes", json!({"dock": "B"}))).expect("valid").notes,
            r#"{"dock":"B"}"#
        );
    }

    #[test]
    fn orders_are_rebuilt_over_the_catalog() {
        let raw = json!({
            "pasta-station": 12.7,
            "taco-station": "30",
            "sushi-station": -4,
            "kids-plate": "",
            "gelato-cart": "lots",
            "oyster-bar": 50
        });
        let orders = normalize_orders(Some(&raw));

        assert_eq!(orders.get("pasta-station"), 12);
        assert_eq!(orders.get("taco-station"), 30);
        assert_eq!(orders.get("sushi-station"), 0);
        assert_eq!(orders.get("kids-plate"), 0);
        assert_eq!(orders.get("gelato-cart"), 0);
        assert!(orders.keys().all(menu::is_known_item));
        assert_eq!(orders.keys().count(), menu::item_ids().count());
    }

    #[test]
    fn orders_default_to_zero_for_missing_or_malformed_input() {
        assert_eq!(normalize_orders(None), Orders::empty());
        assert_eq!(normalize_orders(Some(&json!([1, 2, 3]))), Orders::empty());
        assert_eq!(normalize_orders(Some(&json!("none"))), Orders::empty());
    }

    #[test]
    fn parse_int_prefix_follows_lenient_form_rules() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix("  7 people"), Some(7));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("+15"), Some(15));
        assert_eq!(parse_int_prefix("12.5"), Some(12));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn normalize_all_drops_bad_entries_independently() {
        let mut second = base();
        second["contactNumber"] = json!("202-555-0102");
        let values = vec![
            base(),
            json!({"title": "broken"}),
            second,
            base(),
        ];

        let report = normalize_all(&values);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].0, 1);
        assert_eq!(
            report.rejected[1],
            (3, Rejection::DuplicateContactNumber("202-555-0101".into()))
        );
    }
}
