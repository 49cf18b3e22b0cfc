use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::orders::Orders;

/// Payment status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    Approved,
    Pending,
    #[serde(rename = "Not Paid")]
    NotPaid,
}

impl Status {
    /// Every status, in the fixed order summaries are reported in.
    pub const ALL: [Self; 3] = [Self::Approved, Self::Pending, Self::NotPaid];

    /// Persisted wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Pending => "Pending",
            Self::NotPaid => "Not Paid",
        }
    }

    /// Exact match against the persisted wire value.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

/// Service format of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventClass {
    #[serde(rename = "Grazing", alias = "Signature Experience")]
    Grazing,
    #[serde(rename = "live station", alias = "Premier Affair")]
    LiveStation,
    #[serde(rename = "pre order", alias = "Elevated Social")]
    PreOrder,
}

/// Versioning shim: class names written by earlier releases and the class
/// each one now maps onto.
pub const LEGACY_CLASS_NAMES: [(&str, EventClass); 3] = [
    ("Signature Experience", EventClass::Grazing),
    ("Premier Affair", EventClass::LiveStation),
    ("Elevated Social", EventClass::PreOrder),
];

impl EventClass {
    pub const ALL: [Self; 3] = [Self::Grazing, Self::LiveStation, Self::PreOrder];

    /// Persisted wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grazing => "Grazing",
            Self::LiveStation => "live station",
            Self::PreOrder => "pre order",
        }
    }

    /// Exact match against the current wire value.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.as_str() == value)
    }

    /// Look up a class name written by an earlier release.
    #[must_use]
    pub fn from_legacy(value: &str) -> Option<Self> {
        LEGACY_CLASS_NAMES
            .iter()
            .find(|(legacy, _)| *legacy == value)
            .map(|(_, class)| *class)
    }
}

/// One schedulable event with payment metadata and menu order quantities.
///
/// `contact_number` is the primary key of the collection. Serialize-only:
/// records are read back through [`crate::normalize::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub contact_number: String,
    pub title: String,
    pub booker: String,
    pub status: Status,
    pub event_class: EventClass,
    pub date: DateTime<Utc>,
    pub location: String,
    /// Positive when accepted through the editor; records loaded from
    /// storage keep whatever integer they were saved with.
    pub headcount: i64,
    pub notes: String,
    pub orders: Orders,
}

/// Error returned when parsing an enum value from user-entered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EventClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase and collapse separators so `not-paid`, `Not Paid` and
/// `not_paid` all read the same.
fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "approved" => Ok(Self::Approved),
            "pending" => Ok(Self::Pending),
            "notpaid" | "unpaid" => Ok(Self::NotPaid),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for EventClass {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(class) = Self::from_wire(s).or_else(|| Self::from_legacy(s)) {
            return Ok(class);
        }
        match normalize(s).as_str() {
            "grazing" => Ok(Self::Grazing),
            "livestation" => Ok(Self::LiveStation),
            "preorder" => Ok(Self::PreOrder),
            _ => Err(ParseEnumError {
                expected: "event class",
                got: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EventClass, LEGACY_CLASS_NAMES, Status};
    use std::str::FromStr;

    #[test]
    fn enum_json_uses_wire_values() {
        assert_eq!(
            serde_json::to_string(&Status::NotPaid).expect("valid"),
            "\"Not Paid\""
        );
        assert_eq!(
            serde_json::to_string(&EventClass::LiveStation).expect("valid"),
            "\"live station\""
        );
        assert_eq!(
            serde_json::from_str::<Status>("\"Approved\"").expect("valid"),
            Status::Approved
        );
        assert_eq!(
            serde_json::from_str::<EventClass>("\"pre order\"").expect("valid"),
            EventClass::PreOrder
        );
    }

    #[test]
    fn serde_accepts_legacy_class_aliases() {
        assert_eq!(
            serde_json::from_str::<EventClass>("\"Premier Affair\"").expect("valid"),
            EventClass::LiveStation
        );
    }

    #[test]
    fn wire_lookup_is_exact() {
        assert_eq!(Status::from_wire("Not Paid"), Some(Status::NotPaid));
        assert_eq!(Status::from_wire("not paid"), None);
        assert_eq!(Status::from_wire("NotPaid"), None);
        assert_eq!(EventClass::from_wire("Grazing"), Some(EventClass::Grazing));
        assert_eq!(EventClass::from_wire("grazing"), None);
    }

    #[test]
    fn legacy_table_covers_every_current_class() {
        for class in EventClass::ALL {
            assert!(LEGACY_CLASS_NAMES.iter().any(|(_, c)| *c == class));
        }
        assert_eq!(
            EventClass::from_legacy("Signature Experience"),
            Some(EventClass::Grazing)
        );
        assert_eq!(
            EventClass::from_legacy("Elevated Social"),
            Some(EventClass::PreOrder)
        );
        assert_eq!(EventClass::from_legacy("Grazing"), None);
    }

    #[test]
    fn display_parse_roundtrips() {
        for value in Status::ALL {
            assert_eq!(Status::from_str(&value.to_string()).expect("valid"), value);
        }
        for value in EventClass::ALL {
            assert_eq!(EventClass::from_str(&value.to_string()).expect("valid"), value);
        }
    }

    #[test]
    fn parse_is_lenient_for_typed_input() {
        assert_eq!(Status::from_str("not-paid").expect("valid"), Status::NotPaid);
        assert_eq!(Status::from_str(" APPROVED ").expect("valid"), Status::Approved);
        assert_eq!(
            EventClass::from_str("live-station").expect("valid"),
            EventClass::LiveStation
        );
        assert_eq!(
            EventClass::from_str("Premier Affair").expect("valid"),
            EventClass::LiveStation
        );
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert!(Status::from_str("refunded").is_err());
        assert!(EventClass::from_str("banquet").is_err());
    }
}
