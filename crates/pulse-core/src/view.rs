//! Derived views over the booking collection.
//!
//! Every function here is a read-only projection: filtering, sorting,
//! aggregation and the "days until" urgency classification. None of them
//! mutate the collection they are given.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::model::booking::{BookingRecord, EventClass, ParseEnumError, Status};
use crate::model::menu::MENU;
use crate::model::orders::Orders;
use crate::time::days_until;

/// Days-until threshold at or below which an event counts as "soon".
pub const SOON_THRESHOLD_DAYS: i64 = 7;

/// Number of records carrying one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: Status,
    pub count: usize,
}

/// Records per status, reported in the fixed [`Status::ALL`] order.
#[must_use]
pub fn status_breakdown(records: &[BookingRecord]) -> Vec<StatusCount> {
    Status::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: records.iter().filter(|r| r.status == status).count(),
        })
        .collect()
}

/// Sum of headcounts across the collection, saturating at the `i64` bounds.
#[must_use]
pub fn total_headcount(records: &[BookingRecord]) -> i64 {
    records
        .iter()
        .fold(0_i64, |total, r| total.saturating_add(r.headcount))
}

/// Sum of every order quantity across the collection.
#[must_use]
pub fn total_orders(records: &[BookingRecord]) -> u64 {
    records.iter().map(|r| r.orders.total()).sum()
}

/// One ordered menu item inside a [`CategorySummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub id: &'static str,
    pub label: &'static str,
    pub quantity: u32,
}

/// Non-zero order lines of one menu category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: &'static str,
    pub total: u64,
    pub items: Vec<OrderLine>,
}

/// Per-category breakdown of an orders map, in catalog order.
///
/// Items with a zero quantity are left out, and so are categories with
/// nothing ordered.
#[must_use]
pub fn order_summary(orders: &Orders) -> Vec<CategorySummary> {
    MENU.iter()
        .filter_map(|category| {
            let items: Vec<OrderLine> = category
                .items
                .iter()
                .map(|item| OrderLine {
                    id: item.id,
                    label: item.label,
                    quantity: orders.get(item.id),
                })
                .filter(|line| line.quantity > 0)
                .collect();
            if items.is_empty() {
                return None;
            }
            Some(CategorySummary {
                category: category.title,
                total: orders.category_total(category),
                items,
            })
        })
        .collect()
}

/// Event class half of a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClassFilter {
    #[default]
    All,
    Only(EventClass),
}

impl ClassFilter {
    #[must_use]
    pub fn matches(self, class: EventClass) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == class,
        }
    }
}

impl FromStr for ClassFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Dashboard filter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub statuses: BTreeSet<Status>,
    pub event_class: ClassFilter,
    pub search: String,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            statuses: Status::ALL.into_iter().collect(),
            event_class: ClassFilter::All,
            search: String::new(),
        }
    }
}

impl Filter {
    /// Whether `record` passes every part of the filter.
    ///
    /// Search is a case-insensitive substring match against
    /// `"<title> <booker> <location>"`; blank search matches everything.
    #[must_use]
    pub fn matches(&self, record: &BookingRecord) -> bool {
        if !self.statuses.contains(&record.status) {
            return false;
        }
        if !self.event_class.matches(record.event_class) {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let haystack = format!("{} {} {}", record.title, record.booker, record.location);
        haystack.to_lowercase().contains(&needle)
    }

    /// Toggle `status` in the status set. The set never becomes empty:
    /// toggling off the last selected status is a no-op.
    ///
    /// Returns whether the set changed.
    pub fn toggle_status(&mut self, status: Status) -> bool {
        if self.statuses.contains(&status) {
            if self.statuses.len() == 1 {
                return false;
            }
            self.statuses.remove(&status)
        } else {
            self.statuses.insert(status)
        }
    }
}

/// Supported dashboard orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Earliest event date first.
    #[default]
    Soonest,
    /// Booker name, ignoring case and accents first.
    Booker,
}

impl SortOrder {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Soonest => "soonest",
            Self::Booker => "booker",
        }
    }

    fn compare(self, a: &BookingRecord, b: &BookingRecord) -> Ordering {
        match self {
            Self::Soonest => a.date.cmp(&b.date),
            Self::Booker => compare_names(&a.booker, &b.booker),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soonest" | "date" => Ok(Self::Soonest),
            "booker" | "name" => Ok(Self::Booker),
            _ => Err(ParseEnumError {
                expected: "sort order",
                got: s.to_string(),
            }),
        }
    }
}

/// Base letters only: canonical decomposition with combining marks dropped,
/// then lower-cased. `Émile` and `emile` share a key.
fn primary_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lower-cased decomposition, so unaccented letters sort before accented ones.
fn accent_key(name: &str) -> String {
    name.nfd().flat_map(char::to_lowercase).collect()
}

/// Collation-style name comparison: base letters first, so `Émile` sorts
/// among the `E`s and `anika` beside `Anika`, then accents, then an exact
/// comparison to break remaining ties.
fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| a.cmp(b))
}

/// Sort records in place. Stable: equal keys keep their relative order.
pub fn sort_records<R: AsRef<BookingRecord>>(records: &mut [R], order: SortOrder) {
    records.sort_by(|a, b| order.compare(a.as_ref(), b.as_ref()));
}

impl AsRef<Self> for BookingRecord {
    fn as_ref(&self) -> &Self {
        self
    }
}

/// Filtered and sorted references into `records`.
#[must_use]
pub fn filtered_view<'a>(
    records: &'a [BookingRecord],
    filter: &Filter,
    order: SortOrder,
) -> Vec<&'a BookingRecord> {
    let mut view: Vec<&BookingRecord> = records.iter().filter(|r| filter.matches(r)).collect();
    sort_records(&mut view, order);
    view
}

/// Whether a days-until value counts as "soon" (past dates included).
#[must_use]
pub const fn is_soon(days: i64, threshold: i64) -> bool {
    days <= threshold
}

/// Countdown for one record relative to `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days_until: i64,
    pub soon: bool,
}

impl Countdown {
    #[must_use]
    pub fn for_record(record: &BookingRecord, now: DateTime<Utc>, threshold: i64) -> Self {
        let days = days_until(record.date, now);
        Self {
            days_until: days,
            soon: is_soon(days, threshold),
        }
    }
}

/// First record in view order that is not yet approved and is soon.
#[must_use]
pub fn next_urgent<'a>(
    view: &[&'a BookingRecord],
    now: DateTime<Utc>,
    threshold: i64,
) -> Option<&'a BookingRecord> {
    view.iter()
        .copied()
        .find(|r| r.status != Status::Approved && Countdown::for_record(r, now, threshold).soon)
}

/// Reminder the dashboard raises for the most pressing event in view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingAlert {
    pub contact_number: String,
    pub days_until: i64,
    pub urgent: bool,
    pub message: String,
}

/// Build the reminder for the next urgent record, or failing that the first
/// record in view. `None` when the view is empty.
#[must_use]
pub fn upcoming_alert(
    view: &[&BookingRecord],
    now: DateTime<Utc>,
    threshold: i64,
) -> Option<UpcomingAlert> {
    let urgent = next_urgent(view, now, threshold);
    let target = urgent.or_else(|| view.first().copied())?;
    let days = days_until(target.date, now);
    Some(UpcomingAlert {
        contact_number: target.contact_number.clone(),
        days_until: days,
        urgent: urgent.is_some(),
        message: format!(
            "{} for {} is {} day(s) away.",
            target.title, target.booker, days
        ),
    })
}

/// Aggregate numbers the dashboard header shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_events: usize,
    pub statuses: Vec<StatusCount>,
    pub total_headcount: i64,
    pub total_orders: u64,
}

#[must_use]
pub fn dashboard_summary(records: &[BookingRecord]) -> DashboardSummary {
    DashboardSummary {
        total_events: records.len(),
        statuses: status_breakdown(records),
        total_headcount: total_headcount(records),
        total_orders: total_orders(records),
    }
}
