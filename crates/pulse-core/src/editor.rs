//! Create/update form state for a single booking.
//!
//! The editor holds a [`Draft`] of raw text fields exactly as typed, plus the
//! key of the record under edit (if any). Nothing touches the collection until
//! [`Editor::submit`] validates the draft; a failed submit leaves both the
//! draft and the collection unchanged.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::EditorConfig;
use crate::model::booking::{BookingRecord, EventClass, Status};
use crate::model::menu;
use crate::model::orders::Orders;
use crate::normalize::parse_int_prefix;
use crate::time::{parse_local_input, to_local_input};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Title, booker, event date, and location are required.")]
    MissingRequired,

    #[error("Please provide a valid date and time.")]
    InvalidDate,

    #[error("Headcount must be a positive number.")]
    InvalidHeadcount,

    #[error("An event with contact number {0} already exists.")]
    DuplicateContactNumber(String),

    #[error("Unknown menu item '{0}'.")]
    UnknownMenuItem(String),

    #[error("No event with contact number {0}.")]
    NotFound(String),
}

/// Text fields of the draft that are edited as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ContactNumber,
    Title,
    Booker,
    Date,
    Location,
    Headcount,
    Notes,
}

/// Unvalidated form contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub contact_number: String,
    pub title: String,
    pub booker: String,
    pub status: Status,
    pub event_class: EventClass,
    /// Either a local `YYYY-MM-DDTHH:MM` value or a full RFC 3339 instant.
    pub date: String,
    pub location: String,
    pub headcount: String,
    pub notes: String,
    pub orders: Orders,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            contact_number: String::new(),
            title: String::new(),
            booker: String::new(),
            status: Status::Pending,
            event_class: EventClass::Grazing,
            date: String::new(),
            location: String::new(),
            headcount: String::new(),
            notes: String::new(),
            orders: Orders::empty(),
        }
    }
}

impl Draft {
    #[must_use]
    pub fn from_record(record: &BookingRecord) -> Self {
        Self {
            contact_number: record.contact_number.clone(),
            title: record.title.clone(),
            booker: record.booker.clone(),
            status: record.status,
            event_class: record.event_class,
            date: to_local_input(record.date),
            location: record.location.clone(),
            headcount: record.headcount.to_string(),
            notes: record.notes.clone(),
            orders: record.orders.clone(),
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::ContactNumber => &mut self.contact_number,
            Field::Title => &mut self.title,
            Field::Booker => &mut self.booker,
            Field::Date => &mut self.date,
            Field::Location => &mut self.location,
            Field::Headcount => &mut self.headcount,
            Field::Notes => &mut self.notes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitKind {
    Created,
    Updated,
}

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submitted {
    pub kind: SubmitKind,
    pub contact_number: String,
}

impl Submitted {
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self.kind {
            SubmitKind::Created => "Event added to the schedule.",
            SubmitKind::Updated => "Event updated.",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Editor {
    draft: Draft,
    editing: Option<String>,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            draft: Draft::default(),
            editing: None,
            config,
        }
    }

    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Key of the record under edit; `None` in create mode.
    #[must_use]
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Switch to update mode for `record`.
    pub fn load_for_edit(&mut self, record: &BookingRecord) {
        self.draft = Draft::from_record(record);
        self.editing = Some(record.contact_number.clone());
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.draft.field_mut(field) = value.into();
    }

    pub const fn set_status(&mut self, status: Status) {
        self.draft.status = status;
    }

    pub const fn set_event_class(&mut self, class: EventClass) {
        self.draft.event_class = class;
    }

    /// Set an order quantity, clamped to `[0, max_order_quantity]`.
    ///
    /// Returns the stored quantity.
    ///
    /// # Errors
    ///
    /// [`EditorError::UnknownMenuItem`] for ids outside the catalog.
    pub fn set_order_quantity(&mut self, id: &str, quantity: i64) -> Result<u32, EditorError> {
        if !menu::is_known_item(id) {
            return Err(EditorError::UnknownMenuItem(id.to_string()));
        }
        let clamped = clamp_quantity(quantity, self.config.max_order_quantity);
        self.draft.orders.set(id, clamped);
        Ok(clamped)
    }

    /// Set an order quantity from typed text; text without a leading
    /// integer counts as zero.
    ///
    /// # Errors
    ///
    /// [`EditorError::UnknownMenuItem`] for ids outside the catalog.
    pub fn order_input(&mut self, id: &str, text: &str) -> Result<u32, EditorError> {
        self.set_order_quantity(id, parse_int_prefix(text).unwrap_or(0))
    }

    /// Step an order quantity up or down, staying inside the allowed range.
    ///
    /// # Errors
    ///
    /// [`EditorError::UnknownMenuItem`] for ids outside the catalog.
    pub fn adjust_order(&mut self, id: &str, delta: i64) -> Result<u32, EditorError> {
        let current = i64::from(self.draft.orders.get(id));
        self.set_order_quantity(id, current.saturating_add(delta))
    }

    pub fn reset_orders(&mut self) {
        self.draft.orders = Orders::empty();
    }

    /// Back to an empty draft in create mode.
    pub fn reset(&mut self) {
        self.draft = Draft::default();
        self.editing = None;
    }

    /// Validate the draft and apply it to `records`.
    ///
    /// In create mode the record is appended; in update mode it replaces the
    /// record under edit. On success the editor returns to create mode.
    ///
    /// # Errors
    ///
    /// Checks run in this order and the first failure is returned:
    /// [`EditorError::MissingRequired`], [`EditorError::InvalidDate`],
    /// [`EditorError::InvalidHeadcount`],
    /// [`EditorError::DuplicateContactNumber`]. [`EditorError::NotFound`] is
    /// returned when the record under edit has since disappeared.
    pub fn submit(&mut self, records: &mut Vec<BookingRecord>) -> Result<Submitted, EditorError> {
        let record = self.validate(records)?;
        let contact_number = record.contact_number.clone();

        let kind = match &self.editing {
            None => {
                records.push(record);
                SubmitKind::Created
            }
            Some(key) => {
                let slot = records
                    .iter_mut()
                    .find(|existing| existing.contact_number == *key)
                    .ok_or_else(|| EditorError::NotFound(key.clone()))?;
                *slot = record;
                SubmitKind::Updated
            }
        };

        debug!(contact_number = %contact_number, ?kind, "editor submitted");
        self.reset();
        Ok(Submitted {
            kind,
            contact_number,
        })
    }

    /// Remove the record with `key`, leaving update mode if it was under
    /// edit.
    ///
    /// # Errors
    ///
    /// [`EditorError::NotFound`] when no record has that key.
    pub fn delete(
        &mut self,
        records: &mut Vec<BookingRecord>,
        key: &str,
    ) -> Result<BookingRecord, EditorError> {
        let index = records
            .iter()
            .position(|record| record.contact_number == key)
            .ok_or_else(|| EditorError::NotFound(key.to_string()))?;
        let removed = records.remove(index);

        if self.editing.as_deref() == Some(key) {
            self.reset();
        }
        Ok(removed)
    }

    fn validate(&self, records: &[BookingRecord]) -> Result<BookingRecord, EditorError> {
        let draft = &self.draft;
        let title = draft.title.trim();
        let booker = draft.booker.trim();
        let location = draft.location.trim();
        if title.is_empty() || booker.is_empty() || location.is_empty() || draft.date.is_empty() {
            return Err(EditorError::MissingRequired);
        }

        let date = parse_local_input(&draft.date).ok_or(EditorError::InvalidDate)?;

        let headcount = parse_int_prefix(&draft.headcount)
            .filter(|count| *count > 0)
            .ok_or(EditorError::InvalidHeadcount)?;

        let contact_number = match draft.contact_number.trim() {
            "" => generate_contact_number(
                records,
                &self.config.contact_prefix,
                self.config.contact_seed,
            ),
            explicit => explicit.to_string(),
        };

        let collides = records.iter().any(|existing| {
            existing.contact_number == contact_number
                && self.editing.as_deref() != Some(existing.contact_number.as_str())
        });
        if collides {
            return Err(EditorError::DuplicateContactNumber(contact_number));
        }

        Ok(BookingRecord {
            contact_number,
            title: title.to_string(),
            booker: booker.to_string(),
            status: draft.status,
            event_class: draft.event_class,
            date,
            location: location.to_string(),
            headcount,
            notes: draft.notes.trim().to_string(),
            orders: draft.orders.clone(),
        })
    }
}

fn clamp_quantity(quantity: i64, max: u32) -> u32 {
    u32::try_from(quantity.clamp(0, i64::from(max))).unwrap_or(0)
}

/// Next contact number: one past the largest trailing four-digit suffix among
/// `records`, or `seed` when none has one, zero-padded to four digits.
#[must_use]
pub fn generate_contact_number(records: &[BookingRecord], prefix: &str, seed: u32) -> String {
    let next = records
        .iter()
        .filter_map(|record| trailing_suffix(&record.contact_number))
        .max()
        .map_or(seed, |max| max.saturating_add(1));
    format!("{prefix}{next:04}")
}

fn trailing_suffix(contact: &str) -> Option<u32> {
    let start = contact.len().checked_sub(4)?;
    let tail = contact.get(start..)?;
    if tail.bytes().all(|b| b.is_ascii_digit()) {
        tail.parse().ok()
    } else {
        None
    }
}
