//! One dashboard session: the in-memory collection, the editor and the
//! store they persist through.
//!
//! The session never fails to open. Whatever the store holds is hydrated
//! into a usable collection, falling back to the curated defaults, and every
//! mutation is written through to the store immediately.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::editor::{Editor, EditorError, Submitted};
use crate::error::PulseError;
use crate::model::booking::BookingRecord;
use crate::normalize::normalize_all;
use crate::seed::clone_defaults;
use crate::store::{RecordStore, save_records};

/// Default file name offered for exported datasets.
pub const EXPORT_FILE_NAME: &str = "event-pulse-events.json";

const UNREADABLE_TEXT: &str = "Saved data was unreadable, so defaults were restored.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashTone {
    Success,
    Error,
    Info,
}

/// Transient message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub tone: FlashTone,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: FlashTone::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: FlashTone::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            tone: FlashTone::Info,
            text: text.into(),
        }
    }
}

/// Where the opening collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "source")]
pub enum Hydration {
    /// Nothing stored yet.
    Defaults,
    /// The entry could not be read or parsed.
    Unreadable,
    /// Valid JSON, but not an array.
    NotAnArray,
    /// An explicitly empty dataset.
    Empty,
    /// Stored records, minus any that failed normalization.
    Stored { kept: usize, dropped: usize },
    /// Every stored record failed normalization.
    AllRejected { dropped: usize },
}

#[derive(Debug)]
pub struct Session<S: RecordStore> {
    store: S,
    records: Vec<BookingRecord>,
    editor: Editor,
    hydration: Hydration,
    notice: Option<Flash>,
}

impl<S: RecordStore> Session<S> {
    /// Hydrate a session from `store`.
    pub fn open(store: S, config: EditorConfig) -> Self {
        let (records, hydration) = match store.load() {
            Ok(raw) => hydrate(raw.as_deref()),
            Err(err) => {
                warn!(error = %err, "stored dataset could not be read");
                (clone_defaults(), Hydration::Unreadable)
            }
        };
        debug!(?hydration, records = records.len(), "session opened");

        let notice = (hydration == Hydration::Unreadable).then(|| Flash::error(UNREADABLE_TEXT));
        Self {
            store,
            records,
            editor: Editor::new(config),
            hydration,
            notice,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[BookingRecord] {
        &self.records
    }

    #[must_use]
    pub fn find(&self, key: &str) -> Option<&BookingRecord> {
        self.records.iter().find(|r| r.contact_number == key)
    }

    #[must_use]
    pub const fn hydration(&self) -> Hydration {
        self.hydration
    }

    /// Most recent flash message, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&Flash> {
        self.notice.as_ref()
    }

    pub const fn take_notice(&mut self) -> Option<Flash> {
        self.notice.take()
    }

    #[must_use]
    pub const fn editor(&self) -> &Editor {
        &self.editor
    }

    pub const fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Load the record with `key` into the editor for update.
    ///
    /// # Errors
    ///
    /// [`EditorError::NotFound`] when no record has that key.
    pub fn begin_edit(&mut self, key: &str) -> Result<(), PulseError> {
        let record = self
            .records
            .iter()
            .find(|r| r.contact_number == key)
            .ok_or_else(|| EditorError::NotFound(key.to_string()))?;
        self.editor.load_for_edit(record);
        Ok(())
    }

    /// Submit the editor draft and persist the result.
    ///
    /// # Errors
    ///
    /// Validation failures leave the collection untouched. A persistence
    /// failure is returned after the in-memory change has been kept.
    pub fn submit(&mut self) -> Result<Submitted, PulseError> {
        let submitted = match self.editor.submit(&mut self.records) {
            Ok(submitted) => submitted,
            Err(err) => {
                self.notice = Some(Flash::error(err.to_string()));
                return Err(err.into());
            }
        };
        self.notice = Some(Flash::success(submitted.message()));
        self.persist()?;
        info!(contact_number = %submitted.contact_number, kind = ?submitted.kind, "booking saved");
        Ok(submitted)
    }

    /// Remove the record with `key` and persist.
    ///
    /// # Errors
    ///
    /// [`EditorError::NotFound`] for unknown keys, or a store error after
    /// the record was removed in memory.
    pub fn delete(&mut self, key: &str) -> Result<BookingRecord, PulseError> {
        let removed = match self.editor.delete(&mut self.records, key) {
            Ok(removed) => removed,
            Err(err) => {
                self.notice = Some(Flash::error(err.to_string()));
                return Err(err.into());
            }
        };
        self.notice = Some(Flash::info("Event removed from the dataset."));
        self.persist()?;
        info!(contact_number = %removed.contact_number, "booking removed");
        Ok(removed)
    }

    /// Drop the stored entry and start again from the curated defaults.
    ///
    /// # Errors
    ///
    /// Returns the store error if the entry could not be removed; the
    /// in-memory collection is reset regardless.
    pub fn reset(&mut self) -> Result<(), PulseError> {
        self.records = clone_defaults();
        self.editor.reset();
        self.hydration = Hydration::Defaults;
        self.notice = Some(Flash::info("Dataset reset to the curated defaults."));

        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear stored dataset");
            self.notice = Some(Flash::error(err.to_string()));
            return Err(err.into());
        }
        info!(records = self.records.len(), "dataset reset");
        Ok(())
    }

    /// Pretty-printed JSON snapshot of the collection.
    ///
    /// # Errors
    ///
    /// [`PulseError::Export`] if serialization fails.
    pub fn export_json(&mut self) -> Result<String, PulseError> {
        let json = serde_json::to_string_pretty(&self.records).map_err(PulseError::Export)?;
        self.notice = Some(Flash::success("Dataset exported for download."));
        Ok(json)
    }

    fn persist(&mut self) -> Result<(), PulseError> {
        if let Err(err) = save_records(&mut self.store, &self.records) {
            warn!(error = %err, "failed to persist dataset");
            self.notice = Some(Flash::error(err.to_string()));
            return Err(err.into());
        }
        Ok(())
    }
}

/// Turn a stored payload into the opening collection.
///
/// Never fails: anything unusable degrades to the curated defaults.
#[must_use]
pub fn hydrate(raw: Option<&str>) -> (Vec<BookingRecord>, Hydration) {
    let Some(raw) = raw else {
        return (clone_defaults(), Hydration::Defaults);
    };

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "stored dataset is not valid JSON");
            return (clone_defaults(), Hydration::Unreadable);
        }
    };

    let Value::Array(values) = parsed else {
        warn!("stored dataset is not an array");
        return (clone_defaults(), Hydration::NotAnArray);
    };

    if values.is_empty() {
        return (Vec::new(), Hydration::Empty);
    }

    let report = normalize_all(&values);
    for (index, rejection) in &report.rejected {
        warn!(index, %rejection, "dropping stored record");
    }

    let dropped = report.rejected.len();
    if report.records.is_empty() {
        return (clone_defaults(), Hydration::AllRejected { dropped });
    }
    let kept = report.records.len();
    (report.records, Hydration::Stored { kept, dropped })
}
