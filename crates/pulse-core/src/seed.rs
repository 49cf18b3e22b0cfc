//! Default dataset.
//!
//! The curated seed ships as `data/default-events.json`, the same shape the
//! export produces, so refreshing the seed for a deployment means replacing
//! that file with an exported dataset. It is parsed and normalized once; any
//! entry that fails normalization is left out and logged.

use std::sync::LazyLock;

use serde_json::Value;
use tracing::warn;

use crate::model::booking::BookingRecord;
use crate::normalize::normalize_all;

const SEED_JSON: &str = include_str!("../data/default-events.json");

static DEFAULT_RECORDS: LazyLock<Vec<BookingRecord>> = LazyLock::new(|| {
    let values = match serde_json::from_str::<Vec<Value>>(SEED_JSON) {
        Ok(values) => values,
        Err(err) => {
            warn!(error = %err, "default dataset is not a JSON array");
            return Vec::new();
        }
    };

    let report = normalize_all(&values);
    for (index, rejection) in &report.rejected {
        warn!(index, %rejection, "dropping default record");
    }
    report.records
});

/// The shared, immutable seed collection.
#[must_use]
pub fn default_records() -> &'static [BookingRecord] {
    &DEFAULT_RECORDS
}

/// Fresh, independently owned copies of the seed collection.
///
/// Each record (orders map included) is deep-copied, so callers may mutate
/// the result without touching the shared seed or other clones.
#[must_use]
pub fn clone_defaults() -> Vec<BookingRecord> {
    DEFAULT_RECORDS.clone()
}
