//! pulse-core library.
//!
//! Booking records for catered events: the strict record schema, the
//! normalizer that repairs untrusted persisted JSON into that schema, the
//! derived views the dashboard renders, and the editor workflow that creates,
//! replaces and deletes records.
//!
//! # Conventions
//!
//! - **Errors**: module-level `thiserror` enums, gathered into
//!   [`error::PulseError`] at the session boundary; `anyhow::Result` for
//!   config loading.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).
//! - **Storage**: the core never touches storage directly, only through the
//!   [`store::RecordStore`] port.

pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod normalize;
pub mod seed;
pub mod session;
pub mod store;
pub mod time;
pub mod view;

pub use model::booking::{BookingRecord, EventClass, Status};
pub use model::menu::{MENU, MenuCategory, MenuItem};
pub use model::orders::Orders;
