use std::fmt;

use thiserror::Error;

use crate::editor::EditorError;
use crate::model::booking::ParseEnumError;
use crate::store::StoreError;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    BookingNotFound,
    ValidationFailed,
    DuplicateContactNumber,
    UnknownMenuItem,
    InvalidEnumValue,
    StorageWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::BookingNotFound => "E2001",
            Self::ValidationFailed => "E2002",
            Self::DuplicateContactNumber => "E2003",
            Self::UnknownMenuItem => "E2004",
            Self::InvalidEnumValue => "E2005",
            Self::StorageWriteFailed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::BookingNotFound => "Booking not found",
            Self::ValidationFailed => "Booking failed validation",
            Self::DuplicateContactNumber => "Contact number already in use",
            Self::UnknownMenuItem => "Unknown menu item",
            Self::InvalidEnumValue => "Invalid status/class value",
            Self::StorageWriteFailed => "Dataset write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .pulse/config.toml and retry."),
            Self::BookingNotFound => Some("Run `pulse list` to see current contact numbers."),
            Self::ValidationFailed => None,
            Self::DuplicateContactNumber => {
                Some("Pick another contact number or leave it blank to generate one.")
            }
            Self::UnknownMenuItem => Some("Run `pulse menu` to list the menu item ids."),
            Self::InvalidEnumValue => {
                Some("Use Approved/Pending/Not Paid and Grazing/live station/pre order.")
            }
            Self::StorageWriteFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error surfaced by session operations.
#[derive(Debug, Error)]
pub enum PulseError {
    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    InvalidValue(#[from] ParseEnumError),

    #[error("failed to encode export: {0}")]
    Export(#[source] serde_json::Error),
}

impl PulseError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Editor(err) => match err {
                EditorError::MissingRequired
                | EditorError::InvalidDate
                | EditorError::InvalidHeadcount => ErrorCode::ValidationFailed,
                EditorError::DuplicateContactNumber(_) => ErrorCode::DuplicateContactNumber,
                EditorError::UnknownMenuItem(_) => ErrorCode::UnknownMenuItem,
                EditorError::NotFound(_) => ErrorCode::BookingNotFound,
            },
            Self::Store(_) => ErrorCode::StorageWriteFailed,
            Self::InvalidValue(_) => ErrorCode::InvalidEnumValue,
            Self::Export(_) => ErrorCode::InternalUnexpected,
        }
    }

    /// What the caller can do about it.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().map_or_else(
            || match self {
                Self::Editor(err) => err.to_string(),
                _ => code.message().to_string(),
            },
            str::to_string,
        )
    }
}
