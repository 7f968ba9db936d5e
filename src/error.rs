//! Error types for tracker operations.

use crate::core::PackageStatus;
use crate::snapshot::SnapshotError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors surfaced by tracker operations.
///
/// Callers can tell "not found" apart from "invalid transition" apart from
/// malformed input; nothing is swallowed internally.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{kind} '{key}' not found")]
    NotFound { kind: &'static str, key: String },

    #[error("Invalid status transition from '{from}' to '{to}'")]
    InvalidTransition {
        from: PackageStatus,
        to: PackageStatus,
    },

    #[error("Validation failed: {}", format_issues(.0))]
    ValidationFailure(Vec<ValidationIssue>),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A single problem found while validating caller input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationIssue {
    #[error("{field} must not be blank")]
    BlankField { field: &'static str },

    #[error("{field} exceeds {max} characters (got {len})")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },

    #[error("Unknown status '{token}'")]
    UnknownStatus { token: String },

    #[error("Malformed tracking code '{code}'")]
    MalformedTrackingCode { code: String },

    #[error("History entry at {at} precedes the last recorded entry at {last}")]
    OutOfOrder {
        at: DateTime<Utc>,
        last: DateTime<Utc>,
    },
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl TrackerError {
    pub(crate) fn package_not_found(key: impl ToString) -> Self {
        Self::NotFound {
            kind: "Package",
            key: key.to_string(),
        }
    }

    /// Validation issues carried by this error, if any.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::ValidationFailure(issues) => issues,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
