//! Tracking codes.

use crate::error::{Result, TrackerError, ValidationIssue};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of characters in a tracking code.
pub const TRACKING_CODE_LEN: usize = 14;

/// System-generated, fixed-length, uppercase alphanumeric tracking code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingCode(String);

impl TrackingCode {
    /// Generate a fresh code from the hex digits of a random UUID.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(hex[..TRACKING_CODE_LEN].to_ascii_uppercase())
    }

    /// Parse a code supplied by a caller. Lowercase input is accepted and
    /// normalised.
    pub fn parse(code: &str) -> Result<Self> {
        let normalised = code.trim().to_ascii_uppercase();
        if Self::is_well_formed(&normalised) {
            Ok(Self(normalised))
        } else {
            Err(TrackerError::ValidationFailure(vec![
                ValidationIssue::MalformedTrackingCode {
                    code: code.to_string(),
                },
            ]))
        }
    }

    pub fn is_well_formed(code: &str) -> bool {
        code.len() == TRACKING_CODE_LEN
            && code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    }

    /// Case-insensitive substring match, as used by list filters.
    pub fn contains(&self, fragment: &str) -> bool {
        self.0.contains(&fragment.to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
