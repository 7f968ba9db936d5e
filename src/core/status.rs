//! Package lifecycle status.

use super::state::State;
use crate::error::{TrackerError, ValidationIssue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle stage of a package.
///
/// Serialized as the bare variant name ("Created", "Sent", ...), which is
/// also the token accepted by [`FromStr`]. Parsing is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageStatus {
    Created,
    Sent,
    Accepted,
    Returned,
    Canceled,
}

impl PackageStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [PackageStatus; 5] = [
        PackageStatus::Created,
        PackageStatus::Sent,
        PackageStatus::Accepted,
        PackageStatus::Returned,
        PackageStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Sent => "Sent",
            Self::Accepted => "Accepted",
            Self::Returned => "Returned",
            Self::Canceled => "Canceled",
        }
    }
}

impl State for PackageStatus {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Accepted | Self::Canceled)
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageStatus {
    type Err = TrackerError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == token)
            .ok_or_else(|| {
                TrackerError::ValidationFailure(vec![ValidationIssue::UnknownStatus {
                    token: token.to_string(),
                }])
            })
    }
}
