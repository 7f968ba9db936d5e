//! Status transition table.
//!
//! Legal moves are listed as a static adjacency table rather than spread
//! across branching logic, so the whole state machine can be read (and
//! tested) in one place.

use super::status::PackageStatus;
use crate::error::{Result, TrackerError};

use PackageStatus::{Accepted, Canceled, Created, Returned, Sent};

/// Adjacency table: each status and the statuses it may move to.
///
/// Terminal statuses have an empty set. There are no self-loops.
pub const TRANSITIONS: [(PackageStatus, &[PackageStatus]); 5] = [
    (Created, &[Sent, Canceled]),
    (Sent, &[Accepted, Returned, Canceled]),
    (Returned, &[Sent, Canceled]),
    (Accepted, &[]),
    (Canceled, &[]),
];

/// Statuses reachable in one step from `from`.
pub fn allowed_transitions(from: PackageStatus) -> &'static [PackageStatus] {
    TRANSITIONS
        .iter()
        .find(|(status, _)| *status == from)
        .map(|(_, next)| *next)
        .unwrap_or(&[])
}

/// Check whether `to` is reachable from `from` in one step (pure).
///
/// # Example
///
/// ```rust
/// use package_tracker::core::{validate_transition, PackageStatus};
///
/// assert!(validate_transition(PackageStatus::Created, PackageStatus::Sent));
/// assert!(!validate_transition(PackageStatus::Accepted, PackageStatus::Sent));
/// ```
pub fn validate_transition(from: PackageStatus, to: PackageStatus) -> bool {
    allowed_transitions(from).contains(&to)
}

/// Token-level variant of [`validate_transition`].
///
/// Unknown tokens on either side are denied.
pub fn validate_transition_tokens(from: &str, to: &str) -> bool {
    match (from.parse::<PackageStatus>(), to.parse::<PackageStatus>()) {
        (Ok(from), Ok(to)) => validate_transition(from, to),
        _ => false,
    }
}

/// Like [`validate_transition`], but reports a denial as an error.
pub fn ensure_transition(from: PackageStatus, to: PackageStatus) -> Result<()> {
    if validate_transition(from, to) {
        Ok(())
    } else {
        Err(TrackerError::InvalidTransition { from, to })
    }
}
