//! Status history tracking.
//!
//! Provides an immutable, append-only log of accepted status changes.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Record of a single accepted status change.
///
/// Entries are immutable values: once recorded, nothing mutates or removes
/// them.
///
/// # Example
///
/// ```rust
/// use package_tracker::core::{PackageStatus, StatusChange};
/// use chrono::Utc;
///
/// let change = StatusChange::new(PackageStatus::Created, PackageStatus::Sent, Utc::now());
/// assert_eq!(change.previous, PackageStatus::Created);
/// assert_eq!(change.new, PackageStatus::Sent);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StatusChange<S: State> {
    /// Entry identifier
    pub id: Uuid,
    /// The status being left
    pub previous: S,
    /// The status being entered
    pub new: S,
    /// When the change was recorded
    pub modified_at: DateTime<Utc>,
}

impl<S: State> StatusChange<S> {
    pub fn new(previous: S, new: S, modified_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            previous,
            new,
            modified_at,
        }
    }
}

/// Ordered log of status changes.
///
/// History is immutable - `record` returns a new history with the entry
/// appended and leaves the original untouched.
///
/// # Example
///
/// ```rust
/// use package_tracker::core::{PackageStatus, StatusChange, StatusHistory};
/// use chrono::Utc;
///
/// let history = StatusHistory::new();
/// let history = history.record(StatusChange::new(
///     PackageStatus::Created,
///     PackageStatus::Sent,
///     Utc::now(),
/// ));
/// let history = history.record(StatusChange::new(
///     PackageStatus::Sent,
///     PackageStatus::Accepted,
///     Utc::now(),
/// ));
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // Created -> Sent -> Accepted
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StatusHistory<S: State> {
    entries: Vec<StatusChange<S>>,
}

impl<S: State> Default for StatusHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StatusHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record an entry, returning a new history.
    ///
    /// This is a pure function - the existing history is not mutated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use package_tracker::core::{PackageStatus, StatusChange, StatusHistory};
    /// use chrono::Utc;
    ///
    /// let history = StatusHistory::new();
    /// let change = StatusChange::new(PackageStatus::Created, PackageStatus::Canceled, Utc::now());
    ///
    /// let new_history = history.record(change);
    /// assert_eq!(new_history.len(), 1);
    /// assert_eq!(history.len(), 0); // Original unchanged
    /// ```
    pub fn record(&self, entry: StatusChange<S>) -> Self {
        let mut entries = self.entries.clone();
        entries.push(entry);
        Self { entries }
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[StatusChange<S>] {
        &self.entries
    }

    /// Entries ordered by modification time, ascending.
    ///
    /// The sort is stable, so entries sharing a timestamp keep their
    /// insertion order.
    pub fn ordered(&self) -> Vec<StatusChange<S>> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|entry| entry.modified_at);
        entries
    }

    /// The most recently recorded entry.
    pub fn last(&self) -> Option<&StatusChange<S>> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether timestamps never decrease along insertion order.
    pub fn is_chronological(&self) -> bool {
        self.entries
            .windows(2)
            .all(|pair| pair[0].modified_at <= pair[1].modified_at)
    }

    /// Get the path of statuses traversed.
    ///
    /// Returns the `previous` status of the first entry followed by the
    /// `new` status of every entry.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.entries.first() {
            path.push(&first.previous);
        }
        for entry in &self.entries {
            path.push(&entry.new);
        }
        path
    }

    /// Elapsed time from the first to the last entry.
    ///
    /// Returns `None` if there are no entries.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) {
            last.modified_at
                .signed_duration_since(first.modified_at)
                .to_std()
                .ok()
        } else {
            None
        }
    }
}
