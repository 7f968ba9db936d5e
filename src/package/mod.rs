//! Packages and the pure operations on them.
//!
//! A [`Package`] is only ever changed by producing a new value: applying a
//! transition returns an updated copy whose status and history moved
//! together, so a caller that swaps the copy in cannot observe one without
//! the other.

mod contact;
mod filter;
mod samples;
mod tracking;

pub use contact::{ContactInfo, Party};
pub use filter::PackageFilter;
pub use samples::sample_packages;
pub use tracking::{TrackingCode, TRACKING_CODE_LEN};

use crate::core::{ensure_transition, PackageStatus, StatusChange, StatusHistory};
use crate::error::{Result, TrackerError, ValidationIssue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use uuid::Uuid;

/// Caller-supplied data for a new package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPackage {
    pub sender: ContactInfo,
    pub recipient: ContactInfo,
}

impl NewPackage {
    pub fn new(sender: ContactInfo, recipient: ContactInfo) -> Self {
        Self { sender, recipient }
    }

    /// Validate every field, collecting all problems.
    ///
    /// Returns the input with whitespace trimmed on success.
    pub fn validate(&self, max_field_length: usize) -> Result<NewPackage> {
        let mut checks = self.sender.checks(Party::Sender, max_field_length);
        checks.extend(self.recipient.checks(Party::Recipient, max_field_length));

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(NewPackage {
                sender: self.sender.trimmed(),
                recipient: self.recipient.trimmed(),
            }),
            Validation::Failure(issues) => Err(TrackerError::ValidationFailure(
                issues.iter().cloned().collect(),
            )),
        }
    }
}

/// A tracked package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    id: Uuid,
    tracking_code: TrackingCode,
    sender: ContactInfo,
    recipient: ContactInfo,
    status: PackageStatus,
    created_at: DateTime<Utc>,
    history: StatusHistory<PackageStatus>,
}

impl Package {
    /// Validate `new` and build a package in the `Created` status with an
    /// empty history.
    pub fn create(
        new: &NewPackage,
        max_field_length: usize,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        let new = new.validate(max_field_length)?;
        Ok(Self::assemble(new, created_at))
    }

    /// Build from already-validated input.
    pub(crate) fn assemble(new: NewPackage, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tracking_code: TrackingCode::generate(),
            sender: new.sender,
            recipient: new.recipient,
            status: PackageStatus::Created,
            created_at,
            history: StatusHistory::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tracking_code(&self) -> &TrackingCode {
        &self.tracking_code
    }

    pub fn sender(&self) -> &ContactInfo {
        &self.sender
    }

    pub fn recipient(&self) -> &ContactInfo {
        &self.recipient
    }

    pub fn status(&self) -> PackageStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn history(&self) -> &StatusHistory<PackageStatus> {
        &self.history
    }

    /// Statuses this package may move to next.
    pub fn allowed_transitions(&self) -> &'static [PackageStatus] {
        crate::core::allowed_transitions(self.status)
    }

    /// Move to `to`, stamping the history entry with the current time.
    ///
    /// See [`Package::apply_transition_at`].
    pub fn apply_transition(&self, to: PackageStatus) -> Result<Package> {
        self.apply_transition_at(to, Utc::now())
    }

    /// Move to `to`, returning the updated package (pure).
    ///
    /// The returned package has `status == to` and exactly one more history
    /// entry, `(previous = self.status, new = to)`. A denied transition
    /// returns `InvalidTransition` and produces nothing. `at` is raised to
    /// the last entry's timestamp if it would otherwise go backwards.
    pub fn apply_transition_at(&self, to: PackageStatus, at: DateTime<Utc>) -> Result<Package> {
        let moved = self.with_status(to)?;
        let (updated, _) = moved.append_history(self.status, to, self.clamp_timestamp(at))?;
        Ok(updated)
    }

    /// Record the change that brought the package to its current status.
    ///
    /// `previous` must be the last recorded status (`Created` for an empty
    /// history), `new` must be the current status, the edge must be legal,
    /// and `at` must not precede the last entry. Anything else would make
    /// the history disagree with the status and is refused.
    pub fn append_history(
        &self,
        previous: PackageStatus,
        new: PackageStatus,
        at: DateTime<Utc>,
    ) -> Result<(Package, StatusChange<PackageStatus>)> {
        ensure_transition(previous, new)?;

        if previous != self.recorded_status() || new != self.status {
            return Err(TrackerError::InvalidTransition {
                from: previous,
                to: new,
            });
        }

        if let Some(last) = self.history.last() {
            if at < last.modified_at {
                return Err(TrackerError::ValidationFailure(vec![
                    ValidationIssue::OutOfOrder {
                        at,
                        last: last.modified_at,
                    },
                ]));
            }
        }

        let entry = StatusChange::new(previous, new, at);
        let updated = Package {
            history: self.history.record(entry.clone()),
            ..self.clone()
        };
        Ok((updated, entry))
    }

    /// Status the history ends at: the last entry's `new`, or `Created`.
    pub fn recorded_status(&self) -> PackageStatus {
        self.history
            .last()
            .map_or(PackageStatus::Created, |entry| entry.new)
    }

    /// Status change alone; only reachable through `apply_transition_at`,
    /// which records the matching entry before handing the value out.
    fn with_status(&self, to: PackageStatus) -> Result<Package> {
        ensure_transition(self.status, to)?;
        Ok(Package {
            status: to,
            ..self.clone()
        })
    }

    pub(crate) fn with_tracking_code(self, tracking_code: TrackingCode) -> Package {
        Package {
            tracking_code,
            ..self
        }
    }

    fn clamp_timestamp(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        match self.history.last() {
            Some(last) if at < last.modified_at => last.modified_at,
            _ => at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_package() -> NewPackage {
        NewPackage::new(
            ContactInfo::new("Alice", "V. Kreves pr. 65", "123456789"),
            ContactInfo::new("Bob", "Nemuno g. 45", "1578964223"),
        )
    }

    fn created() -> Package {
        Package::create(&new_package(), 256, Utc::now()).unwrap()
    }

    #[test]
    fn create_starts_in_created_with_empty_history() {
        let package = created();
        assert_eq!(package.status(), PackageStatus::Created);
        assert!(package.history().is_empty());
        assert!(TrackingCode::is_well_formed(package.tracking_code().as_str()));
        assert_eq!(package.sender().name, "Alice");
    }

    #[test]
    fn create_trims_contact_fields() {
        let new = NewPackage::new(
            ContactInfo::new(" Carol ", "Taikos pr. 78 ", " 741258963"),
            ContactInfo::new("Dave", " Vilniaus g. 78", "159735264 "),
        );
        let package = Package::create(&new, 256, Utc::now()).unwrap();
        assert_eq!(package.sender().name, "Carol");
        assert_eq!(package.recipient().phone, "159735264");
    }

    #[test]
    fn create_collects_every_validation_issue() {
        let new = NewPackage::new(
            ContactInfo::new("", "Taikos pr. 78", "741258963"),
            ContactInfo::new("Dave", "", " "),
        );

        let err = Package::create(&new, 256, Utc::now()).unwrap_err();
        assert_eq!(
            err.issues(),
            &[
                ValidationIssue::BlankField {
                    field: "sender.name"
                },
                ValidationIssue::BlankField {
                    field: "recipient.address"
                },
                ValidationIssue::BlankField {
                    field: "recipient.phone"
                },
            ]
        );
    }

    #[test]
    fn allowed_transition_updates_status_and_history_together() {
        let package = created();
        let sent = package.apply_transition(PackageStatus::Sent).unwrap();

        assert_eq!(sent.status(), PackageStatus::Sent);
        assert_eq!(sent.history().len(), 1);
        let entry = &sent.history().entries()[0];
        assert_eq!(entry.previous, PackageStatus::Created);
        assert_eq!(entry.new, PackageStatus::Sent);

        // Original value is untouched.
        assert_eq!(package.status(), PackageStatus::Created);
        assert!(package.history().is_empty());
    }

    #[test]
    fn denied_transition_has_no_effect() {
        let accepted = created()
            .apply_transition(PackageStatus::Sent)
            .and_then(|p| p.apply_transition(PackageStatus::Accepted))
            .unwrap();

        let err = accepted.apply_transition(PackageStatus::Sent).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidTransition { .. }));
        assert_eq!(accepted.status(), PackageStatus::Accepted);
        assert_eq!(accepted.history().len(), 2);
    }

    #[test]
    fn transition_timestamps_never_go_backwards() {
        let now = Utc::now();
        let sent = created()
            .apply_transition_at(PackageStatus::Sent, now)
            .unwrap();
        let returned = sent
            .apply_transition_at(PackageStatus::Returned, now - Duration::seconds(30))
            .unwrap();

        assert!(returned.history().is_chronological());
        assert_eq!(returned.history().entries()[1].modified_at, now);
    }

    #[test]
    fn append_history_records_the_pending_change() {
        let now = Utc::now();
        let moved = created().with_status(PackageStatus::Sent).unwrap();
        assert!(moved.history().is_empty());

        let (recorded, entry) = moved
            .append_history(PackageStatus::Created, PackageStatus::Sent, now)
            .unwrap();
        assert_eq!(entry.previous, PackageStatus::Created);
        assert_eq!(entry.new, PackageStatus::Sent);
        assert_eq!(recorded.recorded_status(), recorded.status());
    }

    #[test]
    fn append_history_rejects_entries_that_do_not_chain() {
        let now = Utc::now();
        let package = created();

        // Legal edge, but the package never left Created.
        let err = package
            .append_history(PackageStatus::Sent, PackageStatus::Accepted, now)
            .unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InvalidTransition {
                from: PackageStatus::Sent,
                to: PackageStatus::Accepted
            }
        ));

        // Chains from Created, but the status is still Created.
        assert!(matches!(
            package.append_history(PackageStatus::Created, PackageStatus::Sent, now),
            Err(TrackerError::InvalidTransition { .. })
        ));

        // Already recorded: the history is up to date with the status.
        let sent = package.apply_transition_at(PackageStatus::Sent, now).unwrap();
        assert!(matches!(
            sent.append_history(PackageStatus::Created, PackageStatus::Sent, now),
            Err(TrackerError::InvalidTransition { .. })
        ));
        assert!(package.history().is_empty());
        assert_eq!(sent.history().len(), 1);
    }

    #[test]
    fn append_history_rejects_stale_timestamps() {
        let now = Utc::now();
        let returned = created()
            .apply_transition_at(PackageStatus::Sent, now)
            .and_then(|p| p.with_status(PackageStatus::Returned))
            .unwrap();

        let stale = returned
            .append_history(
                PackageStatus::Sent,
                PackageStatus::Returned,
                now - Duration::minutes(1),
            )
            .unwrap_err();
        assert!(matches!(
            stale.issues(),
            [ValidationIssue::OutOfOrder { .. }]
        ));
    }

    #[test]
    fn applied_history_always_ends_at_status() {
        let package = created()
            .apply_transition(PackageStatus::Sent)
            .and_then(|p| p.apply_transition(PackageStatus::Returned))
            .and_then(|p| p.apply_transition(PackageStatus::Sent))
            .unwrap();
        assert_eq!(package.recorded_status(), package.status());
        assert_eq!(package.history().len(), 3);
    }

    #[test]
    fn allowed_transitions_follow_status() {
        let package = created();
        assert_eq!(
            package.allowed_transitions(),
            &[PackageStatus::Sent, PackageStatus::Canceled]
        );
        let canceled = package.apply_transition(PackageStatus::Canceled).unwrap();
        assert!(canceled.allowed_transitions().is_empty());
    }
}
