//! Sender and recipient contact details.

use crate::error::ValidationIssue;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single field check.
pub(crate) type FieldCheck = Validation<(), NonEmptyVec<ValidationIssue>>;

/// Which side of the shipment a contact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Sender,
    Recipient,
}

impl Party {
    /// Qualified names of the name, address and phone fields.
    fn field_names(self) -> [&'static str; 3] {
        match self {
            Self::Sender => ["sender.name", "sender.address", "sender.phone"],
            Self::Recipient => ["recipient.name", "recipient.address", "recipient.phone"],
        }
    }
}

/// Name, address and phone of a sender or recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl ContactInfo {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self::new(self.name.trim(), self.address.trim(), self.phone.trim())
    }

    /// One check per field; nothing short-circuits.
    pub(crate) fn checks(&self, party: Party, max_len: usize) -> Vec<FieldCheck> {
        let [name, address, phone] = party.field_names();
        vec![
            check_field(name, &self.name, max_len),
            check_field(address, &self.address, max_len),
            check_field(phone, &self.phone, max_len),
        ]
    }
}

fn check_field(field: &'static str, value: &str, max_len: usize) -> FieldCheck {
    let value = value.trim();
    let len = value.chars().count();
    if value.is_empty() {
        Validation::fail(ValidationIssue::BlankField { field })
    } else if len > max_len {
        Validation::fail(ValidationIssue::FieldTooLong {
            field,
            max: max_len,
            len,
        })
    } else {
        Validation::success(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_strips_whitespace() {
        let contact = ContactInfo::new("  Alice ", "\tV. Kreves pr. 65\n", " 123456789");
        assert_eq!(
            contact.trimmed(),
            ContactInfo::new("Alice", "V. Kreves pr. 65", "123456789")
        );
    }

    #[test]
    fn valid_contact_passes_all_checks() {
        let contact = ContactInfo::new("Bob", "Nemuno g. 45", "1578964223");
        let checks = contact.checks(Party::Recipient, 64);
        assert_eq!(checks.len(), 3);
        assert!(checks.iter().all(|c| c.is_success()));
    }

    #[test]
    fn blank_fields_are_reported_with_party_prefix() {
        let contact = ContactInfo::new("   ", "Nemuno g. 45", "");
        let failures: Vec<ValidationIssue> = contact
            .checks(Party::Sender, 64)
            .into_iter()
            .filter_map(|check| match check {
                Validation::Failure(issues) => Some(issues.iter().cloned().collect::<Vec<_>>()),
                Validation::Success(_) => None,
            })
            .flatten()
            .collect();

        assert_eq!(
            failures,
            vec![
                ValidationIssue::BlankField {
                    field: "sender.name"
                },
                ValidationIssue::BlankField {
                    field: "sender.phone"
                },
            ]
        );
    }

    #[test]
    fn long_fields_are_counted_in_characters() {
        let contact = ContactInfo::new("Ąžuolas", "Ąžuolo g. 56", "789423651");
        assert!(contact
            .checks(Party::Recipient, 7)
            .iter()
            .any(|c| c.is_failure()));
        assert!(contact.checks(Party::Recipient, 12).iter().all(|c| c.is_success()));
    }
}
