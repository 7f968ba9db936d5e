//! Demo data loaded when `seed_sample_data` is enabled.

use super::{ContactInfo, NewPackage, Package};
use chrono::{DateTime, Duration, Utc};

const SAMPLES: [(&str, &str, &str, &str, &str, &str); 4] = [
    ("Alice", "V. Kreves pr. 65", "123456789", "Bob", "Nemuno g. 45", "1578964223"),
    ("Carol", "Taikos pr. 78", "741258963", "Dave", "Vilniaus g. 78", "159735264"),
    ("Eve", "Birzu al. 12", "8523654123", "Frank", "Azuolo g. 56", "789423651"),
    ("Grace", "Obeliu g. 2", "369285147", "Heidi", "Skinijos g. 45A", "987654321"),
];

/// Four packages in the `Created` status, created one to four days before
/// `now`.
pub fn sample_packages(now: DateTime<Utc>) -> Vec<Package> {
    SAMPLES
        .iter()
        .zip(1i64..)
        .map(|(&(s_name, s_addr, s_phone, r_name, r_addr, r_phone), days_ago)| {
            let new = NewPackage::new(
                ContactInfo::new(s_name, s_addr, s_phone),
                ContactInfo::new(r_name, r_addr, r_phone),
            );
            Package::assemble(new, now - Duration::days(days_ago))
        })
        .collect()
}
