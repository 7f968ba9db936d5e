//! List filtering.

use super::Package;
use crate::core::PackageStatus;

/// Criteria for listing packages. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFilter {
    /// Case-insensitive tracking-code substring
    pub tracking_code: Option<String>,
    /// Exact status
    pub status: Option<PackageStatus>,
}

impl PackageFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracking_code(mut self, fragment: impl Into<String>) -> Self {
        self.tracking_code = Some(fragment.into());
        self
    }

    pub fn status(mut self, status: PackageStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, package: &Package) -> bool {
        let code_matches = self
            .tracking_code
            .as_deref()
            .is_none_or(|fragment| package.tracking_code().contains(fragment));
        let status_matches = self.status.is_none_or(|status| package.status() == status);
        code_matches && status_matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{ContactInfo, NewPackage};
    use chrono::Utc;

    fn package() -> Package {
        let new = NewPackage::new(
            ContactInfo::new("Eve", "Birzu al. 12", "8523654123"),
            ContactInfo::new("Frank", "Azuolo g. 56", "789423651"),
        );
        Package::create(&new, 256, Utc::now()).unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(PackageFilter::new().matches(&package()));
    }

    #[test]
    fn filters_by_status() {
        let package = package();
        assert!(PackageFilter::new()
            .status(PackageStatus::Created)
            .matches(&package));
        assert!(!PackageFilter::new()
            .status(PackageStatus::Sent)
            .matches(&package));
    }

    #[test]
    fn filters_by_tracking_code_fragment_ignoring_case() {
        let package = package();
        let fragment = package.tracking_code().as_str()[2..7].to_ascii_lowercase();

        assert!(PackageFilter::new()
            .tracking_code(fragment.clone())
            .matches(&package));
        assert!(!PackageFilter::new()
            .tracking_code(fragment)
            .status(PackageStatus::Canceled)
            .matches(&package));
        assert!(!PackageFilter::new()
            .tracking_code("not-a-code")
            .matches(&package));
    }
}
