//! Package Tracker: package lifecycle tracking with an audit trail
//!
//! Packages move through a fixed set of statuses. Every legal move is listed
//! in one static transition table, and every accepted move leaves an
//! immutable entry in the package's history.
//!
//! The crate follows a "pure core, imperative shell" split:
//!
//! - **core**: statuses, the transition table and history values, all pure
//! - **package**: the package model; applying a transition returns a new
//!   package whose status and history changed together
//! - **registry**: thread-safe storage with a single writer per package
//!
//! # Example
//!
//! ```rust
//! use package_tracker::{ContactInfo, NewPackage, PackageRegistry, PackageStatus};
//!
//! let registry = PackageRegistry::default();
//! let package = registry
//!     .create(&NewPackage::new(
//!         ContactInfo::new("Alice", "V. Kreves pr. 65", "123456789"),
//!         ContactInfo::new("Bob", "Nemuno g. 45", "1578964223"),
//!     ))
//!     .unwrap();
//!
//! let sent = registry.apply_transition(package.id(), PackageStatus::Sent).unwrap();
//! assert_eq!(sent.status(), PackageStatus::Sent);
//!
//! let history = registry.list_history(package.id()).unwrap();
//! assert_eq!(history.len(), 1);
//! assert_eq!(history[0].previous, PackageStatus::Created);
//!
//! // Accepted is terminal.
//! registry.apply_transition(package.id(), PackageStatus::Accepted).unwrap();
//! assert!(registry.apply_transition(package.id(), PackageStatus::Sent).is_err());
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod package;
pub mod registry;
pub mod snapshot;

// Re-export commonly used types
pub use config::TrackerConfig;
pub use crate::core::{validate_transition, PackageStatus, State, StatusChange, StatusHistory};
pub use error::{Result, TrackerError, ValidationIssue};
pub use package::{ContactInfo, NewPackage, Package, PackageFilter, TrackingCode};
pub use registry::PackageRegistry;
pub use snapshot::{RegistrySnapshot, SnapshotError};
