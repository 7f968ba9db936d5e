//! Registry snapshots.
//!
//! A snapshot is a versioned, serializable copy of every package in a
//! registry. It can be written as JSON or as compact binary and restored
//! into a fresh registry.

use crate::core::{validate_transition, PackageStatus};
use crate::package::{Package, TrackingCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur while exporting or importing snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot contents are inconsistent
    #[error("Snapshot validation failed: {0}")]
    ValidationFailed(String),
}

/// Serializable copy of a registry's packages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Packages, oldest first
    pub packages: Vec<Package>,
}

impl RegistrySnapshot {
    pub fn new(mut packages: Vec<Package>) -> Self {
        packages.sort_by_key(|p| (p.created_at(), p.id()));
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            packages,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check version and per-package consistency.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let mut ids = HashSet::new();
        let mut codes = HashSet::new();
        for package in &self.packages {
            if !ids.insert(package.id()) {
                return Err(SnapshotError::ValidationFailed(format!(
                    "duplicate package id {}",
                    package.id()
                )));
            }
            if !codes.insert(package.tracking_code()) {
                return Err(SnapshotError::ValidationFailed(format!(
                    "duplicate tracking code {}",
                    package.tracking_code()
                )));
            }
            validate_package(package)?;
        }
        Ok(())
    }
}

fn validate_package(package: &Package) -> Result<(), SnapshotError> {
    let id = package.id();

    if !TrackingCode::is_well_formed(package.tracking_code().as_str()) {
        return Err(SnapshotError::ValidationFailed(format!(
            "package {id} has malformed tracking code '{}'",
            package.tracking_code()
        )));
    }

    let history = package.history();
    if !history.is_chronological() {
        return Err(SnapshotError::ValidationFailed(format!(
            "package {id} history is not in timestamp order"
        )));
    }

    // Every entry must start where the previous one ended, beginning at
    // Created, and the chain must end at the stored status.
    let mut expected = PackageStatus::Created;
    for entry in history.entries() {
        if !validate_transition(entry.previous, entry.new) {
            return Err(SnapshotError::ValidationFailed(format!(
                "package {id} history contains illegal transition {} -> {}",
                entry.previous, entry.new
            )));
        }
        if entry.previous != expected {
            return Err(SnapshotError::ValidationFailed(format!(
                "package {id} history entry {} -> {} does not follow {expected}",
                entry.previous, entry.new
            )));
        }
        expected = entry.new;
    }

    if package.status() != expected {
        return Err(SnapshotError::ValidationFailed(format!(
            "package {id} is {} but its history ends at {expected}",
            package.status()
        )));
    }

    Ok(())
}
