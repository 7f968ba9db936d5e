//! In-memory package registry.
//!
//! The registry is the imperative shell around the pure package operations.
//! Each package sits behind its own mutex: a transition is validated and
//! computed from the current value, then the new value (status and history
//! together) replaces the old one before the lock is released.

use crate::config::TrackerConfig;
use crate::core::{PackageStatus, StatusChange};
use crate::error::{Result, TrackerError};
use crate::package::{sample_packages, NewPackage, Package, PackageFilter, TrackingCode};
use crate::snapshot::RegistrySnapshot;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

type Slot = Arc<Mutex<Package>>;

/// Thread-safe store of packages with a single writer per package.
pub struct PackageRegistry {
    packages: RwLock<HashMap<Uuid, Slot>>,
    max_field_length: usize,
}

impl Default for PackageRegistry {
    fn default() -> Self {
        Self::new(&TrackerConfig::default())
    }
}

impl PackageRegistry {
    /// Create a registry, seeding demo data if the config asks for it.
    pub fn new(config: &TrackerConfig) -> Self {
        let registry = Self {
            packages: RwLock::new(HashMap::new()),
            max_field_length: config.max_field_length,
        };
        if config.seed_sample_data {
            let samples = sample_packages(Utc::now());
            info!(count = samples.len(), "seeding sample packages");
            for package in samples {
                registry.insert(package);
            }
        }
        registry
    }

    /// Rebuild a registry from a snapshot.
    pub fn restore(snapshot: RegistrySnapshot, config: &TrackerConfig) -> Result<Self> {
        snapshot.validate()?;
        let registry = Self {
            packages: RwLock::new(HashMap::new()),
            max_field_length: config.max_field_length,
        };
        let count = snapshot.packages.len();
        for package in snapshot.packages {
            registry.insert(package);
        }
        info!(snapshot = %snapshot.id, count, "restored registry from snapshot");
        Ok(registry)
    }

    /// Copy every package into a snapshot.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let snapshot = RegistrySnapshot::new(self.list(&PackageFilter::default()));
        debug!(snapshot = %snapshot.id, count = snapshot.packages.len(), "took snapshot");
        snapshot
    }

    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_map().is_empty()
    }

    /// Validate and store a new package in the `Created` status.
    pub fn create(&self, new: &NewPackage) -> Result<Package> {
        let package = Package::create(new, self.max_field_length, Utc::now()).map_err(|e| {
            warn!(error = %e, "rejected new package");
            e
        })?;
        let package = self.insert_new(package, TrackingCode::generate);
        info!(
            package = %package.id(),
            tracking_code = %package.tracking_code(),
            "created package"
        );
        Ok(package)
    }

    pub fn get(&self, id: Uuid) -> Result<Package> {
        debug!(package = %id, "looking up package");
        let slot = self.slot(id)?;
        let package = lock(&slot).clone();
        Ok(package)
    }

    /// Exact, case-insensitive lookup by tracking code.
    pub fn find_by_tracking_code(&self, code: &str) -> Result<Package> {
        let wanted = TrackingCode::parse(code)?;
        self.read_map()
            .values()
            .map(|slot| lock(slot).clone())
            .find(|package| *package.tracking_code() == wanted)
            .ok_or_else(|| TrackerError::NotFound {
                kind: "Tracking code",
                key: wanted.to_string(),
            })
    }

    /// Packages matching `filter`, newest first.
    pub fn list(&self, filter: &PackageFilter) -> Vec<Package> {
        let mut packages: Vec<Package> = self
            .read_map()
            .values()
            .map(|slot| lock(slot).clone())
            .filter(|package| filter.matches(package))
            .collect();
        packages.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        packages
    }

    /// Statuses the package may move to next.
    pub fn allowed_transitions(&self, id: Uuid) -> Result<&'static [PackageStatus]> {
        Ok(self.get(id)?.allowed_transitions())
    }

    /// Validate, apply and record a status change as one step.
    ///
    /// On success the stored package has the new status and exactly one more
    /// history entry. On `InvalidTransition` nothing changes.
    pub fn apply_transition(&self, id: Uuid, to: PackageStatus) -> Result<Package> {
        let slot = self.slot(id)?;
        let mut current = lock(&slot);

        let updated = current.apply_transition(to).map_err(|e| {
            warn!(package = %id, from = %current.status(), to = %to, "denied status transition");
            e
        })?;
        info!(package = %id, from = %current.status(), to = %to, "applied status transition");

        *current = updated.clone();
        Ok(updated)
    }

    /// Like [`PackageRegistry::apply_transition`], taking the status as a
    /// text token. Unknown tokens are a validation failure; the package is
    /// looked up first so a missing package is still `NotFound`.
    pub fn apply_transition_token(&self, id: Uuid, token: &str) -> Result<Package> {
        self.slot(id)?;
        let to = token.parse::<PackageStatus>()?;
        self.apply_transition(id, to)
    }

    /// History entries ordered by modification time, ascending.
    pub fn list_history(&self, id: Uuid) -> Result<Vec<StatusChange<PackageStatus>>> {
        let slot = self.slot(id)?;
        let history = lock(&slot).history().ordered();
        Ok(history)
    }

    fn insert(&self, package: Package) {
        self.packages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(package.id(), Arc::new(Mutex::new(package)));
    }

    /// Store a new package, drawing fresh codes from `next_code` until its
    /// tracking code is unique. The check and the insert share one write
    /// lock, so two creations cannot claim the same code.
    fn insert_new(&self, package: Package, mut next_code: impl FnMut() -> TrackingCode) -> Package {
        let mut map = self.packages.write().unwrap_or_else(PoisonError::into_inner);
        let mut package = package;
        while map
            .values()
            .any(|slot| lock(slot).tracking_code() == package.tracking_code())
        {
            debug!(tracking_code = %package.tracking_code(), "tracking code taken, regenerating");
            package = package.with_tracking_code(next_code());
        }
        map.insert(package.id(), Arc::new(Mutex::new(package.clone())));
        package
    }

    fn slot(&self, id: Uuid) -> Result<Slot> {
        self.read_map()
            .get(&id)
            .cloned()
            .ok_or_else(|| TrackerError::package_not_found(id))
    }

    fn read_map(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Uuid, Slot>> {
        self.packages.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Stored packages are only ever replaced whole, so a poisoned lock still
/// guards a complete value.
fn lock(slot: &Mutex<Package>) -> MutexGuard<'_, Package> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
