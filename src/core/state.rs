//! The `State` trait that history entries are generic over.
//!
//! [`PackageStatus`](crate::core::PackageStatus) is the implementation the
//! tracker uses; the history log only needs a name, a terminal flag and
//! serde support from it.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A position in a package's lifecycle.
///
/// Implementations are plain values: copied into every
/// [`StatusChange`](crate::core::StatusChange), compared when checking that
/// a history chains, and written into snapshots.
///
/// ```rust
/// use package_tracker::core::{PackageStatus, State};
///
/// let terminal: Vec<PackageStatus> = PackageStatus::ALL
///     .into_iter()
///     .filter(|status| status.is_final())
///     .collect();
///
/// assert_eq!(terminal, [PackageStatus::Accepted, PackageStatus::Canceled]);
/// assert_eq!(PackageStatus::Canceled.name(), "Canceled");
/// assert!(!PackageStatus::Returned.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Terminal states admit no outbound transitions. Defaults to `false`.
    fn is_final(&self) -> bool {
        false
    }
}
