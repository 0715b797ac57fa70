//! The read-only view of the host used by preflight checks

use keg_errors::PlatformError;
use keg_types::CpuArch;
use std::path::Path;

/// Checks against the machine keg is about to install into.
///
/// Advisory checks return `None` when there is nothing to say. Only
/// [`EnvironmentProbe::create_dir_all`] mutates the host.
pub trait EnvironmentProbe: Send + Sync {
    /// Architecture of the running host
    fn cpu_arch(&self) -> CpuArch;

    fn exists(&self, path: &Path) -> bool;

    /// Writable by the real (not effective) user
    fn is_writable(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents. Succeeds if it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<(), PlatformError>;

    /// Advisory when the compiler toolchain is missing or outdated
    fn check_for_latest_toolchain(&self) -> Option<String>;

    /// Advisory when the toolchain license has not been accepted
    fn check_toolchain_license(&self) -> Option<String>;

    /// Names of other package managers found on the host
    fn competing_package_managers(&self) -> Vec<String>;

    /// Whether the calling process runs as the superuser
    fn is_superuser(&self) -> bool;

    /// Whether `path` is owned by the superuser
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be inspected.
    fn owner_is_superuser(&self, path: &Path) -> Result<bool, PlatformError>;
}
