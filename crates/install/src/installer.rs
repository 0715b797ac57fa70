//! The contract between the install loop and whatever builds a formula

use keg_errors::Error;
use keg_types::{InstallRequest, PackageDescriptor};

/// Drives the lifecycle of one formula.
///
/// Callers invoke `install`, then `caveats`, then `finish`, and skip the
/// last two when `install` fails.
pub trait FormulaInstaller {
    /// Fetch, build and place the formula.
    ///
    /// # Errors
    ///
    /// Returns `InstallError::AlreadyAttempted` when the formula was already
    /// handled in this request, another `InstallError` when this formula
    /// cannot be installed, or any other error for failures that should
    /// abort the request.
    fn install(&mut self) -> Result<(), Error>;

    /// Post-install notices for the user
    fn caveats(&self) -> Vec<String>;

    /// Final linking and cleanup. Problems are reported, not returned.
    fn finish(&mut self);
}

/// Per-request installer state, such as the set of attempted formulae
pub trait InstallSession {
    fn installer_for(&self, package: &PackageDescriptor) -> Box<dyn FormulaInstaller>;
}

/// Opens an [`InstallSession`] for each install request
pub trait InstallerFactory: Send + Sync {
    fn begin(&self, request: &InstallRequest) -> Box<dyn InstallSession>;
}
