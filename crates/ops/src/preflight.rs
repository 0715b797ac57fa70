//! Environment gate run once per install request

use keg_config::constants::{LEGACY_ARCH_SUPPORT_URL, PREFIX};
use keg_errors::PreflightError;
use keg_platform::EnvironmentProbe;
use keg_types::{PreflightCheck, PreflightCheckResult};
use std::path::{Path, PathBuf};

/// Runs [`PreflightCheck::ORDER`] against a probe.
///
/// Architecture and writability come first so a broken environment fails
/// before the slower advisory checks spawn processes.
pub struct PreflightValidator<'a> {
    probe: &'a dyn EnvironmentProbe,
    prefix: PathBuf,
    cellar: PathBuf,
}

impl<'a> PreflightValidator<'a> {
    #[must_use]
    pub fn new(
        probe: &'a dyn EnvironmentProbe,
        prefix: impl Into<PathBuf>,
        cellar: impl Into<PathBuf>,
    ) -> Self {
        Self {
            probe,
            prefix: prefix.into(),
            cellar: cellar.into(),
        }
    }

    /// Run every check in order, stopping after the first fatal result.
    ///
    /// The fatal result, if any, is the last element.
    #[must_use]
    pub fn validate(&self) -> Vec<PreflightCheckResult> {
        let mut results = Vec::new();
        for check in PreflightCheck::ORDER {
            let outcome = self.run(check);
            let fatal = outcome.iter().any(PreflightCheckResult::is_fatal);
            results.extend(outcome);
            if fatal {
                break;
            }
        }
        results
    }

    fn run(&self, check: PreflightCheck) -> Vec<PreflightCheckResult> {
        let failure = match check {
            PreflightCheck::Architecture => self.check_architecture(),
            PreflightCheck::WritableLocation => self.check_writable_location(),
            PreflightCheck::Cellar => self.ensure_cellar(),
            PreflightCheck::Toolchain => {
                return advisories(
                    check,
                    [
                        self.probe.check_for_latest_toolchain(),
                        self.probe.check_toolchain_license(),
                    ],
                );
            }
            PreflightCheck::CompetingManagers => {
                return advisories(check, [self.competing_managers()]);
            }
        };

        vec![match failure {
            Some(error) => PreflightCheckResult::Fatal { check, error },
            None => PreflightCheckResult::Pass { check },
        }]
    }

    fn check_architecture(&self) -> Option<PreflightError> {
        let arch = self.probe.cpu_arch();
        (!arch.is_supported()).then(|| PreflightError::UnsupportedArchitecture {
            arch: arch.to_string(),
            support_url: LEGACY_ARCH_SUPPORT_URL.to_string(),
        })
    }

    fn check_writable_location(&self) -> Option<PreflightError> {
        if self.probe.exists(&self.cellar) && !self.probe.is_writable(&self.cellar) {
            return Some(not_writable(&self.cellar));
        }
        // The conventional prefix is tolerated; the cellar check below decides
        if !self.probe.is_writable(&self.prefix) && self.prefix != Path::new(PREFIX) {
            return Some(not_writable(&self.prefix));
        }
        None
    }

    fn competing_managers(&self) -> Option<String> {
        let found = self.probe.competing_package_managers();
        if found.is_empty() {
            return None;
        }
        let names = found.join(" or ");
        Some(format!(
            "It appears you have {names} installed.\n\
             Software installed with other package managers causes known problems for keg.\n\
             If a formula fails to build, uninstall {names} and try again."
        ))
    }

    fn ensure_cellar(&self) -> Option<PreflightError> {
        if self.probe.exists(&self.cellar) {
            return None;
        }
        let err = self.probe.create_dir_all(&self.cellar).err()?;
        let parent = self.cellar.parent().unwrap_or(self.cellar.as_path());
        Some(PreflightError::CellarCreationFailed {
            path: self.cellar.display().to_string(),
            parent: parent.display().to_string(),
            message: err.to_string(),
        })
    }
}

fn not_writable(path: &Path) -> PreflightError {
    PreflightError::NotWritable {
        path: path.display().to_string(),
    }
}

fn advisories<const N: usize>(
    check: PreflightCheck,
    messages: [Option<String>; N],
) -> Vec<PreflightCheckResult> {
    let warnings: Vec<_> = messages
        .into_iter()
        .flatten()
        .filter(|message| !message.trim().is_empty())
        .map(|message| PreflightCheckResult::Warn { check, message })
        .collect();

    if warnings.is_empty() {
        vec![PreflightCheckResult::Pass { check }]
    } else {
        warnings
    }
}
