//! Runs one formula through its installer and classifies the result

use keg_errors::{Error, InstallFailureClass, UserFacingError};
use keg_events::{AppEvent, EventEmitter, EventSender, FailureContext, InstallEvent};
use keg_install::InstallSession;
use keg_types::{InstallOutcome, PackageDescriptor};

/// Drives install, caveats and finish for each formula of a request
pub struct InstallExecutor {
    session: Box<dyn InstallSession>,
    tx: EventSender,
}

impl EventEmitter for InstallExecutor {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

impl InstallExecutor {
    #[must_use]
    pub fn new(session: Box<dyn InstallSession>, tx: EventSender) -> Self {
        Self { session, tx }
    }

    /// Install one formula.
    ///
    /// Already-attempted formulae and recoverable install failures become
    /// outcomes; the caller keeps going.
    ///
    /// # Errors
    ///
    /// Returns the installer's error unchanged when it is unclassified.
    pub fn execute(&self, package: &PackageDescriptor) -> Result<InstallOutcome, Error> {
        self.emit(AppEvent::Install(InstallEvent::Started {
            package: package.name.clone(),
            version: package.version.clone(),
        }));

        let mut installer = self.session.installer_for(package);
        if let Err(err) = installer.install() {
            return self.classify(package, err);
        }

        let caveats = installer.caveats();
        if !caveats.is_empty() {
            self.emit(AppEvent::Install(InstallEvent::Caveats {
                package: package.name.clone(),
                caveats,
            }));
        }
        installer.finish();

        self.emit(AppEvent::Install(InstallEvent::Completed {
            package: package.name.clone(),
            version: package.version.clone(),
        }));
        Ok(InstallOutcome::Installed)
    }

    fn classify(&self, package: &PackageDescriptor, err: Error) -> Result<InstallOutcome, Error> {
        match err.install_class() {
            InstallFailureClass::AlreadyAttempted => {
                self.emit(AppEvent::Install(InstallEvent::AlreadyAttempted {
                    package: package.name.clone(),
                }));
                Ok(InstallOutcome::AlreadyAttempted)
            }
            InstallFailureClass::CannotInstall => {
                self.emit(AppEvent::Install(InstallEvent::Failed {
                    package: package.name.clone(),
                    failure: FailureContext::from_error(&err),
                }));
                Ok(InstallOutcome::Failed(err.user_message().into_owned()))
            }
            InstallFailureClass::Unclassified => Err(err),
        }
    }
}
