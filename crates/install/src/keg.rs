//! Default installer: materialises kegs under the cellar
//!
//! A keg is `<cellar>/<name>/<version>`. Dependencies are installed first,
//! each formula at most once per request, and `finish` points
//! `<prefix>/opt/<name>` at the new keg.

use keg_config::Config;
use keg_errors::{Error, InstallError};
use keg_events::{AppEvent, EventEmitter, EventSender, InstallEvent};
use keg_types::{InstallRequest, PackageDescriptor};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::{FormulaInstaller, InstallReceipt, InstallSession, InstallerFactory, NameResolver};

const HEAD_VERSION: &str = "HEAD";

/// Where kegs and their links live
#[derive(Debug, Clone)]
pub struct KegLayout {
    pub cellar: PathBuf,
    pub prefix: PathBuf,
}

impl KegLayout {
    pub fn new(cellar: impl Into<PathBuf>, prefix: impl Into<PathBuf>) -> Self {
        Self {
            cellar: cellar.into(),
            prefix: prefix.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cellar(), config.prefix())
    }

    /// All installed versions of a formula sit in its rack
    #[must_use]
    pub fn rack(&self, name: &str) -> PathBuf {
        self.cellar.join(name)
    }

    #[must_use]
    pub fn keg_path(&self, name: &str, version: &str) -> PathBuf {
        self.rack(name).join(version)
    }

    #[must_use]
    pub fn opt_link(&self, name: &str) -> PathBuf {
        self.prefix.join("opt").join(name)
    }

    /// Whether any version of `name` is in the cellar
    #[must_use]
    pub fn is_installed(&self, name: &str) -> bool {
        std::fs::read_dir(self.rack(name))
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false)
    }
}

/// Creates [`KegInstaller`]s that share one attempted-set per request
pub struct KegInstallerFactory {
    layout: KegLayout,
    resolver: Arc<dyn NameResolver>,
    tx: Option<EventSender>,
}

impl KegInstallerFactory {
    pub fn new(layout: KegLayout, resolver: Arc<dyn NameResolver>) -> Self {
        Self {
            layout,
            resolver,
            tx: None,
        }
    }

    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }
}

impl InstallerFactory for KegInstallerFactory {
    fn begin(&self, request: &InstallRequest) -> Box<dyn InstallSession> {
        Box::new(KegSession {
            state: Arc::new(SessionState {
                layout: self.layout.clone(),
                resolver: Arc::clone(&self.resolver),
                tx: self.tx.clone(),
                head: request.head,
                attempted: Mutex::new(HashSet::new()),
            }),
        })
    }
}

struct SessionState {
    layout: KegLayout,
    resolver: Arc<dyn NameResolver>,
    tx: Option<EventSender>,
    head: bool,
    attempted: Mutex<HashSet<String>>,
}

impl SessionState {
    /// Returns false if `name` was already attempted in this request
    fn mark_attempted(&self, name: &str) -> bool {
        self.attempted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string())
    }
}

struct KegSession {
    state: Arc<SessionState>,
}

impl InstallSession for KegSession {
    fn installer_for(&self, package: &PackageDescriptor) -> Box<dyn FormulaInstaller> {
        Box::new(KegInstaller::new(
            package.clone(),
            Arc::clone(&self.state),
            false,
        ))
    }
}

/// Installs one formula into the cellar
pub struct KegInstaller {
    package: PackageDescriptor,
    state: Arc<SessionState>,
    as_dependency: bool,
    keg: Option<PathBuf>,
}

impl EventEmitter for KegInstaller {
    fn event_sender(&self) -> Option<&EventSender> {
        self.state.tx.as_ref()
    }
}

impl KegInstaller {
    fn new(package: PackageDescriptor, state: Arc<SessionState>, as_dependency: bool) -> Self {
        Self {
            package,
            state,
            as_dependency,
            keg: None,
        }
    }

    fn install_dependencies(&self) -> Result<(), Error> {
        for dependency in &self.package.dependencies {
            if self.state.layout.is_installed(dependency) {
                continue;
            }

            let descriptor = match self.state.resolver.resolve(dependency) {
                Ok(descriptor) => descriptor,
                Err(Error::Formula(err)) => {
                    return Err(self.unsatisfied(dependency, &err.to_string()));
                }
                Err(other) => return Err(other),
            };

            self.emit_debug(format!(
                "installing dependency {dependency} for {}",
                self.package.name
            ));
            let mut installer = KegInstaller::new(descriptor, Arc::clone(&self.state), true);
            match installer.install() {
                Ok(()) => {
                    let caveats = installer.caveats();
                    if !caveats.is_empty() {
                        self.emit(AppEvent::Install(InstallEvent::Caveats {
                            package: dependency.clone(),
                            caveats,
                        }));
                    }
                    installer.finish();
                }
                // Reaching an attempted but uninstalled dependency means a cycle
                // or an earlier failure in this request
                Err(Error::Install(err)) => {
                    return Err(self.unsatisfied(dependency, &err.to_string()));
                }
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    /// Remove a partially written keg, and its rack if nothing else is in it
    fn discard_keg(&self, keg: &Path) {
        if let Err(e) = std::fs::remove_dir_all(keg) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(keg = %keg.display(), error = %e, "could not remove partial keg");
            }
        }
        // Fails while other versions remain
        let _ = std::fs::remove_dir(self.state.layout.rack(&self.package.name));
    }

    fn unsatisfied(&self, dependency: &str, message: &str) -> Error {
        InstallError::UnsatisfiedDependency {
            package: self.package.name.clone(),
            dependency: dependency.to_string(),
            message: message.to_string(),
        }
        .into()
    }
}

impl FormulaInstaller for KegInstaller {
    fn install(&mut self) -> Result<(), Error> {
        let name = self.package.name.clone();
        if !self.state.mark_attempted(&name) {
            return Err(InstallError::AlreadyAttempted { package: name }.into());
        }

        let head = self.state.head && !self.as_dependency;
        if head && self.package.head.is_none() {
            return Err(InstallError::NoHeadDefined { package: name }.into());
        }

        let version = if head {
            HEAD_VERSION.to_string()
        } else {
            self.package.version.clone()
        };
        let keg = self.state.layout.keg_path(&name, &version);
        if keg.exists() {
            return Err(InstallError::AlreadyInstalled {
                package: name,
                version,
            }
            .into());
        }

        self.install_dependencies()?;

        let materialised = std::fs::create_dir_all(&keg)
            .map_err(|e| Error::io_with_path(&e, &keg))
            .and_then(|()| {
                InstallReceipt::new(&self.package, head, self.as_dependency).write(&keg)
            });
        if let Err(err) = materialised {
            self.discard_keg(&keg);
            return Err(err);
        }
        tracing::debug!(formula = %name, keg = %keg.display(), "keg created");

        self.keg = Some(keg);
        Ok(())
    }

    fn caveats(&self) -> Vec<String> {
        self.package
            .caveats
            .iter()
            .map(|text| text.trim_end().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }

    fn finish(&mut self) {
        let Some(keg) = self.keg.as_ref() else {
            return;
        };
        let link = self.state.layout.opt_link(&self.package.name);
        if let Err(e) = link_keg(keg, &link) {
            self.emit_warning_with_context(
                format!("Could not link {}", self.package.full_name()),
                format!("{}: {e}", link.display()),
            );
        }
    }
}

fn link_keg(keg: &Path, link: &Path) -> std::io::Result<()> {
    if let Some(parent) = link.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if link.symlink_metadata().is_ok() {
        std::fs::remove_file(link)?;
    }
    std::os::unix::fs::symlink(keg, link)
}
