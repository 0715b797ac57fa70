//! Recording fakes for the orchestration tests
#![allow(dead_code)]

use keg_config::Config;
use keg_errors::{Error, FormulaError, InstallError, PlatformError};
use keg_events::{AppEvent, EventReceiver};
use keg_install::{Blacklist, FormulaInstaller, InstallSession, InstallerFactory, NameResolver};
use keg_ops::{OpsContextBuilder, OpsCtx};
use keg_platform::EnvironmentProbe;
use keg_types::{CpuArch, InstallRequest, PackageDescriptor};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Shared, ordered record of every collaborator call
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.entries().iter().filter(|e| e.starts_with(prefix)).count()
    }

    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.count(prefix) > 0
    }
}

pub struct FakeProbe {
    pub arch: CpuArch,
    pub existing: Mutex<HashSet<PathBuf>>,
    pub unwritable: HashSet<PathBuf>,
    pub create_fails: bool,
    pub toolchain: Option<String>,
    pub license: Option<String>,
    pub managers: Vec<String>,
    pub superuser: bool,
    pub installer_owned_by_root: bool,
    pub log: CallLog,
}

impl FakeProbe {
    pub fn new(log: CallLog) -> Self {
        Self {
            arch: CpuArch::Arm,
            existing: Mutex::new(HashSet::new()),
            unwritable: HashSet::new(),
            create_fails: false,
            toolchain: None,
            license: None,
            managers: Vec::new(),
            superuser: false,
            installer_owned_by_root: true,
            log,
        }
    }

    pub fn with_existing(self, path: impl Into<PathBuf>) -> Self {
        self.existing.lock().unwrap().insert(path.into());
        self
    }

    pub fn with_unwritable(mut self, path: impl Into<PathBuf>) -> Self {
        self.unwritable.insert(path.into());
        self
    }
}

impl EnvironmentProbe for FakeProbe {
    fn cpu_arch(&self) -> CpuArch {
        self.log.push("probe:arch");
        self.arch.clone()
    }

    fn exists(&self, path: &Path) -> bool {
        self.existing.lock().unwrap().contains(path)
    }

    fn is_writable(&self, path: &Path) -> bool {
        !self.unwritable.contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PlatformError> {
        self.log.push(format!("probe:mkdir:{}", path.display()));
        if self.create_fails {
            return Err(PlatformError::PermissionDenied {
                operation: format!("create {}", path.display()),
                message: "Permission denied (os error 13)".to_string(),
            });
        }
        self.existing.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn check_for_latest_toolchain(&self) -> Option<String> {
        self.log.push("probe:toolchain");
        self.toolchain.clone()
    }

    fn check_toolchain_license(&self) -> Option<String> {
        self.log.push("probe:license");
        self.license.clone()
    }

    fn competing_package_managers(&self) -> Vec<String> {
        self.log.push("probe:managers");
        self.managers.clone()
    }

    fn is_superuser(&self) -> bool {
        self.superuser
    }

    fn owner_is_superuser(&self, _path: &Path) -> Result<bool, PlatformError> {
        Ok(self.installer_owned_by_root)
    }
}

pub struct FakeResolver {
    pub formulae: HashMap<String, PackageDescriptor>,
    pub local: HashSet<String>,
    pub log: CallLog,
}

impl NameResolver for FakeResolver {
    fn resolve(&self, name: &str) -> Result<PackageDescriptor, Error> {
        self.log.push(format!("resolve:{name}"));
        self.formulae.get(name).cloned().ok_or_else(|| {
            FormulaError::Unavailable {
                name: name.to_string(),
                advisory: None,
            }
            .into()
        })
    }

    fn is_locally_defined(&self, name: &str) -> bool {
        self.local.contains(name)
    }
}

#[derive(Default)]
pub struct FakeBlacklist(pub HashMap<String, String>);

impl Blacklist for FakeBlacklist {
    fn lookup(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

/// What a fake installer does when asked to install a formula
#[derive(Clone, Debug)]
pub enum Script {
    Succeed { caveats: Vec<String> },
    AlreadyAttempted,
    CannotInstall(String),
    Unclassified(String),
}

pub struct FakeInstallerFactory {
    pub scripts: HashMap<String, Script>,
    pub log: CallLog,
}

impl InstallerFactory for FakeInstallerFactory {
    fn begin(&self, _request: &InstallRequest) -> Box<dyn InstallSession> {
        self.log.push("begin");
        Box::new(FakeSession {
            scripts: self.scripts.clone(),
            log: self.log.clone(),
        })
    }
}

struct FakeSession {
    scripts: HashMap<String, Script>,
    log: CallLog,
}

impl InstallSession for FakeSession {
    fn installer_for(&self, package: &PackageDescriptor) -> Box<dyn FormulaInstaller> {
        let script = self
            .scripts
            .get(&package.name)
            .cloned()
            .unwrap_or(Script::Succeed {
                caveats: Vec::new(),
            });
        Box::new(FakeInstaller {
            name: package.name.clone(),
            script,
            log: self.log.clone(),
        })
    }
}

struct FakeInstaller {
    name: String,
    script: Script,
    log: CallLog,
}

impl FormulaInstaller for FakeInstaller {
    fn install(&mut self) -> Result<(), Error> {
        self.log.push(format!("install:{}", self.name));
        match &self.script {
            Script::Succeed { .. } => Ok(()),
            Script::AlreadyAttempted => Err(InstallError::AlreadyAttempted {
                package: self.name.clone(),
            }
            .into()),
            Script::CannotInstall(message) => Err(InstallError::CannotInstall {
                package: self.name.clone(),
                message: message.clone(),
            }
            .into()),
            Script::Unclassified(message) => Err(InstallError::Unclassified {
                package: self.name.clone(),
                message: message.clone(),
            }
            .into()),
        }
    }

    fn caveats(&self) -> Vec<String> {
        self.log.push(format!("caveats:{}", self.name));
        match &self.script {
            Script::Succeed { caveats } => caveats.clone(),
            _ => Vec::new(),
        }
    }

    fn finish(&mut self) {
        self.log.push(format!("finish:{}", self.name));
    }
}

/// Builds an [`OpsCtx`] around the fakes
pub struct Harness {
    pub log: CallLog,
    pub probe: FakeProbe,
    pub formulae: HashMap<String, PackageDescriptor>,
    pub local: HashSet<String>,
    pub blacklist: FakeBlacklist,
    pub scripts: HashMap<String, Script>,
    pub config: Config,
}

impl Harness {
    pub fn new() -> Self {
        let log = CallLog::default();
        let mut config = Config::default();
        config.paths.installer = Some(PathBuf::from("/usr/local/bin/keg"));
        Self {
            probe: FakeProbe::new(log.clone()).with_existing("/usr/local/Cellar"),
            log,
            formulae: HashMap::new(),
            local: HashSet::new(),
            blacklist: FakeBlacklist::default(),
            scripts: HashMap::new(),
            config,
        }
    }

    pub fn formula(mut self, name: &str, version: &str) -> Self {
        self.formulae
            .insert(name.to_string(), PackageDescriptor::new(name, version));
        self
    }

    pub fn local(mut self, name: &str) -> Self {
        self.local.insert(name.to_string());
        self
    }

    pub fn blacklisted(mut self, name: &str, advisory: &str) -> Self {
        self.blacklist
            .0
            .insert(name.to_string(), advisory.to_string());
        self
    }

    pub fn script(mut self, name: &str, script: Script) -> Self {
        self.scripts.insert(name.to_string(), script);
        self
    }

    pub fn probe(mut self, edit: impl FnOnce(FakeProbe) -> FakeProbe) -> Self {
        self.probe = edit(self.probe);
        self
    }

    pub fn build(self) -> (OpsCtx, EventReceiver, CallLog) {
        let (tx, rx) = keg_events::channel();
        let ctx = OpsContextBuilder::new()
            .with_config(self.config)
            .with_probe(Arc::new(self.probe))
            .with_resolver(Arc::new(FakeResolver {
                formulae: self.formulae,
                local: self.local,
                log: self.log.clone(),
            }))
            .with_blacklist(Arc::new(self.blacklist))
            .with_installers(Arc::new(FakeInstallerFactory {
                scripts: self.scripts,
                log: self.log.clone(),
            }))
            .with_event_sender(tx)
            .build()
            .unwrap();
        (ctx, rx, self.log)
    }
}

/// Everything emitted so far, without waiting
pub fn drain(rx: &mut EventReceiver) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
