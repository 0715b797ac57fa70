//! [`EnvironmentProbe`] backed by the running machine

use keg_errors::PlatformError;
use keg_types::CpuArch;
use nix::unistd::{access, getuid, AccessFlags};
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use crate::process::PlatformCommand;
use crate::EnvironmentProbe;

const COMPILERS: [&str; 3] = ["cc", "clang", "gcc"];

/// Executable name and display name of package managers that conflict
/// with formulae built by keg.
const COMPETING_MANAGERS: [(&str, &str); 2] = [("port", "MacPorts"), ("fink", "Fink")];

const XCRUN: &str = "/usr/bin/xcrun";

/// Probes the real host
#[derive(Debug, Clone, Copy, Default)]
pub struct HostProbe;

impl HostProbe {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EnvironmentProbe for HostProbe {
    fn cpu_arch(&self) -> CpuArch {
        CpuArch::from_target(std::env::consts::ARCH)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_writable(&self, path: &Path) -> bool {
        // access(2) checks against the real uid, which is what matters under sudo
        access(path, AccessFlags::W_OK).is_ok()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PlatformError> {
        std::fs::create_dir_all(path).map_err(|e| PlatformError::from_io("mkdir", path, &e))
    }

    fn check_for_latest_toolchain(&self) -> Option<String> {
        if COMPILERS.iter().any(|cc| which::which(cc).is_ok()) {
            return None;
        }
        let install = if cfg!(target_os = "macos") {
            "Install the Command Line Tools with `xcode-select --install`."
        } else {
            "Install a C compiler with your system package manager."
        };
        Some(format!(
            "No compiler was found in PATH. Formulae built from source will fail.\n{install}"
        ))
    }

    fn check_toolchain_license(&self) -> Option<String> {
        if !cfg!(target_os = "macos") || !Path::new(XCRUN).exists() {
            return None;
        }
        let output = match PlatformCommand::new(XCRUN).arg("clang").output() {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(error = %e, "could not run xcrun");
                return None;
            }
        };
        if !output.status.success() && output.combined().contains("license") {
            Some(
                "You have not agreed to the Xcode license.\n\
                 Builds will fail! Agree to the license by opening Xcode.app or running:\n    \
                 sudo xcodebuild -license"
                    .to_string(),
            )
        } else {
            None
        }
    }

    fn competing_package_managers(&self) -> Vec<String> {
        COMPETING_MANAGERS
            .iter()
            .filter(|(exe, _)| which::which(exe).is_ok())
            .map(|(_, name)| (*name).to_string())
            .collect()
    }

    fn is_superuser(&self) -> bool {
        getuid().is_root()
    }

    fn owner_is_superuser(&self, path: &Path) -> Result<bool, PlatformError> {
        let metadata =
            std::fs::metadata(path).map_err(|e| PlatformError::from_io("stat", path, &e))?;
        Ok(metadata.uid() == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reports_target_architecture() {
        let probe = HostProbe::new();
        assert_eq!(
            probe.cpu_arch(),
            CpuArch::from_target(std::env::consts::ARCH)
        );
    }

    #[test]
    fn temp_dir_is_writable() {
        let temp = TempDir::new().unwrap();
        let probe = HostProbe::new();
        assert!(probe.exists(temp.path()));
        assert!(probe.is_writable(temp.path()));
        assert!(!probe.is_writable(&temp.path().join("missing")));
    }

    #[test]
    fn create_dir_all_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let cellar = temp.path().join("usr/local/Cellar");
        let probe = HostProbe::new();

        probe.create_dir_all(&cellar).unwrap();
        probe.create_dir_all(&cellar).unwrap();
        assert!(cellar.is_dir());
    }

    #[test]
    fn create_dir_all_under_a_file_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        let err = HostProbe::new()
            .create_dir_all(&file.join("Cellar"))
            .unwrap_err();
        assert!(matches!(
            err,
            PlatformError::FilesystemOperationFailed { .. }
        ));
    }

    #[test]
    fn ownership_matches_current_user() {
        let temp = TempDir::new().unwrap();
        let exe = temp.path().join("keg");
        std::fs::write(&exe, b"#!/bin/sh\n").unwrap();

        let probe = HostProbe::new();
        assert_eq!(
            probe.owner_is_superuser(&exe).unwrap(),
            probe.is_superuser()
        );
        assert!(probe.owner_is_superuser(&temp.path().join("gone")).is_err());
    }
}
