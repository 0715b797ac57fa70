//! Metadata written into every installed keg

use chrono::{DateTime, Utc};
use keg_config::constants::INSTALL_RECEIPT;
use keg_errors::Error;
use keg_types::PackageDescriptor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallReceipt {
    pub name: String,
    pub version: String,
    pub installed_at: DateTime<Utc>,
    /// Built from trunk
    pub head: bool,
    /// Pulled in by another formula rather than requested directly
    pub installed_as_dependency: bool,
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl InstallReceipt {
    #[must_use]
    pub fn new(package: &PackageDescriptor, head: bool, as_dependency: bool) -> Self {
        Self {
            name: package.name.clone(),
            version: package.version.clone(),
            installed_at: Utc::now(),
            head,
            installed_as_dependency: as_dependency,
            dependencies: package.dependencies.clone(),
            source: package.path.clone(),
        }
    }

    /// Write the receipt into `keg`
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be serialized or written.
    pub fn write(&self, keg: &Path) -> Result<(), Error> {
        let path = keg.join(INSTALL_RECEIPT);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json).map_err(|e| Error::io_with_path(&e, &path))
    }

    /// Read the receipt from `keg`
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt is missing or malformed.
    pub fn read(keg: &Path) -> Result<Self, Error> {
        let path = keg.join(INSTALL_RECEIPT);
        let json = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(&e, &path))?;
        Ok(serde_json::from_str(&json)?)
    }
}
