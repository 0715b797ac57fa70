//! Formula lookup in the local repository

use keg_config::constants::FORMULA_EXTENSION;
use keg_errors::{Error, FormulaError};
use keg_types::PackageDescriptor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::Blacklist;

/// Maps requested names to installable formulae
pub trait NameResolver: Send + Sync {
    /// Resolve `name` to a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError::Unavailable`] when there is no formula for
    /// `name`, carrying the blacklist advisory if one exists. Other errors
    /// mean the formula exists but could not be loaded.
    fn resolve(&self, name: &str) -> Result<PackageDescriptor, Error>;

    /// Whether a formula file for `name` exists in the repository
    fn is_locally_defined(&self, name: &str) -> bool;
}

/// On-disk formula definition, `Library/Formula/<name>.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormulaFile {
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub caveats: Option<String>,
    #[serde(default)]
    pub head: Option<String>,
}

impl FormulaFile {
    #[must_use]
    pub fn into_descriptor(self, name: &str, path: PathBuf) -> PackageDescriptor {
        PackageDescriptor {
            name: name.to_string(),
            version: self.version,
            description: self.description,
            homepage: self.homepage,
            dependencies: self.dependencies,
            caveats: self.caveats,
            head: self.head,
            path: Some(path),
        }
    }
}

/// Resolves names against a directory of formula files
pub struct FormulaRepository {
    formula_dir: PathBuf,
    blacklist: Arc<dyn Blacklist>,
}

impl FormulaRepository {
    pub fn new(formula_dir: impl Into<PathBuf>, blacklist: Arc<dyn Blacklist>) -> Self {
        Self {
            formula_dir: formula_dir.into(),
            blacklist,
        }
    }

    #[must_use]
    pub fn formula_dir(&self) -> &Path {
        &self.formula_dir
    }

    /// Path of the formula file for `name`, if `name` is a plain formula name
    fn formula_path(&self, name: &str) -> Option<PathBuf> {
        let plain = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\'])
            && name != "..";
        plain.then(|| {
            self.formula_dir
                .join(format!("{name}.{FORMULA_EXTENSION}"))
        })
    }

    fn unavailable(&self, name: &str) -> Error {
        FormulaError::Unavailable {
            name: name.to_string(),
            advisory: self.blacklist.lookup(name),
        }
        .into()
    }
}

impl NameResolver for FormulaRepository {
    fn resolve(&self, name: &str) -> Result<PackageDescriptor, Error> {
        let Some(path) = self.formula_path(name) else {
            return Err(self.unavailable(name));
        };

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(self.unavailable(name));
            }
            Err(e) => return Err(Error::io_with_path(&e, &path)),
        };

        let formula: FormulaFile = toml::from_str(&contents).map_err(|e| FormulaError::Invalid {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!(formula = name, path = %path.display(), "resolved formula");
        Ok(formula.into_descriptor(name, path))
    }

    fn is_locally_defined(&self, name: &str) -> bool {
        self.formula_path(name).is_some_and(|path| path.is_file())
    }
}
