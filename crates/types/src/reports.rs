//! Report type definitions for operations

use serde::{Deserialize, Serialize};

/// What happened to one formula inside an install request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum InstallOutcome {
    Installed,
    /// Already handled earlier in the request, usually as a shared dependency
    AlreadyAttempted,
    Failed(String),
}

/// A formula that could not be installed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFailure {
    pub name: String,
    pub message: String,
}

/// Installation report
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InstallReport {
    /// Formulae that were installed, in request order
    pub installed: Vec<String>,
    /// Formulae skipped because they were already attempted in this request
    pub already_attempted: Vec<String>,
    /// Formulae that failed without aborting the request
    pub failed: Vec<PackageFailure>,
    /// Non-blocking preflight warnings
    pub warnings: Vec<String>,
    /// Total execution time
    pub duration_ms: u64,
}

impl InstallReport {
    /// Record the outcome for `name`.
    pub fn record(&mut self, name: &str, outcome: InstallOutcome) {
        match outcome {
            InstallOutcome::Installed => self.installed.push(name.to_string()),
            InstallOutcome::AlreadyAttempted => self.already_attempted.push(name.to_string()),
            InstallOutcome::Failed(message) => self.failed.push(PackageFailure {
                name: name.to_string(),
                message,
            }),
        }
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
