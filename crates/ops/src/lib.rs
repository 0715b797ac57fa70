#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations orchestration for keg
//!
//! This crate serves as the orchestration layer between the CLI and the
//! collaborator crates. It owns request validation, the once-per-request
//! environment gate and the per-formula install loop.

mod context;
mod executor;
mod install;
mod preflight;

pub use context::{OpsContextBuilder, OpsCtx};
pub use executor::InstallExecutor;
pub use install::install;
pub use keg_types::{InstallOutcome, InstallReport, InstallRequest, PreflightCheckResult};
pub use preflight::PreflightValidator;

use keg_errors::Error;

/// Operation result that can be serialized for CLI output
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OperationResult {
    /// Installation report
    InstallReport(InstallReport),
}

impl OperationResult {
    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the result cannot be serialized.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| {
            keg_errors::OpsError::SerializationError {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Whether every requested formula ended up installed or absorbed
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            OperationResult::InstallReport(report) => !report.has_failures(),
        }
    }
}
