use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FailureContext;

/// Installation domain events - maps to the ops install loop and `keg install`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InstallEvent {
    /// An install request passed validation and is about to run
    BatchStarted {
        operation_id: Uuid,
        packages: Vec<String>,
    },

    /// Installation started for a formula
    Started { package: String, version: String },

    /// Post-install notices the user should read
    Caveats {
        package: String,
        caveats: Vec<String>,
    },

    /// Installation completed successfully
    Completed { package: String, version: String },

    /// Already handled earlier in the request; never rendered
    AlreadyAttempted { package: String },

    /// Installation failed without aborting the request
    Failed {
        package: String,
        failure: FailureContext,
    },

    /// Every formula in the request reached a terminal state
    BatchCompleted {
        operation_id: Uuid,
        installed: usize,
        failed: usize,
        duration_ms: u64,
    },
}

impl InstallEvent {
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        match self {
            Self::Started { package, .. }
            | Self::Caveats { package, .. }
            | Self::Completed { package, .. }
            | Self::AlreadyAttempted { package }
            | Self::Failed { package, .. } => Some(package),
            Self::BatchStarted { .. } | Self::BatchCompleted { .. } => None,
        }
    }
}
