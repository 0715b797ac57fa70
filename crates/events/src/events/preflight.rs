use keg_types::PreflightCheck;
use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Environment check events, emitted once per install request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PreflightEvent {
    Started {
        checks: Vec<PreflightCheck>,
    },

    CheckPassed {
        check: PreflightCheck,
    },

    /// Advisory only, installation continues
    CheckWarned {
        check: PreflightCheck,
        message: String,
    },

    /// The request stops here
    CheckFailed {
        check: PreflightCheck,
        failure: FailureContext,
    },

    Completed {
        warnings: usize,
    },
}
