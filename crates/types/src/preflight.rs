//! Results of the request-wide environment checks

use keg_errors::PreflightError;
use serde::{Deserialize, Serialize};

/// The checks run before any formula is installed, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreflightCheck {
    Architecture,
    WritableLocation,
    Toolchain,
    CompetingManagers,
    Cellar,
}

impl PreflightCheck {
    /// All checks in the order they must run
    pub const ORDER: [PreflightCheck; 5] = [
        Self::Architecture,
        Self::WritableLocation,
        Self::Toolchain,
        Self::CompetingManagers,
        Self::Cellar,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Architecture => "architecture",
            Self::WritableLocation => "writable_location",
            Self::Toolchain => "toolchain",
            Self::CompetingManagers => "competing_managers",
            Self::Cellar => "cellar",
        }
    }
}

impl std::fmt::Display for PreflightCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PreflightCheckResult {
    Pass {
        check: PreflightCheck,
    },
    Warn {
        check: PreflightCheck,
        message: String,
    },
    Fatal {
        check: PreflightCheck,
        error: PreflightError,
    },
}

impl PreflightCheckResult {
    #[must_use]
    pub fn check(&self) -> PreflightCheck {
        match self {
            Self::Pass { check } | Self::Warn { check, .. } | Self::Fatal { check, .. } => *check,
        }
    }

    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal { .. })
    }

    /// Warning text, if this result is a warning
    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        match self {
            Self::Warn { message, .. } => Some(message),
            _ => None,
        }
    }
}
