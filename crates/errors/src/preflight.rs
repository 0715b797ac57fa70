//! Environment gating errors raised before any install begins

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PreflightError {
    #[error(
        "Sorry, keg does not support your computer's CPU architecture ({arch}).\n\
         For PowerPC support, see: {support_url}"
    )]
    UnsupportedArchitecture { arch: String, support_url: String },

    #[error("Cannot write to {path}")]
    NotWritable { path: String },

    #[error("Could not create {path}\nCheck you have permission to write to {parent}")]
    CellarCreationFailed {
        path: String,
        parent: String,
        message: String,
    },
}

impl UserFacingError for PreflightError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NotWritable { .. } => {
                Some("Fix the ownership of the install location or set paths.prefix to a writable directory.")
            }
            Self::CellarCreationFailed { .. } => {
                Some("Create the cellar by hand or point paths.cellar somewhere writable.")
            }
            Self::UnsupportedArchitecture { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::CellarCreationFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::UnsupportedArchitecture { .. } => "preflight.unsupported_architecture",
            Self::NotWritable { .. } => "preflight.not_writable",
            Self::CellarCreationFailed { .. } => "preflight.cellar_creation_failed",
        };
        Some(code)
    }
}
