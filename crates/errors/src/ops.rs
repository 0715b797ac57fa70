//! Request-level orchestration errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpsError {
    #[error("this command requires a formula argument")]
    NoTargetsSpecified,

    #[error("Specify `--HEAD` in uppercase to build from trunk.")]
    InvalidHeadSpelling,

    #[error("No available formula for {name}\n{advisory}")]
    PackageUnavailable { name: String, advisory: String },

    #[error("Cowardly refusing to `sudo keg install`: {executable} is not owned by root")]
    UnsafeElevatedInstall { executable: String },

    #[error("component not found: {component}")]
    MissingComponent { component: String },

    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

impl UserFacingError for OpsError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NoTargetsSpecified => Some("Pass one or more formula names to install."),
            Self::PackageUnavailable { .. } => {
                Some("Use --force to install it anyway if you know what you are doing.")
            }
            Self::UnsafeElevatedInstall { .. } => Some(
                "Run keg as your normal user. Installing with sudo against a binary owned by \
                 another user hands that user root.",
            ),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::NoTargetsSpecified => "ops.no_targets_specified",
            Self::InvalidHeadSpelling => "ops.invalid_head_spelling",
            Self::PackageUnavailable { .. } => "ops.package_unavailable",
            Self::UnsafeElevatedInstall { .. } => "ops.unsafe_elevated_install",
            Self::MissingComponent { .. } => "ops.missing_component",
            Self::SerializationError { .. } => "ops.serialization_error",
        };
        Some(code)
    }
}
