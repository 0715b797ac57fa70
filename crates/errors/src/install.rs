//! Formula installer error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// How the install loop reacts to a failed formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InstallFailureClass {
    /// Already processed earlier in the same request; absorbed silently.
    AlreadyAttempted,
    /// Reported as a warning, siblings keep installing.
    CannotInstall,
    /// Aborts the remaining loop.
    Unclassified,
}

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstallError {
    #[error("{package} was already attempted in this request")]
    AlreadyAttempted { package: String },

    #[error("{message}")]
    CannotInstall { package: String, message: String },

    #[error("{package}-{version} already installed")]
    AlreadyInstalled { package: String, version: String },

    #[error("{package} depends on {dependency}, which could not be installed: {message}")]
    UnsatisfiedDependency {
        package: String,
        dependency: String,
        message: String,
    },

    #[error("no head is defined for {package}")]
    NoHeadDefined { package: String },

    #[error("installation of {package} failed: {message}")]
    Unclassified { package: String, message: String },
}

impl InstallError {
    /// Shorthand for a recoverable per-package failure.
    pub fn cannot_install(package: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CannotInstall {
            package: package.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn class(&self) -> InstallFailureClass {
        match self {
            Self::AlreadyAttempted { .. } => InstallFailureClass::AlreadyAttempted,
            Self::CannotInstall { .. }
            | Self::AlreadyInstalled { .. }
            | Self::UnsatisfiedDependency { .. }
            | Self::NoHeadDefined { .. } => InstallFailureClass::CannotInstall,
            Self::Unclassified { .. } => InstallFailureClass::Unclassified,
        }
    }

    /// Name of the formula the failure belongs to
    #[must_use]
    pub fn package(&self) -> &str {
        match self {
            Self::AlreadyAttempted { package }
            | Self::CannotInstall { package, .. }
            | Self::AlreadyInstalled { package, .. }
            | Self::UnsatisfiedDependency { package, .. }
            | Self::NoHeadDefined { package }
            | Self::Unclassified { package, .. } => package,
        }
    }
}

impl UserFacingError for InstallError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::AlreadyInstalled { .. } => {
                Some("Remove the existing keg from the cellar to reinstall it.")
            }
            Self::NoHeadDefined { .. } => Some("Install the stable version without --HEAD."),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::AlreadyAttempted { .. } => "install.already_attempted",
            Self::CannotInstall { .. } => "install.cannot_install",
            Self::AlreadyInstalled { .. } => "install.already_installed",
            Self::UnsatisfiedDependency { .. } => "install.unsatisfied_dependency",
            Self::NoHeadDefined { .. } => "install.no_head_defined",
            Self::Unclassified { .. } => "install.unclassified",
        };
        Some(code)
    }
}
