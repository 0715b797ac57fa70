//! Host probing and filesystem errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Errors that can occur while inspecting or preparing the host
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlatformError {
    #[error("filesystem operation failed: {operation} on {path} - {message}")]
    FilesystemOperationFailed {
        operation: String,
        path: String,
        message: String,
    },

    #[error("process execution failed: {command} - {message}")]
    ProcessExecutionFailed { command: String, message: String },

    #[error("permission denied: {operation} - {message}")]
    PermissionDenied { operation: String, message: String },
}

impl PlatformError {
    /// Map an I/O failure on `path` to the closest platform error.
    pub fn from_io(operation: &str, path: &std::path::Path, err: &std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied {
                operation: format!("{operation} {}", path.display()),
                message: err.to_string(),
            }
        } else {
            Self::FilesystemOperationFailed {
                operation: operation.to_string(),
                path: path.display().to_string(),
                message: err.to_string(),
            }
        }
    }
}

impl UserFacingError for PlatformError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::PermissionDenied { .. } => Some("Adjust filesystem permissions and retry."),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::FilesystemOperationFailed { .. } => "platform.filesystem_operation_failed",
            Self::ProcessExecutionFailed { .. } => "platform.process_execution_failed",
            Self::PermissionDenied { .. } => "platform.permission_denied",
        };
        Some(code)
    }
}
