//! CLI error handling

use std::fmt;

use keg_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Error from configuration or an operation
    Ops(keg_errors::Error),
    /// The install worker did not finish
    Worker(String),
    /// I/O error while rendering output
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Ops(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
            CliError::Worker(msg) => write!(f, "Install worker failed: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Ops(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Worker(_) => None,
        }
    }
}

impl From<keg_errors::Error> for CliError {
    fn from(e: keg_errors::Error) -> Self {
        CliError::Ops(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<tokio::task::JoinError> for CliError {
    fn from(e: tokio::task::JoinError) -> Self {
        CliError::Worker(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keg_errors::{OpsError, PreflightError};

    #[test]
    fn ops_error_leads_with_message() {
        let err = CliError::from(keg_errors::Error::from(OpsError::NoTargetsSpecified));
        let rendered = err.to_string();
        assert!(rendered.starts_with("this command requires a formula argument"));
    }

    #[test]
    fn preflight_error_renders_code() {
        let err = CliError::from(keg_errors::Error::from(PreflightError::NotWritable {
            path: "/usr/local/Cellar".to_string(),
        }));
        let rendered = err.to_string();
        assert!(rendered.contains("Cannot write to /usr/local/Cellar"));
        assert!(rendered.contains("Code: "));
    }
}
