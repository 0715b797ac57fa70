//! Formula lookup errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormulaError {
    #[error("No available formula for {name}{}", advisory_suffix(.advisory))]
    Unavailable {
        name: String,
        advisory: Option<String>,
    },

    #[error("invalid formula {path}: {message}")]
    Invalid { path: String, message: String },
}

#[allow(clippy::ref_option)]
fn advisory_suffix(advisory: &Option<String>) -> String {
    advisory
        .as_deref()
        .map(|text| format!("\n{text}"))
        .unwrap_or_default()
}

impl UserFacingError for FormulaError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Unavailable { advisory: None, .. } => {
                Some("Check the spelling of the formula name.")
            }
            Self::Invalid { .. } => Some("Fix the formula file and retry."),
            Self::Unavailable { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::Unavailable { .. } => Some("formula.unavailable"),
            Self::Invalid { .. } => Some("formula.invalid"),
        }
    }
}
