#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for the keg package manager
//!
//! This crate provides the values that flow between the CLI, the install
//! orchestrator and its collaborators: requests, resolved formulae,
//! preflight results and install reports.

pub mod package;
pub mod preflight;
pub mod reports;
pub mod request;

// Re-export commonly used types
pub use package::PackageDescriptor;
pub use preflight::{PreflightCheck, PreflightCheckResult};
pub use reports::{InstallOutcome, InstallReport, PackageFailure};
pub use request::InstallRequest;

use serde::{Deserialize, Serialize};

/// Host CPU family, as far as installation support is concerned
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CpuArch {
    Intel,
    Arm,
    PowerPc,
    Unknown(String),
}

impl CpuArch {
    /// Map a Rust target architecture name (`std::env::consts::ARCH`).
    #[must_use]
    pub fn from_target(arch: &str) -> Self {
        match arch {
            "x86" | "x86_64" => Self::Intel,
            "arm" | "aarch64" => Self::Arm,
            "powerpc" | "powerpc64" => Self::PowerPc,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether formulae can be installed on this architecture at all
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Intel | Self::Arm)
    }
}

impl std::fmt::Display for CpuArch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Intel => write!(f, "intel"),
            Self::Arm => write!(f, "arm"),
            Self::PowerPc => write!(f, "ppc"),
            Self::Unknown(name) => write!(f, "unknown ({name})"),
        }
    }
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Tty,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Tty
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}

impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::Auto
    }
}
