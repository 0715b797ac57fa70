//! Conventional filesystem locations for keg
//!
//! These are the defaults used when the config file and the environment
//! leave a path unset.

/// Conventional installation prefix. It is tolerated as an install target
/// even when the current user cannot write to it yet.
pub const PREFIX: &str = "/usr/local";

pub const CELLAR: &str = "/usr/local/Cellar";

/// Formula definitions live here, relative to the repository root
pub const FORMULA_DIR: &str = "Library/Formula";

/// File extension of formula definitions
pub const FORMULA_EXTENSION: &str = "toml";

pub const LOGS_DIR: &str = "/usr/local/var/log/keg";

/// Where users on unsupported CPU architectures are sent
pub const LEGACY_ARCH_SUPPORT_URL: &str = "https://github.com/mistydemeo/tigerbrew";

/// Receipt written into every keg
pub const INSTALL_RECEIPT: &str = "INSTALL_RECEIPT.json";
