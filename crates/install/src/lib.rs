#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Formula resolution and installation for keg
//!
//! The orchestration layer only sees the traits defined here:
//! [`NameResolver`], [`Blacklist`] and [`InstallerFactory`]. The default
//! implementations read TOML formulae from the repository and materialise
//! kegs in the cellar.

mod blacklist;
mod formula;
mod installer;
mod keg;
mod receipt;

pub use blacklist::{Blacklist, BuiltinBlacklist};
pub use formula::{FormulaFile, FormulaRepository, NameResolver};
pub use installer::{FormulaInstaller, InstallSession, InstallerFactory};
pub use keg::{KegInstaller, KegInstallerFactory, KegLayout};
pub use receipt::InstallReceipt;

// Re-export EventSender for implementors of the installer traits
pub use keg_events::EventSender;
