#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Host introspection for keg.
//!
//! This crate answers the questions the installer asks about the machine
//! before touching it:
//! - CPU architecture and privilege level
//! - Filesystem writability and cellar creation
//! - Compiler toolchain state and competing package managers
//!
//! Everything sits behind [`EnvironmentProbe`] so the orchestration layer
//! can be driven by fakes in tests.

pub mod host;
pub mod probe;
pub mod process;

pub use host::HostProbe;
pub use probe::EnvironmentProbe;
pub use process::{CommandOutput, PlatformCommand};
