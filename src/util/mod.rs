//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod hash;
pub mod probe;
pub mod process;
pub mod version;

pub use config::ToolchainConfig;
pub use diagnostic::Diagnostic;
pub use probe::ProcessProbe;
pub use process::{ProcessRunner, SystemRunner};
