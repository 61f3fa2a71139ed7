//! Harbour Intel - compiler adapters for the Intel C/C++ compilers
//!
//! This crate maps logical build settings onto the flags Intel's two front
//! ends understand (icc/icpc on posix, icl on Windows), and answers the
//! capability queries a build needs: OpenMP, profile-guided optimization,
//! precompiled headers, MSVC toolset and compile probes.

pub mod compiler;
pub mod core;
pub mod error;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides mock implementations for process execution,
/// compile probes and the companion cl.exe.
#[cfg(test)]
pub mod test_support;

pub use compiler::{
    detect_compiler, resolve_flags, BuildType, Compiler, CompilerFamily, OptimizationLevel,
    ResolvedFlags,
};
pub use crate::core::Language;
pub use error::{CompilerError, CompilerResult};
