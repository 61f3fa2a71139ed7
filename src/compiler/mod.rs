//! Compiler adapters for the Intel compiler families.
//!
//! This module turns a logical build configuration (build type,
//! optimization level) into the exact flags one compiler family
//! understands, and answers the capability queries the build needs:
//! OpenMP, profile-guided optimization, precompiled headers, MSVC toolset
//! and "does this snippet compile" probes.
//!
//! Two dialects are covered behind the one [`Compiler`] trait:
//! - GNU style (`-O2`, `-g`): [`IntelGnuLikeCompiler`] (icc/icpc)
//! - MSVC style (`/O2`, `/Zi`): [`IntelClCompiler`] (icl)
//!
//! A compiler is detected once and then held as a `Box<dyn Compiler>`.

use std::fmt;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::error::CompilerResult;

mod detect;
mod diagnostics;
mod flags;
mod gnu;
mod intel;
mod msvc;
mod pch;
mod toolset;

pub use detect::{
    assume_compiler, detect_compiler, find_intel_compiler, CompilerId, DetectOptions,
};
pub use diagnostics::{DiagnosticPromotionPolicy, PromotedDiagnostic, PROMOTED_DIAGNOSTICS};
pub use flags::{
    resolve_flags, BuildType, FlagTable, OptimizationLevel, ResolvedFlags, INTEL_CL_FLAGS,
    INTEL_GNU_FLAGS,
};
pub use gnu::GnuLike;
pub use intel::{IntelClCompiler, IntelGnuLikeCompiler};
pub use msvc::{calculate_toolset_version, version_code, ToolsetVersion, VisualStudioLike};
pub use pch::{PchPlan, PchPlanner, PchRequest, PCH_SUFFIX};
pub use toolset::{ClBanner, CompanionVersionSource, VersionBridge};

/// Command-line dialect of a compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerFamily {
    /// POSIX-style options (`-c`, `-o out`)
    GnuLike,
    /// cl.exe-style options (`/c`, `/Foout`)
    VisualStudioLike,
}

impl CompilerFamily {
    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::GnuLike => "gnu-like",
            CompilerFamily::VisualStudioLike => "visual-studio-like",
        }
    }

    /// Arguments that put the compiler in `mode`, writing any output into
    /// `out_dir`. The source file is not included.
    pub fn probe_args(&self, mode: CompileMode, out_dir: &Path) -> Vec<String> {
        match (self, mode) {
            (CompilerFamily::GnuLike, CompileMode::Preprocess) => vec!["-E".to_string()],
            (CompilerFamily::GnuLike, CompileMode::Compile) => vec![
                "-c".to_string(),
                "-o".to_string(),
                out_dir.join("output.o").display().to_string(),
            ],
            (CompilerFamily::GnuLike, CompileMode::Link) => vec![
                "-o".to_string(),
                out_dir.join("output").display().to_string(),
            ],
            (CompilerFamily::VisualStudioLike, CompileMode::Preprocess) => {
                vec!["/nologo".to_string(), "/EP".to_string()]
            }
            (CompilerFamily::VisualStudioLike, CompileMode::Compile) => vec![
                "/nologo".to_string(),
                "/c".to_string(),
                format!("/Fo{}", out_dir.join("output.obj").display()),
            ],
            (CompilerFamily::VisualStudioLike, CompileMode::Link) => vec![
                "/nologo".to_string(),
                format!("/Fe{}", out_dir.join("output.exe").display()),
            ],
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base build options a compiler supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BaseOption {
    #[serde(rename = "b_pch")]
    Pch,
    #[serde(rename = "b_lundef")]
    Lundef,
    #[serde(rename = "b_asneeded")]
    AsNeeded,
    #[serde(rename = "b_pgo")]
    Pgo,
    #[serde(rename = "b_coverage")]
    Coverage,
    #[serde(rename = "b_ndebug")]
    Ndebug,
    #[serde(rename = "b_staticpic")]
    StaticPic,
    #[serde(rename = "b_pie")]
    Pie,
    #[serde(rename = "b_vscrt")]
    Vscrt,
}

impl BaseOption {
    /// Get the option name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseOption::Pch => "b_pch",
            BaseOption::Lundef => "b_lundef",
            BaseOption::AsNeeded => "b_asneeded",
            BaseOption::Pgo => "b_pgo",
            BaseOption::Coverage => "b_coverage",
            BaseOption::Ndebug => "b_ndebug",
            BaseOption::StaticPic => "b_staticpic",
            BaseOption::Pie => "b_pie",
            BaseOption::Vscrt => "b_vscrt",
        }
    }
}

/// How far a probe takes the snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompileMode {
    Preprocess,
    #[default]
    Compile,
    Link,
}

impl CompileMode {
    /// Get the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompileMode::Preprocess => "preprocess",
            CompileMode::Compile => "compile",
            CompileMode::Link => "link",
        }
    }
}

/// Options for a compile probe.
///
/// `extra_args` defaults to empty; a caller with nothing to add never has
/// to build a list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProbeOptions {
    /// Arguments added to the compiler invocation, in order
    pub extra_args: Vec<String>,
    /// Stage the probe runs to
    pub mode: CompileMode,
}

impl ProbeOptions {
    /// Options for a probe in `mode` with no extra arguments.
    pub fn new(mode: CompileMode) -> Self {
        ProbeOptions {
            extra_args: Vec::new(),
            mode,
        }
    }

    /// Append extra arguments.
    pub fn with_extra_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Outcome of a compile probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    /// Whether the snippet compiled
    pub success: bool,
    /// Whether the answer came from a cache rather than a compiler run
    pub cached: bool,
}

/// The "try to compile this snippet" primitive adapters delegate to.
pub trait CompileProbe: Send + Sync {
    fn compiles(&self, code: &str, options: &ProbeOptions) -> Result<ProbeResult>;
}

/// Capabilities shared by every compiler adapter.
///
/// Flag methods return owned lists whose order is significant; callers
/// must not sort or deduplicate them.
pub trait Compiler: fmt::Debug + Send + Sync {
    /// Stable compiler identifier (`intel`, `intel-cl`).
    fn id(&self) -> &'static str;

    /// Command-line dialect.
    fn family(&self) -> CompilerFamily;

    /// Compiler executable.
    fn exe(&self) -> &Path;

    /// Version reported by the compiler.
    fn version(&self) -> &str;

    /// Base build options this compiler supports.
    fn base_options(&self) -> &'static [BaseOption];

    /// Flags for a build type.
    fn buildtype_args(&self, buildtype: BuildType) -> Vec<String>;

    /// Flags for an optimization level.
    fn optimization_args(&self, level: OptimizationLevel) -> Vec<String>;

    /// Flag enabling OpenMP pragmas.
    fn openmp_flags(&self) -> Vec<String>;

    /// Flags instrumenting a build for profile generation.
    fn profile_generate_args(&self) -> Vec<String>;

    /// Flags consuming previously generated profiles.
    fn profile_use_args(&self) -> Vec<String>;

    /// Precompiled header artifact and use flags, if supported.
    fn precompiled_header(&self, _request: &PchRequest) -> Option<PchPlan> {
        None
    }

    /// MSVC toolset this compiler targets, if it has one.
    fn toolset_version(&self) -> CompilerResult<Option<ToolsetVersion>> {
        Ok(None)
    }

    /// Check whether `code` compiles with `options`.
    fn compiles(&self, code: &str, options: &ProbeOptions) -> Result<ProbeResult>;
}
