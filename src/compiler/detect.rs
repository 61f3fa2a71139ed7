//! Compiler detection.
//!
//! Turns a compiler path into the matching adapter by asking the compiler
//! for its version banner.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::core::Language;
use crate::error::{CompilerError, CompilerResult};
use crate::util::probe::ProcessProbe;
use crate::util::process::{find_executable, ProcessRunner};
use crate::util::version::search_version;

use super::gnu::GnuLike;
use super::intel::{IntelClCompiler, IntelGnuLikeCompiler};
use super::msvc::VisualStudioLike;
use super::toolset::{ClBanner, VersionBridge};
use super::{Compiler, CompilerFamily};

/// Inputs to detection beyond the compiler path.
#[derive(Debug, Clone, Default)]
pub struct DetectOptions {
    /// Version override; skips running the compiler for its banner
    pub version: Option<String>,
    /// cl.exe the Windows adapter borrows its toolset from
    pub companion: Option<PathBuf>,
    /// Language probes are compiled as
    pub language: Language,
}

/// The adapters detection can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilerId {
    /// icc/icpc
    Intel,
    /// icl
    IntelCl,
}

impl CompilerId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerId::Intel => "intel",
            CompilerId::IntelCl => "intel-cl",
        }
    }

    /// Executable assumed when no path is configured.
    pub fn default_exe(&self, language: Language) -> &'static str {
        match (self, language) {
            (CompilerId::Intel, Language::C) => "icc",
            (CompilerId::Intel, Language::Cxx) => "icpc",
            (CompilerId::IntelCl, _) => "icl.exe",
        }
    }
}

impl FromStr for CompilerId {
    type Err = CompilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intel" => Ok(CompilerId::Intel),
            "intel-cl" => Ok(CompilerId::IntelCl),
            _ => Err(CompilerError::configuration(
                "compiler id",
                s,
                &["intel", "intel-cl"],
            )),
        }
    }
}

impl fmt::Display for CompilerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `exe` names the Windows front end.
fn is_icl(exe: &Path) -> bool {
    exe.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("icl"))
        .unwrap_or(false)
}

/// Target architecture named in an icl banner.
fn banner_target(banner: &str) -> &'static str {
    if banner.contains("IA-32") {
        "x86"
    } else {
        "x64"
    }
}

/// Detect the Intel compiler at `exe`.
pub fn detect_compiler(
    exe: &Path,
    runner: Arc<dyn ProcessRunner>,
    options: &DetectOptions,
) -> CompilerResult<Box<dyn Compiler>> {
    if is_icl(exe) {
        detect_icl(exe, runner, options)
    } else {
        detect_icc(exe, runner, options)
    }
}

fn detect_icl(
    exe: &Path,
    runner: Arc<dyn ProcessRunner>,
    options: &DetectOptions,
) -> CompilerResult<Box<dyn Compiler>> {
    let (version, target) = match &options.version {
        Some(version) => (version.clone(), "x64"),
        None => {
            // icl prints its banner on stderr and exits non-zero without input
            let output = runner
                .run(exe, &[])
                .map_err(|e| CompilerError::detection(exe.display(), format!("{:#}", e)))?;
            let version = search_version(&output.stderr).ok_or_else(|| {
                CompilerError::detection(exe.display(), "no version found in banner")
            })?;
            (version, banner_target(&output.stderr))
        }
    };

    tracing::info!("detected intel-cl {} ({}) at {}", version, target, exe.display());
    Ok(build_icl(exe, &version, target, runner, options))
}

fn build_icl(
    exe: &Path,
    version: &str,
    target: &str,
    runner: Arc<dyn ProcessRunner>,
    options: &DetectOptions,
) -> Box<dyn Compiler> {
    let probe = ProcessProbe::new(
        exe,
        CompilerFamily::VisualStudioLike,
        options.language,
        runner.clone(),
    );
    let mut banner = ClBanner::new(runner);
    if let Some(cl) = &options.companion {
        banner = banner.with_program(cl.clone());
    }

    Box::new(IntelClCompiler::new(
        VisualStudioLike::new(exe, version, target, Arc::new(probe)),
        VersionBridge::new(banner),
    ))
}

fn detect_icc(
    exe: &Path,
    runner: Arc<dyn ProcessRunner>,
    options: &DetectOptions,
) -> CompilerResult<Box<dyn Compiler>> {
    let version = match &options.version {
        Some(version) => version.clone(),
        None => {
            let output = runner
                .run(exe, &["--version".to_string()])
                .map_err(|e| CompilerError::detection(exe.display(), format!("{:#}", e)))?;
            let text = format!("{}\n{}", output.stdout, output.stderr);

            if !(text.contains("ICC") || text.contains("Intel")) {
                let first_line = text.lines().next().unwrap_or("").trim();
                return Err(CompilerError::detection(
                    exe.display(),
                    format!("not an Intel compiler: `{}`", first_line),
                ));
            }

            search_version(&text).ok_or_else(|| {
                CompilerError::detection(exe.display(), "no version found in `--version` output")
            })?
        }
    };

    tracing::info!("detected intel {} at {}", version, exe.display());
    Ok(build_icc(exe, &version, runner, options))
}

fn build_icc(
    exe: &Path,
    version: &str,
    runner: Arc<dyn ProcessRunner>,
    options: &DetectOptions,
) -> Box<dyn Compiler> {
    let probe = ProcessProbe::new(exe, CompilerFamily::GnuLike, options.language, runner);
    Box::new(IntelGnuLikeCompiler::new(GnuLike::new(
        exe,
        version,
        Arc::new(probe),
    )))
}

/// Build the `id` adapter for `exe` without running it.
///
/// For cross setups and tests where the compiler is not runnable here.
/// The icl target is assumed to be x64.
pub fn assume_compiler(
    id: CompilerId,
    exe: &Path,
    version: &str,
    runner: Arc<dyn ProcessRunner>,
    options: &DetectOptions,
) -> Box<dyn Compiler> {
    tracing::debug!("assuming {} {} at {}", id, version, exe.display());
    match id {
        CompilerId::Intel => build_icc(exe, version, runner, options),
        CompilerId::IntelCl => build_icl(exe, version, "x64", runner, options),
    }
}

/// Locate an Intel compiler for `language` on PATH.
///
/// The posix drivers are preferred; icl is the fallback.
pub fn find_intel_compiler(language: Language) -> Option<PathBuf> {
    let posix = match language {
        Language::C => "icc",
        Language::Cxx => "icpc",
    };
    find_executable(posix).or_else(|| find_executable("icl"))
}
