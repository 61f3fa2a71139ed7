//! Toolset detection for compilers that emulate cl.exe.
//!
//! icl does not report an MSVC toolset of its own. It ships alongside a
//! real cl.exe and mimics that compiler's dialect, so the toolset is taken
//! from cl.exe's version and run through the same calculation the MSVC
//! base uses.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{CompilerError, CompilerResult};
use crate::util::process::ProcessRunner;
use crate::util::version::search_version;

use super::msvc::{calculate_toolset_version, version_code, ToolsetVersion};

/// Supplies the version of the compiler whose toolset is borrowed.
pub trait CompanionVersionSource: Send + Sync {
    /// The companion program, for error messages.
    fn program(&self) -> &Path;

    /// Dotted version reported by the companion compiler.
    fn companion_version(&self) -> CompilerResult<String>;
}

/// Reads the version from the banner cl.exe prints when run without input.
pub struct ClBanner {
    program: PathBuf,
    runner: Arc<dyn ProcessRunner>,
}

impl ClBanner {
    /// Use `cl.exe` from PATH.
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        ClBanner {
            program: PathBuf::from("cl.exe"),
            runner,
        }
    }

    /// Use a specific cl.exe.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }
}

impl CompanionVersionSource for ClBanner {
    fn program(&self) -> &Path {
        &self.program
    }

    fn companion_version(&self) -> CompilerResult<String> {
        // cl.exe with no arguments exits non-zero; the banner still goes
        // to stderr, so the status is ignored.
        let output = self
            .runner
            .run(&self.program, &[])
            .map_err(|e| CompilerError::detection(self.program.display(), format!("{:#}", e)))?;

        search_version(&output.stderr).ok_or_else(|| {
            let first_line = output.stderr.lines().next().unwrap_or("").trim();
            CompilerError::detection(
                self.program.display(),
                format!("no version found in banner `{}`", first_line),
            )
        })
    }
}

/// Derives an MSVC toolset from a companion compiler's version.
pub struct VersionBridge {
    source: Box<dyn CompanionVersionSource>,
}

impl VersionBridge {
    pub fn new(source: impl CompanionVersionSource + 'static) -> Self {
        VersionBridge {
            source: Box::new(source),
        }
    }

    /// The companion program the toolset is borrowed from.
    pub fn companion(&self) -> &Path {
        self.source.program()
    }

    /// Toolset the companion compiler corresponds to.
    ///
    /// `Ok(None)` means the version was read but is newer than any known
    /// toolset. A missing companion or unreadable version is an error; the
    /// caller should treat the toolset as unavailable, not guess.
    pub fn toolset_version(&self) -> CompilerResult<Option<ToolsetVersion>> {
        let version = self.source.companion_version()?;
        let code = version_code(&version).ok_or_else(|| {
            CompilerError::detection(
                self.source.program().display(),
                format!("version `{}` has fewer than two numeric components", version),
            )
        })?;

        tracing::debug!(
            "{} reports version {} (code {})",
            self.source.program().display(),
            version,
            code
        );

        Ok(calculate_toolset_version(code))
    }
}

impl std::fmt::Debug for VersionBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionBridge")
            .field("companion", &self.source.program())
            .finish()
    }
}
