//! Base for compilers speaking the GNU (POSIX-style) command-line dialect.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::util::version::version_compare;

use super::{CompileProbe, ProbeOptions, ProbeResult};

/// State shared by every compiler of the GNU family.
#[derive(Clone)]
pub struct GnuLike {
    exe: PathBuf,
    version: String,
    probe: Arc<dyn CompileProbe>,
}

impl GnuLike {
    pub fn new(exe: impl Into<PathBuf>, version: impl Into<String>, probe: Arc<dyn CompileProbe>) -> Self {
        GnuLike {
            exe: exe.into(),
            version: version.into(),
            probe,
        }
    }

    pub fn exe(&self) -> &Path {
        &self.exe
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether the compiler version satisfies `requirement` (e.g. `>=15.0.0`).
    pub fn version_satisfies(&self, requirement: &str) -> bool {
        version_compare(&self.version, requirement)
    }

    /// Run a probe without any family-specific adjustment.
    pub fn compiles(&self, code: &str, options: &ProbeOptions) -> Result<ProbeResult> {
        self.probe.compiles(code, options)
    }
}

impl fmt::Debug for GnuLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GnuLike")
            .field("exe", &self.exe)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
