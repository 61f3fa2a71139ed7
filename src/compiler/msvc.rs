//! Base for compilers speaking the MSVC (`cl.exe`) command-line dialect.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::error::{CompilerError, CompilerResult};

use super::{CompileProbe, ProbeOptions, ProbeResult};

/// MSVC platform toolset, such as `14.1` for Visual Studio 2017.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ToolsetVersion {
    pub major: u32,
    pub minor: u32,
}

impl ToolsetVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        ToolsetVersion { major, minor }
    }

    /// Integer form used in toolset directory names (`v141`).
    pub fn code(&self) -> u32 {
        self.major * 10 + self.minor
    }
}

impl fmt::Display for ToolsetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Upper bounds (exclusive) of `_MSC_VER`-style codes and their toolsets.
const TOOLSETS: &[(u32, ToolsetVersion)] = &[
    (1310, ToolsetVersion::new(7, 0)),
    (1400, ToolsetVersion::new(7, 1)),  // Visual Studio 2003
    (1500, ToolsetVersion::new(8, 0)),  // Visual Studio 2005
    (1600, ToolsetVersion::new(9, 0)),  // Visual Studio 2008
    (1700, ToolsetVersion::new(10, 0)), // Visual Studio 2010
    (1800, ToolsetVersion::new(11, 0)), // Visual Studio 2012
    (1900, ToolsetVersion::new(12, 0)), // Visual Studio 2013
    (1910, ToolsetVersion::new(14, 0)), // Visual Studio 2015
    (1920, ToolsetVersion::new(14, 1)), // Visual Studio 2017
    (1930, ToolsetVersion::new(14, 2)), // Visual Studio 2019
    (1950, ToolsetVersion::new(14, 3)), // Visual Studio 2022
];

/// Map a compiler version code (`1916`) to its platform toolset.
///
/// Codes past the newest known toolset yield `None`.
pub fn calculate_toolset_version(version: u32) -> Option<ToolsetVersion> {
    let toolset = TOOLSETS
        .iter()
        .find(|(bound, _)| version < *bound)
        .map(|(_, toolset)| *toolset);

    if toolset.is_none() {
        tracing::warn!("Could not find toolset for version {}", version);
    }
    toolset
}

/// Concatenate the first two components of a dotted version into a code.
///
/// `19.16.27034` becomes `1916`. Note `19.0.24215` becomes `190`; the
/// components are joined as text, not padded.
pub fn version_code(version: &str) -> Option<u32> {
    let mut parts = version.split('.');
    let major = parts.next()?;
    let minor = parts.next()?;
    format!("{}{}", major, minor).parse().ok()
}

/// State shared by every compiler of the MSVC family.
#[derive(Clone)]
pub struct VisualStudioLike {
    exe: PathBuf,
    version: String,
    /// Target architecture (`x64`, `x86`, `arm64`)
    target: String,
    probe: Arc<dyn CompileProbe>,
}

impl VisualStudioLike {
    pub fn new(
        exe: impl Into<PathBuf>,
        version: impl Into<String>,
        target: impl Into<String>,
        probe: Arc<dyn CompileProbe>,
    ) -> Self {
        VisualStudioLike {
            exe: exe.into(),
            version: version.into(),
            target: target.into(),
            probe,
        }
    }

    pub fn exe(&self) -> &Path {
        &self.exe
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Toolset derived from this compiler's own version.
    ///
    /// Correct for cl.exe itself; compilers that only emulate cl.exe
    /// must ask the real one instead.
    pub fn toolset_version(&self) -> CompilerResult<Option<ToolsetVersion>> {
        let code = version_code(&self.version).ok_or_else(|| {
            CompilerError::detection(
                self.exe.display(),
                format!("cannot derive a toolset from version `{}`", self.version),
            )
        })?;
        Ok(calculate_toolset_version(code))
    }

    /// Run a probe without any family-specific adjustment.
    pub fn compiles(&self, code: &str, options: &ProbeOptions) -> Result<ProbeResult> {
        self.probe.compiles(code, options)
    }
}

impl fmt::Debug for VisualStudioLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisualStudioLike")
            .field("exe", &self.exe)
            .field("version", &self.version)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
