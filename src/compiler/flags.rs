//! Build type and optimization level flag tables.
//!
//! Each command-line dialect gets one [`FlagTable`]. The tables are plain
//! static data indexed by the closed key enums, so a table missing a key
//! fails to compile rather than resolving to an empty list at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CompilerError, CompilerResult};

use super::Compiler;

/// Symbolic build configuration profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Plain,
    Debug,
    DebugOptimized,
    Release,
    MinSize,
    Custom,
}

impl BuildType {
    /// Every build type, in table order.
    pub const ALL: [BuildType; 6] = [
        BuildType::Plain,
        BuildType::Debug,
        BuildType::DebugOptimized,
        BuildType::Release,
        BuildType::MinSize,
        BuildType::Custom,
    ];

    /// Get the build type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Plain => "plain",
            BuildType::Debug => "debug",
            BuildType::DebugOptimized => "debugoptimized",
            BuildType::Release => "release",
            BuildType::MinSize => "minsize",
            BuildType::Custom => "custom",
        }
    }

    fn index(self) -> usize {
        match self {
            BuildType::Plain => 0,
            BuildType::Debug => 1,
            BuildType::DebugOptimized => 2,
            BuildType::Release => 3,
            BuildType::MinSize => 4,
            BuildType::Custom => 5,
        }
    }
}

impl FromStr for BuildType {
    type Err = CompilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildType::ALL
            .into_iter()
            .find(|bt| bt.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = BuildType::ALL.iter().map(|bt| bt.as_str()).collect();
                CompilerError::configuration("build type", s, &names)
            })
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimization level, independent of the build type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptimizationLevel {
    #[serde(rename = "0")]
    O0,
    #[serde(rename = "g")]
    Og,
    #[serde(rename = "1")]
    O1,
    #[serde(rename = "2")]
    O2,
    #[serde(rename = "3")]
    O3,
    #[serde(rename = "s")]
    Os,
}

impl OptimizationLevel {
    /// Every optimization level, in table order.
    pub const ALL: [OptimizationLevel; 6] = [
        OptimizationLevel::O0,
        OptimizationLevel::Og,
        OptimizationLevel::O1,
        OptimizationLevel::O2,
        OptimizationLevel::O3,
        OptimizationLevel::Os,
    ];

    /// Get the level as it is spelled in configuration (`0`, `g`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationLevel::O0 => "0",
            OptimizationLevel::Og => "g",
            OptimizationLevel::O1 => "1",
            OptimizationLevel::O2 => "2",
            OptimizationLevel::O3 => "3",
            OptimizationLevel::Os => "s",
        }
    }

    fn index(self) -> usize {
        match self {
            OptimizationLevel::O0 => 0,
            OptimizationLevel::Og => 1,
            OptimizationLevel::O1 => 2,
            OptimizationLevel::O2 => 3,
            OptimizationLevel::O3 => 4,
            OptimizationLevel::Os => 5,
        }
    }
}

impl FromStr for OptimizationLevel {
    type Err = CompilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptimizationLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = OptimizationLevel::ALL.iter().map(|l| l.as_str()).collect();
                CompilerError::configuration("optimization level", s, &names)
            })
    }
}

impl fmt::Display for OptimizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Flags = &'static [&'static str];

/// Build type and optimization flags for one command-line dialect.
#[derive(Debug, Clone, Copy)]
pub struct FlagTable {
    /// Indexed in [`BuildType::ALL`] order
    buildtype: [Flags; 6],
    /// Indexed in [`OptimizationLevel::ALL`] order
    optimization: [Flags; 6],
}

impl FlagTable {
    /// Flags for a build type.
    pub fn buildtype_args(&self, buildtype: BuildType) -> Vec<String> {
        to_owned(self.buildtype[buildtype.index()])
    }

    /// Flags for an optimization level.
    pub fn optimization_args(&self, level: OptimizationLevel) -> Vec<String> {
        to_owned(self.optimization[level.index()])
    }
}

fn to_owned(flags: Flags) -> Vec<String> {
    flags.iter().map(|f| f.to_string()).collect()
}

// Intel defaults to -O2, unlike GNU's -O0, so `0` and `g` both spell out -O0.

/// Flags for icc/icpc (POSIX-style dialect).
pub const INTEL_GNU_FLAGS: FlagTable = FlagTable {
    buildtype: [
        &[],                   // plain
        &["-g", "-traceback"], // debug
        &["-g", "-traceback"], // debugoptimized
        &[],                   // release
        &[],                   // minsize
        &[],                   // custom
    ],
    optimization: [&["-O0"], &["-O0"], &["-O1"], &["-O2"], &["-O3"], &["-Os"]],
};

/// Flags for icl (Windows slash-style dialect).
pub const INTEL_CL_FLAGS: FlagTable = FlagTable {
    buildtype: [
        &[],                     // plain
        &["/Zi", "/traceback"], // debug
        &["/Zi", "/traceback"], // debugoptimized
        &[],                     // release
        &[],                     // minsize
        &[],                     // custom
    ],
    optimization: [&["/O0"], &["/O0"], &["/O1"], &["/O2"], &["/O3"], &["/Os"]],
};

/// Build type and optimization flags resolved for one compiler.
///
/// The two lists are kept apart; callers concatenate them in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFlags {
    pub buildtype: Vec<String>,
    pub optimization: Vec<String>,
}

impl ResolvedFlags {
    /// Build type flags followed by optimization flags.
    pub fn all(&self) -> Vec<String> {
        self.buildtype
            .iter()
            .chain(&self.optimization)
            .cloned()
            .collect()
    }
}

/// Resolve string configuration keys into flags for `compiler`.
///
/// Fails with [`CompilerError::Configuration`] when either key is not part
/// of the vocabulary; there is no fallback to an empty list.
pub fn resolve_flags(
    compiler: &dyn Compiler,
    buildtype: &str,
    optimization: &str,
) -> CompilerResult<ResolvedFlags> {
    let buildtype: BuildType = buildtype.parse()?;
    let optimization: OptimizationLevel = optimization.parse()?;

    Ok(ResolvedFlags {
        buildtype: compiler.buildtype_args(buildtype),
        optimization: compiler.optimization_args(optimization),
    })
}
