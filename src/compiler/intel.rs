//! Intel compiler adapters.
//!
//! Intel ships two front ends: icc/icpc on Linux and macOS, which accept
//! GNU-style options, and icl on Windows, which accepts cl.exe options.

use std::path::Path;

use anyhow::Result;

use super::diagnostics::DiagnosticPromotionPolicy;
use super::flags::{BuildType, FlagTable, OptimizationLevel, INTEL_CL_FLAGS, INTEL_GNU_FLAGS};
use super::gnu::GnuLike;
use super::msvc::{ToolsetVersion, VisualStudioLike};
use super::pch::{PchPlan, PchPlanner, PchRequest, PCH_SUFFIX};
use super::toolset::VersionBridge;
use super::{BaseOption, Compiler, CompilerFamily, ProbeOptions, ProbeResult};
use crate::error::CompilerResult;

/// First icc release spelling the OpenMP switch `-qopenmp`.
const QOPENMP_MIN_VERSION: &str = ">=15.0.0";

/// icc/icpc: Intel's GNU-compatible front end.
#[derive(Debug, Clone)]
pub struct IntelGnuLikeCompiler {
    base: GnuLike,
}

impl IntelGnuLikeCompiler {
    const FLAGS: FlagTable = INTEL_GNU_FLAGS;
    const PCH: PchPlanner = PchPlanner::new(PCH_SUFFIX);
    const PROMOTION: DiagnosticPromotionPolicy =
        DiagnosticPromotionPolicy::new(CompilerFamily::GnuLike);

    // No sanitizer, colour or LTO support as of 19.0. IPO exists but does
    // not let the output file be named, so it is not offered as LTO.
    const BASE_OPTIONS: &'static [BaseOption] = &[
        BaseOption::Pch,
        BaseOption::Lundef,
        BaseOption::AsNeeded,
        BaseOption::Pgo,
        BaseOption::Coverage,
        BaseOption::Ndebug,
        BaseOption::StaticPic,
        BaseOption::Pie,
    ];

    pub fn new(base: GnuLike) -> Self {
        IntelGnuLikeCompiler { base }
    }
}

impl Compiler for IntelGnuLikeCompiler {
    fn id(&self) -> &'static str {
        "intel"
    }

    fn family(&self) -> CompilerFamily {
        CompilerFamily::GnuLike
    }

    fn exe(&self) -> &Path {
        self.base.exe()
    }

    fn version(&self) -> &str {
        self.base.version()
    }

    fn base_options(&self) -> &'static [BaseOption] {
        Self::BASE_OPTIONS
    }

    fn buildtype_args(&self, buildtype: BuildType) -> Vec<String> {
        Self::FLAGS.buildtype_args(buildtype)
    }

    fn optimization_args(&self, level: OptimizationLevel) -> Vec<String> {
        Self::FLAGS.optimization_args(level)
    }

    fn openmp_flags(&self) -> Vec<String> {
        if self.base.version_satisfies(QOPENMP_MIN_VERSION) {
            vec!["-qopenmp".to_string()]
        } else {
            vec!["-openmp".to_string()]
        }
    }

    fn profile_generate_args(&self) -> Vec<String> {
        vec!["-prof-gen=threadsafe".to_string()]
    }

    fn profile_use_args(&self) -> Vec<String> {
        vec!["-prof-use".to_string()]
    }

    fn precompiled_header(&self, request: &PchRequest) -> Option<PchPlan> {
        Some(Self::PCH.plan(request))
    }

    fn compiles(&self, code: &str, options: &ProbeOptions) -> Result<ProbeResult> {
        self.base.compiles(code, &Self::PROMOTION.augment(options))
    }
}

/// icl: Intel's cl.exe-compatible front end.
#[derive(Debug)]
pub struct IntelClCompiler {
    base: VisualStudioLike,
    bridge: VersionBridge,
}

impl IntelClCompiler {
    const FLAGS: FlagTable = INTEL_CL_FLAGS;
    const PROMOTION: DiagnosticPromotionPolicy =
        DiagnosticPromotionPolicy::new(CompilerFamily::VisualStudioLike);
    const BASE_OPTIONS: &'static [BaseOption] =
        &[BaseOption::Ndebug, BaseOption::Vscrt, BaseOption::Pgo];

    /// `bridge` supplies the toolset of the cl.exe this icl emulates.
    pub fn new(base: VisualStudioLike, bridge: VersionBridge) -> Self {
        IntelClCompiler { base, bridge }
    }

    /// Target architecture reported by the banner.
    pub fn target(&self) -> &str {
        self.base.target()
    }
}

impl Compiler for IntelClCompiler {
    fn id(&self) -> &'static str {
        "intel-cl"
    }

    fn family(&self) -> CompilerFamily {
        CompilerFamily::VisualStudioLike
    }

    fn exe(&self) -> &Path {
        self.base.exe()
    }

    fn version(&self) -> &str {
        self.base.version()
    }

    fn base_options(&self) -> &'static [BaseOption] {
        Self::BASE_OPTIONS
    }

    fn buildtype_args(&self, buildtype: BuildType) -> Vec<String> {
        Self::FLAGS.buildtype_args(buildtype)
    }

    fn optimization_args(&self, level: OptimizationLevel) -> Vec<String> {
        Self::FLAGS.optimization_args(level)
    }

    fn openmp_flags(&self) -> Vec<String> {
        vec!["/Qopenmp".to_string()]
    }

    fn profile_generate_args(&self) -> Vec<String> {
        vec!["/Qprof-gen:threadsafe".to_string()]
    }

    fn profile_use_args(&self) -> Vec<String> {
        vec!["/Qprof-use".to_string()]
    }

    fn toolset_version(&self) -> CompilerResult<Option<ToolsetVersion>> {
        self.bridge.toolset_version()
    }

    fn compiles(&self, code: &str, options: &ProbeOptions) -> Result<ProbeResult> {
        self.base.compiles(code, &Self::PROMOTION.augment(options))
    }
}
