//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use harbour_intel::compiler::CompilerId;
use harbour_intel::core::Language;

/// Harbour Intel - flags and capabilities of the Intel C/C++ compilers
#[derive(Parser)]
#[command(name = "harbour-intel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub compiler: CompilerArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which compiler to describe.
#[derive(Args, Debug, Clone)]
pub struct CompilerArgs {
    /// Path to the compiler (icc, icpc or icl)
    #[arg(long, global = true, env = "HARBOUR_INTEL_CC")]
    pub cc: Option<PathBuf>,

    /// Skip detection and assume this compiler (intel, intel-cl)
    #[arg(long, global = true)]
    pub compiler_id: Option<CompilerId>,

    /// Compiler version; skips asking the compiler
    #[arg(long, global = true)]
    pub compiler_version: Option<String>,

    /// cl.exe used to determine the MSVC toolset
    #[arg(long, global = true)]
    pub cl: Option<PathBuf>,

    /// Source language (c, c++)
    #[arg(long, global = true)]
    pub lang: Option<Language>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the detected compiler
    Show,

    /// Print the flags for a build configuration
    Flags(FlagsArgs),

    /// Print the precompiled header artifact and use flags
    Pch(PchArgs),

    /// Print the MSVC toolset the compiler targets
    Toolset,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Build type (plain, debug, debugoptimized, release, minsize, custom)
    #[arg(long)]
    pub buildtype: Option<String>,

    /// Optimization level (0, g, 1, 2, 3, s)
    #[arg(long)]
    pub optimization: Option<String>,

    /// Enable OpenMP
    #[arg(long)]
    pub openmp: bool,

    /// Profile-guided optimization phase
    #[arg(long, value_enum)]
    pub pgo: Option<PgoPhase>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PgoPhase {
    /// Instrument the build to collect profiles
    Generate,
    /// Optimize using collected profiles
    Use,
}

#[derive(Args)]
pub struct PchArgs {
    /// Header to precompile
    pub header: PathBuf,

    /// Directory holding precompiled headers
    #[arg(long)]
    pub dir: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
