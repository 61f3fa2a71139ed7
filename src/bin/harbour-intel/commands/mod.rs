//! Command implementations

pub mod flags;
pub mod pch;
pub mod show;
pub mod toolset;

use std::sync::Arc;

use anyhow::Result;

use crate::cli::CompilerArgs;
use harbour_intel::compiler::{
    assume_compiler, detect_compiler, find_intel_compiler, DetectOptions,
};
use harbour_intel::core::Language;
use harbour_intel::util::config::{
    global_toolchain_config_path, load_toolchain_config, project_toolchain_config_path,
    ToolchainConfig,
};
use harbour_intel::util::diagnostic::{suggestions, Diagnostic};
use harbour_intel::util::SystemRunner;
use harbour_intel::Compiler;

/// A compiler selected from the command line and toolchain config.
pub struct Session {
    pub compiler: Box<dyn Compiler>,
    pub config: ToolchainConfig,
    pub language: Language,
}

/// Load toolchain config and detect (or assume) the compiler.
///
/// Command-line options win over the config files.
pub fn open(args: &CompilerArgs) -> Result<Session> {
    let cwd = std::env::current_dir()?;
    let config = load_toolchain_config(
        global_toolchain_config_path().as_deref(),
        &project_toolchain_config_path(&cwd),
    );
    if config.has_overrides() {
        tracing::debug!("applying toolchain.toml settings");
    }
    let tc = &config.toolchain;

    let language = args.lang.or(tc.language).unwrap_or_default();
    let options = DetectOptions {
        version: args.compiler_version.clone().or_else(|| tc.version.clone()),
        companion: args.cl.clone().or_else(|| tc.cl.clone()),
        language,
    };
    let exe = args.cc.clone().or_else(|| tc.cc.clone());
    let runner = Arc::new(SystemRunner);

    let compiler = match args.compiler_id {
        Some(id) => {
            let exe = exe.unwrap_or_else(|| id.default_exe(language).into());
            let version = options.version.clone().ok_or_else(|| {
                Diagnostic::error("`--compiler-id` needs a compiler version").with_suggestion(
                    "Pass `--compiler-version`, or set `version` in .harbour/toolchain.toml",
                )
            })?;
            assume_compiler(id, &exe, &version, runner, &options)
        }
        None => {
            let exe = exe
                .or_else(|| find_intel_compiler(language))
                .ok_or_else(|| {
                    Diagnostic::error("no Intel compiler found on PATH")
                        .with_suggestion(suggestions::NO_COMPILER)
                })?;
            detect_compiler(&exe, runner, &options)?
        }
    };

    Ok(Session {
        compiler,
        config,
        language,
    })
}
