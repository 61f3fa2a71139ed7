//! `harbour-intel flags` command

use anyhow::Result;
use serde::Serialize;

use super::open;
use crate::cli::{CompilerArgs, FlagsArgs, PgoPhase};
use harbour_intel::compiler::{resolve_flags, ResolvedFlags};

/// JSON shape of `flags --json`.
#[derive(Serialize)]
struct FlagsReport<'a> {
    compiler: &'a str,
    version: &'a str,
    buildtype: &'a str,
    optimization: &'a str,
    flags: &'a ResolvedFlags,
    openmp: Vec<String>,
    pgo: Vec<String>,
    all: Vec<String>,
}

pub fn execute(args: &CompilerArgs, flags: FlagsArgs) -> Result<()> {
    let session = open(args)?;
    let compiler = session.compiler.as_ref();
    let tc = &session.config.toolchain;

    let buildtype = flags
        .buildtype
        .unwrap_or_else(|| tc.buildtype.map_or("debug", |b| b.as_str()).to_string());
    let optimization = flags
        .optimization
        .unwrap_or_else(|| tc.optimization.map_or("0", |o| o.as_str()).to_string());

    let resolved = resolve_flags(compiler, &buildtype, &optimization)?;

    let openmp = if flags.openmp {
        compiler.openmp_flags()
    } else {
        Vec::new()
    };
    let pgo = match flags.pgo {
        Some(PgoPhase::Generate) => compiler.profile_generate_args(),
        Some(PgoPhase::Use) => compiler.profile_use_args(),
        None => Vec::new(),
    };

    let mut all = resolved.all();
    all.extend(openmp.iter().cloned());
    all.extend(pgo.iter().cloned());

    if flags.json {
        let report = FlagsReport {
            compiler: compiler.id(),
            version: compiler.version(),
            buildtype: &buildtype,
            optimization: &optimization,
            flags: &resolved,
            openmp,
            pgo,
            all,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        tracing::debug!(
            "{} flags for buildtype={} optimization={}",
            compiler.id(),
            buildtype,
            optimization
        );
        println!("{}", all.join(" "));
    }

    Ok(())
}
