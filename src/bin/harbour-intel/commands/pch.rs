//! `harbour-intel pch` command

use anyhow::{bail, Result};

use super::open;
use crate::cli::{CompilerArgs, PchArgs};
use harbour_intel::compiler::PchRequest;

pub fn execute(args: &CompilerArgs, pch: PchArgs) -> Result<()> {
    let session = open(args)?;
    let compiler = session.compiler.as_ref();

    let request = PchRequest::new(pch.header, pch.dir, session.language);
    let Some(plan) = compiler.precompiled_header(&request) else {
        bail!("`{}` does not support precompiled headers", compiler.id());
    };

    if pch.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        println!("Artifact: {}", plan.artifact);
        println!("Flags:    {}", plan.use_args.join(" "));
    }

    Ok(())
}
