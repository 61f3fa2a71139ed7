//! `harbour-intel toolset` command

use std::io::IsTerminal;

use anyhow::Result;

use super::open;
use crate::cli::CompilerArgs;
use harbour_intel::util::diagnostic::{emit, Diagnostic};
use harbour_intel::CompilerFamily;

pub fn execute(args: &CompilerArgs) -> Result<()> {
    let session = open(args)?;
    let compiler = session.compiler.as_ref();

    if compiler.family() != CompilerFamily::VisualStudioLike {
        println!("{} does not target an MSVC toolset", compiler.id());
        return Ok(());
    }

    match compiler.toolset_version()? {
        Some(toolset) => println!("{} (v{})", toolset, toolset.code()),
        None => {
            println!("unknown");
            emit(
                &Diagnostic::warning("cl.exe is newer than every known MSVC toolset")
                    .with_suggestion("Upgrade harbour-intel; toolsets past 14.3 are not known yet"),
                std::io::stderr().is_terminal(),
            );
        }
    }

    Ok(())
}
