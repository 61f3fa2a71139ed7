//! `harbour-intel show` command

use anyhow::Result;

use super::open;
use crate::cli::CompilerArgs;

pub fn execute(args: &CompilerArgs) -> Result<()> {
    let session = open(args)?;
    let compiler = session.compiler.as_ref();

    let base_options: Vec<&str> = compiler.base_options().iter().map(|o| o.as_str()).collect();

    println!("Compiler: {}", compiler.id());
    println!();
    println!("  Exe:      {}", compiler.exe().display());
    println!("  Version:  {}", compiler.version());
    println!("  Family:   {}", compiler.family());
    println!("  Language: {}", session.language);
    println!("  Options:  {}", base_options.join(", "));

    Ok(())
}
