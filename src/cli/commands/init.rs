//! `sct init` command - write a starter configuration file

use std::path::Path;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::config::{Config, CONFIG_FILE};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() && !args.force {
        return Err(miette::miette!(
            "{} already exists (use --force to overwrite)",
            CONFIG_FILE
        ));
    }

    std::fs::write(path, Config::starter_yaml()).into_diagnostic()?;

    println!(
        "{} Created {}",
        style("✓").green(),
        style(CONFIG_FILE).cyan()
    );
    println!();
    println!("Fill in your backend URL, then export the service key:");
    println!("  {}", style("export SCT_SERVICE_KEY=...").yellow());
    Ok(())
}
