//! CLI entry point for headless tile-blast sessions

use blastgrid::io::cli::{Cli, SessionRunner};
use clap::Parser;

fn main() -> blastgrid::Result<()> {
    let cli = Cli::parse();
    let mut runner = SessionRunner::new(cli);
    runner.run()?;
    Ok(())
}
