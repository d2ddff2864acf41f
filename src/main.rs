//! Monako - compose documentation from multiple Git repositories into a
//! single Hugo site

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
