//! contrib-links CLI keeps the issue links in CONTRIBUTING.md current.
//!
//! Generates the pre-filled registration and project-submission issue URLs
//! and splices them between their marker comments.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
