use anyhow::Result;
use clap::Parser;

use runner::config::{CliArgs, Config};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(CliArgs::parse())?;
    let output = runner::run::run(&config)?;
    println!("{}", output);

    Ok(())
}
