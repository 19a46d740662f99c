use anyhow::Result;
use clap::Parser;
use fintrack::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    cli.run()
}
