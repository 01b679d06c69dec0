mod generate;
pub use generate::GenerateCommand;

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "zerogen")]
#[command(about = "Generate client sync-engine schemas from ORM schema definitions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Generate the schema module from a configuration file
    Generate(GenerateCommand),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Generate(cmd) => cmd.run(),
        }
    }
}

/// Parse and execute CLI commands from command-line arguments
pub fn parse_and_run() -> Result<()> {
    Cli::parse().run()
}
