use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;
use std::fs;
use std::path::{Path, PathBuf};
use zerogen_codegen::{generate_module, Format};
use zerogen_core::schema::{orm, Builder};
use zerogen_core::Config;

const DEFAULT_CONFIG_FILE: &str = "zerogen.config.toml";
const DEFAULT_TS_OUTPUT: &str = "zero-schema.gen.ts";
const DEFAULT_JSON_OUTPUT: &str = "zero-schema.gen.json";

#[derive(Parser, Debug)]
pub struct GenerateCommand {
    /// Path to the configuration file. Defaults to searching the current
    /// directory for `zerogen.config.toml`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the generated output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output flavor
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ts)]
    format: OutputFormat,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Ts,
    Json,
}

impl GenerateCommand {
    pub fn run(self) -> Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => find_config_file(Path::new("."))?,
        };
        if !config_path.is_file() {
            bail!("config file not found at {}", config_path.display());
        }

        println!(
            "  {} Generating schema from {}...",
            style("⚙").cyan(),
            style(config_path.display()).bold()
        );

        let config = Config::load(&config_path)?;
        let schema_path = config.schema_path(&config_path);
        let schema = orm::Schema::load(&schema_path)?;

        let resolved = Builder::new().build(&schema, &config)?;

        let format = match self.format {
            OutputFormat::Ts => Format::TypeScript,
            OutputFormat::Json => Format::Json,
        };
        let module = generate_module(&resolved, format)?;

        let output = self.output.unwrap_or_else(|| {
            PathBuf::from(match self.format {
                OutputFormat::Ts => DEFAULT_TS_OUTPUT,
                OutputFormat::Json => DEFAULT_JSON_OUTPUT,
            })
        });
        fs::write(&output, module)
            .with_context(|| format!("failed to write output to {}", output.display()))?;

        println!(
            "  {} Schema written to {}",
            style("✔").green().bold(),
            style(output.display()).bold()
        );

        Ok(())
    }
}

/// Search a directory for a file named like the default config file, the way
/// the generator is usually invoked from a project root.
fn find_config_file(dir: &Path) -> Result<PathBuf> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
        .collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let name = entry.file_name();
        if name.to_string_lossy().ends_with(DEFAULT_CONFIG_FILE) {
            return Ok(entry.path());
        }
    }

    bail!("no {DEFAULT_CONFIG_FILE} configuration file found");
}
