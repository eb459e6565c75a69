//! sparkdb CLI - convert YAML configuration files into a SQLite parameter table

use clap::Parser;
use std::path::PathBuf;
use sparkdb::config::{load_config, SparkConfig};
use sparkdb::{build_database, ui, BuildOptions};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "sparkdb")]
#[command(version)]
#[command(about = "Convert yaml files to SQLite database")]
#[command(long_about = r#"
sparkdb flattens YAML files into a single `parameters(key, value)` table.
Each file is namespaced by its name without extension, so `config.yaml`
containing `a: {b: 1}` becomes the row ("config.a.b", "1").

Example usage:
  sparkdb conf/ extra/app.yaml -o build/params.db
"#)]
struct Cli {
    /// YAML file or directory
    #[arg(required = true)]
    sources: Vec<PathBuf>,

    /// Output database file path
    #[arg(short, long)]
    output: PathBuf,

    /// Config file (defaults to ./sparkdb.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Separator between key path segments
    #[arg(short, long)]
    separator: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn build_options(&self, config: &SparkConfig) -> anyhow::Result<BuildOptions> {
        let separator = self
            .separator
            .clone()
            .unwrap_or_else(|| config.separator().to_string());
        if separator.is_empty() {
            anyhow::bail!("separator cannot be empty");
        }
        Ok(BuildOptions { separator })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?.unwrap_or_default();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(config.log.as_deref().unwrap_or("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let options = cli.build_options(&config)?;
    tracing::info!("Building {:?} from {} sources", cli.output, cli.sources.len());

    let report = build_database(&cli.sources, &cli.output, &options)?;
    ui::summary(&report);

    Ok(())
}
