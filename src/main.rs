use abxtract::Abxtract;
use abxtract::config::{AbxtractConfig, ConfigLoader};
use anyhow::Context;
use clap::{ArgAction, Parser};
use env_logger::Env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "abxtract",
    version,
    about = "Consolidate antibiotic administration exports into treatment courses and days-of-therapy summaries"
)]
struct Cli {
    /// Path to the pipeline configuration file (.yaml, .json, .toml or .ron).
    config: PathBuf,

    /// Override the configured output location.
    #[arg(long = "output", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let mut config: AbxtractConfig = ConfigLoader::load(cli.config.clone())
        .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

    if let Some(output) = cli.output {
        config.pipeline_config.loader = config.pipeline_config.loader.with_output(output);
    }

    let abxtract = Abxtract::try_from(config)?;
    abxtract.run()?;

    Ok(())
}
