use std::io::BufRead;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use ua_normalizer::Normalizer;
use ua_normalizer::config::{LOG_FILE_NAME, NormalizerConfig, data_dir, log_path};

/// Environment variable holding the tracing filter directives
const LOG_ENV: &str = "UA_NORMALIZER_LOG";

#[derive(Parser)]
#[command(name = "ua-normalizer")]
#[command(version, about = "Classify User-Agent strings into canonical browser families")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write JSON logs to the data directory instead of stderr
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print `family/major.minor.patch` for each User-Agent (stdin lines when none given)
    Normalize { user_agents: Vec<String> },
    /// Print the classification of a User-Agent as JSON
    Classify {
        user_agent: String,
        /// Also check the version against this range
        #[arg(long)]
        satisfies: Option<String>,
    },
    /// Print the baseline table as JSON
    Baselines,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyOutput {
    family: String,
    version: String,
    baseline: Option<String>,
    meets_baseline: bool,
    unknown: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    satisfies: Option<bool>,
}

fn init_logging(log_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    if !log_file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    }

    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, LOG_FILE_NAME));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .json()
        .init();
    info!("Logging to {:?}", log_path());

    Ok(Some(guard))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_file)?;

    let normalizer = match &cli.config {
        Some(path) => Normalizer::from_config(&NormalizerConfig::from_path(path)?)?,
        None => Normalizer::new(),
    };

    match cli.command {
        Command::Normalize { user_agents } if user_agents.is_empty() => {
            for line in std::io::stdin().lock().lines() {
                println!("{}", normalizer.normalize(&line?));
            }
        }
        Command::Normalize { user_agents } => {
            for user_agent in &user_agents {
                println!("{}", normalizer.normalize(user_agent));
            }
        }
        Command::Classify {
            user_agent,
            satisfies,
        } => {
            let ua = normalizer.classify(&user_agent);
            let output = ClassifyOutput {
                family: ua.family().to_string(),
                version: ua.version(),
                baseline: ua.baseline().map(str::to_string),
                meets_baseline: ua.meets_baseline(),
                unknown: ua.is_unknown(),
                satisfies: satisfies.map(|range| ua.satisfies(&range)),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Baselines => {
            println!("{}", serde_json::to_string_pretty(&normalizer.baselines())?);
        }
    }

    Ok(())
}
