mod fetch;
mod report;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vidstats_core::AppConfig;
use vidstats_report::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "vidstats")]
#[command(about = "Fetch TikTok video metrics and report on them")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch metrics for every URL in the list and write the report file
    Fetch {
        /// URL list to read (overrides `VIDSTATS_INPUT_PATH`)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Report file to write (overrides `VIDSTATS_REPORT_PATH`)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Attempts per URL, including the first (overrides `VIDSTATS_MAX_ATTEMPTS`)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_attempts: Option<u32>,
    },
    /// Summarise an existing report file
    Report {
        /// Report file to read (overrides `VIDSTATS_REPORT_PATH`)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output format: text or markdown
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Length of the views/likes rankings (overrides `VIDSTATS_TOP_N`)
        #[arg(long, value_parser = parse_top_n)]
        top: Option<usize>,
    },
    /// Fetch in the background with live progress, then print the report
    Run {
        /// URL list to read (overrides `VIDSTATS_INPUT_PATH`)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Report file to write (overrides `VIDSTATS_REPORT_PATH`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn parse_top_n(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_owned()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Default)]
struct Overrides {
    input_path: Option<PathBuf>,
    report_path: Option<PathBuf>,
    max_attempts: Option<u32>,
    top_n: Option<usize>,
}

impl Overrides {
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(path) = self.input_path {
            config.input_path = path;
        }
        if let Some(path) = self.report_path {
            config.report_path = path;
        }
        if let Some(n) = self.max_attempts {
            config.max_attempts = n;
        }
        if let Some(n) = self.top_n {
            config.top_n = n;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = vidstats_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Fetch {
            input,
            output,
            max_attempts,
        }) => {
            let config = Overrides {
                input_path: input,
                report_path: output,
                max_attempts,
                ..Overrides::default()
            }
            .apply(config);
            fetch::run_fetch_command(&config).await?;
        }
        Some(Commands::Report { input, format, top }) => {
            let config = Overrides {
                report_path: input,
                top_n: top,
                ..Overrides::default()
            }
            .apply(config);
            report::run_report_command(&config.report_path, format, config.top_n);
        }
        Some(Commands::Run { input, output }) => {
            let config = Overrides {
                input_path: input,
                report_path: output,
                ..Overrides::default()
            }
            .apply(config);
            run::run_pipeline(&config).await?;
        }
        None => {
            println!("vidstats: use `fetch`, `report` or `run` (see --help)");
        }
    }

    Ok(())
}
