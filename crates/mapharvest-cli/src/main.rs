mod batch;
mod commands;
mod interrupt;
mod telemetry;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "mapharvest")]
#[command(about = "Collect business listings from a maps search UI into CSV files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape every keyword into a timestamped run directory
    Batch(BatchArgs),
    /// Scrape one keyword into test_results/ and print a few samples
    Single {
        keyword: String,

        /// Stop after this many listings
        #[arg(long)]
        max_results: Option<usize>,

        /// Overrides MAPHARVEST_OUTPUT_DIR
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Print the keyword list with indices and categories
    Keywords {
        /// YAML keyword file; overrides MAPHARVEST_KEYWORDS_PATH
        #[arg(long)]
        keywords_file: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// YAML keyword file; overrides MAPHARVEST_KEYWORDS_PATH
    #[arg(long)]
    keywords_file: Option<PathBuf>,

    /// Stop each keyword after this many listings
    #[arg(long)]
    max_results: Option<usize>,

    /// Zero-based index of the first keyword to scrape
    #[arg(long, default_value_t = 0, conflicts_with = "resume")]
    start_from: usize,

    /// Continue the run that wrote this progress.json
    #[arg(long, value_name = "PROGRESS_JSON")]
    resume: Option<PathBuf>,

    /// Overrides MAPHARVEST_OUTPUT_DIR
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = mapharvest_core::load_app_config()?;

    match cli.command {
        Commands::Batch(args) => commands::run_batch(&config, args).await,
        Commands::Single {
            keyword,
            max_results,
            output_dir,
        } => {
            telemetry::init_tracing(&config.log_level, None)?;
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            commands::run_single(&config, &keyword, max_results, &output_dir).await
        }
        Commands::Keywords { keywords_file } => {
            telemetry::init_tracing(&config.log_level, None)?;
            commands::list_keywords(&config, keywords_file.as_deref())
        }
    }
}

#[cfg(test)]
mod tests;
