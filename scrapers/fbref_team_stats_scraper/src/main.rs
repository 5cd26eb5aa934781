use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::info;

use fbref_team_stats_scraper::{
    config::ScraperConfig,
    fetcher::HttpPageSource,
    runner::{run_current, run_historical},
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory the CSV files are written to
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Every catalog league over the configured season window
    Historical,
    /// Snapshot of one league's current season
    Current {
        /// League code from the catalog
        #[arg(short, long, default_value = "epl")]
        league: String,
    },
    /// Historical dataset followed by the EPL snapshot
    All,
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ScraperConfig::from_env();
    if let Some(data_dir) = cli.data_dir {
        config.output.data_dir = data_dir;
    }

    let today = Local::now().date_naive();
    let mut source = HttpPageSource::new(&config)?;
    match cli.command {
        Commands::Historical => {
            let path = run_historical(&config, &mut source)?;
            info!("Historical dataset written to {:?}", path);
        }
        Commands::Current { league } => {
            let path = run_current(&config, &mut source, &league, today)?;
            info!("Snapshot written to {:?}", path);
        }
        Commands::All => {
            let path = run_historical(&config, &mut source)?;
            info!("Historical dataset written to {:?}", path);
            let path = run_current(&config, &mut source, "epl", today)?;
            info!("Snapshot written to {:?}", path);
        }
    }
    info!("Fetch metrics: {:?}", source.metrics());

    Ok(())
}
