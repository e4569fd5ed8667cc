mod commands;

use clap::{Parser, Subcommand};
use supscout_scraper::{HttpFetcher, Scout};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "supscout")]
#[command(about = "Find and rank suppliers across B2B directories and search engines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full pipeline and print the top suppliers as HTML cards
    Search {
        /// Product or material to look for; multiple words are joined
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Print the merged candidate list without visiting supplier pages
    Collect {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Emit JSON instead of a numbered list
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = supscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let scout = Scout::new(HttpFetcher::new(&config.fetch)?);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Search { query } => {
            commands::run_search(&scout, &query.join(" "), &mut stdout).await?;
        }
        Commands::Collect { query, json } => {
            commands::run_collect(&scout, &query.join(" "), json, &mut stdout).await?;
        }
    }

    Ok(())
}
