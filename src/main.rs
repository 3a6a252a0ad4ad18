use clap::{Parser, Subcommand};
use anyhow::Result;
use dotenvy::dotenv;

mod config;
mod ingestion;
mod inspect;
mod normalize;
mod output;
mod record;
mod scrape;
mod telemetry;
mod util;

#[derive(Parser)]
#[command(name = "archive", about = "News archive extraction CLI")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk listing pages and extract articles with their supplements
    Scrape(scrape::ScrapeCmd),
    /// Extract a record from saved HTML files
    Inspect(inspect::InspectCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and ARCHIVE_LOG_FORMAT
    telemetry::config::init_tracing(telemetry::config::LogFormat::from_env());

    match cli.command {
        Commands::Scrape(args) => scrape::run(args).await?,
        Commands::Inspect(args) => inspect::run(args).await?,
    }

    Ok(())
}
