use clap::{Parser, Subcommand};

mod provinces;
mod search;

#[derive(Debug, Parser)]
#[command(name = "placelist")]
#[command(about = "Collect business listings from map-provider place-search APIs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// One keyword search against the Amap place API, saved as a flat JSON array.
    Search(search::SearchArgs),
    /// Nationwide region sweep against the Tencent place API with key rotation.
    /// Configured entirely via PLACELIST_* environment variables.
    Provinces,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::Provinces => provinces::run().await,
    }
}
