use clap::{Parser, Subcommand};
use anyhow::Result;
use dotenvy::dotenv;

mod config;
mod transport;
mod output;
mod telemetry;
mod sink;
mod wishlist;
mod product;
mod aggregate;

#[derive(Parser)]
#[command(name = "wishlist", about = "Wishlist service console")]
struct Cli {
    /// Service base URL; falls back to WISHLIST_BASE_URL
    #[arg(global = true, short, long)]
    base_url: Option<String>,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every product across every wishlist
    LoadAll(aggregate::LoadAllCmd),
    Wishlist(wishlist::WishlistCmd),
    Product(product::ProductCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and WISHLIST_LOG_FORMAT
    telemetry::config::init_tracing();
    let cfg = config::ClientConfig::from_env()?.with_base_url(cli.base_url.as_deref())?;

    match cli.command {
        Commands::LoadAll(args) => aggregate::run(&cfg, args).await?,
        Commands::Wishlist(args) => wishlist::run(&cfg, args).await?,
        Commands::Product(args) => product::run(&cfg, args).await?,
    }

    Ok(())
}
