use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use catalogo::catalog::CatalogGroup;
use catalogo::cli::{self, OutputOptions};
use catalogo::config::CatalogConfig;
use catalogo::logging::init_tracing;
use catalogo::util::env::init_env;

#[derive(Parser, Debug)]
#[command(name = "catalogo", version, about = "Browse the male/female product catalog")]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. "debug")
    #[arg(long, global = true)]
    log: Option<String>,
    /// Print the resulting catalog state as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Load both groups concurrently and list one of them
    Browse {
        /// Group to list (male|female)
        #[arg(long, default_value = "male")]
        group: CatalogGroup,
    },
    /// Load and list a single group
    Group {
        /// male|female
        group: CatalogGroup,
    },
    /// Load one product by id and show its detail
    Product {
        id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_env();
    let args = Cli::parse();
    init_tracing(args.log.as_deref())?;

    let cfg = CatalogConfig::from_env()?;
    info!(base_url = %cfg.base_url, policy = ?cfg.stale_policy, "catalog configured");
    let store = cfg.build_store()?;
    let opts = OutputOptions { json: args.json };
    let mut out = std::io::stdout().lock();

    match args.command {
        Commands::Browse { group } => cli::run_browse(&store, group, opts, &mut out).await,
        Commands::Group { group } => cli::run_group(&store, group, opts, &mut out).await,
        Commands::Product { id } => cli::run_product(&store, id, opts, &mut out).await,
    }
}
