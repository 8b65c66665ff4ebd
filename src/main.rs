//! awsorg - discover, cache and display the structure of an AWS Organization

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod tree;

use cli::{CacheCommands, Cli, CommandContext, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if debug {
        builder.filter_module("awsorg", log::LevelFilter::Debug);
    }
    builder.init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Refresh => cli::org::refresh(&CommandContext::new(&opts)?).await,
        Commands::Roots => cli::org::roots(&CommandContext::new(&opts)?).await,
        Commands::Summary => cli::org::summary(&CommandContext::new(&opts)?).await,
        Commands::Tree { unit } => {
            cli::org::tree(&CommandContext::new(&opts)?, unit.as_deref()).await
        }
        Commands::Dump { json } => cli::org::dump(&CommandContext::new(&opts)?, json).await,
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::List => cli::cache::list(&opts),
            CacheCommands::Path => cli::cache::path(&opts),
        },
        Commands::Completion { shell } => cli::completions::generate_completions(shell),
    }
}
