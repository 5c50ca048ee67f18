mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "ferry")]
#[command(about = "Ferry CLI - search gateway tools")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "ferry.toml", global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the default template and index on the engine
    Init,

    /// Check that the engine is reachable
    Ping,

    /// Add words to the custom analyzer dictionary
    DictAdd {
        /// One word or a comma-separated list
        words: String,
    },

    /// List the custom analyzer dictionary
    DictList,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::run_init(&cli.config).await,
        Commands::Ping => commands::run_ping(&cli.config).await,
        Commands::DictAdd { words } => commands::run_dict_add(&cli.config, &words),
        Commands::DictList => commands::run_dict_list(&cli.config),
    }
}
