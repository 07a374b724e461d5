use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "streamfork")]
#[command(about = "Routes stream records into delivery channels", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read records, route them, and deliver batches to their channels
    Run {
        /// Input file of newline-delimited records (defaults to stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "streamfork=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Default behavior is to run
    match cli.command.unwrap_or(Commands::Run { input: None }) {
        Commands::Run { input } => {
            streamfork::cli::run::run(input).await?;
        }
    }

    Ok(())
}
