use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use huddle_core::{ControllerConfig, LoopbackRuntimeFactory, SessionController, SessionRequest};
use tracing::info;

#[derive(Parser)]
#[command(name = "huddle", about = "Session lifecycle demo over the loopback runtime")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a solo session
    Solo,
    /// Host a named session
    Host { name: String },
    /// Join a named session
    Join { name: String },
    /// Join the named session, hosting it if nobody has
    Auto { name: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let request = match cli.command {
        Commands::Solo => SessionRequest::solo(),
        Commands::Host { name } => SessionRequest::host(name),
        Commands::Join { name } => SessionRequest::join(name),
        Commands::Auto { name } => SessionRequest::host_or_join(name),
    };

    let controller = SessionController::new(
        ControllerConfig::default(),
        Arc::new(LoopbackRuntimeFactory::new()),
    );

    let started = controller.request_start(request).await?;
    info!(mode = ?started.mode, name = %started.name, "session up; ctrl-c to quit");

    tokio::signal::ctrl_c().await?;
    controller.shutdown().await;
    info!("session closed");

    Ok(())
}
