mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "handpan", about = "Gesture-controlled image viewer tools")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (TOML). Defaults to ./handpan.toml when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the images a folder would show, in viewing order
    List(commands::list::ListArgs),
    /// List the cameras the OS reports
    Cameras,
    /// Print or save the default config
    Config(commands::config::ConfigArgs),
    /// Run a recorded hand session through the gesture classifier
    Replay(commands::replay::ReplayArgs),
    /// Classify gestures from the live camera without a window
    Track(commands::track::TrackArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::List(args) => commands::list::run(args, config_path),
        Commands::Cameras => commands::cameras::run(),
        Commands::Config(args) => commands::config::run(args, config_path),
        Commands::Replay(args) => commands::replay::run(args, config_path),
        Commands::Track(args) => commands::track::run(args, config_path),
    }
}
