//! graphio CLI - read, inspect and convert graph files

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;

use commands::{completions, convert, parse, stats};
use config::{config_file_path, Config};

#[derive(Parser)]
#[command(name = "graphio")]
#[command(author, version, about = "Streaming graph format reader and writer")]
pub struct Cli {
    /// Config file (default: user config dir)
    #[arg(long, global = true, env = "GRAPHIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the events of an edge-list file as JSON lines
    Parse(parse::ParseArgs),
    /// Convert an edge-list file to another format
    Convert(convert::ConvertArgs),
    /// Show node and edge counts of an edge-list file
    Stats(stats::StatsArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity; logs go to stderr, events to stdout
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting graphio CLI");

    let config_path = cli.config_path();
    match &cli.command {
        Commands::Parse(args) => parse::run(args, &Config::load(&config_path)?),
        Commands::Convert(args) => convert::run(args, &cli, &Config::load(&config_path)?),
        Commands::Stats(args) => stats::run(args, &Config::load(&config_path)?),
        Commands::Completions(args) => completions::run(args),
        Commands::Config(args) => commands::config::run(args, &config_path),
    }
}
