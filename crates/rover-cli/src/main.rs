use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod output;

#[derive(Parser)]
#[command(
    name = "rover-voice",
    version,
    about = "Give a robot rover a pedantic, escalating voice"
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: output::OutputFormat,

    /// Config file (defaults to ./rover-voice.json when present)
    #[arg(long, global = true, env = "ROVER_VOICE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Commands,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    match &cli.command {
        commands::Commands::Demo(args) => commands::demo::run(args, config, cli.format),
        commands::Commands::Run(args) => commands::run::run(args, config, cli.format),
        commands::Commands::Lines(args) => commands::lines::run(args, config, cli.format),
        commands::Commands::Clips(args) => commands::clips::run(args, config, cli.format),
        commands::Commands::Resolve(args) => commands::resolve::run(args, config, cli.format),
        commands::Commands::Manifest(args) => commands::manifest::run(args, config),
        commands::Commands::Version => commands::version::run(cli.format),
    }
}
