use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rover_core::{EventKind, LineBank};

use super::load_config;
use crate::output::format::format_lines;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct LinesArgs {
    /// Only show this event
    pub event: Option<String>,

    /// Line bank JSON (defaults to the configured or built-in lines)
    #[arg(long)]
    pub lines: Option<PathBuf>,
}

pub fn run(args: &LinesArgs, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(path) = &args.lines {
        config.lines_path = Some(path.clone());
    }
    let bank: LineBank = config.line_bank().context("Failed to load line bank")?;

    let filter = args.event.as_deref().map(EventKind::new);
    if let Some(event) = &filter {
        if !bank.contains(event.as_str()) {
            anyhow::bail!("Unknown event: {event}");
        }
    }

    let events = bank
        .iter()
        .filter(|(event, _)| filter.as_ref().map_or(true, |f| f == *event));
    print!("{}", format_lines(events, format));
    if matches!(format, OutputFormat::Json) {
        println!();
    }
    Ok(())
}
