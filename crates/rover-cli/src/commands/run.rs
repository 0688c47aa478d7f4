use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rover_core::MonotonicClock;
use rover_host::{BackgroundReader, ControlLoop, FixedSwitch, SwitchPosition, SwitchWatcher};

use super::{load_config, Session, VoiceArgs};
use crate::output::format::format_spoken;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct RunArgs {
    /// Serial device or file to read events from (stdin when omitted)
    #[arg(env = "ROVER_VOICE_DEVICE")]
    pub input: Option<PathBuf>,

    /// Intensity to hold in place of a hardware switch (0-2)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub intensity: Option<u8>,

    #[command(flatten)]
    pub voice: VoiceArgs,
}

pub fn run(args: &RunArgs, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let mut config = load_config(config)?;
    args.voice.apply(&mut config);

    let level = args.intensity.unwrap_or(config.initial_intensity);
    let switch = SwitchWatcher::new(FixedSwitch(SwitchPosition::from_level(level)))
        .context("Failed to read intensity switch")?;

    let source: Box<dyn Read + Send> = match &args.input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        None => Box::new(io::stdin()),
    };

    let Session {
        config,
        engine,
        voice,
    } = Session::open(config)?;

    let mut control = ControlLoop::new(
        engine,
        voice,
        switch,
        BackgroundReader::spawn(source),
        MonotonicClock::new(),
    )
    .with_timing(config.loop_delay(), config.error_backoff());

    control.run_with(|line, spoken| println!("{}", format_spoken(line, spoken, format)));
    Ok(())
}
