use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use rover_core::{Clock, MonotonicClock, Tier};
use rover_host::console::CONSOLE_HELP;
use rover_host::ConsoleCommand;

use super::{load_config, Session, VoiceArgs};
use crate::output::format::{format_spoken, format_state};
use crate::output::OutputFormat;

const STRICT_MODE_ANNOUNCEMENT: &str = "Activating strict correctness mode.";

#[derive(Args)]
pub struct DemoArgs {
    #[command(flatten)]
    pub voice: VoiceArgs,
}

pub fn run(args: &DemoArgs, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let mut config = load_config(config)?;
    args.voice.apply(&mut config);
    let Session {
        mut engine,
        mut voice,
        ..
    } = Session::open(config)?;
    let clock = MonotonicClock::new();

    println!("--- rover-voice demo ---");
    println!("{CONSOLE_HELP}");

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("\n> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        input.clear();
        let read = stdin
            .lock()
            .read_line(&mut input)
            .context("Failed to read from stdin")?;
        if read == 0 {
            break;
        }

        match ConsoleCommand::parse(&input) {
            ConsoleCommand::Empty => {}
            ConsoleCommand::Quit => break,
            ConsoleCommand::Help => println!("{CONSOLE_HELP}"),
            ConsoleCommand::State => println!("{}", format_state(&engine.state(), format)),
            ConsoleCommand::IntensityUsage => println!("Usage: intensity [0-2]"),
            ConsoleCommand::Intensity(level) => {
                engine.set_intensity(level);
                println!("Intensity set to {}", engine.intensity().name());
                // only an explicit `intensity 2`, not a clamped larger value
                if level == Tier::HIGH.level() {
                    if let Err(e) = voice.say(STRICT_MODE_ANNOUNCEMENT) {
                        tracing::warn!("Announcement failed: {e}");
                    }
                }
            }
            ConsoleCommand::Event {
                event,
                force_intensity,
            } => {
                if let Some(level) = force_intensity {
                    engine.set_intensity(level);
                }
                let Some(line) = engine.process(event.as_str(), clock.now_ms()) else {
                    println!("(silent: cooling down or unknown event)");
                    continue;
                };
                match voice.speak(&line) {
                    Ok(spoken) => println!("{}", format_spoken(&line, &spoken, format)),
                    Err(e) => {
                        println!("{}", line.text);
                        tracing::warn!("Playback failed: {e}");
                    }
                }
            }
        }
    }

    Ok(())
}
