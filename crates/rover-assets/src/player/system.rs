use std::ffi::OsStr;
use std::io;
use std::process::{Command, Stdio};

use super::{Player, Utterance};
use crate::error::AudioError;

/// An external program plus leading arguments; the clip path or text is
/// appended as the final argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

fn default_clip_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("afplay", &[]),
        CommandSpec::new("mpg123", &["-q"]),
    ]
}

fn default_speech_commands() -> Vec<CommandSpec> {
    vec![CommandSpec::new("say", &[]), CommandSpec::new("espeak", &[])]
}

/// Run the first candidate that exists on this system.
///
/// A missing program moves on to the next candidate, and so does a non-zero
/// exit. The last failure is returned if none succeeds.
fn run_first(
    commands: &[CommandSpec],
    target: &OsStr,
    what: &'static str,
) -> Result<(), AudioError> {
    let mut last_err = AudioError::NoBackend(what);
    for cmd in commands {
        let status = Command::new(&cmd.program)
            .args(&cmd.args)
            .arg(target)
            .stdin(Stdio::null())
            .status();
        match status {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => {
                tracing::debug!("{} exited with {status}", cmd.program);
                last_err = AudioError::CommandFailed {
                    program: cmd.program.clone(),
                    code: status.code(),
                };
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::trace!("{} not installed", cmd.program);
            }
            Err(e) => return Err(AudioError::Io(e)),
        }
    }
    Err(last_err)
}

/// Plays clips with system audio commands and speaks text with system TTS.
///
/// When no clip command is installed or every one fails, the clip's line is
/// spoken instead.
#[derive(Debug, Clone)]
pub struct SystemPlayer {
    clip_commands: Vec<CommandSpec>,
    speech_commands: Vec<CommandSpec>,
}

impl Default for SystemPlayer {
    fn default() -> Self {
        Self::new(default_clip_commands(), default_speech_commands())
    }
}

impl SystemPlayer {
    pub fn new(clip_commands: Vec<CommandSpec>, speech_commands: Vec<CommandSpec>) -> Self {
        Self {
            clip_commands,
            speech_commands,
        }
    }
}

impl Player for SystemPlayer {
    fn name(&self) -> &'static str {
        "system"
    }

    fn play(&self, utterance: &Utterance<'_>) -> Result<(), AudioError> {
        match utterance {
            Utterance::Clip { clip, text } => {
                tracing::info!("Playing {}", clip.path.display());
                match run_first(&self.clip_commands, clip.path.as_os_str(), "clip") {
                    Err(e @ (AudioError::NoBackend(_) | AudioError::CommandFailed { .. })) => {
                        tracing::warn!("Could not play {}: {e}, speaking instead", clip.clip_id);
                        run_first(&self.speech_commands, OsStr::new(text), "speech")
                    }
                    other => other,
                }
            }
            Utterance::Speech { text } => {
                tracing::info!("Speaking: {text}");
                run_first(&self.speech_commands, OsStr::new(text), "speech")
            }
        }
    }
}

/// Speaks every utterance's text; recorded clips are never played.
#[derive(Debug, Clone)]
pub struct SpeechPlayer {
    commands: Vec<CommandSpec>,
}

impl Default for SpeechPlayer {
    fn default() -> Self {
        Self::new(default_speech_commands())
    }
}

impl SpeechPlayer {
    pub fn new(commands: Vec<CommandSpec>) -> Self {
        Self { commands }
    }
}

impl Player for SpeechPlayer {
    fn name(&self) -> &'static str {
        "speech"
    }

    fn play(&self, utterance: &Utterance<'_>) -> Result<(), AudioError> {
        let text = utterance.text();
        tracing::info!("Speaking: {text}");
        run_first(&self.commands, OsStr::new(text), "speech")
    }
}
