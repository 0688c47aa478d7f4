use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::Millis;
use crate::engine::DEFAULT_COOLDOWN_MS;
use crate::error::CoreError;
use crate::model::LineBank;

/// Which playback backend the host constructs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Clips through system audio commands, speech synthesis as fallback.
    #[default]
    System,
    /// Speech synthesis only.
    Speech,
    /// Print to stdout, no audio.
    Print,
}

impl FromStr for PlayerKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Self::System),
            "speech" | "tts" => Ok(Self::Speech),
            "print" => Ok(Self::Print),
            other => Err(CoreError::Config(format!(
                "unknown player `{other}` (expected system, speech or print)"
            ))),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::System => "system",
            Self::Speech => "speech",
            Self::Print => "print",
        })
    }
}

/// Runtime settings for the voice engine and its host loop.
///
/// Stored as JSON; every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoverConfig {
    pub cooldown_ms: Millis,
    pub loop_delay_ms: Millis,
    pub error_backoff_ms: Millis,
    pub clips_dir: PathBuf,
    pub manifest_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_path: Option<PathBuf>,
    pub player: PlayerKind,
    pub initial_intensity: u8,
}

impl Default for RoverConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            loop_delay_ms: 50,
            error_backoff_ms: 1_000,
            clips_dir: PathBuf::from("audio/clips"),
            manifest_path: PathBuf::from("audio/clip_manifest.json"),
            lines_path: None,
            player: PlayerKind::System,
            initial_intensity: 0,
        }
    }
}

impl RoverConfig {
    /// Looked up in the working directory when no path is given.
    pub const DEFAULT_PATH: &'static str = "rover-voice.json";

    /// Read config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))
    }

    /// Load an explicit path (which must exist), or the default path if
    /// present, or fall back to built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CoreError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default = Path::new(Self::DEFAULT_PATH);
        if default.exists() {
            return Self::load(default);
        }
        tracing::debug!("No config file, using defaults");
        Ok(Self::default())
    }

    /// Write config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// The configured line bank, or the built-in one.
    pub fn line_bank(&self) -> Result<LineBank, CoreError> {
        match &self.lines_path {
            Some(path) => LineBank::load(path),
            None => Ok(LineBank::builtin()),
        }
    }

    pub fn loop_delay(&self) -> Duration {
        Duration::from_millis(self.loop_delay_ms)
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_millis(self.error_backoff_ms)
    }
}
