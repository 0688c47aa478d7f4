pub mod clips;
pub mod demo;
pub mod lines;
pub mod manifest;
pub mod resolve;
pub mod run;
pub mod version;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use rover_assets::{build_player, AssetIndex, AssetResolver, Voice};
use rover_core::{PlayerKind, ResponseEngine, RoverConfig};

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive console: type events and hear the replies
    Demo(demo::DemoArgs),
    /// Drive the voice from newline-separated events (serial device, file or stdin)
    Run(run::RunArgs),
    /// Show the line bank
    Lines(lines::LinesArgs),
    /// List the indexed audio clips
    Clips(clips::ClipsArgs),
    /// Resolve an event and tier to a clip
    Resolve(resolve::ResolveArgs),
    /// Generate a clip manifest from a directory of clips
    Manifest(manifest::ManifestArgs),
    /// Print version information
    Version,
}

/// Where clips and their manifest live.
#[derive(Args, Debug, Clone, Default)]
pub struct AssetArgs {
    /// Directory of pre-rendered clips
    #[arg(long, env = "ROVER_VOICE_CLIPS")]
    pub clips_dir: Option<PathBuf>,

    /// Clip manifest file
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

impl AssetArgs {
    pub fn apply(&self, config: &mut RoverConfig) {
        if let Some(dir) = &self.clips_dir {
            config.clips_dir = dir.clone();
        }
        if let Some(path) = &self.manifest {
            config.manifest_path = path.clone();
        }
    }
}

/// Per-run overrides for anything that speaks.
#[derive(Args, Debug, Clone, Default)]
pub struct VoiceArgs {
    #[command(flatten)]
    pub assets: AssetArgs,

    /// Line bank JSON (defaults to the built-in lines)
    #[arg(long)]
    pub lines: Option<PathBuf>,

    /// Playback backend: system, speech or print
    #[arg(long, env = "ROVER_VOICE_PLAYER")]
    pub player: Option<PlayerKind>,

    /// Minimum milliseconds between accepted events
    #[arg(long)]
    pub cooldown_ms: Option<u64>,
}

impl VoiceArgs {
    pub fn apply(&self, config: &mut RoverConfig) {
        self.assets.apply(config);
        if let Some(path) = &self.lines {
            config.lines_path = Some(path.clone());
        }
        if let Some(player) = self.player {
            config.player = player;
        }
        if let Some(ms) = self.cooldown_ms {
            config.cooldown_ms = ms;
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<RoverConfig> {
    RoverConfig::load_or_default(path).context("Failed to load config")
}

/// Engine and voice wired from one config.
pub struct Session {
    pub config: RoverConfig,
    pub engine: ResponseEngine,
    pub voice: Voice,
}

impl Session {
    pub fn open(config: RoverConfig) -> Result<Self> {
        let lines = config.line_bank().context("Failed to load line bank")?;
        let mut engine = ResponseEngine::with_cooldown(Arc::new(lines), config.cooldown_ms);
        engine.set_intensity(config.initial_intensity);

        let index = AssetIndex::load(&config.clips_dir, &config.manifest_path);
        let voice = Voice::new(
            AssetResolver::new(Arc::new(index)),
            build_player(config.player),
        );
        tracing::debug!("Session ready, player: {}", voice.player_name());

        Ok(Self {
            config,
            engine,
            voice,
        })
    }
}
