mod print;
mod system;

pub use print::PrintPlayer;
pub use system::{CommandSpec, SpeechPlayer, SystemPlayer};

use rover_core::PlayerKind;

use crate::error::AudioError;
use crate::index::AssetHandle;

/// Something to say: a recorded clip (with the line it stands for) or bare
/// text for speech synthesis.
#[derive(Debug, Clone, Copy)]
pub enum Utterance<'a> {
    Clip { clip: &'a AssetHandle, text: &'a str },
    Speech { text: &'a str },
}

impl Utterance<'_> {
    pub fn text(&self) -> &str {
        match self {
            Self::Clip { text, .. } | Self::Speech { text } => text,
        }
    }
}

/// A playback backend, chosen once at construction.
pub trait Player: Send {
    fn name(&self) -> &'static str;

    /// Render an utterance, blocking until playback finishes.
    fn play(&self, utterance: &Utterance<'_>) -> Result<(), AudioError>;
}

pub fn build_player(kind: PlayerKind) -> Box<dyn Player> {
    match kind {
        PlayerKind::System => Box::new(SystemPlayer::default()),
        PlayerKind::Speech => Box::new(SpeechPlayer::default()),
        PlayerKind::Print => Box::new(PrintPlayer::stdout()),
    }
}
