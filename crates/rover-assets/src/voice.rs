use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

use rover_core::SelectedLine;

use crate::error::AudioError;
use crate::index::AssetHandle;
use crate::player::{Player, Utterance};
use crate::resolver::AssetResolver;

/// How a line ended up being rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Spoken {
    Clip(AssetHandle),
    Speech,
    Silent,
}

/// Resolver plus player: turns a selected line into sound.
pub struct Voice<R = StdRng> {
    resolver: AssetResolver<R>,
    player: Box<dyn Player>,
}

impl<R: Rng> Voice<R> {
    pub fn new(resolver: AssetResolver<R>, player: Box<dyn Player>) -> Self {
        Self { resolver, player }
    }

    /// Play the clip recorded for this exact line if there is one, else a
    /// clip for the line's event and tier, else synthesize the text when the
    /// manifest allows it.
    pub fn speak(&mut self, line: &SelectedLine) -> Result<Spoken, AudioError> {
        let clip = self
            .resolver
            .resolve_transcript(&line.text)
            .or_else(|| self.resolver.resolve(line.event.as_str(), line.tier, None));

        match clip {
            Some(clip) => {
                self.player.play(&Utterance::Clip {
                    clip: &clip,
                    text: &line.text,
                })?;
                Ok(Spoken::Clip(clip))
            }
            None if self.resolver.fallback_tts() => {
                self.player.play(&Utterance::Speech { text: &line.text })?;
                Ok(Spoken::Speech)
            }
            None => {
                tracing::debug!("No clip for {}_{} and speech fallback is off", line.event, line.tier);
                Ok(Spoken::Silent)
            }
        }
    }

    /// Speak free text that did not come from the engine.
    pub fn say(&self, text: &str) -> Result<(), AudioError> {
        self.player.play(&Utterance::Speech { text })
    }

    pub fn resolver(&self) -> &AssetResolver<R> {
        &self.resolver
    }

    pub fn player_name(&self) -> &'static str {
        self.player.name()
    }
}
