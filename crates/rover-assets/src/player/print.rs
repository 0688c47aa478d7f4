use std::io::{self, Write};
use std::sync::Mutex;

use super::{Player, Utterance};
use crate::error::AudioError;

/// Writes what would be said instead of producing audio.
pub struct PrintPlayer<W = io::Stdout> {
    out: Mutex<W>,
}

impl PrintPlayer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> PrintPlayer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> Player for PrintPlayer<W> {
    fn name(&self) -> &'static str {
        "print"
    }

    fn play(&self, utterance: &Utterance<'_>) -> Result<(), AudioError> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        match utterance {
            Utterance::Clip { clip, .. } => {
                let file = clip
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_else(|| clip.path.to_string_lossy());
                writeln!(out, "\u{1f50a} [Would play: {file}]")?;
            }
            Utterance::Speech { text } => writeln!(out, "\u{1f50a} {text}")?,
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::AssetHandle;

    #[test]
    fn test_prints_clip_file_and_speech() {
        let player = PrintPlayer::new(Vec::new());
        let clip = AssetHandle {
            clip_id: "STUCK_2_1".into(),
            path: "/audio/clips/stuck_2_1.mp3".into(),
        };
        player
            .play(&Utterance::Clip {
                clip: &clip,
                text: "I am stuck.",
            })
            .unwrap();
        player.play(&Utterance::Speech { text: "Bazinga!" }).unwrap();

        let out = String::from_utf8(player.into_inner()).unwrap();
        assert_eq!(
            out,
            "\u{1f50a} [Would play: stuck_2_1.mp3]\n\u{1f50a} Bazinga!\n"
        );
    }
}
