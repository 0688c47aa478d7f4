//! Turns an abstract `(event, tier[, variant])` into a playable clip and
//! renders it, falling back to speech synthesis of the line text.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use rover_assets::{build_player, AssetIndex, AssetResolver, Voice};
//! use rover_core::{LineBank, PlayerKind, ResponseEngine};
//!
//! let index = AssetIndex::load("audio/clips".as_ref(), "audio/clip_manifest.json".as_ref());
//! let mut voice = Voice::new(AssetResolver::new(Arc::new(index)), build_player(PlayerKind::Print));
//! let mut engine = ResponseEngine::new(Arc::new(LineBank::builtin()));
//! if let Some(line) = engine.process("BOOT", 0) {
//!     voice.speak(&line).unwrap();
//! }
//! ```

pub mod error;
pub mod index;
pub mod key;
pub mod manifest;
pub mod player;
pub mod resolver;
pub mod voice;

pub use error::{AssetError, AudioError};
pub use index::{AssetHandle, AssetIndex, PLAYABLE_EXTENSIONS};
pub use key::ClipKey;
pub use manifest::{generate_manifest, Manifest, ManifestEntry};
pub use player::{build_player, Player, PrintPlayer, SpeechPlayer, SystemPlayer, Utterance};
pub use resolver::AssetResolver;
pub use voice::{Spoken, Voice};
