pub mod event;
pub mod lines;
pub mod tier;

pub use event::EventKind;
pub use lines::{LineBank, TierPools};
pub use tier::Tier;

use serde::Serialize;

/// A line chosen by the engine, with the event and tier that produced it.
///
/// Hosts pass `event` and `tier` on to asset resolution and keep `text`
/// for speech synthesis when no clip is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedLine {
    pub text: String,
    pub event: EventKind,
    pub tier: Tier,
}
