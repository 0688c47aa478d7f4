pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;

pub use clock::{Clock, ManualClock, Millis, MonotonicClock};
pub use config::{PlayerKind, RoverConfig};
pub use engine::{EngineState, ResponseEngine, SharedEngine, DEFAULT_COOLDOWN_MS};
pub use error::CoreError;
pub use model::{EventKind, LineBank, SelectedLine, Tier, TierPools};
