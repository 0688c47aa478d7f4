mod settings;

pub use settings::{PlayerKind, RoverConfig};
