pub mod console;
pub mod control;
pub mod error;
pub mod serial;
pub mod switch;

pub use console::ConsoleCommand;
pub use control::{ControlLoop, Input, Tick};
pub use error::HostError;
pub use serial::{BackgroundReader, EventFramer, EventReader, EventSource};
pub use switch::{FixedSwitch, SwitchInput, SwitchPosition, SwitchWatcher};
