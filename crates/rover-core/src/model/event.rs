use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a discrete occurrence reported to the engine.
///
/// The standard set is exposed as associated constants; line banks loaded
/// from disk may introduce their own names. Names are always upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EventKind(Cow<'static, str>);

impl EventKind {
    pub const BOOT: EventKind = EventKind(Cow::Borrowed("BOOT"));
    pub const MOVE_START: EventKind = EventKind(Cow::Borrowed("MOVE_START"));
    pub const MOVE_STOP: EventKind = EventKind(Cow::Borrowed("MOVE_STOP"));
    pub const COLLISION: EventKind = EventKind(Cow::Borrowed("COLLISION"));
    pub const STUCK: EventKind = EventKind(Cow::Borrowed("STUCK"));
    pub const IDLE_TOO_LONG: EventKind = EventKind(Cow::Borrowed("IDLE_TOO_LONG"));
    pub const RESET: EventKind = EventKind(Cow::Borrowed("RESET"));
    pub const MODE_SWITCH: EventKind = EventKind(Cow::Borrowed("MODE_SWITCH"));

    /// Build an event name, trimming whitespace and upper-casing it.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Cow::Owned(name.as_ref().trim().to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Failures that raise irritation.
    pub fn escalates(&self) -> bool {
        matches!(self.as_str(), "COLLISION" | "STUCK")
    }

    pub fn clears_irritation(&self) -> bool {
        self.as_str() == "RESET"
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EventKind {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<EventKind> for String {
    fn from(e: EventKind) -> Self {
        e.0.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalises_case_and_whitespace() {
        assert_eq!(EventKind::new("  collision\r"), EventKind::COLLISION);
        assert_eq!(EventKind::from("saw_human").as_str(), "SAW_HUMAN");
    }

    #[test]
    fn test_escalation_classes() {
        assert!(EventKind::COLLISION.escalates());
        assert!(EventKind::STUCK.escalates());
        assert!(!EventKind::BOOT.escalates());
        assert!(EventKind::RESET.clears_irritation());
        assert!(!EventKind::STUCK.clears_irritation());
    }

    #[test]
    fn test_serde_normalises() {
        let e: EventKind = serde_json::from_str("\"move_start\"").unwrap();
        assert_eq!(e, EventKind::MOVE_START);
        assert_eq!(serde_json::to_string(&e).unwrap(), "\"MOVE_START\"");
    }
}
