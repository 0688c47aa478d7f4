use std::fmt;

use crate::error::HostError;

/// Position of the physical 3-way intensity switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchPosition {
    Low,
    Mid,
    High,
}

impl SwitchPosition {
    /// Decode the two switch pins.
    ///
    /// Only the LOW pin high means LOW and only the HIGH pin high means HIGH.
    /// Both low (center) or both high (wiring fault) read as MID.
    pub fn decode(low_pin: bool, high_pin: bool) -> Self {
        match (low_pin, high_pin) {
            (true, false) => Self::Low,
            (false, true) => Self::High,
            _ => Self::Mid,
        }
    }

    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Self::Low,
            1 => Self::Mid,
            _ => Self::High,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Mid => 1,
            Self::High => 2,
        }
    }
}

impl fmt::Display for SwitchPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "LOW",
            Self::Mid => "MID",
            Self::High => "HIGH",
        })
    }
}

/// Raw access to the two switch pins.
pub trait SwitchInput {
    /// `(low_pin, high_pin)` logic levels.
    fn read_pins(&mut self) -> Result<(bool, bool), HostError>;
}

/// A switch stuck in one position, for hosts without the hardware.
#[derive(Debug, Clone, Copy)]
pub struct FixedSwitch(pub SwitchPosition);

impl SwitchInput for FixedSwitch {
    fn read_pins(&mut self) -> Result<(bool, bool), HostError> {
        Ok(match self.0 {
            SwitchPosition::Low => (true, false),
            SwitchPosition::Mid => (false, false),
            SwitchPosition::High => (false, true),
        })
    }
}

/// Tracks the switch and reports only changes.
pub struct SwitchWatcher<S> {
    input: S,
    last: SwitchPosition,
}

impl<S: SwitchInput> SwitchWatcher<S> {
    pub fn new(mut input: S) -> Result<Self, HostError> {
        let (low, high) = input.read_pins()?;
        let last = SwitchPosition::decode(low, high);
        tracing::debug!("Switch initial position: {last}");
        Ok(Self { input, last })
    }

    pub fn position(&self) -> SwitchPosition {
        self.last
    }

    pub fn read_if_changed(&mut self) -> Result<Option<SwitchPosition>, HostError> {
        let (low, high) = self.input.read_pins()?;
        let current = SwitchPosition::decode(low, high);
        if current == self.last {
            return Ok(None);
        }
        tracing::debug!("Switch changed: {} -> {current}", self.last);
        self.last = current;
        Ok(Some(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<(bool, bool)>);

    impl SwitchInput for Scripted {
        fn read_pins(&mut self) -> Result<(bool, bool), HostError> {
            self.0
                .pop_front()
                .ok_or_else(|| HostError::Switch("script exhausted".into()))
        }
    }

    #[test]
    fn test_decode_truth_table() {
        assert_eq!(SwitchPosition::decode(true, false), SwitchPosition::Low);
        assert_eq!(SwitchPosition::decode(false, false), SwitchPosition::Mid);
        assert_eq!(SwitchPosition::decode(false, true), SwitchPosition::High);
        assert_eq!(SwitchPosition::decode(true, true), SwitchPosition::Mid);
    }

    #[test]
    fn test_level_roundtrip() {
        for level in 0..=2 {
            assert_eq!(SwitchPosition::from_level(level).level(), level);
        }
        assert_eq!(SwitchPosition::from_level(9), SwitchPosition::High);
    }

    #[test]
    fn test_watcher_reports_changes_only() {
        let script = Scripted(
            [(true, false), (true, false), (false, false), (false, false), (false, true)]
                .into_iter()
                .collect(),
        );
        let mut watcher = SwitchWatcher::new(script).unwrap();
        assert_eq!(watcher.position(), SwitchPosition::Low);
        assert_eq!(watcher.read_if_changed().unwrap(), None);
        assert_eq!(watcher.read_if_changed().unwrap(), Some(SwitchPosition::Mid));
        assert_eq!(watcher.read_if_changed().unwrap(), None);
        assert_eq!(watcher.read_if_changed().unwrap(), Some(SwitchPosition::High));
        assert!(watcher.read_if_changed().is_err());
        assert_eq!(watcher.position(), SwitchPosition::High);
    }

    #[test]
    fn test_fixed_switch() {
        let watcher = SwitchWatcher::new(FixedSwitch(SwitchPosition::High)).unwrap();
        assert_eq!(watcher.position(), SwitchPosition::High);
    }
}
