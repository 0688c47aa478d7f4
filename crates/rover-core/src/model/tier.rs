use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Severity level 0..=2 used to pick both a line pool and a clip.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tier(u8);

impl Tier {
    pub const LOW: Tier = Tier(0);
    pub const MID: Tier = Tier(1);
    pub const HIGH: Tier = Tier(2);
    pub const MAX: Tier = Tier::HIGH;
    pub const ALL: [Tier; 3] = [Tier::LOW, Tier::MID, Tier::HIGH];

    /// Clamp any level into range. Used for switch and CLI input.
    pub fn clamped(level: u8) -> Self {
        Self(level.min(Self::MAX.0))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// One step up, saturating at [`Tier::MAX`].
    pub fn escalated(self) -> Self {
        Self::clamped(self.0.saturating_add(1))
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "LOW",
            1 => "MID",
            _ => "HIGH",
        }
    }
}

impl TryFrom<u8> for Tier {
    type Error = CoreError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        if level > Self::MAX.0 {
            return Err(CoreError::InvalidTier(level));
        }
        Ok(Self(level))
    }
}

impl From<Tier> for u8 {
    fn from(t: Tier) -> Self {
        t.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
