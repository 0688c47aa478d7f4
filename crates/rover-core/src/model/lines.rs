use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use super::event::EventKind;
use super::tier::Tier;
use crate::error::CoreError;

/// Line pools for one event, keyed by tier.
pub type TierPools = BTreeMap<Tier, Vec<String>>;

/// Immutable event -> tier -> lines table.
///
/// Every event carries a non-empty tier-0 pool, and no pool is empty, so a
/// lookup for a known event always yields at least one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LineBank {
    events: BTreeMap<EventKind, TierPools>,
}

const BUILTIN: &[(&str, [&[&str]; 3])] = &[
    (
        "BOOT",
        [
            &["Systems online. Please do not touch anything unnecessarily."],
            &["Initialization complete. Human interference is anticipated."],
            &["Boot complete. I am already disappointed in your methodology."],
        ],
    ),
    (
        "MOVE_START",
        [
            &["Commencing motion. Try not to introduce variables."],
            &["Initiating traversal. Your confidence is not evidence."],
            &["Beginning movement. Statistically, you will ruin this."],
        ],
    ),
    (
        "COLLISION",
        [
            &[
                "Unexpected contact. Revising model.",
                "Collision detected. Suboptimal.",
            ],
            &[
                "That obstacle was predictable. Your planning was not.",
                "Impact occurred due to improper environmental assumptions.",
            ],
            &[
                "This is why we cannot have nice experiments.",
                "Catastrophic error. Also, I was correct to distrust you.",
            ],
        ],
    ),
    (
        "STUCK",
        [
            &["I appear to be immobilized. This is... inconvenient."],
            &["I am stuck. The environment is non-compliant."],
            &["I refuse to proceed until the laws of physics are respected."],
        ],
    ),
    (
        "IDLE_TOO_LONG",
        [
            &["I am waiting. Efficiently."],
            &["The delay is unnecessary. Proceed."],
            &["If your plan involves hesitation, it is not a plan."],
        ],
    ),
    (
        "RESET",
        [
            &["Reset acknowledged. Please be more careful."],
            &["Resetting. Again. Predictable."],
            &["Resetting because humans mistake repetition for progress."],
        ],
    ),
    (
        "MOVE_STOP",
        [
            &["Stopping. As planned."],
            &["Stopping to prevent further errors."],
            &["Stopping because continuing would be irresponsible. Unlike you."],
        ],
    ),
    (
        "MODE_SWITCH",
        [
            &["Adjusting tolerance parameters."],
            &["Switching mode. Try to keep up."],
            &["Mode changed. Your incompetence remains constant."],
        ],
    ),
];

impl LineBank {
    /// Build a bank, checking that every event has a tier-0 pool and no pool is empty.
    pub fn new(events: BTreeMap<EventKind, TierPools>) -> Result<Self, CoreError> {
        for (event, pools) in &events {
            if !pools.contains_key(&Tier::LOW) {
                return Err(CoreError::InvalidLineBank(format!(
                    "event {event} has no tier 0 lines"
                )));
            }
            if let Some((tier, _)) = pools.iter().find(|(_, lines)| lines.is_empty()) {
                return Err(CoreError::InvalidLineBank(format!(
                    "event {event} has an empty tier {tier} pool"
                )));
            }
        }
        Ok(Self { events })
    }

    /// The stock pedantic-scientist personality, all eight standard events.
    pub fn builtin() -> Self {
        let events = BUILTIN
            .iter()
            .map(|(name, tiers)| {
                let pools: TierPools = Tier::ALL
                    .iter()
                    .zip(tiers.iter())
                    .map(|(tier, lines)| {
                        (*tier, lines.iter().map(|l| l.to_string()).collect::<Vec<_>>())
                    })
                    .collect();
                (EventKind::new(name), pools)
            })
            .collect();
        Self { events }
    }

    /// Parse a bank from JSON of the form `{"EVENT": {"0": ["line", ...], ...}}`.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let raw: BTreeMap<String, BTreeMap<u8, Vec<String>>> = serde_json::from_str(json)?;
        let mut events = BTreeMap::new();
        for (name, tiers) in raw {
            let mut pools = TierPools::new();
            for (level, lines) in tiers {
                pools.insert(Tier::try_from(level)?, lines);
            }
            let event = EventKind::new(&name);
            if events.contains_key(&event) {
                return Err(CoreError::InvalidLineBank(format!(
                    "event {name} duplicates {event}"
                )));
            }
            events.insert(event, pools);
        }
        Self::new(events)
    }

    /// Read and validate a JSON line bank from disk.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        let bank = Self::from_json(&json)?;
        tracing::debug!("Loaded {} events from {}", bank.len(), path.display());
        Ok(bank)
    }

    /// Canonical key for a known event name (exact, already upper case).
    pub fn event(&self, name: &str) -> Option<&EventKind> {
        self.events.get_key_value(name).map(|(k, _)| k)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.events.contains_key(name)
    }

    /// Candidates for `(event, tier)`, falling back to tier 0 when that tier is absent.
    pub fn pool(&self, name: &str, tier: Tier) -> Option<&[String]> {
        let pools = self.events.get(name)?;
        pools
            .get(&tier)
            .or_else(|| pools.get(&Tier::LOW))
            .map(Vec::as_slice)
    }

    pub fn events(&self) -> impl Iterator<Item = &EventKind> {
        self.events.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EventKind, &TierPools)> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for LineBank {
    fn default() -> Self {
        Self::builtin()
    }
}
