use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use rover_core::Tier;

use crate::index::{AssetHandle, AssetIndex};
use crate::key::ClipKey;

/// Resolves `(event, tier[, variant])` against a shared [`AssetIndex`].
pub struct AssetResolver<R = StdRng> {
    index: Arc<AssetIndex>,
    rng: R,
}

impl AssetResolver<StdRng> {
    pub fn new(index: Arc<AssetIndex>) -> Self {
        Self::with_rng(index, StdRng::from_entropy())
    }
}

impl<R: Rng> AssetResolver<R> {
    pub fn with_rng(index: Arc<AssetIndex>, rng: R) -> Self {
        Self { index, rng }
    }

    /// First match wins:
    /// 1. `EVENT_TIER_VARIANT` when a variant is given;
    /// 2. a random pick among every `EVENT_TIER[_*]` clip, bare pair included;
    /// 3. a clip named by the event alone.
    pub fn resolve(&mut self, event: &str, tier: Tier, variant: Option<u32>) -> Option<AssetHandle> {
        if let Some(variant) = variant {
            let id = ClipKey::new(event, Some(tier.level()), Some(variant)).to_string();
            if let Some(handle) = self.index.get(&id) {
                return Some(handle);
            }
        }

        if let Some(id) = self
            .index
            .tier_group(event, tier.level())
            .choose(&mut self.rng)
        {
            return self.index.get(id);
        }

        let fallback = self.index.get(event);
        if fallback.is_none() {
            tracing::debug!("No clip for {event}_{tier}");
        }
        fallback
    }

    /// Clip recorded from exactly this line, if the manifest declares one.
    pub fn resolve_transcript(&self, text: &str) -> Option<AssetHandle> {
        self.index.by_transcript(text)
    }
}

impl<R> AssetResolver<R> {
    pub fn index(&self) -> &AssetIndex {
        &self.index
    }

    pub fn fallback_tts(&self) -> bool {
        self.index.fallback_tts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn resolver(ids: &[&str]) -> AssetResolver<StdRng> {
        let index = AssetIndex::from_entries(
            ids.iter()
                .map(|id| (*id, PathBuf::from(format!("{}.mp3", id.to_lowercase())))),
            true,
        );
        AssetResolver::with_rng(Arc::new(index), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_exact_variant_beats_event_fallback() {
        let mut r = resolver(&["COLLISION_2_1", "COLLISION"]);
        let handle = r.resolve("COLLISION", Tier::HIGH, Some(1)).unwrap();
        assert_eq!(handle.clip_id, "COLLISION_2_1");
    }

    #[test]
    fn test_exact_variant_beats_siblings() {
        let mut r = resolver(&["COLLISION_2_0", "COLLISION_2_1", "COLLISION_2_2"]);
        for _ in 0..10 {
            let handle = r.resolve("COLLISION", Tier::HIGH, Some(2)).unwrap();
            assert_eq!(handle.clip_id, "COLLISION_2_2");
        }
    }

    #[test]
    fn test_missing_variant_picks_from_tier_group() {
        let mut r = resolver(&["STUCK_1_0", "STUCK_1", "STUCK_2_0", "STUCK"]);
        for _ in 0..20 {
            let handle = r.resolve("STUCK", Tier::MID, Some(9)).unwrap();
            assert!(["STUCK_1_0", "STUCK_1"].contains(&handle.clip_id.as_str()));
        }
    }

    #[test]
    fn test_tier_group_covers_every_member() {
        let mut r = resolver(&["BOOT_0", "BOOT_0_1", "BOOT_0_2"]);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            seen.insert(r.resolve("BOOT", Tier::LOW, None).unwrap().clip_id);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_event_only_fallback() {
        let mut r = resolver(&["RESET", "RESET_0_0"]);
        assert_eq!(r.resolve("RESET", Tier::HIGH, None).unwrap().clip_id, "RESET");
    }

    #[test]
    fn test_prefix_does_not_leak_across_events() {
        // MOVE is not a prefix match for MOVE_START
        let mut r = resolver(&["MOVE_START_0_0"]);
        assert!(r.resolve("MOVE", Tier::LOW, None).is_none());
        assert!(r.resolve("MOVE_START", Tier::LOW, None).is_some());
    }

    #[test]
    fn test_event_name_ending_in_digits() {
        let mut r = resolver(&["ZONE_5_0", "ZONE_5"]);
        assert_eq!(r.resolve("ZONE_5", Tier::LOW, None).unwrap().clip_id, "ZONE_5_0");
        assert_eq!(r.resolve("ZONE_5", Tier::MID, None).unwrap().clip_id, "ZONE_5");
    }

    #[test]
    fn test_miss() {
        let mut r = resolver(&["BOOT_0"]);
        assert!(r.resolve("STUCK", Tier::LOW, Some(0)).is_none());
        assert!(r.fallback_tts());
    }

    #[test]
    fn test_resolve_transcript() {
        let manifest: crate::Manifest = serde_json::from_str(
            r#"{"clips": {"RANDOM_2_0": {"file": "bazinga.mp3", "text": "Bazinga!"}}}"#,
        )
        .unwrap();
        let index = AssetIndex::build(Some(&manifest), vec![PathBuf::from("bazinga.mp3")]);
        let r = AssetResolver::new(Arc::new(index));
        assert_eq!(r.resolve_transcript("Bazinga!").unwrap().clip_id, "RANDOM_2_0");
        assert!(r.resolve_transcript("bazinga!").is_none());
    }
}
