use std::fmt;

/// Structured form of a clip identifier such as `COLLISION_2_1`.
///
/// Identifiers are `EVENT[_TIER[_VARIANT]]`. The event is always known up
/// front, so ids are matched against a key rather than parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClipKey {
    pub event: String,
    pub tier: Option<u8>,
    pub variant: Option<u32>,
}

impl ClipKey {
    pub fn new(event: impl Into<String>, tier: Option<u8>, variant: Option<u32>) -> Self {
        Self {
            event: event.into(),
            // a variant without a tier is not addressable
            tier,
            variant: tier.and(variant),
        }
    }

    /// Whether `id` names this clip. A key without a variant also covers
    /// every `_<digits>` take recorded for its tier.
    ///
    /// Matching starts from the known event, so event names that end in
    /// digits (`ZONE_5`) are never mistaken for a tier.
    pub fn covers(&self, id: &str) -> bool {
        let Some(rest) = id.strip_prefix(self.event.as_str()) else {
            return false;
        };
        let Some(tier) = self.tier else {
            return rest.is_empty();
        };
        let Some(rest) = rest
            .strip_prefix('_')
            .and_then(|r| r.strip_prefix(tier.to_string().as_str()))
        else {
            return false;
        };
        match (self.variant, rest.strip_prefix('_')) {
            (_, None) => rest.is_empty() && self.variant.is_none(),
            (Some(variant), Some(take)) => take == variant.to_string(),
            (None, Some(take)) => !take.is_empty() && take.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

impl fmt::Display for ClipKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.event)?;
        if let Some(tier) = self.tier {
            write!(f, "_{tier}")?;
            if let Some(variant) = self.variant {
                write!(f, "_{variant}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_identifier() {
        assert_eq!(ClipKey::new("COLLISION", Some(2), Some(1)).to_string(), "COLLISION_2_1");
        assert_eq!(ClipKey::new("STUCK", Some(1), None).to_string(), "STUCK_1");
        assert_eq!(ClipKey::new("BOOT", None, Some(4)).to_string(), "BOOT");
    }

    #[test]
    fn test_tier_pair_covers_takes() {
        let key = ClipKey::new("COLLISION", Some(2), None);
        assert!(key.covers("COLLISION_2"));
        assert!(key.covers("COLLISION_2_0"));
        assert!(key.covers("COLLISION_2_17"));
        assert!(!key.covers("COLLISION_2_"));
        assert!(!key.covers("COLLISION_2_1_3"));
        assert!(!key.covers("COLLISION_20"));
        assert!(!key.covers("COLLISION_1_0"));
        assert!(!key.covers("COLLISION"));
    }

    #[test]
    fn test_exact_keys() {
        let variant = ClipKey::new("STUCK", Some(1), Some(3));
        assert!(variant.covers("STUCK_1_3"));
        assert!(!variant.covers("STUCK_1"));
        assert!(!variant.covers("STUCK_1_30"));

        let event_only = ClipKey::new("RESET", None, None);
        assert!(event_only.covers("RESET"));
        assert!(!event_only.covers("RESET_0"));
    }

    #[test]
    fn test_event_names_ending_in_digits() {
        let key = ClipKey::new("ZONE_5", Some(0), None);
        assert!(key.covers("ZONE_5_0"));
        assert!(key.covers("ZONE_5_0_2"));
        assert!(!key.covers("ZONE_5"));
        assert!(!ClipKey::new("SAW_HUMAN", Some(2), None).covers("SAW_HUMANS_2"));
    }

    #[test]
    fn test_prefix_does_not_leak_across_events() {
        let key = ClipKey::new("MOVE", Some(0), None);
        assert!(!key.covers("MOVE_START_0_0"));
        assert!(!key.covers("MOVE_0X"));
    }
}
