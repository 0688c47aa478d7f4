use std::sync::{Arc, Mutex, MutexGuard};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::clock::Millis;
use crate::model::{LineBank, SelectedLine, Tier};

/// Minimum gap between two accepted events unless configured otherwise.
pub const DEFAULT_COOLDOWN_MS: Millis = 2_000;

/// Irritation at which the tier is pushed one step above intensity.
///
/// The counter saturates here: only the crossing matters, so counting
/// further would change nothing observable.
pub const ESCALATION_THRESHOLD: u8 = 3;

/// Snapshot of the engine's mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineState {
    pub irritation: u8,
    pub intensity: Tier,
    /// `None` until the first accepted event.
    pub last_spoke_at: Option<Millis>,
}

impl EngineState {
    /// Tier the next accepted event would use, before its own state update.
    pub fn tier(&self) -> Tier {
        effective_tier(self.intensity, self.irritation)
    }
}

fn effective_tier(intensity: Tier, irritation: u8) -> Tier {
    if irritation >= ESCALATION_THRESHOLD {
        intensity.escalated()
    } else {
        intensity
    }
}

/// The personality state machine: (event, irritation, intensity, time) -> line.
///
/// Owns its state exclusively. The line bank is shared read-only, and the
/// random source is injected so tests can seed it.
pub struct ResponseEngine<R = StdRng> {
    lines: Arc<LineBank>,
    state: EngineState,
    cooldown: Millis,
    rng: R,
}

impl ResponseEngine<StdRng> {
    /// Engine with the default cooldown and an entropy-seeded RNG.
    pub fn new(lines: Arc<LineBank>) -> Self {
        Self::with_cooldown(lines, DEFAULT_COOLDOWN_MS)
    }

    pub fn with_cooldown(lines: Arc<LineBank>, cooldown: Millis) -> Self {
        Self::with_rng(lines, cooldown, StdRng::from_entropy())
    }
}

impl<R: Rng> ResponseEngine<R> {
    pub fn with_rng(lines: Arc<LineBank>, cooldown: Millis, rng: R) -> Self {
        Self {
            lines,
            state: EngineState {
                irritation: 0,
                intensity: Tier::LOW,
                last_spoke_at: None,
            },
            cooldown,
            rng,
        }
    }

    /// Feed one event observed at monotonic time `now`.
    ///
    /// Returns `None` both while cooling down and for unknown events; in
    /// either case no state changes. Never fails otherwise.
    pub fn process(&mut self, event: &str, now: Millis) -> Option<SelectedLine> {
        if self.cooling_down(now) {
            tracing::debug!("Cooldown active, ignoring {event}");
            return None;
        }

        let Some(kind) = self.lines.event(event) else {
            tracing::debug!("Unknown event: {event}");
            return None;
        };

        let irritation = if kind.escalates() {
            self.state
                .irritation
                .saturating_add(1)
                .min(ESCALATION_THRESHOLD)
        } else if kind.clears_irritation() {
            0
        } else {
            self.state.irritation
        };

        let tier = effective_tier(self.state.intensity, irritation);
        let text = self
            .lines
            .pool(kind.as_str(), tier)
            .and_then(|pool| pool.choose(&mut self.rng))?
            .clone();
        let kind = kind.clone();

        if irritation != self.state.irritation {
            tracing::debug!(
                "Irritation {} -> {irritation}",
                self.state.irritation
            );
        }
        tracing::debug!(
            event = %kind,
            intensity = %self.state.intensity,
            irritation,
            %tier,
            "Selected line"
        );

        self.state.irritation = irritation;
        self.state.last_spoke_at = Some(now);

        Some(SelectedLine {
            text,
            event: kind,
            tier,
        })
    }

    /// Set the base intensity, clamped into 0..=2. Allowed at any time.
    pub fn set_intensity(&mut self, level: u8) {
        let intensity = Tier::clamped(level);
        if intensity != self.state.intensity {
            tracing::info!(
                "Intensity changed: {} -> {}",
                self.state.intensity.name(),
                intensity.name()
            );
        }
        self.state.intensity = intensity;
    }

    fn cooling_down(&self, now: Millis) -> bool {
        match self.state.last_spoke_at {
            None => false,
            Some(last) => now.saturating_sub(last) < self.cooldown,
        }
    }
}

impl<R> ResponseEngine<R> {
    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn intensity(&self) -> Tier {
        self.state.intensity
    }

    pub fn irritation(&self) -> u8 {
        self.state.irritation
    }

    pub fn cooldown_ms(&self) -> Millis {
        self.cooldown
    }

    pub fn lines(&self) -> &LineBank {
        &self.lines
    }
}

/// A [`ResponseEngine`] behind one mutex, for hosts that drive it from
/// several threads.
pub struct SharedEngine<R = StdRng> {
    inner: Arc<Mutex<ResponseEngine<R>>>,
}

impl<R> Clone for SharedEngine<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Rng> SharedEngine<R> {
    pub fn new(engine: ResponseEngine<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn process(&self, event: &str, now: Millis) -> Option<SelectedLine> {
        self.lock().process(event, now)
    }

    pub fn set_intensity(&self, level: u8) {
        self.lock().set_intensity(level);
    }

    pub fn state(&self) -> EngineState {
        self.lock().state()
    }

    // State stays consistent across a panicked holder: every mutation is a
    // plain field assignment after the fallible work is done.
    fn lock(&self) -> MutexGuard<'_, ResponseEngine<R>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventKind;

    fn engine() -> ResponseEngine<StdRng> {
        ResponseEngine::with_rng(
            Arc::new(LineBank::builtin()),
            DEFAULT_COOLDOWN_MS,
            StdRng::seed_from_u64(7),
        )
    }

    fn in_pool(engine: &ResponseEngine<StdRng>, line: &SelectedLine) -> bool {
        engine
            .lines()
            .pool(line.event.as_str(), line.tier)
            .is_some_and(|pool| pool.contains(&line.text))
    }

    #[test]
    fn test_first_event_is_never_suppressed() {
        let mut e = engine();
        let line = e.process("BOOT", 0).unwrap();
        assert_eq!(line.event, EventKind::BOOT);
        assert_eq!(line.tier, Tier::LOW);
        assert!(in_pool(&e, &line));
        assert_eq!(e.state().last_spoke_at, Some(0));
    }

    #[test]
    fn test_cooldown_suppresses_valid_and_invalid() {
        let mut e = engine();
        e.process("BOOT", 10_000).unwrap();
        assert!(e.process("COLLISION", 11_999).is_none());
        assert!(e.process("FOO", 11_000).is_none());
        assert_eq!(e.irritation(), 0);
        assert_eq!(e.state().last_spoke_at, Some(10_000));
        assert!(e.process("COLLISION", 12_000).is_some());
        assert_eq!(e.irritation(), 1);
    }

    #[test]
    fn test_clock_going_backwards_is_suppressed() {
        let mut e = engine();
        e.process("BOOT", 5_000).unwrap();
        assert!(e.process("BOOT", 1_000).is_none());
    }

    #[test]
    fn test_unknown_event_leaves_state_unchanged() {
        let mut e = engine();
        e.set_intensity(1);
        e.process("COLLISION", 0).unwrap();
        let before = e.state();
        assert!(e.process("FOO", 100_000).is_none());
        assert_eq!(e.state(), before);
    }

    #[test]
    fn test_event_names_are_case_sensitive() {
        let mut e = engine();
        assert!(e.process("collision", 0).is_none());
        assert_eq!(e.state().last_spoke_at, None);
    }

    #[test]
    fn test_collision_escalation_scenario() {
        let mut e = engine();
        let mut now = 0;
        let mut seen = Vec::new();
        for _ in 0..3 {
            let line = e.process("COLLISION", now).unwrap();
            assert!(in_pool(&e, &line));
            seen.push((e.irritation(), line.tier));
            now += DEFAULT_COOLDOWN_MS;
        }
        assert_eq!(
            seen,
            vec![(1, Tier::LOW), (2, Tier::LOW), (3, Tier::MID)]
        );
    }

    #[test]
    fn test_stuck_escalates_and_others_do_not() {
        let mut e = engine();
        e.process("STUCK", 0).unwrap();
        e.process("MOVE_START", 2_000).unwrap();
        e.process("IDLE_TOO_LONG", 4_000).unwrap();
        assert_eq!(e.irritation(), 1);
    }

    #[test]
    fn test_irritation_saturates_at_threshold() {
        let mut e = engine();
        for i in 0..10 {
            e.process("STUCK", i * DEFAULT_COOLDOWN_MS).unwrap();
        }
        assert_eq!(e.irritation(), ESCALATION_THRESHOLD);
    }

    #[test]
    fn test_reset_clears_irritation() {
        let mut e = engine();
        for i in 0..4 {
            e.process("COLLISION", i * DEFAULT_COOLDOWN_MS).unwrap();
        }
        let line = e.process("RESET", 10 * DEFAULT_COOLDOWN_MS).unwrap();
        assert_eq!(e.irritation(), 0);
        // irritation is cleared before the tier is computed
        assert_eq!(line.tier, Tier::LOW);
    }

    #[test]
    fn test_tier_bounds_for_all_intensities() {
        for level in 0..=2u8 {
            let mut e = engine();
            e.set_intensity(level);
            let base = Tier::clamped(level);
            for i in 0..5u64 {
                let line = e.process("COLLISION", i * DEFAULT_COOLDOWN_MS).unwrap();
                assert!(line.tier >= base);
                assert!(line.tier <= base.escalated());
                if e.irritation() < ESCALATION_THRESHOLD {
                    assert_eq!(line.tier, base);
                } else {
                    assert_eq!(line.tier, base.escalated());
                }
            }
        }
    }

    #[test]
    fn test_set_intensity_clamps() {
        let mut e = engine();
        e.set_intensity(5);
        assert_eq!(e.intensity(), Tier::HIGH);
        e.set_intensity(0);
        assert_eq!(e.intensity(), Tier::LOW);
    }

    #[test]
    fn test_set_intensity_during_cooldown() {
        let mut e = engine();
        e.process("BOOT", 0).unwrap();
        e.set_intensity(2);
        assert_eq!(e.intensity(), Tier::HIGH);
        assert!(e.process("BOOT", 1).is_none());
        let line = e.process("BOOT", DEFAULT_COOLDOWN_MS).unwrap();
        assert_eq!(line.tier, Tier::HIGH);
    }

    #[test]
    fn test_missing_tiers_fall_back_to_tier_zero() {
        let bank = LineBank::from_json(r#"{"COLLISION": {"0": ["Ow."]}}"#).unwrap();
        let mut e = ResponseEngine::with_rng(Arc::new(bank), 0, StdRng::seed_from_u64(1));
        e.set_intensity(2);
        for i in 0..5 {
            let line = e.process("COLLISION", i).unwrap();
            assert_eq!(line.text, "Ow.");
            assert_eq!(line.tier, Tier::HIGH);
        }
    }

    #[test]
    fn test_selection_stays_in_pool() {
        let mut e = ResponseEngine::with_rng(
            Arc::new(LineBank::builtin()),
            0,
            StdRng::seed_from_u64(99),
        );
        let pool = e.lines().pool("COLLISION", Tier::LOW).unwrap().to_vec();
        for i in 0..20 {
            // RESET between collisions keeps the tier at LOW
            let line = e.process("COLLISION", i * 2).unwrap();
            assert!(pool.contains(&line.text));
            e.process("RESET", i * 2 + 1).unwrap();
        }
    }

    #[test]
    fn test_state_tier_preview() {
        let mut e = engine();
        e.set_intensity(1);
        for i in 0..3 {
            e.process("STUCK", i * DEFAULT_COOLDOWN_MS).unwrap();
        }
        assert_eq!(e.state().tier(), Tier::HIGH);
    }

    #[test]
    fn test_shared_engine_serialises_access() {
        let shared = SharedEngine::new(engine());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    shared.set_intensity(i);
                    shared.process("FOO", 0)
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap().is_none());
        }
        assert!(shared.process("BOOT", 0).is_some());
        assert_eq!(shared.state().last_spoke_at, Some(0));
    }
}
