use std::cell::Cell;
use std::time::Instant;

/// Monotonic milliseconds since an arbitrary, per-clock origin.
pub type Millis = u64;

/// Source of monotonic time for the engine's cooldown gate.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

/// Wall-clock independent time, anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> Millis {
        // u128 -> u64 only overflows after ~584 million years of uptime
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Hand-driven clock for tests and scripted replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Millis) {
        self.now.set(self.now.get().saturating_add(by));
    }

    pub fn set(&self, to: Millis) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(100);
        clock.advance(50);
        assert_eq!(clock.now_ms(), 150);
        clock.set(10);
        assert_eq!(clock.now_ms(), 10);
        clock.advance(u64::MAX);
        assert_eq!(clock.now_ms(), u64::MAX);
    }
}
