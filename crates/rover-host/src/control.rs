use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;

use rover_assets::{Spoken, Voice};
use rover_core::{Clock, EventKind, ResponseEngine, SelectedLine};

use crate::error::HostError;
use crate::serial::EventSource;
use crate::switch::{SwitchInput, SwitchWatcher};

const DEFAULT_LOOP_DELAY: Duration = Duration::from_millis(50);
const DEFAULT_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// What an event source had to offer on one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Event(EventKind),
    Idle,
    Closed,
}

/// Outcome of one pass through the loop.
#[derive(Debug, Default)]
pub struct Tick {
    pub spoken: Vec<(SelectedLine, Spoken)>,
    pub closed: bool,
}

/// The rover's main loop: poll the switch, poll the event source, speak.
///
/// Switch changes set the engine's intensity and announce `MODE_SWITCH`.
/// Errors in a pass are logged and followed by a backoff; the loop only
/// stops when the event source closes.
pub struct ControlLoop<S, E, C, R = StdRng> {
    engine: ResponseEngine<R>,
    voice: Voice<R>,
    switch: SwitchWatcher<S>,
    events: E,
    clock: C,
    loop_delay: Duration,
    error_backoff: Duration,
}

impl<S, E, C, R> ControlLoop<S, E, C, R>
where
    S: SwitchInput,
    E: EventSource,
    C: Clock,
    R: Rng,
{
    pub fn new(
        engine: ResponseEngine<R>,
        voice: Voice<R>,
        switch: SwitchWatcher<S>,
        events: E,
        clock: C,
    ) -> Self {
        Self {
            engine,
            voice,
            switch,
            events,
            clock,
            loop_delay: DEFAULT_LOOP_DELAY,
            error_backoff: DEFAULT_ERROR_BACKOFF,
        }
    }

    pub fn with_timing(mut self, loop_delay: Duration, error_backoff: Duration) -> Self {
        self.loop_delay = loop_delay;
        self.error_backoff = error_backoff;
        self
    }

    /// Adopt the switch position as intensity and announce `BOOT`.
    pub fn start(&mut self) -> Result<Option<(SelectedLine, Spoken)>, HostError> {
        let position = self.switch.position();
        self.engine.set_intensity(position.level());
        tracing::info!("Control loop starting, switch at {position}");
        self.announce(&EventKind::BOOT)
    }

    /// One pass: the switch, then the event source. Both are always polled;
    /// the first error is returned after the pass.
    pub fn tick(&mut self) -> Result<Tick, HostError> {
        let mut tick = Tick::default();
        let switched = self.poll_switch(&mut tick);
        let polled = self.poll_events(&mut tick);
        switched.and(polled).map(|()| tick)
    }

    fn poll_switch(&mut self, tick: &mut Tick) -> Result<(), HostError> {
        if let Some(position) = self.switch.read_if_changed()? {
            self.engine.set_intensity(position.level());
            tick.spoken.extend(self.announce(&EventKind::MODE_SWITCH)?);
        }
        Ok(())
    }

    fn poll_events(&mut self, tick: &mut Tick) -> Result<(), HostError> {
        match self.events.poll_event()? {
            Input::Event(event) => tick.spoken.extend(self.announce(&event)?),
            Input::Idle => {}
            Input::Closed => tick.closed = true,
        }
        Ok(())
    }

    /// Run until the event source closes, reporting every spoken line.
    pub fn run_with<F>(&mut self, mut on_line: F)
    where
        F: FnMut(&SelectedLine, &Spoken),
    {
        match self.start() {
            Ok(Some((line, spoken))) => on_line(&line, &spoken),
            Ok(None) => {}
            Err(e) => tracing::warn!("Boot announcement failed: {e}"),
        }

        loop {
            match self.tick() {
                Ok(tick) => {
                    for (line, spoken) in &tick.spoken {
                        on_line(line, spoken);
                    }
                    if tick.closed {
                        tracing::info!("Event source closed, stopping");
                        return;
                    }
                    thread::sleep(self.loop_delay);
                }
                Err(e) => {
                    tracing::warn!("Control loop error: {e}");
                    thread::sleep(self.error_backoff);
                }
            }
        }
    }

    pub fn run(&mut self) {
        self.run_with(|_, _| {});
    }

    fn announce(&mut self, event: &EventKind) -> Result<Option<(SelectedLine, Spoken)>, HostError> {
        let Some(line) = self.engine.process(event.as_str(), self.clock.now_ms()) else {
            return Ok(None);
        };
        tracing::info!(event = %line.event, tier = %line.tier, "{}", line.text);
        let spoken = self.voice.speak(&line)?;
        Ok(Some((line, spoken)))
    }

    pub fn engine(&self) -> &ResponseEngine<R> {
        &self.engine
    }
}
