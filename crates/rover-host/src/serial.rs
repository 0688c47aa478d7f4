use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use rover_core::EventKind;

use crate::control::Input;
use crate::error::HostError;

/// Splits a byte stream into newline-terminated event names.
///
/// Lines are trimmed and upper-cased; blank lines are skipped and a line
/// that is not valid UTF-8 is dropped.
#[derive(Debug, Default)]
pub struct EventFramer {
    buffer: Vec<u8>,
}

impl EventFramer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Next complete event, if a full line has arrived.
    pub fn next_event(&mut self) -> Option<EventKind> {
        while let Some(end) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=end).collect();
            match std::str::from_utf8(&line) {
                Ok(text) if !text.trim().is_empty() => {
                    let event = EventKind::new(text);
                    tracing::debug!("Received event: {event}");
                    return Some(event);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Dropping undecodable serial line: {e}"),
            }
        }
        None
    }

    /// Bytes of an incomplete line still waiting for its newline.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        tracing::debug!("Serial buffer flushed");
    }
}

/// Anything the control loop can pull events from.
pub trait EventSource {
    fn poll_event(&mut self) -> Result<Input, HostError>;
}

/// Reads framed events from a byte source such as a UART device or stdin.
pub struct EventReader<R> {
    inner: R,
    framer: EventFramer,
    eof: bool,
}

impl<R: Read> EventReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            framer: EventFramer::new(),
            eof: false,
        }
    }

    /// Block until an event arrives. `None` once the source is exhausted; an
    /// unterminated last line still counts.
    pub fn next_event(&mut self) -> Result<Option<EventKind>, HostError> {
        let mut buf = [0u8; 256];
        loop {
            if let Some(event) = self.framer.next_event() {
                return Ok(Some(event));
            }
            if self.eof {
                return Ok(None);
            }
            match self.inner.read(&mut buf) {
                Ok(0) => {
                    self.eof = true;
                    if self.framer.pending() > 0 {
                        self.framer.push(b"\n");
                    }
                }
                Ok(n) => self.framer.push(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> EventSource for EventReader<R> {
    fn poll_event(&mut self) -> Result<Input, HostError> {
        Ok(match self.next_event()? {
            Some(event) => Input::Event(event),
            None => Input::Closed,
        })
    }
}

/// Reads events on a background thread so that polling never blocks.
///
/// The control loop keeps watching the switch while the line is quiet. A
/// read error is delivered once, after which the source reports closed.
pub struct BackgroundReader {
    events: Receiver<Result<EventKind, HostError>>,
}

impl BackgroundReader {
    pub fn spawn<R: Read + Send + 'static>(inner: R) -> Self {
        let (tx, events) = mpsc::channel();
        thread::spawn(move || {
            let mut reader = EventReader::new(inner);
            loop {
                match reader.next_event() {
                    Ok(Some(event)) => {
                        if tx.send(Ok(event)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        break;
                    }
                }
            }
            tracing::debug!("Event reader thread finished");
        });
        Self { events }
    }
}

impl EventSource for BackgroundReader {
    fn poll_event(&mut self) -> Result<Input, HostError> {
        match self.events.try_recv() {
            Ok(event) => event.map(Input::Event),
            Err(TryRecvError::Empty) => Ok(Input::Idle),
            Err(TryRecvError::Disconnected) => Ok(Input::Closed),
        }
    }
}
