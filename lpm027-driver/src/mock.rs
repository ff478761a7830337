//! Recording test doubles for the transport, control lines and delay
//!
//! All three append to one shared log so tests can assert on the exact
//! interleaving of line changes, transmits and waits.

use std::sync::{Arc, Mutex};

use embedded_hal::delay::DelayNs;
use lpm027_hal::{ControlLine, ControlLines, SerialTransport};

/// One observed hardware interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Line(ControlLine, bool),
    Transmit(Vec<u8>),
    DelayMs(u32),
    DelayUs(u32),
    DelayNs(u32),
}

/// Shared event log
#[derive(Debug, Clone, Default)]
pub struct Log(Arc<Mutex<Vec<Event>>>);

impl Log {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    pub fn transmits(&self) -> Vec<Vec<u8>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Transmit(bytes) => Some(bytes),
                _ => None,
            })
            .collect()
    }

    /// Number of chip-select assertions
    pub fn cs_asserts(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| **e == Event::Line(ControlLine::ChipSelect, true))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

type FailWhen = Box<dyn Fn(usize, &[u8]) -> bool + Send>;

/// Transport that records every transmit
///
/// `fail_when(call_index, bytes)` decides whether a call fails. Failed
/// calls are not logged.
pub struct MockTransport {
    log: Log,
    calls: usize,
    fail_when: FailWhen,
}

impl MockTransport {
    pub fn new(log: Log) -> Self {
        Self::failing(log, |_, _| false)
    }

    pub fn failing(log: Log, fail_when: impl Fn(usize, &[u8]) -> bool + Send + 'static) -> Self {
        Self {
            log,
            calls: 0,
            fail_when: Box::new(fail_when),
        }
    }
}

impl SerialTransport for MockTransport {
    type Error = BusFault;

    fn transmit(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let call = self.calls;
        self.calls += 1;
        if (self.fail_when)(call, data) {
            return Err(BusFault);
        }
        self.log.push(Event::Transmit(data.to_vec()));
        Ok(())
    }
}

/// Control lines that record every level change
pub struct MockLines {
    log: Log,
    fail_on: Option<(ControlLine, bool)>,
}

impl MockLines {
    pub fn new(log: Log) -> Self {
        Self { log, fail_on: None }
    }

    /// Fail whenever `line` is driven to `high`
    pub fn failing(log: Log, line: ControlLine, high: bool) -> Self {
        Self {
            log,
            fail_on: Some((line, high)),
        }
    }
}

impl ControlLines for MockLines {
    type Error = PinFault;

    fn set(&mut self, line: ControlLine, high: bool) -> Result<(), Self::Error> {
        if self.fail_on == Some((line, high)) {
            return Err(PinFault);
        }
        self.log.push(Event::Line(line, high));
        Ok(())
    }
}

/// Delay that records the requested wait without sleeping
pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: Log) -> Self {
        Self { log }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Event::DelayMs(ms));
    }
}

/// A well-behaved transport, line set and delay sharing `log`
pub fn hardware(log: &Log) -> (MockTransport, MockLines, MockDelay) {
    (
        MockTransport::new(log.clone()),
        MockLines::new(log.clone()),
        MockDelay::new(log.clone()),
    )
}
