//! Event sinks - where the engine reports what happened
//!
//! The engine calls [`EventSink::emit`] and moves on. Audio cues, logging and
//! statistics are all just sinks.

use std::io::{self, Write};

use crate::types::GameEvent;

/// Fire-and-forget receiver of engine events.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}

/// Records every event in order.
impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Per-event counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventCounts {
    counts: [u32; GameEvent::ALL.len()],
}

impl EventCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, event: GameEvent) -> u32 {
        self.counts[event.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn reset(&mut self) {
        self.counts = [0; GameEvent::ALL.len()];
    }
}

impl EventSink for EventCounts {
    fn emit(&mut self, event: GameEvent) {
        let slot = &mut self.counts[event.index()];
        *slot = slot.saturating_add(1);
    }
}

/// Writes one `[Engine] <event>` line per event.
///
/// Write failures are ignored; logging never affects the game.
#[derive(Debug)]
pub struct EventLog<W: Write = io::Stderr> {
    out: W,
}

impl EventLog<io::Stderr> {
    pub fn stderr() -> Self {
        Self { out: io::stderr() }
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for EventLog<W> {
    fn emit(&mut self, event: GameEvent) {
        let _ = writeln!(self.out, "[Engine] {}", event.as_str());
    }
}
