// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for carousel instances.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Carousel`](crate::carousel::Carousel) calls as requests are accepted or
//! dropped, protocol phases run, autoplay changes state, and input arrives.
//! All method bodies default to no-ops, so implementing only the events you
//! care about is fine.
//!
//! [`Tracer`] owns an optional boxed sink. When the `trace` feature is
//! **off**, every `Tracer` method compiles to nothing and the sink is dropped
//! on construction. When **on**, each method performs a single `Option`
//! branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use alloc::boxed::Box;

use crate::autoplay::PauseReason;
use crate::id::CarouselId;
use crate::input::{Command, InputSource};
use crate::marker::Direction;
use crate::time::HostTime;
use crate::transition::DropReason;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which phase of the transition protocol ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// All markers and stacking overrides stripped from every slide.
    Reset,
    /// `exiting` / `entering` applied.
    Mark,
    /// Synchronous style computation forced.
    Flush,
    /// Directional markers applied after the frame deferral.
    Direction,
    /// Indicators moved to the target.
    IndicatorSync,
    /// Transient markers stripped and the target committed.
    Complete,
}

/// What happened to the autoplay scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AutoplayEventKind {
    /// A repeating timer was armed.
    Started {
        /// Epoch of the new timer.
        epoch: u32,
    },
    /// The repeating timer was cancelled.
    Stopped {
        /// Epoch of the cancelled timer.
        epoch: u32,
    },
    /// A pause reason was added.
    Paused(PauseReason),
    /// A pause reason was removed.
    Resumed(PauseReason),
    /// The timer ticked.
    Tick {
        /// Whether the tick requested an advance (the pause set was empty).
        acted: bool,
    },
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a transition is accepted.
#[derive(Clone, Copy, Debug)]
pub struct RequestEvent {
    /// Which carousel.
    pub carousel: CarouselId,
    /// Serial of the new transition.
    pub serial: u64,
    /// Slide being left.
    pub from: usize,
    /// Slide being entered.
    pub to: usize,
    /// Direction pair chosen from the entering slide's hint.
    pub direction: Direction,
    /// Host time of acceptance.
    pub at: HostTime,
}

/// Emitted when a navigation request is dropped.
#[derive(Clone, Copy, Debug)]
pub struct DroppedEvent {
    /// Which carousel.
    pub carousel: CarouselId,
    /// Normalized target of the request.
    pub target: usize,
    /// Committed slide at the time of the request.
    pub current: usize,
    /// Why the request was dropped.
    pub reason: DropReason,
    /// Host time of the request.
    pub at: HostTime,
}

/// Emitted as each protocol phase runs.
#[derive(Clone, Copy, Debug)]
pub struct PhaseEvent {
    /// Which carousel.
    pub carousel: CarouselId,
    /// Serial of the transition.
    pub serial: u64,
    /// Which phase ran.
    pub phase: PhaseKind,
    /// Host time when the phase ran.
    pub at: HostTime,
}

/// Emitted when a transition's completion phase commits the target.
#[derive(Clone, Copy, Debug)]
pub struct CompletedEvent {
    /// Which carousel.
    pub carousel: CarouselId,
    /// Serial of the transition.
    pub serial: u64,
    /// Slide that was left.
    pub from: usize,
    /// Slide now committed.
    pub to: usize,
    /// Whether completion was forced by teardown rather than the timer.
    pub settled_early: bool,
    /// Host time of completion.
    pub at: HostTime,
}

/// Emitted on autoplay state changes and ticks.
#[derive(Clone, Copy, Debug)]
pub struct AutoplayEvent {
    /// Which carousel.
    pub carousel: CarouselId,
    /// What happened.
    pub kind: AutoplayEventKind,
    /// Host time of the change.
    pub at: HostTime,
}

/// Emitted when an input adapter produces a navigation command.
#[derive(Clone, Copy, Debug)]
pub struct InputEvent {
    /// Which carousel.
    pub carousel: CarouselId,
    /// Which adapter produced the command.
    pub source: InputSource,
    /// The command.
    pub command: Command,
    /// Host time of the input.
    pub at: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from carousel instances.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a transition is accepted.
    fn on_request(&mut self, e: &RequestEvent) {
        _ = e;
    }

    /// Called when a navigation request is dropped.
    fn on_dropped(&mut self, e: &DroppedEvent) {
        _ = e;
    }

    /// Called as each protocol phase runs.
    fn on_phase(&mut self, e: &PhaseEvent) {
        _ = e;
    }

    /// Called when a transition completes.
    fn on_completed(&mut self, e: &CompletedEvent) {
        _ = e;
    }

    /// Called on autoplay state changes and ticks.
    fn on_autoplay(&mut self, e: &AutoplayEvent) {
        _ = e;
    }

    /// Called when an input adapter produces a command.
    fn on_input(&mut self, e: &InputEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional boxed [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::none()
    }
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            drop(sink);
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {}
        }
    }

    /// Emits a [`RequestEvent`].
    #[inline]
    pub fn request(&mut self, e: &RequestEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_request(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DroppedEvent`].
    #[inline]
    pub fn dropped(&mut self, e: &DroppedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_dropped(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseEvent`].
    #[inline]
    pub fn phase(&mut self, e: &PhaseEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CompletedEvent`].
    #[inline]
    pub fn completed(&mut self, e: &CompletedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_completed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AutoplayEvent`].
    #[inline]
    pub fn autoplay(&mut self, e: &AutoplayEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_autoplay(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`InputEvent`].
    #[inline]
    pub fn input(&mut self, e: &InputEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_input(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> RequestEvent {
        RequestEvent {
            carousel: CarouselId(0),
            serial: 1,
            from: 0,
            to: 1,
            direction: Direction::Vertical,
            at: HostTime(1_000),
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_request(&sample_request());
        sink.on_autoplay(&AutoplayEvent {
            carousel: CarouselId(0),
            kind: AutoplayEventKind::Tick { acted: false },
            at: HostTime(0),
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.request(&sample_request());
        tracer.phase(&PhaseEvent {
            carousel: CarouselId(0),
            serial: 1,
            phase: PhaseKind::Reset,
            at: HostTime(0),
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::rc::Rc;
        use alloc::vec::Vec;
        use core::cell::RefCell;

        struct SharedSink(Rc<RefCell<Vec<u64>>>);
        impl TraceSink for SharedSink {
            fn on_request(&mut self, e: &RequestEvent) {
                self.0.borrow_mut().push(e.serial);
            }
        }

        let serials = Rc::new(RefCell::new(Vec::new()));
        let mut tracer = Tracer::new(Box::new(SharedSink(Rc::clone(&serials))));
        tracer.request(&sample_request());
        assert_eq!(*serials.borrow(), [1]);
    }
}
