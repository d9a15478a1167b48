// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic doubles for the backend traits.

use alloc::vec;
use alloc::vec::Vec;

use crate::backend::{EventLoop, Presenter, TimerHandle, Wakeup};
use crate::carousel::Carousel;
use crate::config::CarouselConfig;
use crate::id::CarouselId;
use crate::marker::SlideMarker;
use crate::slide::SlideRegistry;
use crate::time::{Duration, HostTime};
use crate::trace::Tracer;

/// One presenter call, with one entry per marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    Add(usize, SlideMarker),
    Remove(usize, SlideMarker),
    ClearStacking(usize),
    Flush(usize),
    Indicator(usize, bool),
}

/// A [`Presenter`] that keeps marker sets in memory and logs every call.
#[derive(Debug)]
pub(crate) struct RecordingPresenter {
    markers: Vec<Vec<SlideMarker>>,
    indicators: Vec<bool>,
    indicator_writes: usize,
    log: Vec<Op>,
}

impl RecordingPresenter {
    /// Creates a presenter for `len` slides with indicator 0 already active.
    pub(crate) fn new(len: usize) -> Self {
        let mut indicators = vec![false; len];
        if let Some(first) = indicators.first_mut() {
            *first = true;
        }
        Self {
            markers: vec![Vec::new(); len],
            indicators,
            indicator_writes: 0,
            log: Vec::new(),
        }
    }

    /// Markers currently on `slide`, in [`SlideMarker::ALL`] order.
    pub(crate) fn markers(&self, slide: usize) -> Vec<SlideMarker> {
        let present = &self.markers[slide];
        SlideMarker::ALL
            .into_iter()
            .filter(|m| present.contains(m))
            .collect()
    }

    pub(crate) fn has(&self, slide: usize, marker: SlideMarker) -> bool {
        self.markers[slide].contains(&marker)
    }

    pub(crate) fn active_indicators(&self) -> Vec<usize> {
        self.indicators
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(i))
            .collect()
    }

    pub(crate) fn indicator_writes(&self) -> usize {
        self.indicator_writes
    }

    pub(crate) fn log(&self) -> &[Op] {
        &self.log
    }

    pub(crate) fn clear_log(&mut self) {
        self.log.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn add_markers(&mut self, slide: usize, markers: &[SlideMarker]) {
        for &marker in markers {
            self.log.push(Op::Add(slide, marker));
            let set = &mut self.markers[slide];
            if !set.contains(&marker) {
                set.push(marker);
            }
        }
    }

    fn remove_markers(&mut self, slide: usize, markers: &[SlideMarker]) {
        for &marker in markers {
            self.log.push(Op::Remove(slide, marker));
            self.markers[slide].retain(|m| *m != marker);
        }
    }

    fn clear_stacking(&mut self, slide: usize) {
        self.log.push(Op::ClearStacking(slide));
    }

    fn flush_layout(&mut self, slide: usize) {
        self.log.push(Op::Flush(slide));
    }

    fn set_indicator(&mut self, index: usize, active: bool) {
        self.log.push(Op::Indicator(index, active));
        self.indicator_writes += 1;
        self.indicators[index] = active;
    }
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    handle: TimerHandle,
    due: HostTime,
    period: Option<Duration>,
    wakeup: Wakeup,
}

/// An [`EventLoop`] with a manual clock.
///
/// Frames queue until [`take_frames`](Self::take_frames); timers fire only
/// through [`pop_due`](Self::pop_due).
#[derive(Debug, Default)]
pub(crate) struct VirtualLoop {
    now: HostTime,
    next_handle: u32,
    frames: Vec<Wakeup>,
    timers: Vec<Timer>,
}

impl VirtualLoop {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_now(&mut self, now: HostTime) {
        self.now = now;
    }

    /// Timers of either kind that are still armed.
    pub(crate) fn armed_timers(&self) -> usize {
        self.timers.len()
    }

    pub(crate) fn armed_intervals(&self) -> usize {
        self.timers.iter().filter(|t| t.period.is_some()).count()
    }

    pub(crate) fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn take_frames(&mut self) -> Vec<Wakeup> {
        core::mem::take(&mut self.frames)
    }

    /// Fires the earliest timer due at or before `until`.
    ///
    /// The clock moves to the timer's due time. Intervals are rescheduled,
    /// timeouts disarmed. Ties fire in arming order.
    pub(crate) fn pop_due(&mut self, until: HostTime) -> Option<Wakeup> {
        let (slot, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.handle.0))?;
        let timer = self.timers[slot];
        self.now = timer.due;
        match timer.period {
            Some(period) => self.timers[slot].due = timer.due + period,
            None => {
                self.timers.remove(slot);
            }
        }
        Some(timer.wakeup)
    }

    fn arm(&mut self, delay: Duration, period: Option<Duration>, wakeup: Wakeup) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.timers.push(Timer {
            handle,
            due: self.now + delay,
            period,
            wakeup,
        });
        handle
    }
}

impl EventLoop for VirtualLoop {
    fn now(&self) -> HostTime {
        self.now
    }

    fn request_frame(&mut self, wakeup: Wakeup) {
        self.frames.push(wakeup);
    }

    fn set_timeout(&mut self, delay: Duration, wakeup: Wakeup) -> TimerHandle {
        self.arm(delay, None, wakeup)
    }

    fn set_interval(&mut self, period: Duration, wakeup: Wakeup) -> TimerHandle {
        self.arm(period, Some(period), wakeup)
    }

    fn clear_timer(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }
}

pub(crate) type TestCarousel = Carousel<RecordingPresenter, VirtualLoop>;

pub(crate) fn carousel(len: usize) -> TestCarousel {
    carousel_with(len, CarouselConfig::web())
}

pub(crate) fn carousel_with(len: usize, config: CarouselConfig) -> TestCarousel {
    build(len, config, Tracer::none())
}

fn build(len: usize, config: CarouselConfig, tracer: Tracer) -> TestCarousel {
    let registry = SlideRegistry::with_len(len).unwrap();
    Carousel::new(
        CarouselId(0),
        registry,
        RecordingPresenter::new(len),
        VirtualLoop::new(),
        config,
        tracer,
    )
}

/// Delivers every queued frame callback once.
pub(crate) fn run_frame(c: &mut TestCarousel) {
    for wakeup in c.event_loop_mut().take_frames() {
        c.wake(wakeup);
    }
}

/// Drives the in-flight transition, if any, through frames and its
/// completion timer. Timers due earlier fire first.
pub(crate) fn finish_transition(c: &mut TestCarousel) {
    while c.in_flight() {
        if c.event_loop().pending_frames() > 0 {
            run_frame(c);
        } else if let Some(wakeup) = c.event_loop_mut().pop_due(HostTime(u64::MAX)) {
            c.wake(wakeup);
        } else {
            panic!("transition in flight with nothing scheduled");
        }
    }
}

impl TestCarousel {
    /// Moves the clock forward, firing every timer that falls due.
    pub(crate) fn advance_time(&mut self, by: Duration) {
        let until = self.event_loop().now() + by;
        while let Some(wakeup) = self.event_loop_mut().pop_due(until) {
            self.wake(wakeup);
        }
        self.event_loop_mut().set_now(until);
    }
}

#[cfg(feature = "trace")]
pub(crate) use traced::{SharedLog, TraceEntry, carousel_traced};

#[cfg(feature = "trace")]
mod traced {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::{TestCarousel, build};
    use crate::config::CarouselConfig;
    use crate::trace::{DroppedEvent, PhaseEvent, PhaseKind, TraceSink, Tracer};
    use crate::transition::DropReason;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) enum TraceEntry {
        Phase(PhaseKind),
        Dropped(DropReason),
    }

    #[derive(Clone, Debug, Default)]
    pub(crate) struct SharedLog(Rc<RefCell<Vec<TraceEntry>>>);

    impl SharedLog {
        pub(crate) fn entries(&self) -> Vec<TraceEntry> {
            self.0.borrow().clone()
        }
    }

    impl TraceSink for SharedLog {
        fn on_phase(&mut self, e: &PhaseEvent) {
            self.0.borrow_mut().push(TraceEntry::Phase(e.phase));
        }

        fn on_dropped(&mut self, e: &DroppedEvent) {
            self.0.borrow_mut().push(TraceEntry::Dropped(e.reason));
        }
    }

    pub(crate) fn carousel_traced(len: usize, log: SharedLog) -> TestCarousel {
        build(len, CarouselConfig::web(), Tracer::new(Box::new(log)))
    }
}
