// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel instance.
//!
//! [`Carousel`] wires one [`TransitionEngine`], one [`IndicatorSet`], and one
//! [`Autoplay`] scheduler to a [`Presenter`] and an [`EventLoop`]. It is the
//! only thing backends talk to, and every input funnels through the same two
//! verbs: [`request_show`](Carousel::request_show) and
//! [`reset_autoplay`](Carousel::reset_autoplay).
//!
//! # Event flow
//!
//! ```text
//!   touch / key / indicator / control ──► dispatch(Command)
//!                                              │
//!   autoplay tick ──► advance ──┐              ├──► request_show ──► engine
//!                               │              └──► reset_autoplay
//!                               ▼
//!   EventLoop ──► wake(Frame | Completion | Autoplay)
//! ```
//!
//! Instances share nothing, so any number of carousels can live on one page.

use kurbo::Point;

use crate::autoplay::{Autoplay, PauseReason, PauseReasons, TickOutcome};
use crate::backend::{EventLoop, Presenter, TimerHandle, Wakeup};
use crate::config::CarouselConfig;
use crate::id::CarouselId;
use crate::indicator::IndicatorSet;
use crate::input::{Command, InputSource, Key, Lifecycle, SwipeTracker};
use crate::marker::SlideMarker;
use crate::slide::SlideRegistry;
use crate::trace::{
    AutoplayEvent, AutoplayEventKind, CompletedEvent, DroppedEvent, InputEvent, PhaseEvent,
    PhaseKind, RequestEvent, Tracer,
};
use crate::transition::{Completed, FrameStep, Request, TransitionEngine};

/// One carousel region.
pub struct Carousel<P, L> {
    id: CarouselId,
    config: CarouselConfig,
    engine: TransitionEngine,
    indicators: IndicatorSet,
    autoplay: Autoplay,
    swipe: SwipeTracker,
    completion_timer: Option<TimerHandle>,
    presenter: P,
    event_loop: L,
    tracer: Tracer,
}

impl<P, L> core::fmt::Debug for Carousel<P, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Carousel")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("engine", &self.engine)
            .field("indicators", &self.indicators)
            .field("autoplay", &self.autoplay)
            .field("swipe", &self.swipe)
            .field("completion_timer", &self.completion_timer)
            .field("presenter", &"P")
            .field("event_loop", &"L")
            .field("tracer", &self.tracer)
            .finish()
    }
}

impl<P: Presenter, L: EventLoop> Carousel<P, L> {
    /// Creates a carousel and performs its initial setup.
    ///
    /// The first slide is marked active without animation and autoplay is
    /// started. The presenter's indicators are expected to already show the
    /// first one as active (see
    /// [`IndicatorAttributes`](crate::indicator::IndicatorAttributes)).
    pub fn new(
        id: CarouselId,
        registry: SlideRegistry,
        mut presenter: P,
        event_loop: L,
        config: CarouselConfig,
        tracer: Tracer,
    ) -> Self {
        presenter.add_markers(0, &[SlideMarker::Active]);
        let mut carousel = Self {
            id,
            config,
            indicators: IndicatorSet::new(registry.len()),
            engine: TransitionEngine::new(registry),
            autoplay: Autoplay::new(config.slide_interval, config.autoplay),
            swipe: SwipeTracker::new(config.swipe_threshold_px),
            completion_timer: None,
            presenter,
            event_loop,
            tracer,
        };
        carousel.start_autoplay();
        carousel
    }

    // -- observers ----------------------------------------------------------

    /// Returns this instance's identifier.
    #[must_use]
    pub fn id(&self) -> CarouselId {
        self.id
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Returns the slide registry.
    #[must_use]
    pub fn registry(&self) -> &SlideRegistry {
        self.engine.registry()
    }

    /// Returns the transition engine.
    #[must_use]
    pub fn engine(&self) -> &TransitionEngine {
        &self.engine
    }

    /// Returns the committed slide index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.engine.current_index()
    }

    /// Returns the target of the in-flight transition, if any.
    #[must_use]
    pub fn pending_index(&self) -> Option<usize> {
        self.engine.pending_index()
    }

    /// Returns `true` while a transition is in flight.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.engine.in_flight()
    }

    /// Returns the index of the active indicator.
    #[must_use]
    pub fn active_indicator(&self) -> usize {
        self.indicators.active()
    }

    /// Returns `true` while the autoplay timer is armed.
    #[must_use]
    pub fn is_autoplay_running(&self) -> bool {
        self.autoplay.is_running()
    }

    /// Returns the current autoplay pause reasons.
    #[must_use]
    pub fn pause_reasons(&self) -> PauseReasons {
        self.autoplay.pause_reasons()
    }

    /// Returns the presenter.
    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Returns the event loop.
    #[must_use]
    pub fn event_loop(&self) -> &L {
        &self.event_loop
    }

    /// Returns the event loop mutably.
    pub fn event_loop_mut(&mut self) -> &mut L {
        &mut self.event_loop
    }

    // -- navigation ---------------------------------------------------------

    /// Requests a transition to `target`, wrapped onto the slide range.
    ///
    /// Returns immediately; the protocol finishes through later
    /// [`wake`](Self::wake) calls. Requests for the committed slide and
    /// requests made while a transition is in flight are dropped.
    pub fn request_show(&mut self, target: isize) -> Request {
        let at = self.event_loop.now();
        let request = self.engine.request_show(target, &mut self.presenter);
        match request {
            Request::Dropped { target, reason } => {
                self.tracer.dropped(&DroppedEvent {
                    carousel: self.id,
                    target,
                    current: self.engine.current_index(),
                    reason,
                    at,
                });
            }
            Request::Accepted(accepted) => {
                let serial = accepted.serial;
                self.tracer.request(&RequestEvent {
                    carousel: self.id,
                    serial,
                    from: accepted.from,
                    to: accepted.to,
                    direction: accepted.direction,
                    at,
                });
                for phase in [PhaseKind::Reset, PhaseKind::Mark, PhaseKind::Flush] {
                    self.trace_phase(serial, phase, at);
                }

                self.event_loop.request_frame(Wakeup::Frame { serial });

                self.indicators.set_active(accepted.to, &mut self.presenter);
                self.trace_phase(serial, PhaseKind::IndicatorSync, at);

                let handle = self
                    .event_loop
                    .set_timeout(self.config.completion_delay(), Wakeup::Completion { serial });
                self.completion_timer = Some(handle);
            }
        }
        request
    }

    /// Requests the slide after the committed one.
    pub fn advance(&mut self) -> Request {
        let target = self.registry().next(self.current_index());
        self.request_show(target as isize)
    }

    /// Requests the slide before the committed one.
    pub fn retreat(&mut self) -> Request {
        let target = self.registry().previous(self.current_index());
        self.request_show(target as isize)
    }

    /// Restarts the autoplay countdown so the next automatic advance is a
    /// full interval away.
    pub fn reset_autoplay(&mut self) {
        self.stop_autoplay();
        self.start_autoplay();
    }

    /// Runs a navigation command from an input adapter, then resets autoplay.
    pub fn dispatch(&mut self, command: Command, source: InputSource) -> Request {
        self.tracer.input(&InputEvent {
            carousel: self.id,
            source,
            command,
            at: self.event_loop.now(),
        });
        let request = match command {
            Command::Show(index) => self.request_show(index as isize),
            Command::Advance => self.advance(),
            Command::Retreat => self.retreat(),
        };
        self.reset_autoplay();
        request
    }

    // -- input adapters -----------------------------------------------------

    /// Records the start of a touch.
    pub fn touch_start(&mut self, at: Point) {
        self.swipe.touch_start(at);
    }

    /// Finishes a touch. Returns the navigation outcome if it was a swipe.
    pub fn touch_end(&mut self, at: Point) -> Option<Request> {
        let command = self.swipe.touch_end(at)?;
        Some(self.dispatch(command, InputSource::Touch))
    }

    /// Handles a key press on the carousel region.
    ///
    /// Returns `Some` when the key was consumed; the host should then
    /// suppress its default action.
    pub fn key(&mut self, key: Key, focus_within: bool) -> Option<Request> {
        let command = key.navigation(focus_within)?;
        Some(self.dispatch(command, InputSource::Keyboard))
    }

    /// Handles activation (click) of the indicator at `index`.
    pub fn indicator_activated(&mut self, index: usize) -> Request {
        self.dispatch(Command::Show(index), InputSource::Indicator)
    }

    /// Handles a key press on the indicator at `index`.
    ///
    /// Returns `Some` when the key activated the indicator; the host should
    /// then suppress its default action.
    pub fn indicator_key(&mut self, index: usize, key: Key) -> Option<Request> {
        if !key.activates() {
            return None;
        }
        Some(self.indicator_activated(index))
    }

    /// Handles a click on a previous/next control.
    pub fn control(&mut self, command: Command) -> Request {
        self.dispatch(command, InputSource::Control)
    }

    /// Handles hover, visibility, and teardown events.
    pub fn lifecycle(&mut self, event: Lifecycle) {
        match event {
            Lifecycle::PointerEnter => self.pause(PauseReason::Hover),
            Lifecycle::PointerLeave => self.resume(PauseReason::Hover),
            Lifecycle::Hidden => {
                self.pause(PauseReason::Hidden);
                self.stop_autoplay();
            }
            Lifecycle::Visible => {
                self.resume(PauseReason::Hidden);
                self.start_autoplay();
            }
            Lifecycle::Teardown => {
                self.stop_autoplay();
                self.swipe.cancel();
                self.settle();
            }
        }
    }

    // -- deferred continuations ---------------------------------------------

    /// Delivers a deferred continuation scheduled through the event loop.
    pub fn wake(&mut self, wakeup: Wakeup) {
        match wakeup {
            Wakeup::Frame { serial } => match self.engine.on_frame(serial, &mut self.presenter) {
                FrameStep::Deferred => self.event_loop.request_frame(Wakeup::Frame { serial }),
                FrameStep::Directed => {
                    let at = self.event_loop.now();
                    self.trace_phase(serial, PhaseKind::Direction, at);
                }
                FrameStep::Stale => {}
            },
            Wakeup::Completion { serial } => {
                if let Some(done) = self.engine.complete(serial, &mut self.presenter) {
                    self.completion_timer = None;
                    self.trace_completed(done, false);
                }
            }
            Wakeup::Autoplay { epoch } => {
                let outcome = self.autoplay.on_tick(epoch);
                if outcome == TickOutcome::Stale {
                    return;
                }
                let acted = outcome == TickOutcome::Advance;
                self.trace_autoplay(AutoplayEventKind::Tick { acted });
                if acted {
                    self.advance();
                }
            }
        }
    }

    /// Completes the in-flight transition now and cancels its completion
    /// timer.
    pub fn settle(&mut self) -> Option<Completed> {
        let done = self.engine.settle(&mut self.presenter)?;
        if let Some(handle) = self.completion_timer.take() {
            self.event_loop.clear_timer(handle);
        }
        self.trace_completed(done, true);
        Some(done)
    }

    // -- helpers ------------------------------------------------------------

    fn start_autoplay(&mut self) {
        if let Some(epoch) = self.autoplay.start(&mut self.event_loop) {
            self.trace_autoplay(AutoplayEventKind::Started { epoch });
        }
    }

    fn stop_autoplay(&mut self) {
        if let Some(epoch) = self.autoplay.stop(&mut self.event_loop) {
            self.trace_autoplay(AutoplayEventKind::Stopped { epoch });
        }
    }

    fn pause(&mut self, reason: PauseReason) {
        if self.autoplay.pause(reason) {
            self.trace_autoplay(AutoplayEventKind::Paused(reason));
        }
    }

    fn resume(&mut self, reason: PauseReason) {
        if self.autoplay.resume(reason) {
            self.trace_autoplay(AutoplayEventKind::Resumed(reason));
        }
    }

    fn trace_phase(&mut self, serial: u64, phase: PhaseKind, at: crate::time::HostTime) {
        self.tracer.phase(&PhaseEvent {
            carousel: self.id,
            serial,
            phase,
            at,
        });
    }

    fn trace_completed(&mut self, done: Completed, settled_early: bool) {
        let at = self.event_loop.now();
        self.trace_phase(done.serial, PhaseKind::Complete, at);
        self.tracer.completed(&CompletedEvent {
            carousel: self.id,
            serial: done.serial,
            from: done.from,
            to: done.to,
            settled_early,
            at,
        });
    }

    fn trace_autoplay(&mut self, kind: AutoplayEventKind) {
        self.tracer.autoplay(&AutoplayEvent {
            carousel: self.id,
            kind,
            at: self.event_loop.now(),
        });
    }
}
