// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transition engine.
//!
//! [`TransitionEngine`] owns the committed slide index and at most one
//! in-flight transition. It applies the synchronous parts of the protocol
//! itself and exposes the deferred parts as explicit steps that the
//! [`Carousel`](crate::carousel::Carousel) drives from event-loop wakeups:
//!
//! ```text
//!   request_show ──► Reset ──► Mark ──► Flush            (synchronous)
//!        │
//!        ├──► frame ──► frame ──► on_frame: Direction    (two frame boundaries)
//!        │
//!        └──► timeout(duration + margin) ──► complete    (commit + unlock)
//! ```
//!
//! The in-flight guard is the only concurrency control: while a transition is
//! pending, every request is dropped, not queued. A transition always runs to
//! completion; [`settle`](TransitionEngine::settle) only brings that
//! completion forward.
//!
//! Every accepted transition carries a serial. Frame and completion steps
//! name the serial they were scheduled for, so a late step for a transition
//! that already completed does nothing.

use crate::backend::Presenter;
use crate::marker::{Direction, SlideMarker};
use crate::slide::{Slide, SlideRegistry};

/// Number of rendering-frame boundaries between the mark phase and the
/// direction phase. One is not enough: the mark-phase markers must be
/// committed to the render tree before the directional ones arrive.
pub const FRAME_DEFERRALS: u8 = 2;

/// Why a navigation request was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The carousel has a single slide; there is nothing to transition to.
    SingleSlide,
    /// The target is already the committed slide.
    AlreadyActive,
    /// Another transition is in flight.
    InFlight,
}

/// An accepted transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Accepted {
    /// Serial identifying this transition's deferred steps.
    pub serial: u64,
    /// Slide being left.
    pub from: usize,
    /// Slide being entered.
    pub to: usize,
    /// Direction pair chosen from the entering slide's hint.
    pub direction: Direction,
}

/// Outcome of [`TransitionEngine::request_show`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Request {
    /// The transition was accepted and its synchronous phases ran.
    Accepted(Accepted),
    /// The request was dropped. Nothing changed.
    Dropped {
        /// Normalized target.
        target: usize,
        /// Why it was dropped.
        reason: DropReason,
    },
}

impl Request {
    /// Returns the accepted transition, if any.
    #[must_use]
    pub const fn accepted(&self) -> Option<&Accepted> {
        match self {
            Self::Accepted(a) => Some(a),
            Self::Dropped { .. } => None,
        }
    }

    /// Returns `true` if the request was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Outcome of [`TransitionEngine::on_frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameStep {
    /// More frame boundaries are needed; request another frame.
    Deferred,
    /// The directional markers were applied.
    Directed,
    /// The frame belongs to a transition that is no longer pending, or whose
    /// direction phase already ran.
    Stale,
}

/// A transition that reached its completion phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Completed {
    /// Serial of the completed transition.
    pub serial: u64,
    /// Slide that was left.
    pub from: usize,
    /// Slide now committed.
    pub to: usize,
}

/// Where an in-flight transition is in its protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Marked and flushed; waiting for this many more frame boundaries.
    AwaitingFrames(u8),
    /// Directional markers applied; waiting for completion.
    Directed,
}

#[derive(Clone, Copy, Debug)]
struct InFlight {
    accepted: Accepted,
    stage: Stage,
}

/// The transition state machine of one carousel.
#[derive(Clone, Debug)]
pub struct TransitionEngine {
    registry: SlideRegistry,
    current: usize,
    in_flight: Option<InFlight>,
    next_serial: u64,
}

impl TransitionEngine {
    /// Creates an engine with slide `0` committed and nothing in flight.
    #[must_use]
    pub fn new(registry: SlideRegistry) -> Self {
        Self {
            registry,
            current: 0,
            in_flight: None,
            next_serial: 1,
        }
    }

    /// Returns the slide registry.
    #[must_use]
    pub fn registry(&self) -> &SlideRegistry {
        &self.registry
    }

    /// Returns the committed slide index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Returns the target of the in-flight transition, if any.
    #[must_use]
    pub fn pending_index(&self) -> Option<usize> {
        self.in_flight.map(|f| f.accepted.to)
    }

    /// Returns `true` while a transition is in flight.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns the in-flight transition and its stage, if any.
    #[must_use]
    pub fn in_flight_transition(&self) -> Option<(Accepted, Stage)> {
        self.in_flight.map(|f| (f.accepted, f.stage))
    }

    /// Requests a transition to `target`, normalized onto the registry.
    ///
    /// On acceptance the reset, mark, and flush phases run against
    /// `presenter` before this returns. The caller is responsible for the
    /// indicator sync and for scheduling [`on_frame`](Self::on_frame) and
    /// [`complete`](Self::complete).
    pub fn request_show(&mut self, target: isize, presenter: &mut impl Presenter) -> Request {
        let to = self.registry.wrap(target);
        if self.registry.len() < 2 {
            return Request::Dropped {
                target: to,
                reason: DropReason::SingleSlide,
            };
        }
        if to == self.current {
            return Request::Dropped {
                target: to,
                reason: DropReason::AlreadyActive,
            };
        }
        if self.in_flight.is_some() {
            return Request::Dropped {
                target: to,
                reason: DropReason::InFlight,
            };
        }

        // `wrap` keeps `to` in range.
        let direction = self
            .registry
            .get(to)
            .map_or(Direction::Vertical, Slide::direction);
        let accepted = Accepted {
            serial: self.next_serial,
            from: self.current,
            to,
            direction,
        };
        self.next_serial += 1;
        self.in_flight = Some(InFlight {
            accepted,
            stage: Stage::AwaitingFrames(FRAME_DEFERRALS),
        });

        // Reset: nothing from an earlier, possibly interrupted run survives.
        for slide in 0..self.registry.len() {
            presenter.remove_markers(slide, &SlideMarker::ALL);
            presenter.clear_stacking(slide);
        }

        // Mark: no direction yet.
        presenter.add_markers(accepted.from, &[SlideMarker::Exiting]);
        presenter.add_markers(accepted.to, &[SlideMarker::Entering]);

        // Flush: commit the marks before the deferred direction phase.
        presenter.flush_layout(accepted.to);
        presenter.flush_layout(accepted.from);

        Request::Accepted(accepted)
    }

    /// Requests a transition to the slide after the committed one.
    pub fn advance(&mut self, presenter: &mut impl Presenter) -> Request {
        let target = self.registry.next(self.current);
        self.request_show(target as isize, presenter)
    }

    /// Requests a transition to the slide before the committed one.
    pub fn retreat(&mut self, presenter: &mut impl Presenter) -> Request {
        let target = self.registry.previous(self.current);
        self.request_show(target as isize, presenter)
    }

    /// Handles one rendering-frame boundary for the transition `serial`.
    ///
    /// The directional markers are applied on the last of the
    /// [`FRAME_DEFERRALS`] boundaries.
    pub fn on_frame(&mut self, serial: u64, presenter: &mut impl Presenter) -> FrameStep {
        let Some(flight) = self.in_flight.as_mut() else {
            return FrameStep::Stale;
        };
        if flight.accepted.serial != serial {
            return FrameStep::Stale;
        }
        match flight.stage {
            Stage::AwaitingFrames(remaining) if remaining > 1 => {
                flight.stage = Stage::AwaitingFrames(remaining - 1);
                FrameStep::Deferred
            }
            Stage::AwaitingFrames(_) => {
                flight.stage = Stage::Directed;
                let Accepted {
                    from,
                    to,
                    direction,
                    ..
                } = flight.accepted;
                presenter.add_markers(to, &[direction.enter_marker()]);
                presenter.add_markers(from, &[direction.exit_marker()]);
                FrameStep::Directed
            }
            Stage::Directed => FrameStep::Stale,
        }
    }

    /// Runs the completion phase for the transition `serial`.
    ///
    /// Returns `None` if that transition is not the one in flight.
    pub fn complete(&mut self, serial: u64, presenter: &mut impl Presenter) -> Option<Completed> {
        let flight = self.in_flight?;
        if flight.accepted.serial != serial {
            return None;
        }
        let Accepted { from, to, .. } = flight.accepted;

        presenter.remove_markers(from, &SlideMarker::EXIT_SET);
        presenter.remove_markers(to, &SlideMarker::ENTER_SET);
        presenter.add_markers(to, &[SlideMarker::Active]);

        self.current = to;
        self.in_flight = None;
        Some(Completed { serial, from, to })
    }

    /// Runs the completion phase of the in-flight transition now, if there
    /// is one.
    pub fn settle(&mut self, presenter: &mut impl Presenter) -> Option<Completed> {
        let serial = self.in_flight?.accepted.serial;
        self.complete(serial, presenter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Op, RecordingPresenter};

    fn engine(len: usize) -> (TransitionEngine, RecordingPresenter) {
        let registry = SlideRegistry::with_len(len).unwrap();
        let mut presenter = RecordingPresenter::new(len);
        presenter.add_markers(0, &[SlideMarker::Active]);
        presenter.clear_log();
        (TransitionEngine::new(registry), presenter)
    }

    fn run_to_completion(
        engine: &mut TransitionEngine,
        presenter: &mut RecordingPresenter,
        serial: u64,
    ) -> Completed {
        assert_eq!(engine.on_frame(serial, presenter), FrameStep::Deferred);
        assert_eq!(engine.on_frame(serial, presenter), FrameStep::Directed);
        engine.complete(serial, presenter).unwrap()
    }

    #[test]
    fn accepted_request_runs_synchronous_phases_in_order() {
        let (mut engine, mut p) = engine(3);
        let req = engine.request_show(1, &mut p);
        let a = *req.accepted().unwrap();
        assert_eq!((a.from, a.to, a.direction), (0, 1, Direction::Vertical));
        assert!(engine.in_flight(), "accepted request is in flight");
        assert_eq!(engine.pending_index(), Some(1));
        assert_eq!(engine.current_index(), 0, "commit waits for completion");

        let log = p.log();
        // Reset covers every slide before anything is marked.
        let first_add = log
            .iter()
            .position(|op| matches!(op, Op::Add(..)))
            .unwrap();
        let last_reset = log
            .iter()
            .rposition(|op| matches!(op, Op::Remove(..) | Op::ClearStacking(_)))
            .unwrap();
        assert!(last_reset < first_add, "reset before mark: {log:?}");
        for slide in 0..3 {
            assert!(log.contains(&Op::ClearStacking(slide)), "slide {slide}");
        }
        assert_eq!(
            &log[first_add..],
            &[
                Op::Add(0, SlideMarker::Exiting),
                Op::Add(1, SlideMarker::Entering),
                Op::Flush(1),
                Op::Flush(0),
            ]
        );
        assert_eq!(p.markers(0), [SlideMarker::Exiting], "active stripped");
        assert_eq!(p.markers(1), [SlideMarker::Entering]);
    }

    #[test]
    fn direction_waits_for_second_frame() {
        let (mut engine, mut p) = engine(3);
        let serial = engine.request_show(2, &mut p).accepted().unwrap().serial;

        assert_eq!(engine.on_frame(serial, &mut p), FrameStep::Deferred);
        assert!(!p.has(2, SlideMarker::SlideInBottom), "one frame is not enough");

        assert_eq!(engine.on_frame(serial, &mut p), FrameStep::Directed);
        assert!(p.has(2, SlideMarker::SlideInBottom), "enter marker");
        assert!(p.has(0, SlideMarker::SlideOutTop), "exit marker");
        assert_eq!(
            engine.in_flight_transition().map(|(_, s)| s),
            Some(Stage::Directed)
        );

        assert_eq!(engine.on_frame(serial, &mut p), FrameStep::Stale, "once only");
    }

    #[test]
    fn completion_commits_and_strips_transient_markers() {
        let (mut engine, mut p) = engine(3);
        let serial = engine.advance(&mut p).accepted().unwrap().serial;
        let done = run_to_completion(&mut engine, &mut p, serial);

        assert_eq!(done, Completed { serial, from: 0, to: 1 });
        assert_eq!(engine.current_index(), 1);
        assert_eq!(engine.pending_index(), None);
        assert!(!engine.in_flight(), "unlocked");
        assert!(p.markers(0).is_empty(), "no residue: {:?}", p.markers(0));
        assert_eq!(p.markers(1), [SlideMarker::Active]);
    }

    #[test]
    fn canonical_first_slide_uses_horizontal_pair() {
        let (mut engine, mut p) = engine(3);
        let serial = engine.request_show(1, &mut p).accepted().unwrap().serial;
        run_to_completion(&mut engine, &mut p, serial);

        let a = *engine.request_show(0, &mut p).accepted().unwrap();
        assert_eq!(a.direction, Direction::Horizontal);
        assert_eq!(engine.on_frame(a.serial, &mut p), FrameStep::Deferred);
        assert_eq!(engine.on_frame(a.serial, &mut p), FrameStep::Directed);
        assert!(p.has(0, SlideMarker::SlideInLeft), "enter from left");
        assert!(p.has(1, SlideMarker::SlideOutRight), "exit to right");

        engine.complete(a.serial, &mut p).unwrap();
        assert_eq!(engine.current_index(), 0);
        assert_eq!(p.markers(0), [SlideMarker::Active]);
        assert!(p.markers(1).is_empty(), "no residue: {:?}", p.markers(1));
    }

    #[test]
    fn same_target_is_dropped_without_effects() {
        let (mut engine, mut p) = engine(3);
        let req = engine.request_show(0, &mut p);
        assert_eq!(
            req,
            Request::Dropped {
                target: 0,
                reason: DropReason::AlreadyActive
            }
        );
        assert!(!engine.in_flight(), "no transition started");
        assert!(p.log().is_empty(), "presenter untouched: {:?}", p.log());

        // Wrapped targets that land on the current slide are dropped too.
        assert!(!engine.request_show(3, &mut p).is_accepted(), "3 wraps to 0");
    }

    #[test]
    fn requests_during_flight_are_dropped_not_queued() {
        let (mut engine, mut p) = engine(3);
        let serial = engine.request_show(1, &mut p).accepted().unwrap().serial;
        p.clear_log();

        let req = engine.request_show(2, &mut p);
        assert_eq!(
            req,
            Request::Dropped {
                target: 2,
                reason: DropReason::InFlight
            }
        );
        assert_eq!(engine.pending_index(), Some(1), "pending unchanged");
        assert_eq!(engine.current_index(), 0, "current unchanged");
        assert!(p.log().is_empty(), "presenter untouched");

        run_to_completion(&mut engine, &mut p, serial);
        assert_eq!(engine.current_index(), 1, "dropped request not replayed");
    }

    #[test]
    fn single_slide_never_transitions() {
        let (mut engine, mut p) = engine(1);
        for target in [-1, 0, 1, 5] {
            let req = engine.request_show(target, &mut p);
            assert_eq!(
                req,
                Request::Dropped {
                    target: 0,
                    reason: DropReason::SingleSlide
                },
                "target {target}"
            );
        }
        assert!(!engine.advance(&mut p).is_accepted(), "advance is a no-op");
        assert!(p.log().is_empty(), "presenter untouched");
    }

    #[test]
    fn wraparound_targets() {
        let (mut engine, mut p) = engine(4);
        assert_eq!(engine.retreat(&mut p).accepted().unwrap().to, 3);
        engine.settle(&mut p);
        assert_eq!(engine.current_index(), 3);
        assert_eq!(engine.advance(&mut p).accepted().unwrap().to, 0);
        engine.settle(&mut p);
        assert_eq!(engine.request_show(-3, &mut p).accepted().unwrap().to, 1);
    }

    #[test]
    fn stale_steps_are_ignored() {
        let (mut engine, mut p) = engine(3);
        let first = engine.request_show(1, &mut p).accepted().unwrap().serial;

        // Completion outruns the frames (e.g. frames throttled while hidden).
        engine.complete(first, &mut p).unwrap();
        p.clear_log();
        assert_eq!(engine.on_frame(first, &mut p), FrameStep::Stale);
        assert_eq!(engine.on_frame(first, &mut p), FrameStep::Stale);
        assert!(p.log().is_empty(), "late frames leave no markers");
        assert!(engine.complete(first, &mut p).is_none(), "completes once");

        // A late frame from the first transition cannot direct the second.
        let second = engine.request_show(2, &mut p).accepted().unwrap().serial;
        assert_ne!(first, second, "serials are unique");
        assert_eq!(engine.on_frame(first, &mut p), FrameStep::Stale);
        assert!(engine.complete(first, &mut p).is_none(), "wrong serial");
        assert_eq!(engine.pending_index(), Some(2));
    }

    #[test]
    fn reset_repairs_residue_from_interrupted_runs() {
        let (mut engine, mut p) = engine(3);
        // Simulate leftovers from a run that never completed.
        p.add_markers(2, &[SlideMarker::SlideInLeft, SlideMarker::Entering]);
        p.add_markers(1, &[SlideMarker::Active]);

        let serial = engine.request_show(1, &mut p).accepted().unwrap().serial;
        assert!(p.markers(2).is_empty(), "residue stripped: {:?}", p.markers(2));
        run_to_completion(&mut engine, &mut p, serial);

        let active: usize = (0..3).filter(|&s| p.has(s, SlideMarker::Active)).count();
        assert_eq!(active, 1, "exactly one active slide");
    }

    #[test]
    fn settle_idle_is_none() {
        let (mut engine, mut p) = engine(2);
        assert!(engine.settle(&mut p).is_none(), "nothing in flight");
    }
}
