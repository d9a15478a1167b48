// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for host integrations.
//!
//! A carousel needs two things from its host:
//!
//! - **Presenter** — applies [`SlideMarker`] changes and indicator state to
//!   the host's visual tree (DOM class lists and attributes on the web), and
//!   can force a synchronous style computation.
//!
//! - **Event loop** — reads the monotonic clock and schedules deferred
//!   continuations: "after the next rendering frame", "after a delay", and
//!   "every period". Each continuation is a [`Wakeup`] that the host hands
//!   back to [`Carousel::wake`](crate::carousel::Carousel::wake) when it
//!   fires.
//!
//! # Crate boundaries
//!
//! `carousel_core` owns the state machines and this contract. Backend crates
//! depend on `carousel_core` and provide platform glue; they never mutate
//! carousel state except through [`Carousel`](crate::carousel::Carousel)
//! methods.

use crate::marker::SlideMarker;
use crate::time::{Duration, HostTime};

/// Applies carousel state to a host-native presentation tree.
///
/// Slide and indicator indices are positions in the
/// [`SlideRegistry`](crate::slide::SlideRegistry). Implementations must
/// tolerate removing a marker that is not present and adding one that is.
pub trait Presenter {
    /// Adds each of `markers` to the slide at `slide`.
    fn add_markers(&mut self, slide: usize, markers: &[SlideMarker]);

    /// Removes each of `markers` from the slide at `slide`.
    fn remove_markers(&mut self, slide: usize, markers: &[SlideMarker]);

    /// Clears any stacking-order override on the slide at `slide`.
    fn clear_stacking(&mut self, slide: usize);

    /// Forces the host to compute the slide's style synchronously so that
    /// marker changes made so far are committed before anything else is
    /// applied.
    fn flush_layout(&mut self, slide: usize);

    /// Marks the indicator at `index` active or inactive, including its
    /// accessibility state and focusability.
    fn set_indicator(&mut self, index: usize, active: bool);
}

/// Opaque identifier of a timer armed through [`EventLoop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u32);

/// A deferred continuation delivered back to the carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wakeup {
    /// A rendering-frame boundary passed for the transition with this serial.
    Frame {
        /// Serial of the transition that requested the frame.
        serial: u64,
    },
    /// The completion delay elapsed for the transition with this serial.
    Completion {
        /// Serial of the transition that armed the timer.
        serial: u64,
    },
    /// The autoplay timer armed in this epoch ticked.
    Autoplay {
        /// Epoch of the autoplay timer.
        epoch: u32,
    },
}

/// Schedules deferred work on the host's single-threaded event loop.
///
/// Nothing here may invoke the carousel synchronously: every [`Wakeup`] is
/// delivered later, from the host's own dispatch.
pub trait EventLoop {
    /// Returns the current host time.
    fn now(&self) -> HostTime;

    /// Delivers `wakeup` at the next rendering-frame opportunity.
    fn request_frame(&mut self, wakeup: Wakeup);

    /// Delivers `wakeup` once, after `delay`.
    fn set_timeout(&mut self, delay: Duration, wakeup: Wakeup) -> TimerHandle;

    /// Delivers `wakeup` every `period` until cleared.
    fn set_interval(&mut self, period: Duration, wakeup: Wakeup) -> TimerHandle;

    /// Cancels a timer. Clearing an unknown or already-fired handle is a
    /// no-op.
    fn clear_timer(&mut self, handle: TimerHandle);
}
