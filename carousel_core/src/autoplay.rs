// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer-driven automatic advancement.
//!
//! [`Autoplay`] is a small state machine over `{stopped, running}` crossed
//! with a set of independent [`PauseReason`]s:
//!
//! - `start` / `stop` arm and cancel the repeating timer.
//! - `pause` / `resume` only edit the reason set. The timer keeps ticking;
//!   a tick requests an advance only when the set is empty.
//!
//! Every armed timer gets a fresh epoch, carried in its
//! [`Wakeup::Autoplay`]. A tick whose epoch is not the live one is stale and
//! ignored, which makes `stop(); start()` a clean restart of the countdown
//! even if the host delivers one last tick from the old timer.

use crate::backend::{EventLoop, TimerHandle, Wakeup};
use crate::time::Duration;

/// An independent reason for suspending autoplay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PauseReason {
    /// The pointer is over the carousel.
    Hover,
    /// The host page is hidden.
    Hidden,
}

impl PauseReason {
    const fn bit(self) -> u8 {
        match self {
            Self::Hover => 1 << 0,
            Self::Hidden => 1 << 1,
        }
    }
}

/// A set of [`PauseReason`]s.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PauseReasons(u8);

impl PauseReasons {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Returns `true` if no reason is present.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if `reason` is present.
    #[must_use]
    pub const fn contains(self, reason: PauseReason) -> bool {
        self.0 & reason.bit() != 0
    }

    /// Adds `reason`. Returns `true` if it was not already present.
    pub fn insert(&mut self, reason: PauseReason) -> bool {
        let added = !self.contains(reason);
        self.0 |= reason.bit();
        added
    }

    /// Removes `reason`. Returns `true` if it was present.
    pub fn remove(&mut self, reason: PauseReason) -> bool {
        let removed = self.contains(reason);
        self.0 &= !reason.bit();
        removed
    }
}

impl core::fmt::Debug for PauseReasons {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut set = f.debug_set();
        for reason in [PauseReason::Hover, PauseReason::Hidden] {
            if self.contains(reason) {
                set.entry(&reason);
            }
        }
        set.finish()
    }
}

/// What an autoplay tick should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TickOutcome {
    /// Advance to the next slide.
    Advance,
    /// The live timer ticked but a pause reason is present.
    Paused,
    /// The tick came from a timer that is no longer armed.
    Stale,
}

/// The autoplay scheduler of one carousel.
#[derive(Clone, Copy, Debug)]
pub struct Autoplay {
    period: Duration,
    enabled: bool,
    timer: Option<TimerHandle>,
    epoch: u32,
    paused: PauseReasons,
}

impl Autoplay {
    /// Creates a stopped scheduler that ticks every `period` once started.
    ///
    /// A disabled scheduler never arms a timer.
    #[must_use]
    pub const fn new(period: Duration, enabled: bool) -> Self {
        Self {
            period,
            enabled,
            timer: None,
            epoch: 0,
            paused: PauseReasons::EMPTY,
        }
    }

    /// Returns `true` while a timer is armed.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Returns the epoch of the most recently armed timer.
    #[must_use]
    pub const fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Returns the current pause reasons.
    #[must_use]
    pub const fn pause_reasons(&self) -> PauseReasons {
        self.paused
    }

    /// Arms the repeating timer.
    ///
    /// Returns the new epoch, or `None` if already running or disabled.
    pub fn start(&mut self, event_loop: &mut impl EventLoop) -> Option<u32> {
        if self.timer.is_some() || !self.enabled {
            return None;
        }
        self.epoch = self.epoch.wrapping_add(1);
        let handle = event_loop.set_interval(self.period, Wakeup::Autoplay { epoch: self.epoch });
        self.timer = Some(handle);
        Some(self.epoch)
    }

    /// Cancels the repeating timer.
    ///
    /// Returns the cancelled epoch, or `None` if nothing was armed.
    pub fn stop(&mut self, event_loop: &mut impl EventLoop) -> Option<u32> {
        let handle = self.timer.take()?;
        event_loop.clear_timer(handle);
        Some(self.epoch)
    }

    /// Adds a pause reason. Returns `true` if it was newly added.
    pub fn pause(&mut self, reason: PauseReason) -> bool {
        self.paused.insert(reason)
    }

    /// Removes a pause reason. Returns `true` if it was present.
    pub fn resume(&mut self, reason: PauseReason) -> bool {
        self.paused.remove(reason)
    }

    /// Classifies a tick delivered for `epoch`.
    #[must_use]
    pub fn on_tick(&self, epoch: u32) -> TickOutcome {
        if self.timer.is_none() || epoch != self.epoch {
            TickOutcome::Stale
        } else if self.paused.is_empty() {
            TickOutcome::Advance
        } else {
            TickOutcome::Paused
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::VirtualLoop;

    fn autoplay() -> (Autoplay, VirtualLoop) {
        (
            Autoplay::new(Duration::from_millis(3_500), true),
            VirtualLoop::new(),
        )
    }

    #[test]
    fn start_is_idempotent() {
        let (mut ap, mut el) = autoplay();
        assert_eq!(ap.start(&mut el), Some(1));
        assert!(ap.is_running(), "running after start");
        assert_eq!(ap.start(&mut el), None, "second start is a no-op");
        assert_eq!(el.armed_timers(), 1, "one timer");
    }

    #[test]
    fn stop_is_idempotent() {
        let (mut ap, mut el) = autoplay();
        assert_eq!(ap.stop(&mut el), None, "nothing to stop");
        ap.start(&mut el);
        assert_eq!(ap.stop(&mut el), Some(1));
        assert_eq!(ap.stop(&mut el), None, "already stopped");
        assert!(!ap.is_running(), "stopped");
        assert_eq!(el.armed_timers(), 0, "timer cleared");
    }

    #[test]
    fn disabled_never_arms() {
        let mut ap = Autoplay::new(Duration::from_millis(10), false);
        let mut el = VirtualLoop::new();
        assert_eq!(ap.start(&mut el), None);
        assert_eq!(el.armed_timers(), 0, "no timer");
    }

    #[test]
    fn pause_reasons_gate_ticks_independently() {
        let (mut ap, mut el) = autoplay();
        let epoch = ap.start(&mut el).unwrap();
        assert_eq!(ap.on_tick(epoch), TickOutcome::Advance);

        assert!(ap.pause(PauseReason::Hover), "newly paused");
        assert!(!ap.pause(PauseReason::Hover), "already paused");
        assert!(ap.pause(PauseReason::Hidden), "second reason");
        assert_eq!(ap.on_tick(epoch), TickOutcome::Paused);

        assert!(ap.resume(PauseReason::Hover), "hover removed");
        assert_eq!(ap.on_tick(epoch), TickOutcome::Paused, "hidden still holds");
        assert!(ap.resume(PauseReason::Hidden), "hidden removed");
        assert!(!ap.resume(PauseReason::Hidden), "not present");
        assert_eq!(ap.on_tick(epoch), TickOutcome::Advance);
        assert!(ap.is_running(), "pause never stops the timer");
    }

    #[test]
    fn restart_invalidates_old_ticks() {
        let (mut ap, mut el) = autoplay();
        let old = ap.start(&mut el).unwrap();
        ap.stop(&mut el);
        assert_eq!(ap.on_tick(old), TickOutcome::Stale, "stopped");
        let new = ap.start(&mut el).unwrap();
        assert_ne!(old, new, "fresh epoch");
        assert_eq!(ap.on_tick(old), TickOutcome::Stale, "old epoch");
        assert_eq!(ap.on_tick(new), TickOutcome::Advance);
    }

    #[test]
    fn pause_reasons_debug_lists_members() {
        let mut set = PauseReasons::EMPTY;
        set.insert(PauseReason::Hidden);
        assert_eq!(alloc::format!("{set:?}"), "{Hidden}");
        assert!(!set.contains(PauseReason::Hover), "hover absent");
    }
}
