// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input adapters.
//!
//! Host events are reduced to a [`Command`] here. Whatever the source, a
//! command becomes exactly two verbs on the carousel: a navigation request
//! and an autoplay reset. Hover and visibility changes are not navigation;
//! they arrive as [`Lifecycle`] events instead.

use kurbo::Point;

/// A navigation command produced by an input adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Show the slide at this index.
    Show(usize),
    /// Show the next slide.
    Advance,
    /// Show the previous slide.
    Retreat,
}

/// Which adapter produced a [`Command`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// A horizontal touch swipe.
    Touch,
    /// An arrow key while the carousel has focus.
    Keyboard,
    /// An indicator click or activation key.
    Indicator,
    /// A previous/next control.
    Control,
}

/// Host lifecycle and hover events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// The pointer entered the carousel.
    PointerEnter,
    /// The pointer left the carousel.
    PointerLeave,
    /// The host page became hidden.
    Hidden,
    /// The host page became visible again.
    Visible,
    /// The host page is being torn down.
    Teardown,
}

/// The keys the carousel reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// Anything else.
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            _ => Self::Other,
        }
    }

    /// Returns the navigation command for an arrow key pressed while focus
    /// is inside the carousel region.
    #[must_use]
    pub const fn navigation(self, focus_within: bool) -> Option<Command> {
        if !focus_within {
            return None;
        }
        match self {
            Self::ArrowLeft => Some(Command::Retreat),
            Self::ArrowRight => Some(Command::Advance),
            _ => None,
        }
    }

    /// Returns `true` for the keys that activate a focused indicator.
    #[must_use]
    pub const fn activates(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Turns a touch start/end pair into a swipe command.
///
/// Only horizontal travel counts. A finger moving left (start to the right of
/// the end) advances; moving right retreats. Travel must strictly exceed the
/// threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeTracker {
    threshold: f64,
    start: Option<Point>,
}

impl SwipeTracker {
    /// Creates a tracker with the given threshold in CSS pixels.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    /// Records where a touch began.
    pub fn touch_start(&mut self, at: Point) {
        self.start = Some(at);
    }

    /// Finishes a touch. Returns the swipe command, if the travel qualifies.
    ///
    /// A release without a recorded start is ignored.
    pub fn touch_end(&mut self, at: Point) -> Option<Command> {
        let start = self.start.take()?;
        let dx = (start - at).x;
        if dx.abs() <= self.threshold {
            return None;
        }
        Some(if dx > 0.0 {
            Command::Advance
        } else {
            Command::Retreat
        })
    }

    /// Forgets a touch in progress.
    pub fn cancel(&mut self) {
        self.start = None;
    }
}
