// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed vocabulary of visual state markers.
//!
//! The engine never styles anything itself. It toggles these markers on
//! slides through the [`Presenter`](crate::backend::Presenter), and the
//! styling layer decides what each one looks like. On the web every marker
//! is a CSS class with the name returned by [`SlideMarker::class_name`].

/// A state marker that may be present on a slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlideMarker {
    /// The committed, visible slide.
    Active,
    /// The slide being transitioned to.
    Entering,
    /// The slide being transitioned away from.
    Exiting,
    /// Entering animation from the left edge.
    SlideInLeft,
    /// Exiting animation towards the right edge.
    SlideOutRight,
    /// Entering animation from the bottom edge.
    SlideInBottom,
    /// Exiting animation towards the top edge.
    SlideOutTop,
}

impl SlideMarker {
    /// Every marker, in the order the reset phase strips them.
    pub const ALL: [Self; 7] = [
        Self::Active,
        Self::Entering,
        Self::Exiting,
        Self::SlideInLeft,
        Self::SlideOutRight,
        Self::SlideInBottom,
        Self::SlideOutTop,
    ];

    /// Markers removed from the exiting slide at completion.
    pub const EXIT_SET: [Self; 3] = [Self::Exiting, Self::SlideOutRight, Self::SlideOutTop];

    /// Markers removed from the entering slide at completion.
    pub const ENTER_SET: [Self; 3] = [Self::Entering, Self::SlideInLeft, Self::SlideInBottom];

    /// Returns the class name used by the web stylesheet.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Entering => "entering",
            Self::Exiting => "exiting",
            Self::SlideInLeft => "slide-in-left",
            Self::SlideOutRight => "slide-out-right",
            Self::SlideInBottom => "slide-in-bottom",
            Self::SlideOutTop => "slide-out-top",
        }
    }
}

/// Which of the two animation direction pairs a transition uses.
///
/// The split is binary on purpose: the canonical first slide sweeps in
/// horizontally, every other slide rises from below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Enter from the left, exit to the right.
    Horizontal,
    /// Enter from the bottom, exit to the top.
    Vertical,
}

impl Direction {
    /// Marker applied to the entering slide.
    #[must_use]
    pub const fn enter_marker(self) -> SlideMarker {
        match self {
            Self::Horizontal => SlideMarker::SlideInLeft,
            Self::Vertical => SlideMarker::SlideInBottom,
        }
    }

    /// Marker applied to the exiting slide.
    #[must_use]
    pub const fn exit_marker(self) -> SlideMarker {
        match self {
            Self::Horizontal => SlideMarker::SlideOutRight,
            Self::Vertical => SlideMarker::SlideOutTop,
        }
    }
}
