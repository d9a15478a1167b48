// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slide registry.
//!
//! Slides are discovered once, in document order, and never change after
//! that. The registry is therefore a plain boxed slice with index lookups and
//! the circular index arithmetic every navigation request goes through.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::marker::Direction;

/// One panel of the carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slide {
    position: usize,
    hint: usize,
}

impl Slide {
    /// Creates a slide at `position`.
    ///
    /// `declared_hint` is the slide's own idea of its place in the sequence
    /// (the `data-slide` attribute on the web). When absent or `0` the
    /// position is used, so only position 0 can carry hint `0`.
    #[must_use]
    pub const fn new(position: usize, declared_hint: Option<usize>) -> Self {
        let hint = match declared_hint {
            Some(hint) if hint != 0 => hint,
            _ => position,
        };
        Self { position, hint }
    }

    /// Returns the 0-based position in discovery order.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the directional hint.
    #[must_use]
    pub const fn hint(&self) -> usize {
        self.hint
    }

    /// Returns the direction pair used when this slide enters.
    ///
    /// Only the canonical first slide (hint `0`) enters horizontally.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        if self.hint == 0 {
            Direction::Horizontal
        } else {
            Direction::Vertical
        }
    }
}

/// An ordered, fixed-size sequence of slides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideRegistry {
    slides: Box<[Slide]>,
}

impl SlideRegistry {
    /// Builds a registry from the declared hints of each discovered slide.
    ///
    /// Returns `None` when no slides were discovered: a carousel without
    /// slides does not initialize.
    #[must_use]
    pub fn new(declared_hints: impl IntoIterator<Item = Option<usize>>) -> Option<Self> {
        let slides: Vec<Slide> = declared_hints
            .into_iter()
            .enumerate()
            .map(|(position, hint)| Slide::new(position, hint))
            .collect();
        if slides.is_empty() {
            return None;
        }
        Some(Self {
            slides: slides.into_boxed_slice(),
        })
    }

    /// Builds a registry of `len` slides whose hints equal their positions.
    #[must_use]
    pub fn with_len(len: usize) -> Option<Self> {
        Self::new((0..len).map(|_| None))
    }

    /// Returns the number of slides. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Returns the slide at `position`, if any.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Slide> {
        self.slides.get(position)
    }

    /// Iterates over the slides in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Slide> {
        self.slides.iter()
    }

    /// Normalizes a signed target onto `[0, len)`.
    ///
    /// The carousel is circular, so `-1` maps to the last slide and `len`
    /// maps back to the first.
    #[must_use]
    pub fn wrap(&self, target: isize) -> usize {
        // Slide counts are far below `isize::MAX`, and `rem_euclid` with a
        // positive modulus is never negative.
        let len = self.slides.len() as isize;
        target.rem_euclid(len) as usize
    }

    /// Returns the position after `position`, wrapping to `0`.
    #[must_use]
    pub fn next(&self, position: usize) -> usize {
        (position + 1) % self.slides.len()
    }

    /// Returns the position before `position`, wrapping to the last slide.
    #[must_use]
    pub fn previous(&self, position: usize) -> usize {
        let len = self.slides.len();
        (position + len - 1) % len
    }
}
