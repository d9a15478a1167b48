// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel instance identification.
//!
//! [`CarouselId`] is a lightweight handle identifying one carousel region on
//! a page. Backends assign these in discovery order; core only carries the
//! value through to trace events so several instances can share one sink.

use core::fmt;

/// Identifies one carousel instance.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CarouselId(pub u32);

impl fmt::Debug for CarouselId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CarouselId({})", self.0)
    }
}
