// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for carousel.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomEventLoop`]: `requestAnimationFrame`, `setTimeout`, and
//!   `setInterval` behind [`EventLoop`](carousel_core::backend::EventLoop)
//! - [`DomPresenter`]: slide class lists and indicator ARIA state
//! - [`mount`] / [`mount_all`]: element discovery, indicator creation, and
//!   DOM event wiring
//! - [`LazyImages`]: `IntersectionObserver`-driven image loading
//! - `ConsoleSink` (feature `trace`): trace events on the browser console
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `ConsoleSink` and
//!   `carousel_core/trace`.

#![no_std]

extern crate alloc;

#[cfg(feature = "trace")]
mod console;
mod event_loop;
mod lazy;
mod listeners;
mod mount;
mod presenter;
mod raf;

#[cfg(feature = "trace")]
pub use console::ConsoleSink;
pub use event_loop::{Dispatch, DomEventLoop};
pub use lazy::LazyImages;
pub use listeners::Listeners;
pub use mount::{
    CarouselHandle, HINT_ATTRIBUTE, MountOptions, Selectors, mount, mount_all,
    mount_all_with_tracer, mount_with_tracer, parse_hint,
};
pub use presenter::DomPresenter;

use carousel_core::carousel::Carousel;
use carousel_core::time::HostTime;

/// A carousel driven by the DOM.
pub type WebCarousel = Carousel<DomPresenter, DomEventLoop>;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks.
#[must_use]
pub fn now() -> HostTime {
    host_time_from_millis(raf::performance_now())
}

fn host_time_from_millis(ms: f64) -> HostTime {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "performance.now() returns small positive f64; µs fits in u64"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}
