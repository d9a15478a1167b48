// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel timing and gesture configuration.

use crate::time::Duration;

/// Configuration for a [`Carousel`](crate::carousel::Carousel).
///
/// `animation_duration` is shared with the stylesheet that defines the
/// directional keyframes; the two must agree or the completion phase will
/// strip the animation classes early (or late).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselConfig {
    /// Period of the autoplay timer.
    pub slide_interval: Duration,
    /// Declared duration of the enter/exit animations.
    pub animation_duration: Duration,
    /// Extra delay added after `animation_duration` before the completion
    /// phase runs.
    pub completion_margin: Duration,
    /// Minimum absolute horizontal travel, in CSS pixels, for a touch release
    /// to count as a swipe. Travel must strictly exceed this value.
    pub swipe_threshold_px: f64,
    /// Whether the autoplay timer is armed at all.
    pub autoplay: bool,
}

impl CarouselConfig {
    /// Default configuration for the web stylesheet (700 ms keyframes,
    /// 3.5 s autoplay period).
    #[must_use]
    pub const fn web() -> Self {
        Self {
            slide_interval: Duration::from_millis(3_500),
            animation_duration: Duration::from_millis(700),
            completion_margin: Duration::from_millis(50),
            swipe_threshold_px: 50.0,
            autoplay: true,
        }
    }

    /// Returns the delay between accepting a transition and running its
    /// completion phase.
    #[must_use]
    pub const fn completion_delay(&self) -> Duration {
        self.animation_duration.saturating_add(self.completion_margin)
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::web()
    }
}
