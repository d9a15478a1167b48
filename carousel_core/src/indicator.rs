// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position indicators ("dots").
//!
//! One indicator per slide. Exactly one is active at any time; the active one
//! is also the only keyboard tab-stop in the group (a roving tab index).

use alloc::format;
use alloc::string::String;

use crate::backend::Presenter;

/// Accessibility attributes for one indicator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndicatorAttributes {
    /// ARIA role; always `"tab"`.
    pub role: &'static str,
    /// Accessible label, 1-based: `"Go to slide 3"`.
    pub label: String,
    /// Mirrors the active flag as `aria-selected`.
    pub selected: bool,
    /// `0` for the active indicator, `-1` for the rest.
    pub tab_index: i32,
}

impl IndicatorAttributes {
    /// Returns the attributes for the indicator at `index`.
    #[must_use]
    pub fn new(index: usize, active: bool) -> Self {
        Self {
            role: "tab",
            label: format!("Go to slide {}", index + 1),
            selected: active,
            tab_index: if active { 0 } else { -1 },
        }
    }
}

/// The indicator group of one carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndicatorSet {
    len: usize,
    active: usize,
}

impl IndicatorSet {
    /// Creates a group of `len` indicators with the first one active.
    ///
    /// Nothing is pushed to a presenter; backends create the indicator
    /// elements with [`IndicatorAttributes::new`] already in this state.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, active: 0 }
    }

    /// Returns the number of indicators.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no indicators.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the index of the active indicator.
    #[must_use]
    pub const fn active(&self) -> usize {
        self.active
    }

    /// Makes `index` the only active indicator.
    ///
    /// Every indicator is written, not just the two that changed, so a
    /// presenter that drifted out of sync is repaired. Out-of-range indices
    /// are ignored.
    pub fn set_active(&mut self, index: usize, presenter: &mut impl Presenter) {
        if index >= self.len {
            return;
        }
        self.active = index;
        for i in 0..self.len {
            presenter.set_indicator(i, i == index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingPresenter;

    #[test]
    fn attributes_are_one_based_and_roving() {
        let on = IndicatorAttributes::new(2, true);
        assert_eq!(on.role, "tab");
        assert_eq!(on.label, "Go to slide 3");
        assert!(on.selected, "active indicator is selected");
        assert_eq!(on.tab_index, 0);

        let off = IndicatorAttributes::new(0, false);
        assert_eq!(off.label, "Go to slide 1");
        assert!(!off.selected, "inactive indicator is not selected");
        assert_eq!(off.tab_index, -1);
    }

    #[test]
    fn set_active_keeps_exactly_one() {
        let mut presenter = RecordingPresenter::new(4);
        let mut set = IndicatorSet::new(4);
        assert_eq!(set.active(), 0);

        set.set_active(2, &mut presenter);
        assert_eq!(set.active(), 2);
        assert_eq!(presenter.active_indicators(), [2]);

        set.set_active(0, &mut presenter);
        assert_eq!(presenter.active_indicators(), [0]);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut presenter = RecordingPresenter::new(2);
        let mut set = IndicatorSet::new(2);
        set.set_active(5, &mut presenter);
        assert_eq!(set.active(), 0, "unchanged");
        assert_eq!(presenter.indicator_writes(), 0, "nothing written");
    }
}
