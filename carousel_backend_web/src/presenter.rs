// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM presentation.
//!
//! Slide markers are CSS classes on the slide elements; the stylesheet owns
//! every visual. Indicators are `<button role="tab">` elements whose class
//! and ARIA state follow [`IndicatorAttributes`].

use alloc::string::ToString as _;
use alloc::vec::Vec;

use carousel_core::backend::Presenter;
use carousel_core::indicator::IndicatorAttributes;
use carousel_core::marker::SlideMarker;
use web_sys::{Document, HtmlElement, Window};

/// Class applied to the active indicator.
pub const ACTIVE_INDICATOR_CLASS: &str = "active";

/// Applies carousel state to slide and indicator elements.
pub struct DomPresenter {
    window: Window,
    slides: Vec<HtmlElement>,
    indicators: Vec<HtmlElement>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("slides_len", &self.slides.len())
            .field("indicators_len", &self.indicators.len())
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates a presenter over already-discovered slides and indicators.
    ///
    /// Position `i` in `slides` is slide `i`; position `i` in `indicators`
    /// is its indicator.
    #[must_use]
    pub fn new(window: Window, slides: Vec<HtmlElement>, indicators: Vec<HtmlElement>) -> Self {
        Self {
            window,
            slides,
            indicators,
        }
    }

    /// Returns the slide elements in order.
    #[must_use]
    pub fn slides(&self) -> &[HtmlElement] {
        &self.slides
    }

    /// Returns the indicator elements in order.
    #[must_use]
    pub fn indicators(&self) -> &[HtmlElement] {
        &self.indicators
    }
}

impl Presenter for DomPresenter {
    fn add_markers(&mut self, slide: usize, markers: &[SlideMarker]) {
        let Some(el) = self.slides.get(slide) else {
            return;
        };
        let classes = el.class_list();
        for marker in markers {
            let _ = classes.add_1(marker.class_name());
        }
    }

    fn remove_markers(&mut self, slide: usize, markers: &[SlideMarker]) {
        let Some(el) = self.slides.get(slide) else {
            return;
        };
        let classes = el.class_list();
        for marker in markers {
            let _ = classes.remove_1(marker.class_name());
        }
    }

    fn clear_stacking(&mut self, slide: usize) {
        if let Some(el) = self.slides.get(slide) {
            let _ = el.style().remove_property("z-index");
        }
    }

    fn flush_layout(&mut self, slide: usize) {
        let Some(el) = self.slides.get(slide) else {
            return;
        };
        // Reading a computed value forces a synchronous style recalculation.
        if let Ok(Some(style)) = self.window.get_computed_style(el) {
            let _ = style.get_property_value("opacity");
        }
    }

    fn set_indicator(&mut self, index: usize, active: bool) {
        if let Some(el) = self.indicators.get(index) {
            write_indicator(el, &IndicatorAttributes::new(index, active));
        }
    }
}

/// Creates the indicator buttons for `len` slides, with the first active.
pub(crate) fn create_indicators(
    document: &Document,
    len: usize,
) -> Result<Vec<HtmlElement>, wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast as _;

    let mut indicators = Vec::with_capacity(len);
    for index in 0..len {
        let el: HtmlElement = document.create_element("button")?.unchecked_into();
        let attrs = IndicatorAttributes::new(index, index == 0);
        el.set_attribute("type", "button")?;
        el.set_attribute("role", attrs.role)?;
        el.set_attribute("aria-label", &attrs.label)?;
        write_indicator(&el, &attrs);
        indicators.push(el);
    }
    Ok(indicators)
}

fn write_indicator(el: &HtmlElement, attrs: &IndicatorAttributes) {
    let _ = el
        .class_list()
        .toggle_with_force(ACTIVE_INDICATOR_CLASS, attrs.selected);
    let _ = el.set_attribute("aria-selected", if attrs.selected { "true" } else { "false" });
    let _ = el.set_attribute("tabindex", &attrs.tab_index.to_string());
}
