// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element discovery and carousel construction.
//!
//! Mounting finds the slides, the indicator host, and the optional
//! previous/next controls for a container; builds the indicator buttons;
//! marks the container as a focusable region; and wires the result to a new
//! [`Carousel`]. A container without slides or without an indicator host is
//! declined (`Ok(None)`) rather than treated as an error.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

use carousel_core::carousel::Carousel;
use carousel_core::config::CarouselConfig;
use carousel_core::id::CarouselId;
use carousel_core::input::Lifecycle;
use carousel_core::slide::SlideRegistry;
use carousel_core::trace::Tracer;

use crate::WebCarousel;
use crate::event_loop::{Dispatch, DomEventLoop};
use crate::lazy::LazyImages;
use crate::listeners::{Listeners, Targets};
use crate::presenter::{DomPresenter, create_indicators};

/// Attribute carrying a slide's declared direction hint.
pub const HINT_ATTRIBUTE: &str = "data-slide";

/// CSS selectors used to discover a carousel's parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selectors {
    /// Carousel containers, searched in the document.
    pub container: &'static str,
    /// Slides, searched in the container.
    pub slide: &'static str,
    /// The element the indicator buttons are appended to. Searched in the
    /// container, then in each ancestor, so the nearest match wins.
    pub indicator_host: &'static str,
    /// Optional "previous" control, searched in the container.
    pub previous: &'static str,
    /// Optional "next" control, searched in the container.
    pub next: &'static str,
    /// Image checked for deferred loading, searched in each slide after the
    /// first. Only a match marked `loading="lazy"` is deferred.
    pub lazy_image: &'static str,
}

impl Selectors {
    /// Selectors for the stock markup.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            container: ".image-carousel",
            slide: ".slide",
            indicator_host: ".carousel-dots",
            previous: ".carousel-btn.prev",
            next: ".carousel-btn.next",
            lazy_image: "img",
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self::web()
    }
}

/// Everything [`mount`] needs besides the container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MountOptions {
    /// Discovery selectors.
    pub selectors: Selectors,
    /// Timing and gesture configuration.
    pub config: CarouselConfig,
    /// `aria-label` given to the container region.
    pub region_label: &'static str,
}

impl MountOptions {
    /// Options for the stock markup and stylesheet.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            selectors: Selectors::web(),
            config: CarouselConfig::web(),
            region_label: "Image carousel",
        }
    }
}

impl Default for MountOptions {
    fn default() -> Self {
        Self::web()
    }
}

/// A mounted carousel together with its DOM listeners.
///
/// Dropping the handle detaches the listeners and clears the carousel's
/// timers. Use [`leak`](Self::leak) to keep it alive for the page lifetime.
pub struct CarouselHandle {
    listeners: Listeners,
    lazy: Option<LazyImages>,
    carousel: Rc<RefCell<WebCarousel>>,
}

impl core::fmt::Debug for CarouselHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CarouselHandle")
            .field("listeners", &self.listeners)
            .field("lazy", &self.lazy)
            .field("carousel", &self.carousel)
            .finish()
    }
}

impl CarouselHandle {
    /// Returns the shared carousel.
    #[must_use]
    pub fn carousel(&self) -> &Rc<RefCell<WebCarousel>> {
        &self.carousel
    }

    /// Returns the lazy image observer, if one was started.
    #[must_use]
    pub fn lazy_images(&self) -> Option<&LazyImages> {
        self.lazy.as_ref()
    }

    /// Stops autoplay, settles any in-flight transition, and detaches.
    pub fn teardown(self) {
        if let Ok(mut carousel) = self.carousel.try_borrow_mut() {
            carousel.lifecycle(Lifecycle::Teardown);
        }
    }

    /// Keeps the carousel and its listeners alive for the rest of the page.
    pub fn leak(self) {
        core::mem::forget(self);
    }
}

/// Mounts a carousel on `container` with no tracing.
pub fn mount(
    container: &Element,
    options: &MountOptions,
    id: CarouselId,
) -> Result<Option<CarouselHandle>, JsValue> {
    mount_with_tracer(container, options, id, Tracer::none())
}

/// Mounts a carousel on `container`.
///
/// Returns `Ok(None)` when the container has no slides or no indicator host
/// can be found.
pub fn mount_with_tracer(
    container: &Element,
    options: &MountOptions,
    id: CarouselId,
    tracer: Tracer,
) -> Result<Option<CarouselHandle>, JsValue> {
    let selectors = &options.selectors;
    let window = window()?;
    let document = container
        .owner_document()
        .ok_or_else(|| JsValue::from_str("container is not in a document"))?;

    let slides = query_all(container, selectors.slide)?;
    let Some(registry) = SlideRegistry::new(slides.iter().map(|slide| {
        slide
            .get_attribute(HINT_ATTRIBUTE)
            .and_then(|value| parse_hint(&value))
    })) else {
        return Ok(None);
    };
    let Some(host) = find_indicator_host(container, selectors.indicator_host)? else {
        return Ok(None);
    };

    let indicators = create_indicators(&document, slides.len())?;
    for indicator in &indicators {
        host.append_child(indicator)?;
    }

    container.set_attribute("tabindex", "0")?;
    container.set_attribute("role", "region")?;
    container.set_attribute("aria-label", options.region_label)?;

    let previous = container.query_selector(selectors.previous)?;
    let next = container.query_selector(selectors.next)?;

    let presenter = DomPresenter::new(window.clone(), slides.clone(), indicators.clone());
    let config = options.config;
    let carousel = Rc::new_cyclic(|weak: &Weak<RefCell<WebCarousel>>| {
        let event_loop = DomEventLoop::new(dispatch_to(weak.clone()));
        RefCell::new(Carousel::new(id, registry, presenter, event_loop, config, tracer))
    });

    let listeners = Listeners::attach(
        &carousel,
        &Targets {
            window: &window,
            document: &document,
            container,
            indicators: &indicators,
            previous,
            next,
        },
    )?;
    let lazy = LazyImages::observe(&window, &slides, selectors.lazy_image)?;

    Ok(Some(CarouselHandle {
        listeners,
        lazy,
        carousel,
    }))
}

/// Mounts every container matching `options.selectors.container`, with no
/// tracing. Declined containers are skipped.
pub fn mount_all(options: &MountOptions) -> Result<Vec<CarouselHandle>, JsValue> {
    mount_all_with_tracer(options, |_| Tracer::none())
}

/// Mounts every container matching `options.selectors.container`.
///
/// Instances are numbered in document order, declined ones included, and
/// `make_tracer` is called once per container.
pub fn mount_all_with_tracer(
    options: &MountOptions,
    mut make_tracer: impl FnMut(CarouselId) -> Tracer,
) -> Result<Vec<CarouselHandle>, JsValue> {
    let document = document()?;
    let containers = document.query_selector_all(options.selectors.container)?;
    let mut handles = Vec::new();
    for index in 0..containers.length() {
        let Some(container) = containers
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let id = CarouselId(index);
        if let Some(handle) = mount_with_tracer(&container, options, id, make_tracer(id))? {
            handles.push(handle);
        }
    }
    Ok(handles)
}

/// Parses a declared hint the way `parseInt` reads a leading integer.
///
/// Leading whitespace is skipped and trailing non-digits are ignored.
/// Anything without a leading digit has no hint.
#[must_use]
pub fn parse_hint(value: &str) -> Option<usize> {
    let value = value.trim_start();
    let value = value.strip_prefix('+').unwrap_or(value);
    let digits = value.bytes().take_while(u8::is_ascii_digit).count();
    value[..digits].parse().ok()
}

fn dispatch_to(weak: Weak<RefCell<WebCarousel>>) -> Dispatch {
    Rc::new(move |wakeup| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        if let Ok(mut carousel) = shared.try_borrow_mut() {
            carousel.wake(wakeup);
        }
    })
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

fn query_all(root: &Element, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let nodes = root.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

fn find_indicator_host(container: &Element, selector: &str) -> Result<Option<Element>, JsValue> {
    let mut scope = Some(container.clone());
    while let Some(element) = scope {
        if let Some(host) = element.query_selector(selector)? {
            return Ok(Some(host));
        }
        scope = element.parent_element();
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_parse_like_parse_int() {
        assert_eq!(parse_hint("0"), Some(0));
        assert_eq!(parse_hint(" 2"), Some(2));
        assert_eq!(parse_hint("3rd"), Some(3));
        assert_eq!(parse_hint("+1"), Some(1));
        assert_eq!(parse_hint(""), None);
        assert_eq!(parse_hint("left"), None);
        assert_eq!(parse_hint("-1"), None, "negative hints are not positions");
    }

    #[test]
    fn stock_options() {
        let options = MountOptions::default();
        assert_eq!(options.selectors.container, ".image-carousel");
        assert_eq!(options.selectors.indicator_host, ".carousel-dots");
        assert_eq!(options.region_label, "Image carousel");
        assert_eq!(options.config, CarouselConfig::web());
    }
}
