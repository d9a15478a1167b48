// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred image loading for slides after the first.
//!
//! Each slide's first image is deferred when it is marked
//! `loading="lazy"`. It keeps its real URL in `data-src` until it comes
//! within [`ROOT_MARGIN`] of the viewport, at which point the URL moves to
//! `src` and the image is no longer observed.

use alloc::boxed::Box;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

/// How far outside the viewport an image starts loading.
pub(crate) const ROOT_MARGIN: &str = "50px";

/// Attribute holding the deferred image URL.
pub(crate) const DEFERRED_SRC: &str = "data-src";

/// `loading` attribute value that marks an image as deferred.
pub(crate) const LAZY_LOADING: &str = "lazy";

fn is_deferred(loading: Option<&str>) -> bool {
    loading == Some(LAZY_LOADING)
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Observes the lazy images of one carousel.
///
/// Dropping it disconnects the observer.
pub struct LazyImages {
    observer: IntersectionObserver,
    observed: usize,
    _callback: ObserverCallback,
}

impl core::fmt::Debug for LazyImages {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LazyImages")
            .field("observed", &self.observed)
            .finish_non_exhaustive()
    }
}

impl LazyImages {
    /// Starts observing the first image matching `selector` in every slide
    /// but the first, when that image is marked `loading="lazy"`.
    ///
    /// Returns `Ok(None)` when there is nothing to observe or the browser has
    /// no `IntersectionObserver`.
    pub(crate) fn observe(
        window: &Window,
        slides: &[HtmlElement],
        selector: &str,
    ) -> Result<Option<Self>, JsValue> {
        if !js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver"))? {
            return Ok(None);
        }

        let callback: ObserverCallback = Closure::wrap(Box::new(
            |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let image = entry.target();
                    if let Some(src) = image.get_attribute(DEFERRED_SRC) {
                        let _ = image.set_attribute("src", &src);
                        let _ = image.remove_attribute(DEFERRED_SRC);
                    }
                    observer.unobserve(&image);
                }
            },
        )
            as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_root_margin(ROOT_MARGIN);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        let mut observed = 0;
        for slide in slides.iter().skip(1) {
            let Some(image) = slide.query_selector(selector)? else {
                continue;
            };
            if is_deferred(image.get_attribute("loading").as_deref()) {
                observer.observe(&image);
                observed += 1;
            }
        }

        if observed == 0 {
            observer.disconnect();
            return Ok(None);
        }
        Ok(Some(Self {
            observer,
            observed,
            _callback: callback,
        }))
    }

    /// Returns how many images were registered.
    #[must_use]
    pub fn observed(&self) -> usize {
        self.observed
    }
}

impl Drop for LazyImages {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
