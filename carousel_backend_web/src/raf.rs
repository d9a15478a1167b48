// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser timing globals.
//!
//! `requestAnimationFrame`, the timer functions, and `performance.now()` are
//! bound directly as globals instead of going through `web_sys::Window`, so
//! no Window object has to be fetched (and unwrapped) on every call.
//! Timestamps are [`DOMHighResTimeStamp`][mdn] milliseconds; [`HostTime`]
//! conversion happens in [`now`](crate::now).
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp
//! [`HostTime`]: carousel_core::time::HostTime

use wasm_bindgen::prelude::*;

use carousel_core::time::Duration;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    pub(crate) fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "setTimeout")]
    pub(crate) fn set_timeout(callback: &JsValue, delay_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "setInterval")]
    pub(crate) fn set_interval(callback: &JsValue, period_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    pub(crate) fn clear_timeout(id: i32);

    #[wasm_bindgen(js_name = "clearInterval")]
    pub(crate) fn clear_interval(id: i32);
}

/// Converts a [`Duration`] to the whole-millisecond delay the timer
/// functions take, clamping at `i32::MAX`.
pub(crate) fn delay_ms(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}
