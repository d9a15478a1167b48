// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: mounts every `.image-carousel` on the page.
//!
//! Build with: `wasm-pack build --target web demos/web_carousel`
//!
//! Then serve `demos/web_carousel/` and open `index.html` in a browser.
//! Build with `--features trace` to log carousel activity to the console.

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use wasm_bindgen::prelude::*;

use carousel_backend_web::MountOptions;
use carousel_core::trace::Tracer;

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let options = MountOptions::web();
    let handles = carousel_backend_web::mount_all_with_tracer(&options, tracer)?;
    for handle in handles {
        handle.leak();
    }
    Ok(())
}

#[cfg(feature = "trace")]
fn tracer(_: carousel_core::id::CarouselId) -> Tracer {
    Tracer::new(alloc::boxed::Box::new(carousel_backend_web::ConsoleSink::new()))
}

#[cfg(not(feature = "trace"))]
fn tracer(_: carousel_core::id::CarouselId) -> Tracer {
    Tracer::none()
}
