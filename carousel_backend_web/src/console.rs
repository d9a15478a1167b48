// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`TraceSink`] that logs to the browser console.

use alloc::format;

use carousel_core::trace::{
    AutoplayEvent, CompletedEvent, DroppedEvent, InputEvent, PhaseEvent, RequestEvent, TraceSink,
};
use wasm_bindgen::JsValue;
use web_sys::console;

/// Writes one `console.debug` line per trace event.
///
/// Phase events are only logged when `phases` is set; they are frequent.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink {
    /// Also log individual protocol phases.
    pub phases: bool,
}

impl ConsoleSink {
    /// Creates a sink that skips phase events.
    #[must_use]
    pub const fn new() -> Self {
        Self { phases: false }
    }
}

fn log(line: &str) {
    console::debug_1(&JsValue::from_str(line));
}

impl TraceSink for ConsoleSink {
    fn on_request(&mut self, e: &RequestEvent) {
        log(&format!(
            "[carousel {}] #{} {} -> {} {:?} at {:.1}ms",
            e.carousel.0,
            e.serial,
            e.from,
            e.to,
            e.direction,
            e.at.as_millis_f64()
        ));
    }

    fn on_dropped(&mut self, e: &DroppedEvent) {
        log(&format!(
            "[carousel {}] dropped -> {} (current {}): {:?}",
            e.carousel.0, e.target, e.current, e.reason
        ));
    }

    fn on_phase(&mut self, e: &PhaseEvent) {
        if self.phases {
            log(&format!(
                "[carousel {}] #{} {:?}",
                e.carousel.0, e.serial, e.phase
            ));
        }
    }

    fn on_completed(&mut self, e: &CompletedEvent) {
        log(&format!(
            "[carousel {}] #{} committed {}{}",
            e.carousel.0,
            e.serial,
            e.to,
            if e.settled_early { " (settled)" } else { "" }
        ));
    }

    fn on_autoplay(&mut self, e: &AutoplayEvent) {
        log(&format!("[carousel {}] autoplay {:?}", e.carousel.0, e.kind));
    }

    fn on_input(&mut self, e: &InputEvent) {
        log(&format!(
            "[carousel {}] {:?} from {:?}",
            e.carousel.0, e.command, e.source
        ));
    }
}
