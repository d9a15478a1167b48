// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`EventLoop`] on top of the browser's frame and timer callbacks.
//!
//! Every callback carries a [`Wakeup`] back into a single dispatch function,
//! which the mount code points at the owning carousel through a `Weak`
//! reference. Frames are one-shot JS closures. Timers keep their closure in
//! a table keyed by [`TimerHandle`] so they can be cancelled, and a timeout
//! removes its own entry when it fires.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use carousel_core::backend::{EventLoop, TimerHandle, Wakeup};
use carousel_core::time::{Duration, HostTime};

use crate::raf;

/// Receives every wakeup the loop delivers.
pub type Dispatch = Rc<dyn Fn(Wakeup)>;

type TimerTable = RefCell<BTreeMap<u32, ArmedTimer>>;

struct ArmedTimer {
    js_id: i32,
    repeating: bool,
    /// Kept alive for as long as the browser may call it.
    _callback: Closure<dyn FnMut()>,
}

/// A browser-backed [`EventLoop`].
///
/// Dropping the loop clears every timer it armed.
pub struct DomEventLoop {
    dispatch: Dispatch,
    timers: Rc<TimerTable>,
    next_handle: u32,
}

impl core::fmt::Debug for DomEventLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomEventLoop")
            .field("armed_timers", &self.timers.borrow().len())
            .field("next_handle", &self.next_handle)
            .finish_non_exhaustive()
    }
}

impl DomEventLoop {
    /// Creates a loop that delivers every wakeup to `dispatch`.
    #[must_use]
    pub fn new(dispatch: Dispatch) -> Self {
        Self {
            dispatch,
            timers: Rc::new(RefCell::new(BTreeMap::new())),
            next_handle: 0,
        }
    }

    /// Returns the number of timers currently armed.
    #[must_use]
    pub fn armed_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    fn arm(&mut self, delay: Duration, repeating: bool, wakeup: Wakeup) -> TimerHandle {
        self.next_handle = self.next_handle.wrapping_add(1);
        let handle = self.next_handle;

        let dispatch = Rc::clone(&self.dispatch);
        let table: Weak<TimerTable> = Rc::downgrade(&self.timers);
        let callback = Closure::wrap(Box::new(move || {
            if !repeating && let Some(table) = table.upgrade() {
                // Dropping a closure from inside its own call is deferred by
                // wasm-bindgen until the call returns.
                let spent = table.borrow_mut().remove(&handle);
                drop(spent);
            }
            dispatch(wakeup);
        }) as Box<dyn FnMut()>);

        let js_fn: &JsValue = callback.as_ref();
        let js_id = if repeating {
            raf::set_interval(js_fn, raf::delay_ms(delay))
        } else {
            raf::set_timeout(js_fn, raf::delay_ms(delay))
        };
        self.timers.borrow_mut().insert(
            handle,
            ArmedTimer {
                js_id,
                repeating,
                _callback: callback,
            },
        );
        TimerHandle(handle)
    }
}

impl EventLoop for DomEventLoop {
    fn now(&self) -> HostTime {
        crate::now()
    }

    fn request_frame(&mut self, wakeup: Wakeup) {
        let dispatch = Rc::clone(&self.dispatch);
        let callback = Closure::once_into_js(move |_timestamp_ms: f64| dispatch(wakeup));
        raf::request_animation_frame(&callback);
    }

    fn set_timeout(&mut self, delay: Duration, wakeup: Wakeup) -> TimerHandle {
        self.arm(delay, false, wakeup)
    }

    fn set_interval(&mut self, period: Duration, wakeup: Wakeup) -> TimerHandle {
        self.arm(period, true, wakeup)
    }

    fn clear_timer(&mut self, handle: TimerHandle) {
        let Some(timer) = self.timers.borrow_mut().remove(&handle.0) else {
            return;
        };
        if timer.repeating {
            raf::clear_interval(timer.js_id);
        } else {
            raf::clear_timeout(timer.js_id);
        }
    }
}

impl Drop for DomEventLoop {
    fn drop(&mut self) {
        let timers = core::mem::take(&mut *self.timers.borrow_mut());
        for timer in timers.into_values() {
            if timer.repeating {
                raf::clear_interval(timer.js_id);
            } else {
                raf::clear_timeout(timer.js_id);
            }
        }
    }
}
