// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM event wiring.
//!
//! Each listener holds a `Weak` reference to its carousel and turns one DOM
//! event into one call on it. [`Listeners`] owns the JS closures and removes
//! them from their targets when dropped.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Point;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent,
    TouchEvent, Window,
};

use carousel_core::input::{Command, Key, Lifecycle};

use crate::WebCarousel;

type Shared = Weak<RefCell<WebCarousel>>;
type Callback = Closure<dyn FnMut(Event)>;

struct Binding {
    target: EventTarget,
    event: &'static str,
    callback: Callback,
}

/// The DOM elements a carousel listens on.
#[derive(Debug)]
pub(crate) struct Targets<'a> {
    pub(crate) window: &'a Window,
    pub(crate) document: &'a Document,
    pub(crate) container: &'a Element,
    pub(crate) indicators: &'a [HtmlElement],
    pub(crate) previous: Option<Element>,
    pub(crate) next: Option<Element>,
}

/// Event listeners attached for one carousel.
pub struct Listeners {
    bindings: Vec<Binding>,
}

impl core::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

impl Listeners {
    /// Wires touch, keyboard, hover, indicator, control, and page lifecycle
    /// events to `carousel`.
    pub(crate) fn attach(
        carousel: &Rc<RefCell<WebCarousel>>,
        targets: &Targets<'_>,
    ) -> Result<Self, JsValue> {
        let weak = Rc::downgrade(carousel);
        let mut listeners = Self {
            bindings: Vec::new(),
        };
        let container: &EventTarget = targets.container.as_ref();

        // Touch: passive, so scrolling is never blocked.
        listeners.add_passive(
            container,
            "touchstart",
            on(&weak, |c, event| {
                if let Some(at) = touch_point(&event) {
                    c.touch_start(at);
                }
            }),
        )?;
        listeners.add_passive(
            container,
            "touchend",
            on(&weak, |c, event| {
                if let Some(at) = touch_point(&event) {
                    c.touch_end(at);
                }
            }),
        )?;

        // Arrow keys, only while focus is inside the region.
        let document = targets.document.clone();
        let region = targets.container.clone();
        listeners.add(
            container,
            "keydown",
            on(&weak, move |c, event| {
                let Some(key) = dom_key(&event) else {
                    return;
                };
                let focus_within = document
                    .active_element()
                    .is_some_and(|active| region.contains(Some(active.as_ref())));
                if c.key(key, focus_within).is_some() {
                    event.prevent_default();
                }
            }),
        )?;

        listeners.add(
            container,
            "mouseenter",
            on(&weak, |c, _| c.lifecycle(Lifecycle::PointerEnter)),
        )?;
        listeners.add(
            container,
            "mouseleave",
            on(&weak, |c, _| c.lifecycle(Lifecycle::PointerLeave)),
        )?;

        for (index, indicator) in targets.indicators.iter().enumerate() {
            let target: &EventTarget = indicator.as_ref();
            listeners.add(
                target,
                "click",
                on(&weak, move |c, _| {
                    c.indicator_activated(index);
                }),
            )?;
            listeners.add(
                target,
                "keydown",
                on(&weak, move |c, event| {
                    if let Some(key) = dom_key(&event)
                        && c.indicator_key(index, key).is_some()
                    {
                        event.prevent_default();
                    }
                }),
            )?;
        }

        for (control, command) in [
            (&targets.previous, Command::Retreat),
            (&targets.next, Command::Advance),
        ] {
            if let Some(control) = control {
                listeners.add(
                    control.as_ref(),
                    "click",
                    on(&weak, move |c, _| {
                        c.control(command);
                    }),
                )?;
            }
        }

        let document = targets.document.clone();
        listeners.add(
            targets.document.as_ref(),
            "visibilitychange",
            on(&weak, move |c, _| {
                c.lifecycle(if document.hidden() {
                    Lifecycle::Hidden
                } else {
                    Lifecycle::Visible
                });
            }),
        )?;
        listeners.add(
            targets.window.as_ref(),
            "beforeunload",
            on(&weak, |c, _| c.lifecycle(Lifecycle::Teardown)),
        )?;

        Ok(listeners)
    }

    /// Returns the number of attached listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn add(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        callback: Callback,
    ) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.bindings.push(Binding {
            target: target.clone(),
            event,
            callback,
        });
        Ok(())
    }

    fn add_passive(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        callback: Callback,
    ) -> Result<(), JsValue> {
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        self.bindings.push(Binding {
            target: target.clone(),
            event,
            callback,
        });
        Ok(())
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for binding in self.bindings.drain(..) {
            let _ = binding.target.remove_event_listener_with_callback(
                binding.event,
                binding.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Builds a listener that runs `f` on the carousel if it is still alive.
fn on(weak: &Shared, mut f: impl FnMut(&mut WebCarousel, Event) + 'static) -> Callback {
    let weak = weak.clone();
    Closure::wrap(Box::new(move |event: Event| {
        let Some(carousel) = weak.upgrade() else {
            return;
        };
        let Ok(mut carousel) = carousel.try_borrow_mut() else {
            return;
        };
        f(&mut carousel, event);
    }) as Box<dyn FnMut(Event)>)
}

fn touch_point(event: &Event) -> Option<Point> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(Point::new(
        f64::from(touch.screen_x()),
        f64::from(touch.screen_y()),
    ))
}

fn dom_key(event: &Event) -> Option<Key> {
    Some(Key::from_dom_key(&event.dyn_ref::<KeyboardEvent>()?.key()))
}
