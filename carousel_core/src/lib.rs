// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-agnostic state machines for slide carousels.
//!
//! `carousel_core` drives a slide carousel through a marker-based transition
//! protocol without knowing anything about the document it runs in. It is
//! `no_std` compatible (with `alloc`); a backend supplies the two seams, a
//! [`Presenter`](backend::Presenter) that edits slide markers and indicator
//! state, and an [`EventLoop`](backend::EventLoop) that provides the clock,
//! animation frames, and timers.
//!
//! # Architecture
//!
//! ```text
//!   host events ──► input adapters ──► Command
//!                                         │
//!                                         ▼
//!   Carousel::dispatch ──► TransitionEngine::request_show ──► Presenter
//!         │                       ▲
//!         ▼                       │
//!   Autoplay::start/stop     Carousel::wake(Frame | Completion | Autoplay)
//!         │                       ▲
//!         └──────► EventLoop ─────┘
//! ```
//!
//! **[`transition`]** — The reset → mark → flush → defer → direct → complete
//! protocol, with re-entrancy guarded by an in-flight slot and stale
//! continuations rejected by serial.
//!
//! **[`autoplay`]** — Repeating timer crossed with independent pause reasons.
//!
//! **[`input`]** — Swipe, keyboard, and lifecycle adapters.
//!
//! **[`indicator`]** — Exactly-one-active indicator bookkeeping.
//!
//! **[`carousel`]** — One instance tying the above to a backend.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod autoplay;
pub mod backend;
pub mod carousel;
pub mod config;
pub mod id;
pub mod indicator;
pub mod input;
pub mod marker;
pub mod slide;
pub mod time;
pub mod trace;
pub mod transition;

#[cfg(test)]
mod test_support;
