// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Each carousel becomes a process (`pid` = carousel id). Transitions are
//! `B`/`E` duration events on thread 0, spanning acceptance to completion,
//! with protocol phases and dropped requests as instants inside them.
//! Autoplay activity goes on thread 1 and input on thread 2.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use carousel_core::time::HostTime;

use crate::recorder::{RecordedEvent, decode};

const TID_TRANSITIONS: u32 = 0;
const TID_AUTOPLAY: u32 = 1;
const TID_INPUT: u32 = 2;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Host time ticks are already microseconds and are written unchanged.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Request(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": "Transition",
                    "cat": "Transition",
                    "ts": us(e.at),
                    "pid": e.carousel.0,
                    "tid": TID_TRANSITIONS,
                    "args": {
                        "serial": e.serial,
                        "from": e.from,
                        "to": e.to,
                        "direction": format!("{:?}", e.direction),
                    }
                }));
            }
            RecordedEvent::Completed(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": "Transition",
                    "cat": "Transition",
                    "ts": us(e.at),
                    "pid": e.carousel.0,
                    "tid": TID_TRANSITIONS,
                    "args": {
                        "serial": e.serial,
                        "settled_early": e.settled_early,
                    }
                }));
            }
            RecordedEvent::Phase(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.phase),
                    "cat": "Phase",
                    "ts": us(e.at),
                    "pid": e.carousel.0,
                    "tid": TID_TRANSITIONS,
                    "s": "t",
                    "args": {
                        "serial": e.serial,
                    }
                }));
            }
            RecordedEvent::Dropped(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Dropped",
                    "cat": "Transition",
                    "ts": us(e.at),
                    "pid": e.carousel.0,
                    "tid": TID_TRANSITIONS,
                    "s": "t",
                    "args": {
                        "target": e.target,
                        "current": e.current,
                        "reason": format!("{:?}", e.reason),
                    }
                }));
            }
            RecordedEvent::Autoplay(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Autoplay",
                    "cat": "Autoplay",
                    "ts": us(e.at),
                    "pid": e.carousel.0,
                    "tid": TID_AUTOPLAY,
                    "s": "t",
                    "args": {
                        "kind": format!("{:?}", e.kind),
                    }
                }));
            }
            RecordedEvent::Input(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.source),
                    "cat": "Input",
                    "ts": us(e.at),
                    "pid": e.carousel.0,
                    "tid": TID_INPUT,
                    "s": "t",
                    "args": {
                        "command": format!("{:?}", e.command),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn us(t: HostTime) -> u64 {
    t.ticks()
}
