// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in milliseconds.

use std::io::Write;

use carousel_core::autoplay::PauseReason;
use carousel_core::time::HostTime;
use carousel_core::trace::{
    AutoplayEvent, AutoplayEventKind, CompletedEvent, DroppedEvent, InputEvent, PhaseEvent,
    PhaseKind, RequestEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.as_millis_f64()
}

fn phase_name(phase: PhaseKind) -> &'static str {
    match phase {
        PhaseKind::Reset => "reset",
        PhaseKind::Mark => "mark",
        PhaseKind::Flush => "flush",
        PhaseKind::Direction => "direct",
        PhaseKind::IndicatorSync => "indicators",
        PhaseKind::Complete => "complete",
    }
}

fn reason_name(reason: PauseReason) -> &'static str {
    match reason {
        PauseReason::Hover => "hover",
        PauseReason::Hidden => "hidden",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_request(&mut self, e: &RequestEvent) {
        let _ = writeln!(
            self.writer,
            "[request] carousel={} #{} {}->{} {:?} at {:.1}ms",
            e.carousel.0,
            e.serial,
            e.from,
            e.to,
            e.direction,
            ms(e.at),
        );
    }

    fn on_dropped(&mut self, e: &DroppedEvent) {
        let _ = writeln!(
            self.writer,
            "[dropped] carousel={} target={} current={} reason={:?} at {:.1}ms",
            e.carousel.0,
            e.target,
            e.current,
            e.reason,
            ms(e.at),
        );
    }

    fn on_phase(&mut self, e: &PhaseEvent) {
        let _ = writeln!(
            self.writer,
            "[phase] carousel={} #{} {} at {:.1}ms",
            e.carousel.0,
            e.serial,
            phase_name(e.phase),
            ms(e.at),
        );
    }

    fn on_completed(&mut self, e: &CompletedEvent) {
        let how = if e.settled_early { "settled" } else { "timer" };
        let _ = writeln!(
            self.writer,
            "[complete] carousel={} #{} {}->{} ({how}) at {:.1}ms",
            e.carousel.0,
            e.serial,
            e.from,
            e.to,
            ms(e.at),
        );
    }

    fn on_autoplay(&mut self, e: &AutoplayEvent) {
        let _ = match e.kind {
            AutoplayEventKind::Started { epoch } => writeln!(
                self.writer,
                "[autoplay] carousel={} start epoch={epoch} at {:.1}ms",
                e.carousel.0,
                ms(e.at),
            ),
            AutoplayEventKind::Stopped { epoch } => writeln!(
                self.writer,
                "[autoplay] carousel={} stop epoch={epoch} at {:.1}ms",
                e.carousel.0,
                ms(e.at),
            ),
            AutoplayEventKind::Paused(reason) => writeln!(
                self.writer,
                "[autoplay] carousel={} pause {}",
                e.carousel.0,
                reason_name(reason),
            ),
            AutoplayEventKind::Resumed(reason) => writeln!(
                self.writer,
                "[autoplay] carousel={} resume {}",
                e.carousel.0,
                reason_name(reason),
            ),
            AutoplayEventKind::Tick { acted } => writeln!(
                self.writer,
                "[autoplay] carousel={} tick{} at {:.1}ms",
                e.carousel.0,
                if acted { "" } else { " (paused)" },
                ms(e.at),
            ),
        };
    }

    fn on_input(&mut self, e: &InputEvent) {
        let _ = writeln!(
            self.writer,
            "[input] carousel={} {:?} {:?} at {:.1}ms",
            e.carousel.0,
            e.source,
            e.command,
            ms(e.at),
        );
    }
}
