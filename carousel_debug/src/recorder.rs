// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records, one tag byte followed by
//! the event's fields. [`decode`] reads them back as an iterator of
//! [`RecordedEvent`]. Slide indices are stored as `u32`.

use carousel_core::autoplay::PauseReason;
use carousel_core::id::CarouselId;
use carousel_core::input::{Command, InputSource};
use carousel_core::marker::Direction;
use carousel_core::time::HostTime;
use carousel_core::trace::{
    AutoplayEvent, AutoplayEventKind, CompletedEvent, DroppedEvent, InputEvent, PhaseEvent,
    PhaseKind, RequestEvent, TraceSink,
};
use carousel_core::transition::DropReason;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_REQUEST: u8 = 1;
const TAG_DROPPED: u8 = 2;
const TAG_PHASE: u8 = 3;
const TAG_COMPLETED: u8 = 4;
const TAG_AUTOPLAY: u8 = 5;
const TAG_INPUT: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_index(&mut self, v: usize) {
        self.write_u32(u32::try_from(v).unwrap_or(u32::MAX));
    }

    fn write_head(&mut self, tag: u8, carousel: CarouselId, at: HostTime) {
        self.write_u8(tag);
        self.write_u32(carousel.0);
        self.write_u64(at.ticks());
    }

    fn write_direction(&mut self, d: Direction) {
        self.write_u8(match d {
            Direction::Horizontal => 0,
            Direction::Vertical => 1,
        });
    }

    fn write_phase(&mut self, p: PhaseKind) {
        self.write_u8(match p {
            PhaseKind::Reset => 0,
            PhaseKind::Mark => 1,
            PhaseKind::Flush => 2,
            PhaseKind::Direction => 3,
            PhaseKind::IndicatorSync => 4,
            PhaseKind::Complete => 5,
        });
    }

    fn write_reason(&mut self, r: PauseReason) {
        self.write_u8(match r {
            PauseReason::Hover => 0,
            PauseReason::Hidden => 1,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_request(&mut self, e: &RequestEvent) {
        self.write_head(TAG_REQUEST, e.carousel, e.at);
        self.write_u64(e.serial);
        self.write_index(e.from);
        self.write_index(e.to);
        self.write_direction(e.direction);
    }

    fn on_dropped(&mut self, e: &DroppedEvent) {
        self.write_head(TAG_DROPPED, e.carousel, e.at);
        self.write_index(e.target);
        self.write_index(e.current);
        self.write_u8(match e.reason {
            DropReason::SingleSlide => 0,
            DropReason::AlreadyActive => 1,
            DropReason::InFlight => 2,
        });
    }

    fn on_phase(&mut self, e: &PhaseEvent) {
        self.write_head(TAG_PHASE, e.carousel, e.at);
        self.write_u64(e.serial);
        self.write_phase(e.phase);
    }

    fn on_completed(&mut self, e: &CompletedEvent) {
        self.write_head(TAG_COMPLETED, e.carousel, e.at);
        self.write_u64(e.serial);
        self.write_index(e.from);
        self.write_index(e.to);
        self.write_u8(u8::from(e.settled_early));
    }

    fn on_autoplay(&mut self, e: &AutoplayEvent) {
        self.write_head(TAG_AUTOPLAY, e.carousel, e.at);
        match e.kind {
            AutoplayEventKind::Started { epoch } => {
                self.write_u8(0);
                self.write_u32(epoch);
            }
            AutoplayEventKind::Stopped { epoch } => {
                self.write_u8(1);
                self.write_u32(epoch);
            }
            AutoplayEventKind::Paused(reason) => {
                self.write_u8(2);
                self.write_reason(reason);
            }
            AutoplayEventKind::Resumed(reason) => {
                self.write_u8(3);
                self.write_reason(reason);
            }
            AutoplayEventKind::Tick { acted } => {
                self.write_u8(4);
                self.write_u8(u8::from(acted));
            }
        }
    }

    fn on_input(&mut self, e: &InputEvent) {
        self.write_head(TAG_INPUT, e.carousel, e.at);
        self.write_u8(match e.source {
            InputSource::Touch => 0,
            InputSource::Keyboard => 1,
            InputSource::Indicator => 2,
            InputSource::Control => 3,
        });
        match e.command {
            Command::Show(index) => {
                self.write_u8(0);
                self.write_index(index);
            }
            Command::Advance => self.write_u8(1),
            Command::Retreat => self.write_u8(2),
        }
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`RequestEvent`].
    Request(RequestEvent),
    /// A [`DroppedEvent`].
    Dropped(DroppedEvent),
    /// A [`PhaseEvent`].
    Phase(PhaseEvent),
    /// A [`CompletedEvent`].
    Completed(CompletedEvent),
    /// An [`AutoplayEvent`].
    Autoplay(AutoplayEvent),
    /// An [`InputEvent`].
    Input(InputEvent),
}

impl RecordedEvent {
    /// Returns the carousel the event belongs to.
    #[must_use]
    pub fn carousel(&self) -> CarouselId {
        match self {
            Self::Request(e) => e.carousel,
            Self::Dropped(e) => e.carousel,
            Self::Phase(e) => e.carousel,
            Self::Completed(e) => e.carousel,
            Self::Autoplay(e) => e.carousel,
            Self::Input(e) => e.carousel,
        }
    }

    /// Returns the host time of the event.
    #[must_use]
    pub fn at(&self) -> HostTime {
        match self {
            Self::Request(e) => e.at,
            Self::Dropped(e) => e.at,
            Self::Phase(e) => e.at,
            Self::Completed(e) => e.at,
            Self::Autoplay(e) => e.at,
            Self::Input(e) => e.at,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Decoding stops at the first truncated or unknown record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_index(&mut self) -> Option<usize> {
        usize::try_from(self.read_u32()?).ok()
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_direction(&mut self) -> Option<Direction> {
        match self.read_u8()? {
            0 => Some(Direction::Horizontal),
            1 => Some(Direction::Vertical),
            _ => None,
        }
    }

    fn read_phase(&mut self) -> Option<PhaseKind> {
        Some(match self.read_u8()? {
            0 => PhaseKind::Reset,
            1 => PhaseKind::Mark,
            2 => PhaseKind::Flush,
            3 => PhaseKind::Direction,
            4 => PhaseKind::IndicatorSync,
            5 => PhaseKind::Complete,
            _ => return None,
        })
    }

    fn read_reason(&mut self) -> Option<PauseReason> {
        match self.read_u8()? {
            0 => Some(PauseReason::Hover),
            1 => Some(PauseReason::Hidden),
            _ => None,
        }
    }

    fn decode_request(&mut self, carousel: CarouselId, at: HostTime) -> Option<RecordedEvent> {
        Some(RecordedEvent::Request(RequestEvent {
            carousel,
            serial: self.read_u64()?,
            from: self.read_index()?,
            to: self.read_index()?,
            direction: self.read_direction()?,
            at,
        }))
    }

    fn decode_dropped(&mut self, carousel: CarouselId, at: HostTime) -> Option<RecordedEvent> {
        Some(RecordedEvent::Dropped(DroppedEvent {
            carousel,
            target: self.read_index()?,
            current: self.read_index()?,
            reason: match self.read_u8()? {
                0 => DropReason::SingleSlide,
                1 => DropReason::AlreadyActive,
                2 => DropReason::InFlight,
                _ => return None,
            },
            at,
        }))
    }

    fn decode_phase(&mut self, carousel: CarouselId, at: HostTime) -> Option<RecordedEvent> {
        Some(RecordedEvent::Phase(PhaseEvent {
            carousel,
            serial: self.read_u64()?,
            phase: self.read_phase()?,
            at,
        }))
    }

    fn decode_completed(&mut self, carousel: CarouselId, at: HostTime) -> Option<RecordedEvent> {
        Some(RecordedEvent::Completed(CompletedEvent {
            carousel,
            serial: self.read_u64()?,
            from: self.read_index()?,
            to: self.read_index()?,
            settled_early: self.read_bool()?,
            at,
        }))
    }

    fn decode_autoplay(&mut self, carousel: CarouselId, at: HostTime) -> Option<RecordedEvent> {
        let kind = match self.read_u8()? {
            0 => AutoplayEventKind::Started {
                epoch: self.read_u32()?,
            },
            1 => AutoplayEventKind::Stopped {
                epoch: self.read_u32()?,
            },
            2 => AutoplayEventKind::Paused(self.read_reason()?),
            3 => AutoplayEventKind::Resumed(self.read_reason()?),
            4 => AutoplayEventKind::Tick {
                acted: self.read_bool()?,
            },
            _ => return None,
        };
        Some(RecordedEvent::Autoplay(AutoplayEvent { carousel, kind, at }))
    }

    fn decode_input(&mut self, carousel: CarouselId, at: HostTime) -> Option<RecordedEvent> {
        let source = match self.read_u8()? {
            0 => InputSource::Touch,
            1 => InputSource::Keyboard,
            2 => InputSource::Indicator,
            3 => InputSource::Control,
            _ => return None,
        };
        let command = match self.read_u8()? {
            0 => Command::Show(self.read_index()?),
            1 => Command::Advance,
            2 => Command::Retreat,
            _ => return None,
        };
        Some(RecordedEvent::Input(InputEvent {
            carousel,
            source,
            command,
            at,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        let carousel = CarouselId(self.read_u32()?);
        let at = HostTime(self.read_u64()?);
        match tag {
            TAG_REQUEST => self.decode_request(carousel, at),
            TAG_DROPPED => self.decode_dropped(carousel, at),
            TAG_PHASE => self.decode_phase(carousel, at),
            TAG_COMPLETED => self.decode_completed(carousel, at),
            TAG_AUTOPLAY => self.decode_autoplay(carousel, at),
            TAG_INPUT => self.decode_input(carousel, at),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_decode_in_order() {
        let mut rec = RecorderSink::new();
        rec.on_request(&RequestEvent {
            carousel: CarouselId(2),
            serial: 7,
            from: 0,
            to: 1,
            direction: Direction::Vertical,
            at: HostTime(1_000),
        });
        rec.on_autoplay(&AutoplayEvent {
            carousel: CarouselId(2),
            kind: AutoplayEventKind::Paused(PauseReason::Hover),
            at: HostTime(1_500),
        });
        rec.on_input(&InputEvent {
            carousel: CarouselId(2),
            source: InputSource::Indicator,
            command: Command::Show(4),
            at: HostTime(2_000),
        });

        let events: Vec<RecordedEvent> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 3);

        let RecordedEvent::Request(req) = &events[0] else {
            panic!("expected request, got {:?}", events[0]);
        };
        assert_eq!((req.serial, req.from, req.to), (7, 0, 1));
        assert_eq!(req.direction, Direction::Vertical);

        let RecordedEvent::Autoplay(ap) = &events[1] else {
            panic!("expected autoplay, got {:?}", events[1]);
        };
        assert_eq!(ap.kind, AutoplayEventKind::Paused(PauseReason::Hover));

        let RecordedEvent::Input(input) = &events[2] else {
            panic!("expected input, got {:?}", events[2]);
        };
        assert_eq!(input.command, Command::Show(4));
        assert_eq!(events[2].carousel(), CarouselId(2));
        assert_eq!(events[2].at(), HostTime(2_000));
    }

    #[test]
    fn truncated_record_ends_decoding() {
        let mut rec = RecorderSink::new();
        rec.on_phase(&PhaseEvent {
            carousel: CarouselId(0),
            serial: 1,
            phase: PhaseKind::Flush,
            at: HostTime(10),
        });
        rec.on_phase(&PhaseEvent {
            carousel: CarouselId(0),
            serial: 1,
            phase: PhaseKind::Direction,
            at: HostTime(20),
        });
        let bytes = rec.into_bytes();
        let cut = &bytes[..bytes.len() - 1];
        assert_eq!(decode(cut).count(), 1, "partial second record is dropped");
    }
}
