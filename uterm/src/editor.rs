//! Non-blocking line editor / input pump (spec.md §4.1). Consumes bytes from a
//! [`ByteRing`], mutates a [`LineBuffer`] and [`History`], and echoes bytes to a
//! [`ByteSink`]. Carries no dispatcher-state awareness: `drain` never needs to know
//! whether the caller is Idle or Live (SPEC_FULL.md §4.2).

use heapless::Vec as HVec;

use crate::config::{HISTORY_DEPTH, HISTORY_ENTRY_CAPACITY, LINE_CAPACITY};
use crate::history::History;
use crate::line::LineBuffer;
use crate::ring::ByteRing;
use crate::sink::ByteSink;

const ESC: u8 = 0x1B;
const CTRL_C: u8 = 0x03;
const BACKSPACE_ECHO: &[u8] = b"\x08 \x08";

/// Result of one `drain()` call (spec.md §9 Open Question: `DrainOutcome` naming,
/// resolved in SPEC_FULL.md §4.2). A single `CtrlC` variant is returned regardless of
/// dispatcher state; the dispatcher decides what Ctrl-C means in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    NoChange,
    PartialEdit,
    LineCommitted,
    CtrlC,
}

pub struct LineEditor<
    const LINE: usize = LINE_CAPACITY,
    const HIST_N: usize = HISTORY_DEPTH,
    const HIST_L: usize = HISTORY_ENTRY_CAPACITY,
> {
    line: LineBuffer<LINE>,
    history: History<HIST_N, HIST_L>,
    escape: HVec<u8, 3>,
}

impl<const LINE: usize, const HIST_N: usize, const HIST_L: usize> LineEditor<LINE, HIST_N, HIST_L> {
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
            history: History::new(),
            escape: HVec::new(),
        }
    }

    /// Drains bytes from `ring` until it is empty or a commit/Ctrl-C byte is seen,
    /// echoing edits to `sink` as it goes (spec.md §4.1 per-byte algorithm).
    pub fn drain<const N: usize>(&mut self, ring: &ByteRing<N>, sink: &mut impl ByteSink) -> DrainOutcome {
        let mut edited = false;
        while let Some(byte) = ring.pop() {
            if !self.escape.is_empty() {
                let _ = self.escape.push(byte);
                if self.escape.len() == 3 {
                    self.apply_escape(sink);
                    edited = true;
                }
                continue;
            }
            match byte {
                ESC => {
                    self.escape.clear();
                    let _ = self.escape.push(byte);
                }
                0x08 | 0x7F => {
                    if self.line.backspace() {
                        sink.write(BACKSPACE_ECHO);
                        edited = true;
                    }
                }
                b'\n' | b'\r' => {
                    if !self.line.is_empty() {
                        self.history.push(self.line.as_bytes());
                    }
                    self.history.reset_browse();
                    return DrainOutcome::LineCommitted;
                }
                CTRL_C => {
                    // spec.md §4.1: Ctrl-C is an immediate commit of a one-byte line
                    // containing 0x03, not a discard.
                    self.line.clear();
                    self.line.push(CTRL_C);
                    return DrainOutcome::CtrlC;
                }
                other => {
                    if self.line.push(other) {
                        sink.write(&[other]);
                        edited = true;
                    }
                }
            }
        }
        if edited {
            DrainOutcome::PartialEdit
        } else {
            DrainOutcome::NoChange
        }
    }

    fn apply_escape(&mut self, sink: &mut impl ByteSink) {
        let seq = [self.escape[0], self.escape[1], self.escape[2]];
        self.escape.clear();
        if seq[1] != b'[' {
            return;
        }
        match seq[2] {
            b'A' => self.recall(sink, true),
            b'B' => self.recall(sink, false),
            _ => {}
        }
    }

    fn recall(&mut self, sink: &mut impl ByteSink, up: bool) {
        let recalled = if up { self.history.browse_up() } else { self.history.browse_down() };
        match recalled {
            Some(bytes) => self.line.set(bytes),
            None => self.line.clear(),
        }
        self.reprint(sink);
    }

    fn reprint(&self, sink: &mut impl ByteSink) {
        sink.write(b"\r\x1b[2K> ");
        sink.write(self.line.as_bytes());
    }

    /// Copies out and clears the committed line. The dispatcher calls this exactly
    /// once per `LineCommitted`/`CtrlC` outcome.
    pub fn take_line(&mut self) -> LineBuffer<LINE> {
        let line = self.line;
        self.line.clear();
        line
    }

    /// Clears the in-progress line without treating it as committed (Ctrl-C while
    /// Idle, spec.md §5 Cancellation).
    pub fn clear_line(&mut self) {
        self.line.clear();
    }

    pub fn current_line(&self) -> &[u8] {
        self.line.as_bytes()
    }
}

impl<const LINE: usize, const HIST_N: usize, const HIST_L: usize> Default for LineEditor<LINE, HIST_N, HIST_L> {
    fn default() -> Self {
        Self::new()
    }
}
