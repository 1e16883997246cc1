//! The byte sink external collaborator (spec.md §6): emits output bytes, including raw
//! ANSI escapes, with no return status and no assumption about framing. Modeled on
//! `ushell_logger::UnifiedWriter`, narrowed to the one method this crate actually calls.

/// Something that accepts output bytes. Implemented by the host (UART driver, terminal
/// emulator pipe, in-memory buffer for tests).
pub trait ByteSink {
    fn write(&mut self, bytes: &[u8]);
}

/// Any `FnMut(&[u8])` closure is a sink, the way `ushell_input`'s `CallbackWriter` wraps
/// a closure instead of requiring a named type for the common case.
impl<F: FnMut(&[u8])> ByteSink for F {
    fn write(&mut self, bytes: &[u8]) {
        (self)(bytes)
    }
}
