//! I/O-free fill logic shared by the blocking and async transcoders.
//!
//! A fill is split in two halves around the single upstream read:
//! [`Engine::begin`] says where in the caller's buffer fresh bytes may land,
//! [`Engine::finish`] converts what arrived. The engine never touches the
//! source itself, so a failed or pending upstream read leaves it unchanged.

use std::marker::PhantomData;

use crate::conversion::{Conversion, CR, LF};
use crate::state::Carry;

/// What the caller must do after [`Engine::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// The fill is complete without reading upstream.
    Done(usize),
    /// Read upstream into `buf[start..end]`, then call [`Engine::finish`].
    Read { start: usize, end: usize },
}

#[derive(Debug)]
pub(crate) struct Engine<C> {
    carry: Carry,
    _conversion: PhantomData<fn() -> C>,
}

impl<C> Default for Engine<C> {
    fn default() -> Self {
        Self {
            carry: Carry::Clear,
            _conversion: PhantomData,
        }
    }
}

impl<C: Conversion> Engine<C> {
    pub(crate) fn is_pending_cr(&self) -> bool {
        self.carry.is_pending_cr()
    }

    pub(crate) fn begin(&mut self, buf: &mut [u8]) -> Step {
        if buf.is_empty() {
            return Step::Done(0);
        }

        match self.carry {
            Carry::Held(byte) => {
                buf[0] = byte;
                self.carry = Carry::Clear;
                tracing::trace!(conversion = C::NAME, "released held byte");
                Step::Done(1)
            }
            // No room beside the CR: read one byte over it and resolve in place.
            Carry::PendingCr if buf.len() == 1 => Step::Read { start: 0, end: 1 },
            Carry::PendingCr => {
                buf[0] = CR;
                Step::Read {
                    start: 1,
                    end: 1 + C::read_limit(buf.len() - 1),
                }
            }
            Carry::Clear => Step::Read {
                start: 0,
                end: C::read_limit(buf.len()),
            },
        }
    }

    /// Convert the `read` bytes that landed at `buf[start..]`.
    ///
    /// Returns `None` when nothing could be emitted yet (the only new byte was
    /// a CR that had to be withheld) and the caller should read again.
    pub(crate) fn finish(&mut self, buf: &mut [u8], start: usize, read: usize) -> Option<usize> {
        if read == 0 {
            return Some(self.flush(buf));
        }
        if self.carry.is_pending_cr() && start == 0 {
            return Some(self.resolve_narrow(buf));
        }

        let converted = C::convert(buf, start + read);
        if let Some(byte) = converted.held {
            self.carry = Carry::Held(byte);
            return Some(converted.len);
        }

        let mut len = converted.len;
        if len > 0 && buf[len - 1] == CR {
            len -= 1;
            if !self.carry.is_pending_cr() {
                tracing::trace!(conversion = C::NAME, "withholding trailing CR");
            }
            self.carry = Carry::PendingCr;
        } else {
            self.carry = Carry::Clear;
        }

        (len > 0).then_some(len)
    }

    /// Upstream is exhausted: emit a pending CR as a lone CR.
    fn flush(&mut self, buf: &mut [u8]) -> usize {
        if !self.carry.is_pending_cr() {
            return 0;
        }
        tracing::trace!(conversion = C::NAME, "flushing pending CR at end of stream");
        buf[0] = C::LONE_CR;
        self.carry = Carry::Clear;
        1
    }

    /// One-byte buffer with a pending CR: `buf[0]` holds its successor.
    fn resolve_narrow(&mut self, buf: &mut [u8]) -> usize {
        let next = buf[0];
        if next == LF {
            buf[0] = C::PAIR[0];
            self.carry = C::PAIR
                .get(1)
                .map_or(Carry::Clear, |&byte| Carry::Held(byte));
        } else {
            buf[0] = C::LONE_CR;
            self.carry = if next == CR {
                Carry::PendingCr
            } else {
                Carry::Held(next)
            };
        }
        1
    }
}
