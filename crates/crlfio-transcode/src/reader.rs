use std::io::{self, Read};

use crate::conversion::Conversion;
use crate::cr_to_lf::CrToLf;
use crate::crlf_to_lf::CrlfToLf;
use crate::engine::{Engine, Step};
use crate::lf_to_crlf::LfToCrlf;

/// Converts line endings of any `Read` source as it is read.
///
/// Conversion happens in place in the buffer passed to [`Read::read`]; the
/// transcoder itself only remembers whether the previous read ended on a CR.
/// Upstream errors are returned unchanged and leave that state intact, so a
/// caller may retry after [`io::ErrorKind::Interrupted`].
///
/// A transcoder serves one reader at a time. Sharing one across threads
/// needs external synchronisation, as with any `&mut` reader.
#[derive(Debug)]
pub struct Transcoder<R, C> {
    source: R,
    engine: Engine<C>,
}

/// Reader that converts LF to CR LF.
pub type CrlfFromLf<R> = Transcoder<R, LfToCrlf>;

/// Reader that converts CR LF to LF.
pub type LfFromCrlf<R> = Transcoder<R, CrlfToLf>;

/// Reader that converts CR and CR LF to LF.
pub type LfFromCrOrCrlf<R> = Transcoder<R, CrToLf>;

impl<R, C: Conversion> Transcoder<R, C> {
    /// Wrap `source`.
    pub fn new(source: R) -> Self {
        Self {
            source,
            engine: Engine::default(),
        }
    }

    /// Whether a trailing CR from the last read is waiting for its successor.
    pub fn is_pending(&self) -> bool {
        self.engine.is_pending_cr()
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Mutably borrow the underlying source.
    ///
    /// Reading from it directly bypasses conversion and can split a pair.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Consume the transcoder and return the source.
    ///
    /// A pending CR is dropped.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read, C: Conversion> Read for Transcoder<R, C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let (start, end) = match self.engine.begin(buf) {
                Step::Done(n) => return Ok(n),
                Step::Read { start, end } => (start, end),
            };

            let read = self.source.read(&mut buf[start..end])?;
            debug_assert!(read <= end - start);

            if let Some(n) = self.engine.finish(buf, start, read) {
                return Ok(n);
            }
        }
    }
}
