//! Tokio `AsyncRead` counterpart of [`Transcoder`](crate::Transcoder).

use std::io;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

use crate::conversion::Conversion;
use crate::cr_to_lf::CrToLf;
use crate::crlf_to_lf::CrlfToLf;
use crate::engine::{Engine, Step};
use crate::lf_to_crlf::LfToCrlf;

/// Converts line endings of an `AsyncRead` source as it is polled.
///
/// Behaves exactly like the blocking transcoder. When the source returns
/// `Pending` the carry-over state is left untouched.
#[derive(Debug)]
pub struct AsyncTranscoder<R, C> {
    source: R,
    engine: Engine<C>,
}

/// Async reader that converts LF to CR LF.
pub type AsyncCrlfFromLf<R> = AsyncTranscoder<R, LfToCrlf>;

/// Async reader that converts CR LF to LF.
pub type AsyncLfFromCrlf<R> = AsyncTranscoder<R, CrlfToLf>;

/// Async reader that converts CR and CR LF to LF.
pub type AsyncLfFromCrOrCrlf<R> = AsyncTranscoder<R, CrToLf>;

impl<R, C: Conversion> AsyncTranscoder<R, C> {
    /// Wrap `source`.
    pub fn new(source: R) -> Self {
        Self {
            source,
            engine: Engine::default(),
        }
    }

    /// Whether a trailing CR from the last poll is waiting for its successor.
    pub fn is_pending(&self) -> bool {
        self.engine.is_pending_cr()
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Mutably borrow the underlying source.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Consume the transcoder and return the source, dropping a pending CR.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: AsyncRead + Unpin, C: Conversion> AsyncRead for AsyncTranscoder<R, C> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let filled = {
            let dst = buf.initialize_unfilled();
            loop {
                let (start, end) = match this.engine.begin(dst) {
                    Step::Done(n) => break n,
                    Step::Read { start, end } => (start, end),
                };

                let mut upstream = ReadBuf::new(&mut dst[start..end]);
                ready!(Pin::new(&mut this.source).poll_read(cx, &mut upstream))?;
                let read = upstream.filled().len();

                if let Some(n) = this.engine.finish(dst, start, read) {
                    break n;
                }
            }
        };
        buf.advance(filled);
        Poll::Ready(Ok(()))
    }
}
