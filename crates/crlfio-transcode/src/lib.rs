//! Streaming line-ending conversion for byte readers.
//!
//! Each transcoder wraps an upstream reader and rewrites line endings in place,
//! inside the buffer the caller hands to `read`:
//! - [`CrlfFromLf`] inserts a CR before every bare LF
//! - [`LfFromCrlf`] collapses every CR LF pair to LF
//! - [`LfFromCrOrCrlf`] turns every CR, paired or not, into a single LF
//!
//! A CR LF pair split across two upstream reads is handled by carrying the
//! trailing CR to the next call. No internal buffer is allocated.
//!
//! ```
//! use std::io::Read;
//!
//! use crlfio_transcode::LfFromCrlf;
//!
//! let mut reader = LfFromCrlf::new(&b"one\r\ntwo\r\n"[..]);
//! let mut out = String::new();
//! reader.read_to_string(&mut out).unwrap();
//! assert_eq!(out, "one\ntwo\n");
//! ```

pub mod conversion;
pub mod cr_to_lf;
pub mod crlf_to_lf;
pub mod error;
pub mod lf_to_crlf;
pub mod mode;
pub mod reader;

mod engine;
mod state;

#[cfg(feature = "async")]
pub mod async_reader;

pub use conversion::{Conversion, Converted, CR, LF};
pub use cr_to_lf::CrToLf;
pub use crlf_to_lf::CrlfToLf;
pub use error::ModeError;
pub use lf_to_crlf::LfToCrlf;
pub use mode::{transcode, AnyTranscoder, Mode};
pub use reader::{CrlfFromLf, LfFromCrOrCrlf, LfFromCrlf, Transcoder};

#[cfg(feature = "async")]
pub use async_reader::{AsyncCrlfFromLf, AsyncLfFromCrOrCrlf, AsyncLfFromCrlf, AsyncTranscoder};
