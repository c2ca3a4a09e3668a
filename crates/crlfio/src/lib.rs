//! Streaming line-ending conversion.
//!
//! crlfio rewrites line endings while data is read, one caller buffer at a
//! time, without ever holding the whole stream in memory. CR LF pairs split
//! across reads are handled.
//!
//! # Crate Structure
//!
//! - [`transcoder`]: the transcoders, conversions and run-time [`Mode`]
//!
//! With the `cli` feature this crate also builds the `crlfio` binary, a
//! `dos2unix`/`unix2dos`/`mac2unix` filter over files or stdin.

/// Re-export transcoder types.
pub mod transcoder {
    pub use crlfio_transcode::*;
}

pub use crlfio_transcode::{transcode, CrlfFromLf, LfFromCrOrCrlf, LfFromCrlf, Mode};
