//! The per-variant half of a transcoder.
//!
//! A [`Conversion`] only knows how to rewrite a region of bytes that is
//! already in the caller's buffer. Reading from upstream, carrying a trailing
//! CR between calls and flushing at end of stream are shared by every
//! variant and live in the transcoder itself.

/// Carriage return (0x0D).
pub const CR: u8 = b'\r';

/// Line feed (0x0A).
pub const LF: u8 = b'\n';

/// Result of rewriting a region in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converted {
    /// Number of converted bytes now at the start of the buffer.
    pub len: usize,
    /// A converted byte that did not fit and must be emitted next.
    pub held: Option<u8>,
}

impl Converted {
    /// A conversion whose whole output fit in the buffer.
    pub fn fitted(len: usize) -> Self {
        Self { len, held: None }
    }
}

/// A line-ending mapping applied in place.
pub trait Conversion {
    /// Output for a CR that is not followed by LF.
    const LONE_CR: u8;

    /// Output for a CR LF pair.
    const PAIR: &'static [u8];

    /// Human-readable name used in diagnostics.
    const NAME: &'static str;

    /// How many upstream bytes may be read into a region of `capacity` bytes
    /// so that the converted output still fits. Never zero for a non-zero
    /// capacity.
    fn read_limit(capacity: usize) -> usize;

    /// Rewrite `buf[..len]` in place.
    ///
    /// The region may start with a CR that was carried over from the previous
    /// call. A CR left as the last output byte is withheld by the caller.
    fn convert(buf: &mut [u8], len: usize) -> Converted;
}
