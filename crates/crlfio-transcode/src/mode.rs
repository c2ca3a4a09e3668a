use std::fmt;
use std::io::{self, Read};
use std::str::FromStr;

use crate::conversion::Conversion;
use crate::cr_to_lf::CrToLf;
use crate::crlf_to_lf::CrlfToLf;
use crate::error::ModeError;
use crate::lf_to_crlf::LfToCrlf;
use crate::reader::{CrlfFromLf, LfFromCrOrCrlf, LfFromCrlf};

/// Which line-ending conversion to apply, chosen at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// LF to CR LF (`unix2dos`).
    LfToCrlf,
    /// CR LF to LF (`dos2unix`).
    CrlfToLf,
    /// CR or CR LF to LF (`mac2unix`).
    CrToLf,
}

impl Mode {
    /// Every mode, in declaration order.
    pub const ALL: [Mode; 3] = [Mode::LfToCrlf, Mode::CrlfToLf, Mode::CrToLf];

    /// Canonical name, also accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::LfToCrlf => LfToCrlf::NAME,
            Mode::CrlfToLf => CrlfToLf::NAME,
            Mode::CrToLf => CrToLf::NAME,
        }
    }

    /// Wrap `source` in the transcoder for this mode.
    pub fn wrap<R: Read>(self, source: R) -> AnyTranscoder<R> {
        match self {
            Mode::LfToCrlf => AnyTranscoder::LfToCrlf(CrlfFromLf::new(source)),
            Mode::CrlfToLf => AnyTranscoder::CrlfToLf(LfFromCrlf::new(source)),
            Mode::CrToLf => AnyTranscoder::CrToLf(LfFromCrOrCrlf::new(source)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lf-to-crlf" | "unix2dos" => Ok(Mode::LfToCrlf),
            "crlf-to-lf" | "dos2unix" => Ok(Mode::CrlfToLf),
            "cr-to-lf" | "mac2unix" => Ok(Mode::CrToLf),
            _ => Err(ModeError::Unknown(s.to_string())),
        }
    }
}

/// A transcoder whose conversion was picked with [`Mode::wrap`].
#[derive(Debug)]
pub enum AnyTranscoder<R> {
    /// LF to CR LF.
    LfToCrlf(CrlfFromLf<R>),
    /// CR LF to LF.
    CrlfToLf(LfFromCrlf<R>),
    /// CR or CR LF to LF.
    CrToLf(LfFromCrOrCrlf<R>),
}

impl<R> AnyTranscoder<R> {
    /// The mode this transcoder was built for.
    pub fn mode(&self) -> Mode {
        match self {
            AnyTranscoder::LfToCrlf(_) => Mode::LfToCrlf,
            AnyTranscoder::CrlfToLf(_) => Mode::CrlfToLf,
            AnyTranscoder::CrToLf(_) => Mode::CrToLf,
        }
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &R {
        match self {
            AnyTranscoder::LfToCrlf(inner) => inner.get_ref(),
            AnyTranscoder::CrlfToLf(inner) => inner.get_ref(),
            AnyTranscoder::CrToLf(inner) => inner.get_ref(),
        }
    }

    /// Consume the transcoder and return the source.
    pub fn into_inner(self) -> R {
        match self {
            AnyTranscoder::LfToCrlf(inner) => inner.into_inner(),
            AnyTranscoder::CrlfToLf(inner) => inner.into_inner(),
            AnyTranscoder::CrToLf(inner) => inner.into_inner(),
        }
    }
}

impl<R: Read> Read for AnyTranscoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            AnyTranscoder::LfToCrlf(inner) => inner.read(buf),
            AnyTranscoder::CrlfToLf(inner) => inner.read(buf),
            AnyTranscoder::CrToLf(inner) => inner.read(buf),
        }
    }
}

/// Convert an in-memory byte string.
///
/// Runs through the same streaming reader, so the result is identical to
/// reading `input` from any source.
pub fn transcode(mode: Mode, input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() + input.len() / 16);
    match mode.wrap(input).read_to_end(&mut out) {
        Ok(_) => out,
        Err(err) => unreachable!("reading from a slice cannot fail: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names_and_aliases() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
        assert_eq!("dos2unix".parse::<Mode>().unwrap(), Mode::CrlfToLf);
        assert_eq!("UNIX2DOS".parse::<Mode>().unwrap(), Mode::LfToCrlf);
        assert_eq!("mac2unix".parse::<Mode>().unwrap(), Mode::CrToLf);
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "lf-to-cr".parse::<Mode>().unwrap_err();
        assert!(matches!(err, ModeError::Unknown(ref name) if name == "lf-to-cr"));
        assert!(err.to_string().contains("lf-to-cr"));
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Mode::CrToLf.to_string(), "cr-to-lf");
    }

    #[test]
    fn wrap_picks_matching_variant() {
        for mode in Mode::ALL {
            assert_eq!(mode.wrap(&b""[..]).mode(), mode);
        }
    }

    #[test]
    fn transcode_each_mode() {
        let input = b"a\r\nb\nc\rd";
        assert_eq!(transcode(Mode::LfToCrlf, input), b"a\r\nb\r\nc\rd");
        assert_eq!(transcode(Mode::CrlfToLf, input), b"a\nb\nc\rd");
        assert_eq!(transcode(Mode::CrToLf, input), b"a\nb\nc\nd");
    }

    #[test]
    fn into_inner_returns_source() {
        let source: &[u8] = b"left over";
        let transcoder = Mode::CrlfToLf.wrap(source);
        assert_eq!(transcoder.get_ref(), &source);
        assert_eq!(transcoder.into_inner(), source);
    }
}
