use crate::conversion::{Conversion, Converted, CR, LF};
use crate::crlf_to_lf::collapse_pairs;

/// Normalizes every CR, alone or followed by LF, to a single LF.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrToLf;

impl Conversion for CrToLf {
    const LONE_CR: u8 = LF;
    const PAIR: &'static [u8] = &[LF];
    const NAME: &'static str = "cr-to-lf";

    fn read_limit(capacity: usize) -> usize {
        capacity
    }

    fn convert(buf: &mut [u8], len: usize) -> Converted {
        let len = collapse_pairs(buf, len);
        // Every CR left before the final byte had a non-LF successor. The final
        // byte's successor is unknown, so it stays a CR and gets withheld.
        if let Some((_, interior)) = buf[..len].split_last_mut() {
            for byte in interior.iter_mut().filter(|byte| **byte == CR) {
                *byte = LF;
            }
        }
        Converted::fitted(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(input: &[u8]) -> Vec<u8> {
        let mut buf = input.to_vec();
        let converted = CrToLf::convert(&mut buf, input.len());
        assert_eq!(converted.held, None);
        buf.truncate(converted.len);
        buf
    }

    #[test]
    fn lone_and_paired_cr_become_one_lf() {
        assert_eq!(convert(b"a\rb\r\nc\nd"), b"a\nb\nc\nd");
    }

    #[test]
    fn cr_before_cr_lf() {
        assert_eq!(convert(b"\r\r\n"), b"\n\n");
        assert_eq!(convert(b"\r\r\r"), b"\n\n\r");
    }

    #[test]
    fn trailing_cr_left_for_deferral() {
        assert_eq!(convert(b"alpha\n\nbravo\r"), b"alpha\n\nbravo\r");
        assert_eq!(convert(b"\r"), b"\r");
    }

    #[test]
    fn empty_region() {
        assert_eq!(convert(b""), b"");
    }
}
