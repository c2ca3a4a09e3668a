use crate::conversion::{Conversion, Converted, CR, LF};

/// Inserts a CR before every LF that does not already follow one.
///
/// Existing CR LF pairs are left alone, so converting text that already uses
/// CR LF is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct LfToCrlf;

impl Conversion for LfToCrlf {
    const LONE_CR: u8 = CR;
    const PAIR: &'static [u8] = &[CR, LF];
    const NAME: &'static str = "lf-to-crlf";

    /// Every input byte may double, so only half the region is read.
    fn read_limit(capacity: usize) -> usize {
        (capacity / 2).max(1)
    }

    fn convert(buf: &mut [u8], len: usize) -> Converted {
        let bare = (0..len).filter(|&i| is_bare_lf(buf, i)).count();
        if bare == 0 {
            return Converted::fitted(len);
        }

        if len + bare > buf.len() {
            // Only a one-byte buffer holding a single bare LF gets here.
            debug_assert!(len == 1 && buf.len() == 1);
            buf[0] = CR;
            return Converted {
                len: 1,
                held: Some(LF),
            };
        }

        // Walk backwards so every byte moves once, straight to its final slot.
        let mut end = len;
        let mut shift = bare;
        while shift > 0 {
            let Some(lf) = (0..end).rev().find(|&i| is_bare_lf(buf, i)) else {
                break;
            };
            buf.copy_within(lf..end, lf + shift);
            buf[lf + shift - 1] = CR;
            shift -= 1;
            end = lf;
        }

        Converted::fitted(len + bare)
    }
}

/// An LF at the start of the region is bare: a CR before it would have been
/// carried over and placed in front of the region.
fn is_bare_lf(buf: &[u8], index: usize) -> bool {
    buf[index] == LF && (index == 0 || buf[index - 1] != CR)
}
