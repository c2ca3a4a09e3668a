use crate::conversion::{Conversion, Converted, CR, LF};

const CRLF: [u8; 2] = [CR, LF];

/// Collapses CR LF pairs to LF. Any other CR passes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrlfToLf;

impl Conversion for CrlfToLf {
    const LONE_CR: u8 = CR;
    const PAIR: &'static [u8] = &[LF];
    const NAME: &'static str = "crlf-to-lf";

    fn read_limit(capacity: usize) -> usize {
        capacity
    }

    fn convert(buf: &mut [u8], len: usize) -> Converted {
        Converted::fitted(collapse_pairs(buf, len))
    }
}

/// Remove the CR of every CR LF pair in `buf[..len]`, returning the new length.
///
/// Each segment between two matches moves left by one more position than the
/// segment before it, so every byte is moved at most once.
pub(crate) fn collapse_pairs(buf: &mut [u8], len: usize) -> usize {
    let mut shift = 0usize;
    let mut search = 0usize;
    // Start of the segment (beginning at a pair's LF) still waiting to move.
    let mut pending_segment: Option<usize> = None;

    while let Some(relative) = find_crlf(&buf[search..len]) {
        let cr = search + relative;
        if let Some(from) = pending_segment {
            buf.copy_within(from..cr, from - shift);
        }
        shift += 1;
        pending_segment = Some(cr + 1);
        search = cr + CRLF.len();
    }

    if let Some(from) = pending_segment {
        buf.copy_within(from..len, from - shift);
    }
    len - shift
}

fn find_crlf(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(CRLF.len())
        .position(|window| window == &CRLF[..])
}
