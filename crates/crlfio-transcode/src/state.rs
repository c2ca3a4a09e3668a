/// What a transcoder carries from one fill call to the next.
///
/// # Invariants
/// - At most one byte is ever carried.
/// - Whatever is carried is resolved by the next fill call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Carry {
    /// Nothing carried.
    #[default]
    Clear,
    /// The last byte consumed was a CR whose successor has not been read yet.
    PendingCr,
    /// An already-converted byte that did not fit in a one-byte buffer.
    Held(u8),
}

impl Carry {
    pub(crate) fn is_pending_cr(self) -> bool {
        matches!(self, Carry::PendingCr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clear() {
        assert_eq!(Carry::default(), Carry::Clear);
        assert!(!Carry::default().is_pending_cr());
    }

    #[test]
    fn only_pending_cr_reports_pending() {
        assert!(Carry::PendingCr.is_pending_cr());
        assert!(!Carry::Held(b'\r').is_pending_cr());
    }
}
