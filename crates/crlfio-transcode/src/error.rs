/// Errors produced while selecting a conversion.
///
/// Conversion itself never fails on its own: upstream read errors are passed
/// through as the original [`std::io::Error`].
#[derive(Debug, thiserror::Error)]
pub enum ModeError {
    /// The name does not match any known conversion.
    #[error("unknown conversion mode {0:?} (expected lf-to-crlf, crlf-to-lf or cr-to-lf)")]
    Unknown(String),
}
