/// Errors produced by the stream-level primitives.
///
/// Parsers that report through their own error type accept any
/// `E: From<StreamError>`, so grammar error enums usually carry these two
/// cases as variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum StreamError {
    /// A token was required but the stream was exhausted.
    #[error("unexpected end of input")]
    EndOfInput,
    /// Input remained where exhaustion was required.
    #[error("end of input expected")]
    EndExpected,
}
