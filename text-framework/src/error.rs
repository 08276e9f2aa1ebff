use combinator_framework::StreamError;
use common_framework::LocationError;

/// Failures reported by the string-layer parsers.
///
/// Values are plain data; turning them into messages with line and column
/// information is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    #[error("unexpected end of input")]
    EndOfInput,
    #[error("expected end of input")]
    EndExpected,
    #[error("digit expected")]
    DigitExpected,
    #[error("whitespace expected")]
    WhitespaceExpected,
    #[error("'_' expected")]
    UnderscoreExpected,
    #[error("ASCII letter expected")]
    AsciiAlphaExpected,
    #[error("ASCII identifier character expected")]
    AsciiIdCharExpected,
    #[error("expected one of {expected:?}")]
    CharNotExpected { expected: String },
    #[error("none of {excluded:?} expected")]
    CharExcluded { excluded: String },
    #[error("expected {expected:?}")]
    StringMismatch { expected: String },
    #[error("offset {offset} has no line/column")]
    InvalidPosition { offset: usize },
}

impl From<StreamError> for TextError {
    fn from(error: StreamError) -> Self {
        match error {
            StreamError::EndOfInput => TextError::EndOfInput,
            StreamError::EndExpected => TextError::EndExpected,
        }
    }
}

impl From<LocationError> for TextError {
    fn from(error: LocationError) -> Self {
        match error {
            LocationError::InvalidPosition { offset, .. } => TextError::InvalidPosition { offset },
        }
    }
}
