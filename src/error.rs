use thiserror::Error;

/// Errors that can occur while encoding a value into its hexadecimal form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The Levenshtein size preamble outgrew the 64-bit staging buffer.
    /// Reachable only for exponents wider than roughly 2^64 bits.
    #[error("Levenshtein preamble > 64 bits")]
    PreambleOverflow,
}

/// The reason an encoded string failed to decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("'{0}' is not a hexadecimal digit")]
    NotHexDigit(char),

    #[error("'{0}' is not a valid tag nibble")]
    InvalidTag(char),

    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A Levenshtein length field was too wide for the 64-bit read path.
    #[error("Levenshtein number {0} > 63 bits")]
    IntegerOverflow(u64),

    /// A Levenshtein body was wider than the largest integer the decoder
    /// will materialize.
    #[error("Levenshtein number {size} > {limit} bits")]
    BigIntegerOverflow { size: u64, limit: u64 },
}

/// A string could not be decoded into a [`BigFloat`](crate::BigFloat).
///
/// Carries the offending input together with the underlying cause.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot decode {input:?}")]
pub struct ParseError {
    pub input: String,
    #[source]
    pub kind: ParseErrorKind,
}

/// An accessor was called on a value whose range does not support it,
/// e.g. the significand of an infinity or the NaN payload of a finite
/// number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{op}() is not supported on {value}")]
pub struct UnsupportedOperation {
    pub value: String,
    pub op: &'static str,
}

/// Errors from the power-of-two radix converter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("radix {0} is not a power of 2 between 2 and 32")]
    InvalidRadix(u32),

    #[error("digit {digit} is out of range for radix {radix}")]
    InvalidDigit { digit: u32, radix: u32 },

    #[error("{0} is infinite")]
    Infinite(String),

    #[error("{0} is NaN")]
    NotANumber(String),

    #[error("{value} overflows the radix-{radix} scale")]
    ScaleOverflow { value: String, radix: u32 },
}

/// Result type for decoding operations, before the offending input is
/// attached.
pub type ParseResult<T> = Result<T, ParseErrorKind>;

/// Result type for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;
