//! Decoding of the order-preserving hexadecimal form back into a
//! [`BigFloat`].
//!
//! The first nibble selects the branch: the four tags without a payload
//! return their constant immediately, NaN tags carry a Levenshtein-coded
//! payload, and the finite tags carry the exponent followed by the
//! fractional remainder. Tag nibbles outside the alphabet are rejected.

use num_bigint::BigInt;
use tracing::trace;

use crate::bigfloat::BigFloat;
use crate::bits::BitSource;
use crate::encoder::{bit_length, not};
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::levenshtein;

/// Convert a string representation back to a number.
///
/// # Errors
///
/// Fails with [`ParseError`] on a non-hex character, a tag nibble
/// outside the alphabet, a truncated stream, or a Levenshtein field
/// beyond the decoder's guards. The error wraps the offending input and
/// the underlying cause.
pub fn decode(input: &str) -> Result<BigFloat, ParseError> {
    decode_value(input).map_err(|kind| ParseError {
        input: input.to_owned(),
        kind,
    })
}

fn decode_value(input: &str) -> ParseResult<BigFloat> {
    let mut bits = BitSource::new(input);
    let tag = bits.get_bits(4)?;
    let negative = tag < 8;
    let exponent_negative = tag & 1 == 0;
    bits.set_invert(exponent_negative);
    match tag {
        0x0 => return Ok(BigFloat::nan(true, levenshtein::decode_from(&mut bits)?)),
        0x1 => return Ok(BigFloat::nan(true, -levenshtein::decode_from(&mut bits)?)),
        0x3 => return Ok(BigFloat::negative_infinity()),
        0x7 => return Ok(BigFloat::negative_zero()),
        0x8 => return Ok(BigFloat::zero()),
        0xc => return Ok(BigFloat::infinity()),
        0xe => return Ok(BigFloat::nan(false, -levenshtein::decode_from(&mut bits)?)),
        0xf => return Ok(BigFloat::nan(false, levenshtein::decode_from(&mut bits)?)),
        0x4 | 0x5 | 0xa | 0xb => {}
        _ => {
            #[allow(clippy::cast_possible_truncation)]
            let digit = char::from_digit(tag as u32, 16).unwrap_or('?');
            return Err(ParseErrorKind::InvalidTag(digit));
        }
    }

    // A finite non-zero number: exponent, then the fraction tail.
    let mut exponent = levenshtein::decode_from(&mut bits)?;
    let significand = bits.get_fraction(negative)?;
    if exponent_negative {
        exponent = -exponent;
    }
    if negative {
        if bit_length(&significand) == 1 {
            // significand == -1
            exponent = -exponent;
        } else {
            // significand < -1
            exponent = not(&exponent);
        }
    }
    let result = BigFloat::new(significand, exponent);
    trace!(input, value = %result, "decoded");
    Ok(result)
}

/// Decode a stand-alone signed-integer sort key produced by
/// [`encode_integer`](crate::encode_integer).
///
/// # Errors
///
/// Fails with [`ParseError`] on malformed input, like [`decode`].
pub fn decode_integer(input: &str) -> Result<BigInt, ParseError> {
    decode_integer_value(input).map_err(|kind| ParseError {
        input: input.to_owned(),
        kind,
    })
}

fn decode_integer_value(input: &str) -> ParseResult<BigInt> {
    let mut bits = BitSource::new(input);
    let negative = bits.get_bits(4)? & 1 == 0;
    bits.set_invert(negative);
    let n = levenshtein::decode_from(&mut bits)?;
    Ok(if negative { -n } else { n })
}
