//! Levenshtein coding of unbounded integers.
//!
//! A non-negative integer `n` is written as a unary count of recursion
//! levels (`c` one bits and a terminating zero) followed by `c - 1`
//! nested length fields and finally the low bits of `n` with its leading
//! 1 omitted. Shorter numbers therefore sort before longer ones under
//! byte-wise comparison, which is what makes the exponent encoding
//! order-preserving.
//!
//! Signs are handled outside this module: the caller sets the sink's or
//! source's invert flag, which complements every nibble so that the
//! encodings of negative numbers sort in reverse.

use num_bigint::{BigInt, Sign};
use num_traits::{One, Zero};

use crate::bits::{BitSink, BitSource};
use crate::error::{EncodeResult, ParseResult};

/// Encode `n` into the sink, padded with zero bits to a nibble boundary.
///
/// A negative `n` is encoded as its absolute value with the sink's invert
/// flag raised for the remainder of the frame.
pub fn encode_into(sink: &mut BitSink<'_>, n: &BigInt) -> EncodeResult<()> {
    if n.is_zero() {
        sink.append(4, 0);
    } else {
        sink.set_invert(n.sign() == Sign::Minus);
        let magnitude = n.magnitude();
        let body_bits = magnitude.bits() - 1; // omit the leading 1
        encode_size(sink, 1, body_bits)?;
        if body_bits != 0 {
            sink.append_bytes(body_bits, &magnitude.to_bytes_be());
        }
    }
    sink.flush();
    Ok(())
}

/// Insert the size of a number at the head of the sink, recursively,
/// finishing with the unary level count.
fn encode_size(sink: &mut BitSink<'_>, level: u32, size: u64) -> EncodeResult<()> {
    if size == 0 {
        sink.insert(level + 1, ((1u64 << level) - 1) << 1)
    } else {
        let inserted = bit_width(size) - 1;
        sink.insert(inserted, size)?;
        encode_size(sink, level + 1, u64::from(inserted))
    }
}

#[inline]
const fn bit_width(n: u64) -> u32 {
    64 - n.leading_zeros()
}

/// Decode a non-negative integer from the source and realign it to a
/// nibble boundary. The caller applies the sign afterwards.
pub fn decode_from(source: &mut BitSource<'_>) -> ParseResult<BigInt> {
    let count = source.get_natural()?;
    let n = if count == 0 {
        BigInt::zero()
    } else if count == 1 {
        BigInt::one()
    } else {
        let mut size: u64 = 1;
        for _ in 2..count {
            size = source.get_integer(size)?;
        }
        source.get_big_integer(size)?
    };
    source.align_to_nibble();
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    fn encode_body(n: &BigInt) -> String {
        let mut out = String::new();
        let mut sink = BitSink::new(&mut out);
        encode_into(&mut sink, n).unwrap();
        out
    }

    fn decode_body(s: &str, negative: bool) -> BigInt {
        let mut source = BitSource::new(s);
        source.set_invert(negative);
        let n = decode_from(&mut source).unwrap();
        if negative {
            -n
        } else {
            n
        }
    }

    /// Bodies of selected integers and their negations, without the sign
    /// nibble the full sort-key form prepends.
    const ENCODED_INTEGERS: &[(&str, &str, &str)] = &[
        ("0", "0", "0"),
        ("1", "8", "7"),
        ("2", "c", "3"),
        ("3", "d", "2"),
        ("5", "e2", "1d"),
        ("7", "e6", "19"),
        ("11", "eb", "14"),
        ("15", "ef", "10"),
        ("17", "f01", "0fe"),
        ("31", "f0f", "0f0"),
        ("63", "f1f8", "0e07"),
        ("127", "f2fc", "0d03"),
        ("255", "f3fe", "0c01"),
        ("511", "f47f8", "0b807"),
        ("1023", "f4ffc", "0b003"),
        ("2047", "f57fe", "0a801"),
        ("4095", "f5fff", "0a000"),
        ("8191", "f67ff8", "098007"),
        ("65535", "f7ffff", "080000"),
        ("131071", "f807fff8", "07f80007"),
        ("1048575", "f81fffff", "07e00000"),
        ("4294967295", "f87ffffffff", "07800000000"),
        ("1099511627775", "f89ffffffffff8", "07600000000007"),
        ("9007199254740991", "f8d3ffffffffffffc", "072c0000000000003"),
        ("9223372036854775807", "f8fbfffffffffffffff", "0704000000000000000"),
    ];

    fn two_to_minus_one(bits: u64) -> BigInt {
        (BigInt::one() << bits) - 1
    }

    #[test]
    fn test_encode_table() {
        for (decimal, positive, negative) in ENCODED_INTEGERS {
            let n: BigInt = decimal.parse().unwrap();
            assert_eq!(encode_body(&n), *positive, "encoding {decimal}");
            assert_eq!(encode_body(&-n), *negative, "encoding -{decimal}");
        }
    }

    #[test]
    fn test_encode_wide_integers() {
        assert_eq!(
            encode_body(&two_to_minus_one(64)),
            format!("f8f{}8", "f".repeat(16))
        );
        assert_eq!(
            encode_body(&-two_to_minus_one(64)),
            format!("070{}7", "0".repeat(16))
        );
        assert_eq!(
            encode_body(&two_to_minus_one(128)),
            format!("f97{}c", "f".repeat(32))
        );
        assert_eq!(
            encode_body(&two_to_minus_one(256)),
            format!("f9f{}e", "f".repeat(64))
        );
        assert_eq!(
            encode_body(&two_to_minus_one(1024)),
            format!("fa7f{}c", "f".repeat(256))
        );
    }

    #[test]
    fn test_decode_table() {
        for (decimal, positive, negative) in ENCODED_INTEGERS {
            let n: BigInt = decimal.parse().unwrap();
            assert_eq!(decode_body(positive, false), n, "decoding {positive}");
            assert_eq!(decode_body(negative, true), -n, "decoding {negative}");
        }
    }

    #[test]
    fn test_decode_wide_integers() {
        for bits in [64u64, 128, 256, 1024] {
            let n = two_to_minus_one(bits);
            assert_eq!(decode_body(&encode_body(&n), false), n);
            assert_eq!(decode_body(&encode_body(&-&n), true), -n);
        }
    }

    #[test]
    fn test_round_trip_dense_range() {
        for i in -300i32..=300 {
            let n = BigInt::from(i);
            let body = encode_body(&n);
            assert_eq!(decode_body(&body, i < 0), n, "round trip of {i}");
        }
    }

    #[test]
    fn test_bodies_sort_within_sign() {
        // Within one polarity the bodies alone sort correctly; the sign
        // nibble handles the rest.
        let mut previous = encode_body(&BigInt::zero());
        for i in 1..=256u32 {
            let body = encode_body(&BigInt::from(i));
            assert!(previous < body, "{} !< {body} at {i}", previous);
            previous = body;
        }
    }

    #[test]
    fn test_decode_reports_overflow() {
        // Level count 6 with all-ones length fields drives the nested
        // chain to a 65536-bit field, past the 64-bit read path.
        let mut source = BitSource::new("fdffffc");
        assert_eq!(
            decode_from(&mut source),
            Err(ParseErrorKind::IntegerOverflow(65536))
        );
    }

    #[test]
    fn test_decode_reports_truncation() {
        // An endless unary preamble runs off the end of the input.
        let mut source = BitSource::new("ffffffffffffffff");
        assert_eq!(
            decode_from(&mut source),
            Err(ParseErrorKind::UnexpectedEndOfInput)
        );
    }
}
