//! Encoding of a [`BigFloat`] into its order-preserving hexadecimal form.
//!
//! The output is a single tag nibble selecting the (sign, range,
//! exponent-or-payload sign) class, followed for finite values by the
//! Levenshtein-coded exponent and the fractional significand bits in
//! two's complement, each zero-padded to a nibble boundary. The tag
//! alphabet and the invert flag on negative branches arrange that plain
//! byte comparison of two encoded strings matches numeric comparison of
//! the values.

use num_bigint::{BigInt, Sign};
use num_traits::Zero;
use tracing::trace;

use crate::bigfloat::{BigFloat, Range};
use crate::bits::BitSink;
use crate::error::EncodeResult;
use crate::levenshtein;

pub(crate) const NEGATIVE_INFINITY: &str = "3";
pub(crate) const NEGATIVE_ZERO: &str = "7";
pub(crate) const ZERO: &str = "8";
pub(crate) const INFINITY: &str = "c";

/// Two's-complement bit length, excluding the sign: 0 for 0 and -1, one
/// for -2, the magnitude's bit length for positive numbers.
pub(crate) fn bit_length(n: &BigInt) -> u64 {
    match n.sign() {
        Sign::NoSign => 0,
        Sign::Plus => n.bits(),
        Sign::Minus => (n.magnitude() - 1u32).bits(),
    }
}

/// Bitwise complement: `!n == -n - 1`.
pub(crate) fn not(n: &BigInt) -> BigInt {
    -(n + 1u32)
}

/// Convert a number to its order-preserving string representation.
///
/// # Errors
///
/// Fails with [`EncodeError::PreambleOverflow`](crate::EncodeError) only
/// for exponents or payloads wider than roughly 2^64 bits.
pub fn encode(n: &BigFloat) -> EncodeResult<String> {
    match n.range {
        Range::Nan => {
            let mut out = String::new();
            let mut payload = n.exponent.clone();
            if n.is_negative() {
                out.push(if payload.sign() == Sign::Plus { '0' } else { '1' });
                payload = -payload;
            } else {
                // The payload is encoded as an exponent would be, with a
                // significand of one (no fraction).
                out.push(if payload.sign() == Sign::Minus { 'e' } else { 'f' });
            }
            let mut sink = BitSink::new(&mut out);
            levenshtein::encode_into(&mut sink, &payload)?;
            trace!(value = %n, encoded = %out, "encoded NaN");
            return Ok(out);
        }
        Range::Infinite => {
            return Ok(String::from(if n.is_negative() {
                NEGATIVE_INFINITY
            } else {
                INFINITY
            }));
        }
        Range::Finite => {}
    }
    if n.is_zero() {
        return Ok(String::from(if n.is_negative() { NEGATIVE_ZERO } else { ZERO }));
    }

    // A finite non-zero number.
    let significand = &n.significand;
    let mut exponent = n.exponent.clone();
    let mut out = String::new();
    if !n.is_negative() {
        out.push(if exponent.sign() == Sign::Minus { 'a' } else { 'b' });
    } else {
        if bit_length(significand) == 0 {
            // significand == -1
            exponent = -exponent;
        } else {
            // significand < -1
            exponent = not(&exponent);
        }
        out.push(if exponent.sign() == Sign::Minus { '4' } else { '5' });
    }
    let mut sink = BitSink::new(&mut out);
    levenshtein::encode_into(&mut sink, &exponent)?;
    encode_fraction_into(&mut sink, significand);
    trace!(value = %n, encoded = %out, "encoded");
    Ok(out)
}

/// Append the fractional bits of a significand (everything below its
/// leading 1) in two's complement, left-aligned on a nibble boundary.
pub(crate) fn encode_fraction_into(sink: &mut BitSink<'_>, n: &BigInt) {
    sink.set_invert(false);
    if n.is_zero() {
        return;
    }
    // Shift so the bit length lands on 1 mod 4: the leading 1 (or the
    // sign prefix for negatives) then fills a nibble of its own, which
    // the decoder synthesizes rather than reads.
    let pad = 3 - ((bit_length(n) + 2) % 4);
    let aligned = if pad == 0 { n.clone() } else { n << pad };
    let bytes = aligned.to_signed_bytes_be();
    if (bit_length(&aligned) / 4) % 2 != 0 {
        sink.append(4, u64::from(bytes[0]));
    }
    for &byte in &bytes[1..] {
        sink.append(8, u64::from(byte));
    }
    sink.flush();
}

/// The `1.fraction` hex rendering of a significand, used by the
/// [`Display`](std::fmt::Display) form of finite values.
pub(crate) fn hex_fraction(n: &BigInt) -> String {
    let mut out = String::new();
    if n.sign() == Sign::Minus {
        out.push('-');
    }
    out.push_str("1.");
    let magnitude = BigInt::from(n.magnitude().clone());
    let mut sink = BitSink::new(&mut out);
    encode_fraction_into(&mut sink, &magnitude);
    out
}

/// Encode a signed integer as a stand-alone sort key: a sign nibble
/// (`0` for negative, `1` otherwise) followed by the Levenshtein body.
/// The keys sort byte-wise in numeric order and are decoded by
/// [`decode_integer`](crate::decode_integer).
///
/// # Errors
///
/// Fails with [`EncodeError::PreambleOverflow`](crate::EncodeError) only
/// for integers wider than roughly 2^64 bits.
pub fn encode_integer(n: &BigInt) -> EncodeResult<String> {
    let mut out = String::new();
    out.push(if n.sign() == Sign::Minus { '0' } else { '1' });
    let mut sink = BitSink::new(&mut out);
    levenshtein::encode_into(&mut sink, n)?;
    Ok(out)
}
