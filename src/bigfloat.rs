use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};

use crate::error::UnsupportedOperation;

// Layout of an IEEE-754 binary64:
const SIGN_MASK: u64 = 1 << 63;
const EXPONENT_BIT: u32 = 52;
const EXPONENT_BITS: u32 = 11;
const EXPONENT_MASK: u64 = ((1 << EXPONENT_BITS) - 1) << EXPONENT_BIT;
const SIGNIFICAND_BITS: u32 = EXPONENT_BIT;
const SIGNIFICAND_MASK: u64 = (1 << SIGNIFICAND_BITS) - 1;
const BIAS: i64 = 1023;
const ONE_MASK: i64 = 1 << SIGNIFICAND_BITS;
const QUIET_MASK: i64 = 1 << (SIGNIFICAND_BITS - 1);
const MAX_DOUBLE_EXPONENT: i64 = BIAS;
const MIN_DOUBLE_EXPONENT: i64 = -BIAS - SIGNIFICAND_BITS as i64;

/// A range of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Range {
    Finite,
    Infinite,
    Nan,
}

/// An arbitrary-precision binary floating-point number: `significand *
/// 2^exponent`, where the exponent is an unbounded integer and the
/// significand is either zero or a number in `[1, 2)`.
///
/// The significand is stored as a [`BigInt`] interpreted as a bit string:
/// the most significant bit of its absolute value is the implicit leading
/// 1 and any lower bits are the fraction. Integers 0, 1, 3 and 5 stand
/// for the significands 0, 1, 3/2 and 5/4. Values are kept in normal
/// form: trailing zero bits are stripped on construction, so 2, 4 and 8
/// all normalize to 1.
///
/// Like IEEE floating point, a `BigFloat` may also be a signed zero, a
/// signed infinity, or a NaN. A zero carries its sign in the exponent
/// (`-0` has exponent -1, `+0` has +1). A NaN carries a signed integer
/// payload in the exponent slot: a strictly negative payload marks a
/// signalling NaN.
///
/// A `BigFloat` is immutable.
///
/// # Ordering and equality
///
/// [`Ord`] implements a total order: sign first, then `Finite < Infinite
/// < Nan`, with `-0 < +0` and NaN ties broken by payload. [`PartialEq`]
/// is structural over that order, so `NaN == NaN` holds for identical
/// payloads and `-0 != +0`. Code that needs IEEE semantics (`+0 == -0`,
/// `NaN != NaN`) should use [`eq_number`](Self::eq_number) instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigFloat {
    pub(crate) range: Range,
    pub(crate) significand: BigInt,
    pub(crate) exponent: BigInt,
}

impl BigFloat {
    /// Create a finite value `significand * 2^exponent`, normalizing the
    /// significand.
    ///
    /// A zero significand produces a zero whose sign is taken from the
    /// exponent argument (negative exponent gives `-0`).
    #[must_use]
    pub fn new(significand: BigInt, exponent: BigInt) -> Self {
        if significand.is_zero() {
            let carrier = if exponent.sign() == Sign::Minus { -1 } else { 1 };
            return Self {
                range: Range::Finite,
                significand,
                exponent: BigInt::from(carrier),
            };
        }
        let shift = significand.trailing_zeros().unwrap_or(0);
        Self {
            range: Range::Finite,
            significand: significand >> shift,
            exponent,
        }
    }

    /// Create a NaN with the given sign and payload. The result is a
    /// signalling NaN if the payload is negative.
    #[must_use]
    pub fn nan(negative: bool, payload: BigInt) -> Self {
        Self {
            range: Range::Nan,
            significand: BigInt::from(if negative { -1 } else { 1 }),
            exponent: payload,
        }
    }

    /// Positive zero.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            range: Range::Finite,
            significand: BigInt::zero(),
            exponent: BigInt::from(1),
        }
    }

    /// Negative zero.
    #[must_use]
    pub fn negative_zero() -> Self {
        Self {
            range: Range::Finite,
            significand: BigInt::zero(),
            exponent: BigInt::from(-1),
        }
    }

    /// The value 1.
    #[must_use]
    pub fn one() -> Self {
        Self {
            range: Range::Finite,
            significand: BigInt::from(1),
            exponent: BigInt::zero(),
        }
    }

    /// Positive infinity.
    #[must_use]
    pub fn infinity() -> Self {
        Self {
            range: Range::Infinite,
            significand: BigInt::from(1),
            exponent: BigInt::zero(),
        }
    }

    /// Negative infinity.
    #[must_use]
    pub fn negative_infinity() -> Self {
        Self {
            range: Range::Infinite,
            significand: BigInt::from(-1),
            exponent: BigInt::zero(),
        }
    }

    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }

    /// The normalized significand of a finite value.
    ///
    /// # Errors
    ///
    /// Fails for infinities and NaN.
    pub fn significand(&self) -> Result<&BigInt, UnsupportedOperation> {
        if self.range != Range::Finite {
            return Err(UnsupportedOperation {
                value: self.to_string(),
                op: "significand",
            });
        }
        Ok(&self.significand)
    }

    /// The exponent of a finite value. For zero this is the sign carrier
    /// (+1 or -1).
    ///
    /// # Errors
    ///
    /// Fails for infinities and NaN.
    pub fn exponent(&self) -> Result<&BigInt, UnsupportedOperation> {
        if self.range != Range::Finite {
            return Err(UnsupportedOperation {
                value: self.to_string(),
                op: "exponent",
            });
        }
        Ok(&self.exponent)
    }

    /// The payload of a NaN. Negative payloads mark signalling NaNs.
    ///
    /// # Errors
    ///
    /// Fails for anything but NaN.
    pub fn nan_payload(&self) -> Result<&BigInt, UnsupportedOperation> {
        if self.range != Range::Nan {
            return Err(UnsupportedOperation {
                value: self.to_string(),
                op: "nan_payload",
            });
        }
        Ok(&self.exponent)
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        let carrier = if self.is_zero() {
            &self.exponent
        } else {
            &self.significand
        };
        carrier.sign() == Sign::Minus
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.range == Range::Finite && self.significand.is_zero()
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.range == Range::Nan
    }

    #[must_use]
    pub fn is_infinite(&self) -> bool {
        self.range == Range::Infinite
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.range == Range::Finite
    }

    #[must_use]
    pub fn is_signalling_nan(&self) -> bool {
        self.is_nan() && self.exponent.sign() == Sign::Minus
    }

    /// Convert to an `i64`, truncating toward zero and saturating.
    ///
    /// NaN maps to 0; values at or beyond `2^63` in magnitude map to
    /// `i64::MAX` / `i64::MIN`.
    #[must_use]
    pub fn to_i64(&self) -> i64 {
        match self.range {
            Range::Nan => 0,
            Range::Infinite => {
                if self.is_negative() {
                    i64::MIN
                } else {
                    i64::MAX
                }
            }
            Range::Finite => {
                if self.is_zero() || self.exponent.sign() == Sign::Minus {
                    return 0;
                }
                if self.exponent >= BigInt::from(63) {
                    return if self.is_negative() { i64::MIN } else { i64::MAX };
                }
                let e = self.exponent.to_i64().unwrap_or(0); // 0..=62
                let magnitude = self.significand.magnitude();
                let shift = e + 1 - magnitude.bits() as i64;
                #[allow(clippy::cast_sign_loss)]
                let whole = if shift >= 0 {
                    magnitude << (shift as u64)
                } else {
                    magnitude >> ((-shift) as u64)
                };
                let value = whole.to_i64().unwrap_or(i64::MAX);
                if self.is_negative() {
                    -value
                } else {
                    value
                }
            }
        }
    }

    /// Convert to an IEEE-754 binary64, bit-exactly inverting
    /// [`From<f64>`](Self::from) wherever the value is representable.
    ///
    /// The conversion never fails: exponents beyond the binary64 range
    /// saturate to an infinity or a signed zero, significands wider than
    /// 53 bits are truncated toward zero, and NaN payloads keep their
    /// quiet/signalling distinction (the payload's low 64 bits are used,
    /// matching the width a binary64 NaN can carry).
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match self.range {
            Range::Nan => {
                let payload = low_i64(&self.exponent);
                #[allow(clippy::cast_sign_loss)]
                let field = if payload >= 0 {
                    (payload as u64 | QUIET_MASK as u64) & SIGNIFICAND_MASK
                } else {
                    // Signalling: the stored payload is the negated field,
                    // so the magnitude restores it with the quiet bit
                    // clear.
                    payload.unsigned_abs() & !(QUIET_MASK as u64) & SIGNIFICAND_MASK
                };
                let mut bits = if self.is_negative() { SIGN_MASK } else { 0 };
                bits |= EXPONENT_MASK;
                bits |= field;
                f64::from_bits(bits)
            }
            Range::Infinite => {
                if self.is_negative() {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }
            }
            Range::Finite => self.finite_to_f64(),
        }
    }

    fn finite_to_f64(&self) -> f64 {
        if self.is_zero() || self.exponent < BigInt::from(MIN_DOUBLE_EXPONENT) {
            return if self.is_negative() { -0.0 } else { 0.0 };
        }
        if self.exponent > BigInt::from(MAX_DOUBLE_EXPONENT) {
            return if self.is_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }
        let mut e = self.exponent.to_i64().unwrap_or(0) + BIAS; // -52..=2046
        let magnitude = self.significand.magnitude();
        let bits = magnitude.bits();
        // Align the leading 1 at bit position 52, truncating any
        // precision beyond the 53 bits a binary64 can hold.
        let mut s = if bits > 53 {
            (magnitude >> (bits - 53)).to_u64().unwrap_or(0)
        } else {
            magnitude.to_u64().unwrap_or(0) << (53 - bits) as u32
        };
        if e <= 0 {
            // Subnormal: shift the hidden bit back below bit 52.
            #[allow(clippy::cast_sign_loss)]
            {
                s >>= (1 - e) as u32;
            }
            e = 0;
        }
        let mut out = if self.is_negative() { SIGN_MASK } else { 0 };
        #[allow(clippy::cast_sign_loss)]
        {
            out |= (e as u64) << EXPONENT_BIT;
        }
        out |= s & SIGNIFICAND_MASK;
        f64::from_bits(out)
    }

    /// Like the IEEE `==` operator: `+0` and `-0` are equal, and NaN is
    /// not equal to anything, itself included.
    #[must_use]
    pub fn eq_number(&self, other: &Self) -> bool {
        if self.is_zero() && other.is_zero() {
            return true;
        }
        if self.is_nan() || other.is_nan() {
            return false;
        }
        self == other
    }
}

/// The low 64 bits of the two's-complement form, like a narrowing
/// big-integer-to-long conversion.
fn low_i64(n: &BigInt) -> i64 {
    #[allow(clippy::cast_possible_wrap)]
    let low = n.magnitude().iter_u64_digits().next().unwrap_or(0) as i64;
    if n.sign() == Sign::Minus {
        low.wrapping_neg()
    } else {
        low
    }
}

impl From<i64> for BigFloat {
    fn from(value: i64) -> Self {
        Self::from(BigInt::from(value))
    }
}

impl From<BigInt> for BigFloat {
    fn from(value: BigInt) -> Self {
        if value.is_zero() {
            return Self::zero();
        }
        let exponent = BigInt::from(value.bits() - 1);
        Self::new(value, exponent)
    }
}

impl From<f64> for BigFloat {
    /// Convert from a binary64 without loss: the sign of zero, subnormal
    /// precision, and NaN payloads (including the signalling bit) all
    /// survive the trip.
    fn from(value: f64) -> Self {
        let bits = value.to_bits();
        let negative = bits & SIGN_MASK != 0;
        if value == 0.0 {
            return if negative {
                Self::negative_zero()
            } else {
                Self::zero()
            };
        }
        let sign_unit = BigInt::from(if negative { -1 } else { 1 });
        if value.is_infinite() {
            return Self {
                range: Range::Infinite,
                significand: sign_unit,
                exponent: BigInt::zero(),
            };
        }
        #[allow(clippy::cast_possible_wrap)]
        let mut s = (bits & SIGNIFICAND_MASK) as i64;
        if value.is_nan() {
            if s & QUIET_MASK == 0 {
                // Signalling NaNs store a negated payload.
                s = -s;
            } else {
                s &= !QUIET_MASK;
            }
            return Self {
                range: Range::Nan,
                significand: sign_unit,
                exponent: BigInt::from(s),
            };
        }
        #[allow(clippy::cast_possible_wrap)]
        let mut e = ((bits & EXPONENT_MASK) >> EXPONENT_BIT) as i64 - BIAS;
        if e > -BIAS {
            s |= ONE_MASK;
        } else {
            // Subnormal: the leading zeros of the stored significand
            // move into the exponent here.
            e += 1;
            loop {
                e -= 1;
                s <<= 1;
                if s & ONE_MASK != 0 {
                    break;
                }
            }
        }
        while s & 1 == 0 {
            s >>= 1;
        }
        if negative {
            s = -s;
        }
        Self {
            range: Range::Finite,
            significand: BigInt::from(s),
            exponent: BigInt::from(e),
        }
    }
}

impl PartialOrd for BigFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.is_negative() {
            if !other.is_negative() {
                return Ordering::Less;
            }
        } else if other.is_negative() {
            return Ordering::Greater;
        }
        let mut result = self.range.cmp(&other.range);
        if result == Ordering::Equal {
            result = if self.is_zero() {
                if other.is_zero() {
                    Ordering::Equal
                } else {
                    Ordering::Less
                }
            } else if other.is_zero() {
                Ordering::Greater
            } else {
                let by_exponent = self.exponent.cmp(&other.exponent);
                if by_exponent == Ordering::Equal {
                    // Left-shift the shorter significand to match bit
                    // lengths before comparing as integers.
                    let mut a = self.significand.magnitude().clone();
                    let mut b = other.significand.magnitude().clone();
                    let (a_bits, b_bits) = (a.bits(), b.bits());
                    if a_bits < b_bits {
                        a <<= b_bits - a_bits;
                    } else if b_bits < a_bits {
                        b <<= a_bits - b_bits;
                    }
                    a.cmp(&b)
                } else {
                    by_exponent
                }
            };
        }
        if result != Ordering::Equal && self.is_negative() {
            result.reverse()
        } else {
            result
        }
    }
}

impl Neg for &BigFloat {
    type Output = BigFloat;

    fn neg(self) -> BigFloat {
        if self.is_zero() {
            return BigFloat {
                range: Range::Finite,
                significand: BigInt::zero(),
                exponent: -&self.exponent,
            };
        }
        BigFloat {
            range: self.range,
            significand: -&self.significand,
            exponent: self.exponent.clone(),
        }
    }
}

impl Neg for BigFloat {
    type Output = BigFloat;

    fn neg(self) -> BigFloat {
        -&self
    }
}

impl fmt::Display for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        match self.range {
            Range::Nan => write!(f, "{sign}NaN.{}", self.exponent),
            Range::Infinite => write!(f, "{sign}Infinity"),
            Range::Finite => {
                if self.is_zero() {
                    write!(f, "{sign}0")
                } else {
                    write!(
                        f,
                        "{}*2**{}",
                        crate::encoder::hex_fraction(&self.significand),
                        self.exponent
                    )
                }
            }
        }
    }
}
