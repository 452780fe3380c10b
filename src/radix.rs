//! Exact conversion between [`BigFloat`] and a multi-digit value at a
//! power-of-two radix (2, 4, 8, 16 or 32).
//!
//! Because the radix is a power of two, every finite value converts in
//! both directions without loss: digits are peeled off (or folded in) as
//! fixed-width bit groups, and the binary exponent maps to a digit scale
//! by floor division.

use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::bigfloat::{BigFloat, Range};
use crate::error::ConvertError;

fn check_digit_bits(digit_bits: u8) -> Result<(), ConvertError> {
    if (1..=5).contains(&digit_bits) {
        Ok(())
    } else {
        Err(ConvertError::InvalidRadix(
            1u32.checked_shl(u32::from(digit_bits)).unwrap_or(0),
        ))
    }
}

/// The largest exponent magnitude the radix scale can absorb.
fn max_exponent(digit_bits: u8) -> BigUint {
    BigUint::from(i64::MAX as u64) << u32::from(digit_bits - 1)
}

/// An arbitrary-precision value `±0.d₀d₁… * radix^scale` at a
/// power-of-two radix.
///
/// Digits are stored most significant first; the canonical form produced
/// by [`RadixConverter::to_radix`] has a non-zero leading digit and no
/// trailing zero digits, but trailing zeros are accepted on input. Zero
/// is the empty digit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadixFloat {
    negative: bool,
    digits: Vec<u32>,
    scale: BigInt,
    digit_bits: u8,
}

impl RadixFloat {
    /// Create a value from its parts.
    ///
    /// # Errors
    ///
    /// Fails if `digit_bits` is outside `1..=5` or any digit is not
    /// below the radix.
    pub fn new(
        negative: bool,
        digits: Vec<u32>,
        scale: BigInt,
        digit_bits: u8,
    ) -> Result<Self, ConvertError> {
        check_digit_bits(digit_bits)?;
        let radix = 1u32 << digit_bits;
        for &digit in &digits {
            if digit >= radix {
                return Err(ConvertError::InvalidDigit { digit, radix });
            }
        }
        Ok(Self {
            negative,
            digits,
            scale,
            digit_bits,
        })
    }

    fn zero(digit_bits: u8) -> Self {
        Self {
            negative: false,
            digits: Vec::new(),
            scale: BigInt::zero(),
            digit_bits,
        }
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|&d| d == 0)
    }

    /// The mantissa digits, most significant first.
    #[must_use]
    pub fn digits(&self) -> &[u32] {
        &self.digits
    }

    /// The power of the radix scaling the `0.d₀d₁…` mantissa.
    #[must_use]
    pub fn scale(&self) -> &BigInt {
        &self.scale
    }

    #[must_use]
    pub fn radix(&self) -> u32 {
        1 << self.digit_bits
    }

    #[must_use]
    pub fn digit_bits(&self) -> u8 {
        self.digit_bits
    }

    /// Convert back to a [`BigFloat`]. Exact for every valid digit
    /// string; the result is normalized.
    #[must_use]
    pub fn to_big_float(&self) -> BigFloat {
        let k = u32::from(self.digit_bits);
        let mut significand = BigUint::zero();
        for &digit in &self.digits {
            significand = (significand << k) | BigUint::from(digit);
        }
        if significand.is_zero() {
            return BigFloat::zero();
        }
        let scale_bits = (&self.scale - 1u32) * k;
        let align = (significand.bits() - 1) % u64::from(k);
        let exponent = scale_bits + align;
        let sign = if self.negative { Sign::Minus } else { Sign::Plus };
        BigFloat::new(BigInt::from_biguint(sign, significand), exponent)
    }
}

impl fmt::Display for RadixFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("0.")?;
        for &digit in &self.digits {
            let c = char::from_digit(digit, self.radix()).unwrap_or('?');
            write!(f, "{c}")?;
        }
        write!(f, "*{}^{}", self.radix(), self.scale)
    }
}

/// Converts between [`BigFloat`] and [`RadixFloat`] at a fixed number of
/// bits per digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadixConverter {
    digit_bits: u8,
}

impl Default for RadixConverter {
    /// A radix-16 converter (4 bits per digit).
    fn default() -> Self {
        Self { digit_bits: 4 }
    }
}

impl RadixConverter {
    /// Create a converter producing `digit_bits`-bit digits.
    ///
    /// # Errors
    ///
    /// Fails unless `digit_bits` is in `1..=5`.
    pub fn new(digit_bits: u8) -> Result<Self, ConvertError> {
        check_digit_bits(digit_bits)?;
        Ok(Self { digit_bits })
    }

    /// Create a converter for the given radix.
    ///
    /// # Errors
    ///
    /// Fails unless the radix is an integral power of 2 between 2 and
    /// 32.
    pub fn with_radix(radix: u32) -> Result<Self, ConvertError> {
        for log in 1..=5u8 {
            if 1u32 << log == radix {
                return Ok(Self { digit_bits: log });
            }
        }
        Err(ConvertError::InvalidRadix(radix))
    }

    #[must_use]
    pub fn radix(&self) -> u32 {
        1 << self.digit_bits
    }

    #[must_use]
    pub fn digit_bits(&self) -> u8 {
        self.digit_bits
    }

    /// Convert a finite [`BigFloat`] to its multi-digit form. Exact.
    ///
    /// # Errors
    ///
    /// Fails for infinities and NaN, and when the exponent magnitude
    /// exceeds `i64::MAX << (digit_bits - 1)`.
    pub fn to_radix(&self, from: &BigFloat) -> Result<RadixFloat, ConvertError> {
        match from.range() {
            Range::Infinite => return Err(ConvertError::Infinite(from.to_string())),
            Range::Nan => return Err(ConvertError::NotANumber(from.to_string())),
            Range::Finite => {}
        }
        if from.is_zero() {
            return Ok(RadixFloat::zero(self.digit_bits));
        }
        let exponent = &from.exponent;
        if *exponent.magnitude() > max_exponent(self.digit_bits) {
            return Err(ConvertError::ScaleOverflow {
                value: from.to_string(),
                radix: self.radix(),
            });
        }
        let k = u64::from(self.digit_bits);
        let big_k = BigInt::from(k);
        let mut s = from.significand.magnitude().clone();
        // Align the significand with the digit grid: after the shift,
        // the digit holding the leading 1 is the leading digit and the
        // exponent is congruent to its own floor-division remainder.
        let bit_scale = exponent - (s.bits() - 1);
        let shift = bit_scale.mod_floor(&big_k).to_u64().unwrap_or(0);
        s <<= shift;
        let digit_mask = BigUint::from((1u32 << self.digit_bits) - 1);
        let mut digits = Vec::new();
        while !s.is_zero() {
            digits.push((&s & &digit_mask).to_u32().unwrap_or(0));
            s >>= k;
        }
        digits.reverse();
        let scale = exponent.div_floor(&big_k) + BigInt::one();
        Ok(RadixFloat {
            negative: from.is_negative(),
            digits,
            scale,
            digit_bits: self.digit_bits,
        })
    }
}
