//! Signed 256-bit integer used for `intN` values

use std::fmt;

use primitive_types::U256;

/// Signed 256-bit integer
///
/// Stored as sign and magnitude. Zero is always non-negative, so two values
/// compare equal exactly when they denote the same integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct I256 {
    abs: U256,
    negative: bool,
}

impl I256 {
    /// Create a new I256 from magnitude and sign
    pub fn new(abs: U256, negative: bool) -> Self {
        Self {
            abs,
            negative: negative && !abs.is_zero(),
        }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        Self::new(U256::from(value.unsigned_abs()), value < 0)
    }

    /// Create from i64
    pub fn from_i64(value: i64) -> Self {
        Self::from_i128(value as i128)
    }

    /// Magnitude
    pub fn abs(&self) -> U256 {
        self.abs
    }

    /// True for values below zero
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }

    /// Whether the value lies in `[-2^(bits-1), 2^(bits-1) - 1]`
    pub fn fits_in(&self, bits: usize) -> bool {
        if bits == 0 || bits > 256 {
            return false;
        }
        let half = U256::one() << (bits - 1);
        if self.negative {
            self.abs <= half
        } else {
            self.abs < half
        }
    }

    /// Two's-complement representation over 256 bits
    ///
    /// Values whose magnitude exceeds 2^255 wrap; callers check `fits_in`
    /// first.
    pub fn to_twos_complement(&self) -> U256 {
        if self.negative {
            (!self.abs).overflowing_add(U256::one()).0
        } else {
            self.abs
        }
    }

    /// Interpret a 256-bit two's-complement word
    pub fn from_twos_complement(raw: U256) -> Self {
        if raw.bit(255) {
            Self::new((!raw).overflowing_add(U256::one()).0, true)
        } else {
            Self::new(raw, false)
        }
    }
}

impl From<i64> for I256 {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<i128> for I256 {
    fn from(value: i128) -> Self {
        Self::from_i128(value)
    }
}

impl From<U256> for I256 {
    fn from(value: U256) -> Self {
        Self::new(value, false)
    }
}

impl TryFrom<I256> for i128 {
    type Error = I256;

    fn try_from(value: I256) -> Result<Self, I256> {
        if !value.fits_in(128) {
            return Err(value);
        }
        let magnitude = value.abs.low_u128();
        if value.negative {
            // i128::MIN has no positive counterpart
            Ok(0i128.wrapping_sub_unsigned(magnitude))
        } else {
            Ok(magnitude as i128)
        }
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.abs)
        } else {
            write!(f, "{}", self.abs)
        }
    }
}
