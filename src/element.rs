//! Element traits mapping Rust numeric types onto kernel parameters
//!
//! The kernels are generic over two axes: the integer type used for CSR row
//! pointers, column indices and splitting arrays, and the scalar type of the
//! matrix values. These traits pin down exactly what each axis needs.

use num_traits::{Float, NumAssign};

/// Integer type of CSR index arrays and splitting vectors
///
/// Implemented for `i32`, `i64`, and `usize`. Conversions are plain casts;
/// values are in range by the CSR well-formedness contract.
pub trait IndexElement: Copy + Eq + Ord + std::fmt::Debug + 'static {
    /// Widen to `usize` for slice indexing
    fn to_index(self) -> usize;

    /// Narrow from `usize`
    fn from_index(v: usize) -> Self;
}

impl IndexElement for i32 {
    #[inline]
    fn to_index(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_index(v: usize) -> Self {
        v as i32
    }
}

impl IndexElement for i64 {
    #[inline]
    fn to_index(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_index(v: usize) -> Self {
        v as i64
    }
}

impl IndexElement for usize {
    #[inline]
    fn to_index(self) -> usize {
        self
    }

    #[inline]
    fn from_index(v: usize) -> Self {
        v
    }
}

/// Scalar type of matrix values
///
/// Implemented for `f32` and `f64`. The strength kernels compare entries
/// through [`ValueElement::magnitude`]; for real scalars that is the
/// absolute value. (A complex extension would supply the modulus here and
/// carry its own sign convention for the interpolation weights.)
pub trait ValueElement: Float + NumAssign + std::fmt::Debug + 'static {
    /// Real magnitude of the entry
    #[inline]
    fn magnitude(self) -> Self {
        self.abs()
    }

    /// Convert to f64
    fn to_f64(self) -> f64;

    /// Convert from f64
    fn from_f64(v: f64) -> Self;
}

impl ValueElement for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl ValueElement for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        assert_eq!(i32::from_index(7).to_index(), 7);
        assert_eq!(i64::from_index(7).to_index(), 7);
        assert_eq!(usize::from_index(7).to_index(), 7);
    }

    #[test]
    fn magnitude_is_absolute_value() {
        assert_eq!((-3.5f64).magnitude(), 3.5);
        assert_eq!(2.0f32.magnitude(), 2.0);
    }
}
