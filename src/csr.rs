//! Buffer-shape validation shared by the kernels
//!
//! Only lengths are checked here. Content validity of CSR inputs (monotone
//! row pointers, unique in-range column indices) is the caller's contract.

use crate::element::IndexElement;
use crate::error::{Error, Result};

/// Check that a row-pointer buffer covers `n` rows.
pub(crate) fn validate_row_ptr<I: IndexElement>(row_ptr: &[I], n: usize) -> Result<()> {
    if row_ptr.len() != n + 1 {
        return Err(Error::shape_mismatch(&[n + 1], &[row_ptr.len()]));
    }
    Ok(())
}

/// Check that a buffer holds at least `required` elements.
pub(crate) fn validate_len<T>(arg: &'static str, buf: &[T], required: usize) -> Result<()> {
    if buf.len() < required {
        return Err(Error::InvalidArgument {
            arg,
            reason: format!("length {} is less than required {}", buf.len(), required),
        });
    }
    Ok(())
}

/// Number of stored entries recorded by a row-pointer buffer.
pub(crate) fn nnz<I: IndexElement>(row_ptr: &[I], n: usize) -> usize {
    row_ptr[n].to_index()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_ptr_length_is_checked() {
        assert!(validate_row_ptr(&[0i64, 1, 2], 2).is_ok());
        assert!(validate_row_ptr(&[0i64, 1], 2).is_err());
    }

    #[test]
    fn undersized_buffers_are_rejected() {
        assert!(validate_len("x", &[0.0f64; 3], 4).is_err());
        assert!(validate_len("x", &[0.0f64; 4], 4).is_ok());
    }
}
