//! Error types for amgr

use thiserror::Error;

/// Result type alias using amgr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in amgr kernels
///
/// Kernels validate the *lengths* of the buffers they are handed and return
/// an error before touching any data when they disagree. Content validity of
/// CSR inputs (monotone row pointers, in-range column indices) is the
/// caller's contract and is not checked. Numerical degeneracies are never
/// errors; they are reported through [`crate::diag::DiagnosticSink`] and the
/// computation proceeds.
#[derive(Error, Debug)]
pub enum Error {
    /// Buffer length disagrees with the problem dimensions
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected lengths
        expected: Vec<usize>,
        /// Actual lengths
        got: Vec<usize>,
    },

    /// Invalid argument provided to a kernel
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }
}
