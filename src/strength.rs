//! Strength-of-connection kernels
//!
//! Classical AMG coarsening starts from a filtered view of the operator: an
//! off-diagonal entry A\[i,j\] is *strong* iff
//!
//! ```text
//! ‖A[i,j]‖ >= theta * max_{k != i} ‖A[i,k]‖
//! ```
//!
//! for a threshold `theta` in \[0, 1\]. [`classical_strength_of_connection`]
//! materializes the strong entries (plus the diagonal, which is always
//! retained) into a second CSR matrix S with the same row space as A.
//! [`maximum_row_value`] is the per-row maximum-magnitude utility used by
//! callers that build their own filters.

use crate::csr::{nnz, validate_len, validate_row_ptr};
use crate::element::{IndexElement, ValueElement};
use crate::error::Result;

/// Classical strength-of-connection filter
///
/// Fills the preallocated CSR triple `(s_row_ptr, s_col_idx, s_values)` with
/// the strong entries of A. Within each row, stored entries keep A's
/// traversal order; the diagonal entry is kept unconditionally. Empty rows
/// of A produce empty rows of S.
///
/// A conservative bound for the output storage is `nnz(A) + n` entries;
/// since S is a subset of A's entries, `nnz(A)` suffices and is what this
/// function checks.
///
/// Returns the number of stored entries written to S.
pub fn classical_strength_of_connection<I: IndexElement, V: ValueElement>(
    n_row: usize,
    theta: V,
    a_row_ptr: &[I],
    a_col_idx: &[I],
    a_values: &[V],
    s_row_ptr: &mut [I],
    s_col_idx: &mut [I],
    s_values: &mut [V],
) -> Result<usize> {
    validate_row_ptr(a_row_ptr, n_row)?;
    validate_row_ptr(s_row_ptr, n_row)?;
    let a_nnz = nnz(a_row_ptr, n_row);
    validate_len("a_col_idx", a_col_idx, a_nnz)?;
    validate_len("a_values", a_values, a_nnz)?;
    validate_len("s_col_idx", s_col_idx, a_nnz)?;
    validate_len("s_values", s_values, a_nnz)?;

    let mut s_nnz = 0usize;
    s_row_ptr[0] = I::from_index(0);

    for i in 0..n_row {
        let row_start = a_row_ptr[i].to_index();
        let row_end = a_row_ptr[i + 1].to_index();

        // Sentinel keeps exact zeros out of rows with no off-diagonal mass.
        let mut max_offdiagonal = V::min_positive_value();
        for jj in row_start..row_end {
            if a_col_idx[jj].to_index() != i {
                max_offdiagonal = max_offdiagonal.max(a_values[jj].magnitude());
            }
        }

        let threshold = theta * max_offdiagonal;
        for jj in row_start..row_end {
            if a_col_idx[jj].to_index() == i {
                // Always keep the diagonal.
                s_col_idx[s_nnz] = a_col_idx[jj];
                s_values[s_nnz] = a_values[jj];
                s_nnz += 1;
            } else if a_values[jj].magnitude() >= threshold {
                s_col_idx[s_nnz] = a_col_idx[jj];
                s_values[s_nnz] = a_values[jj];
                s_nnz += 1;
            }
        }

        s_row_ptr[i + 1] = I::from_index(s_nnz);
    }

    Ok(s_nnz)
}

/// Per-row maximum magnitude
///
/// Writes `x[i] = max_{j in row i} ‖A[i,j]‖`, diagonal included. An empty
/// row yields [`num_traits::Float::min_positive_value`] (the smallest
/// positive normal value of the scalar type), so callers can multiply by a
/// threshold without tripping over zero.
pub fn maximum_row_value<I: IndexElement, V: ValueElement>(
    n_row: usize,
    x: &mut [V],
    a_row_ptr: &[I],
    a_col_idx: &[I],
    a_values: &[V],
) -> Result<()> {
    validate_row_ptr(a_row_ptr, n_row)?;
    validate_len("x", x, n_row)?;
    let a_nnz = nnz(a_row_ptr, n_row);
    validate_len("a_col_idx", a_col_idx, a_nnz)?;
    validate_len("a_values", a_values, a_nnz)?;

    for i in 0..n_row {
        let mut max_entry = V::min_positive_value();
        for jj in a_row_ptr[i].to_index()..a_row_ptr[i + 1].to_index() {
            max_entry = max_entry.max(a_values[jj].magnitude());
        }
        x[i] = max_entry;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 3x3 tridiagonal: [2 -1 .; -1 2 -1; . -1 2]
    fn tridiag3() -> (Vec<i64>, Vec<i64>, Vec<f64>) {
        (
            vec![0, 2, 5, 7],
            vec![0, 1, 0, 1, 2, 1, 2],
            vec![2.0, -1.0, -1.0, 2.0, -1.0, -1.0, 2.0],
        )
    }

    fn run_soc(
        n: usize,
        theta: f64,
        (ap, aj, ax): &(Vec<i64>, Vec<i64>, Vec<f64>),
    ) -> (Vec<i64>, Vec<i64>, Vec<f64>) {
        let mut sp = vec![0i64; n + 1];
        let mut sj = vec![0i64; aj.len() + n];
        let mut sx = vec![0.0f64; aj.len() + n];
        let nnz =
            classical_strength_of_connection(n, theta, ap, aj, ax, &mut sp, &mut sj, &mut sx)
                .unwrap();
        sj.truncate(nnz);
        sx.truncate(nnz);
        (sp, sj, sx)
    }

    #[test]
    fn tridiagonal_keeps_full_pattern() {
        let a = tridiag3();
        let (sp, sj, sx) = run_soc(3, 0.25, &a);
        assert_eq!(sp, a.0);
        assert_eq!(sj, a.1);
        assert_eq!(sx, a.2);
    }

    #[test]
    fn weak_entries_are_filtered_and_diagonal_survives() {
        // Row 1 has a weak -0.1 coupling next to a strong -2.
        let ap = vec![0i64, 2, 5, 7];
        let aj = vec![0i64, 1, 0, 1, 2, 1, 2];
        let ax = vec![2.0, -1.0, -2.0, 2.0, -0.1, -0.1, 2.0];
        let (sp, sj, sx) = run_soc(3, 0.5, &(ap, aj, ax));
        assert_eq!(sp, vec![0, 2, 4, 6]);
        assert_eq!(sj, vec![0, 1, 0, 1, 1, 2]);
        // Row 2's only off-diagonal (-0.1) is its own row max, so it stays.
        assert_eq!(sx, vec![2.0, -1.0, -2.0, 2.0, -0.1, 2.0]);
    }

    #[test]
    fn diagonal_only_matrix_keeps_diagonal_only() {
        let ap = vec![0i64, 1, 2];
        let aj = vec![0i64, 1];
        let ax = vec![1.0, 1.0];
        let (sp, sj, _) = run_soc(2, 0.25, &(ap, aj, ax));
        assert_eq!(sp, vec![0, 1, 2]);
        assert_eq!(sj, vec![0, 1]);
    }

    #[test]
    fn empty_rows_stay_empty() {
        let ap = vec![0i64, 0, 1];
        let aj = vec![1i64];
        let ax = vec![3.0];
        let (sp, sj, _) = run_soc(2, 0.25, &(ap, aj, ax));
        assert_eq!(sp, vec![0, 0, 1]);
        assert_eq!(sj, vec![1]);
    }

    #[test]
    fn row_max_covers_diagonal_and_empty_rows() {
        let ap = vec![0i64, 2, 2, 3];
        let aj = vec![0i64, 1, 2];
        let ax = vec![-4.0, 1.0, 2.5];
        let mut x = vec![0.0f64; 3];
        maximum_row_value(3, &mut x, &ap, &aj, &ax).unwrap();
        assert_eq!(x[0], 4.0);
        assert_eq!(x[1], f64::MIN_POSITIVE);
        assert_eq!(x[2], 2.5);
    }

    #[test]
    fn undersized_output_is_rejected() {
        let a = tridiag3();
        let mut sp = vec![0i64; 4];
        let mut sj = vec![0i64; 2];
        let mut sx = vec![0.0f64; 2];
        assert!(
            classical_strength_of_connection(3, 0.25, &a.0, &a.1, &a.2, &mut sp, &mut sj, &mut sx)
                .is_err()
        );
    }
}
