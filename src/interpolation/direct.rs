//! Direct interpolation
//!
//! Each F-point interpolates from its strong C-neighbors only. The weights
//! distribute the full off-diagonal row mass of A over the strong
//! C-couplings, split by sign: negative couplings share the negative mass,
//! positive couplings the positive mass. When a row has no positive strong
//! C-coupling, the positive mass folds into the diagonal instead.
//!
//! Reference: Trottenberg, Oosterlee, Schüller, "Multigrid", p. 479.

use crate::csr::{nnz, validate_len, validate_row_ptr};
use crate::element::{IndexElement, ValueElement};
use crate::error::Result;

use super::super::splitting::C_NODE;
use super::{remap_to_coarse, strong_coarse_pass1};

/// Direct interpolation, pass 1: fill B's row pointer
///
/// Returns nnz(B), the storage pass 2 requires.
pub fn direct_interpolation_pass1<I: IndexElement>(
    n_nodes: usize,
    s_row_ptr: &[I],
    s_col_idx: &[I],
    splitting: &[I],
    b_row_ptr: &mut [I],
) -> Result<usize> {
    strong_coarse_pass1(n_nodes, s_row_ptr, s_col_idx, splitting, b_row_ptr)
}

/// Direct interpolation, pass 2: fill B's column indices and weights
///
/// `b_row_ptr` must come from [`direct_interpolation_pass1`]; `b_col_idx`
/// and `b_values` must hold at least the nnz it returned. On return, column
/// indices are in coarse-grid numbering.
#[allow(clippy::too_many_arguments)]
pub fn direct_interpolation_pass2<I: IndexElement, V: ValueElement>(
    n_nodes: usize,
    a_row_ptr: &[I],
    a_col_idx: &[I],
    a_values: &[V],
    s_row_ptr: &[I],
    s_col_idx: &[I],
    s_values: &[V],
    splitting: &[I],
    b_row_ptr: &[I],
    b_col_idx: &mut [I],
    b_values: &mut [V],
) -> Result<()> {
    validate_row_ptr(a_row_ptr, n_nodes)?;
    validate_row_ptr(s_row_ptr, n_nodes)?;
    validate_row_ptr(b_row_ptr, n_nodes)?;
    let a_nnz = nnz(a_row_ptr, n_nodes);
    let s_nnz = nnz(s_row_ptr, n_nodes);
    let b_nnz = nnz(b_row_ptr, n_nodes);
    validate_len("a_col_idx", a_col_idx, a_nnz)?;
    validate_len("a_values", a_values, a_nnz)?;
    validate_len("s_col_idx", s_col_idx, s_nnz)?;
    validate_len("s_values", s_values, s_nnz)?;
    validate_len("splitting", splitting, n_nodes)?;
    validate_len("b_col_idx", b_col_idx, b_nnz)?;
    validate_len("b_values", b_values, b_nnz)?;

    let c_node = I::from_index(C_NODE);

    for i in 0..n_nodes {
        if splitting[i] == c_node {
            let pos = b_row_ptr[i].to_index();
            b_col_idx[pos] = I::from_index(i);
            b_values[pos] = V::one();
            continue;
        }

        let mut sum_strong_pos = V::zero();
        let mut sum_strong_neg = V::zero();
        for jj in s_row_ptr[i].to_index()..s_row_ptr[i + 1].to_index() {
            let j = s_col_idx[jj].to_index();
            if splitting[j] == c_node && j != i {
                if s_values[jj] < V::zero() {
                    sum_strong_neg += s_values[jj];
                } else {
                    sum_strong_pos += s_values[jj];
                }
            }
        }

        let mut sum_all_pos = V::zero();
        let mut sum_all_neg = V::zero();
        let mut diag = V::zero();
        for jj in a_row_ptr[i].to_index()..a_row_ptr[i + 1].to_index() {
            if a_col_idx[jj].to_index() == i {
                diag += a_values[jj];
            } else if a_values[jj] < V::zero() {
                sum_all_neg += a_values[jj];
            } else {
                sum_all_pos += a_values[jj];
            }
        }

        let alpha = sum_all_neg / sum_strong_neg;
        let mut beta = sum_all_pos / sum_strong_pos;

        // No positive strong coupling to carry the positive mass: lump it
        // into the diagonal.
        if sum_strong_pos == V::zero() {
            diag += sum_all_pos;
            beta = V::zero();
        }

        let neg_coeff = -alpha / diag;
        let pos_coeff = -beta / diag;

        let mut pos = b_row_ptr[i].to_index();
        for jj in s_row_ptr[i].to_index()..s_row_ptr[i + 1].to_index() {
            let j = s_col_idx[jj].to_index();
            if splitting[j] == c_node && j != i {
                b_col_idx[pos] = s_col_idx[jj];
                b_values[pos] = if s_values[jj] < V::zero() {
                    neg_coeff * s_values[jj]
                } else {
                    pos_coeff * s_values[jj]
                };
                pos += 1;
            }
        }
    }

    remap_to_coarse(n_nodes, splitting, b_row_ptr, b_col_idx);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitting::{C_NODE, F_NODE};

    fn interpolate(
        n: usize,
        a: (&[i64], &[i64], &[f64]),
        s: (&[i64], &[i64], &[f64]),
        sigma: &[i64],
    ) -> (Vec<i64>, Vec<i64>, Vec<f64>) {
        let mut bp = vec![0i64; n + 1];
        let b_nnz = direct_interpolation_pass1(n, s.0, s.1, sigma, &mut bp).unwrap();
        let mut bj = vec![0i64; b_nnz];
        let mut bx = vec![0.0f64; b_nnz];
        direct_interpolation_pass2(
            n, a.0, a.1, a.2, s.0, s.1, s.2, sigma, &bp, &mut bj, &mut bx,
        )
        .unwrap();
        (bp, bj, bx)
    }

    #[test]
    fn tridiagonal_halves_toward_the_center() {
        // A = tridiag(-1, 2, -1); S has the same pattern; sigma = (F, C, F).
        let ap = vec![0i64, 2, 5, 7];
        let aj = vec![0i64, 1, 0, 1, 2, 1, 2];
        let ax = vec![2.0, -1.0, -1.0, 2.0, -1.0, -1.0, 2.0];
        let sigma = vec![F_NODE as i64, C_NODE as i64, F_NODE as i64];
        let (bp, bj, bx) = interpolate(3, (&ap, &aj, &ax), (&ap, &aj, &ax), &sigma);
        assert_eq!(bp, vec![0, 1, 2, 3]);
        assert_eq!(bj, vec![0, 0, 0]);
        assert_eq!(bx, vec![0.5, 1.0, 0.5]);
    }

    #[test]
    fn coarse_rows_are_injection() {
        let ap = vec![0i64, 2, 5, 7];
        let aj = vec![0i64, 1, 0, 1, 2, 1, 2];
        let ax = vec![2.0, -1.0, -1.0, 2.0, -1.0, -1.0, 2.0];
        let sigma = vec![C_NODE as i64, F_NODE as i64, C_NODE as i64];
        let (bp, bj, bx) = interpolate(3, (&ap, &aj, &ax), (&ap, &aj, &ax), &sigma);
        assert_eq!(bp, vec![0, 1, 3, 4]);
        // Row 0 injects to coarse column 0, row 2 to coarse column 1.
        assert_eq!(bj[0], 0);
        assert_eq!(bx[0], 1.0);
        assert_eq!(bj[3], 1);
        assert_eq!(bx[3], 1.0);
        // The fine row pulls half from each neighbor.
        assert_eq!(&bj[1..3], &[0, 1]);
        assert_eq!(&bx[1..3], &[0.5, 0.5]);
    }

    #[test]
    fn fine_rows_with_no_coarse_neighbors_are_empty() {
        // Diagonal strength graph: nothing to interpolate from.
        let ap = vec![0i64, 1, 2];
        let aj = vec![0i64, 1];
        let ax = vec![1.0, 1.0];
        let sigma = vec![F_NODE as i64; 2];
        let (bp, bj, bx) = interpolate(2, (&ap, &aj, &ax), (&ap, &aj, &ax), &sigma);
        assert_eq!(bp, vec![0, 0, 0]);
        assert!(bj.is_empty());
        assert!(bx.is_empty());
    }

    #[test]
    fn positive_couplings_split_by_sign() {
        // Row 1 couples to C-points 0 (negative) and 2 (positive):
        //   [  4  .  . ]
        //   [ -2  6  1 ]   with every off-diagonal strong
        //   [  .  .  4 ]
        // alpha = -2/-2 = 1, beta = 1/1 = 1,
        // w(1,0) = -(1/6)(-2) = 1/3, w(1,2) = -(1/6)(1) = -1/6.
        let ap = vec![0i64, 1, 4, 5];
        let aj = vec![0i64, 0, 1, 2, 2];
        let ax = vec![4.0, -2.0, 6.0, 1.0, 4.0];
        let sigma = vec![C_NODE as i64, F_NODE as i64, C_NODE as i64];
        let (bp, bj, bx) = interpolate(3, (&ap, &aj, &ax), (&ap, &aj, &ax), &sigma);
        assert_eq!(bp, vec![0, 1, 3, 4]);
        assert_eq!(&bj[1..3], &[0, 1]);
        assert!((bx[1] - 1.0 / 3.0).abs() < 1e-15);
        assert!((bx[2] + 1.0 / 6.0).abs() < 1e-15);
    }
}
