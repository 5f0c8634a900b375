//! Interpolation (prolongator) assembly
//!
//! Both interpolation schemes are two-pass: pass 1 derives the row pointer
//! of the prolongator B from the strength pattern and the splitting, pass 2
//! fills in column indices and weights. C-points interpolate by injection
//! (a single unit entry); F-points interpolate from their strong C-neighbors.
//!
//! After pass 2, column indices are in coarse-grid numbering: fine index j
//! maps to the number of C-points preceding it.

pub mod direct;
pub mod standard;

pub use direct::{direct_interpolation_pass1, direct_interpolation_pass2};
pub use standard::{standard_interpolation_pass1, standard_interpolation_pass2};

use crate::csr::{nnz, validate_len, validate_row_ptr};
use crate::element::IndexElement;
use crate::error::Result;

use super::splitting::C_NODE;

/// Shared pass 1: count one entry per C-point row, one per strong
/// C-neighbor for F-point rows. Returns nnz(B).
pub(crate) fn strong_coarse_pass1<I: IndexElement>(
    n_nodes: usize,
    s_row_ptr: &[I],
    s_col_idx: &[I],
    splitting: &[I],
    b_row_ptr: &mut [I],
) -> Result<usize> {
    validate_row_ptr(s_row_ptr, n_nodes)?;
    validate_row_ptr(b_row_ptr, n_nodes)?;
    validate_len("s_col_idx", s_col_idx, nnz(s_row_ptr, n_nodes))?;
    validate_len("splitting", splitting, n_nodes)?;

    let c_node = I::from_index(C_NODE);

    let mut b_nnz = 0usize;
    b_row_ptr[0] = I::from_index(0);
    for i in 0..n_nodes {
        if splitting[i] == c_node {
            b_nnz += 1;
        } else {
            for jj in s_row_ptr[i].to_index()..s_row_ptr[i + 1].to_index() {
                let j = s_col_idx[jj].to_index();
                if splitting[j] == c_node && j != i {
                    b_nnz += 1;
                }
            }
        }
        b_row_ptr[i + 1] = I::from_index(b_nnz);
    }

    Ok(b_nnz)
}

/// Rewrite B's column indices from fine-grid to coarse-grid numbering.
pub(crate) fn remap_to_coarse<I: IndexElement>(
    n_nodes: usize,
    splitting: &[I],
    b_row_ptr: &[I],
    b_col_idx: &mut [I],
) {
    let mut map = vec![0usize; n_nodes];
    let mut sum = 0usize;
    for i in 0..n_nodes {
        map[i] = sum;
        sum += splitting[i].to_index();
    }
    for idx in 0..b_row_ptr[n_nodes].to_index() {
        b_col_idx[idx] = I::from_index(map[b_col_idx[idx].to_index()]);
    }
}
