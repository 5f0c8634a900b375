//! Standard interpolation
//!
//! Extends direct interpolation by routing the couplings of strong
//! F-neighbors through the coarse set: the coupling a_ik to a strong fine
//! neighbor k is redistributed over k's own couplings to the row's strong
//! C-neighbors, filtered to the terms whose sign matches a_kj. Weak
//! couplings stay lumped into the denominator.
//!
//! Zero denominators are reported through the diagnostic sink and the
//! computation proceeds; the affected weights come out non-finite and the
//! caller decides whether that is fatal.
//!
//! Reference: Briggs, Henson, McCormick, "A Multigrid Tutorial", p. 144.

use crate::csr::{nnz, validate_len, validate_row_ptr};
use crate::diag::{Diagnostic, DiagnosticSink};
use crate::element::{IndexElement, ValueElement};
use crate::error::Result;

use super::super::splitting::{C_NODE, F_NODE};
use super::{remap_to_coarse, strong_coarse_pass1};

/// Standard interpolation, pass 1: fill B's row pointer
///
/// The sparsity pattern is the same as direct interpolation's: one entry
/// per C-point row, one per strong C-neighbor for F-point rows. Returns
/// nnz(B).
pub fn standard_interpolation_pass1<I: IndexElement>(
    n_nodes: usize,
    s_row_ptr: &[I],
    s_col_idx: &[I],
    splitting: &[I],
    b_row_ptr: &mut [I],
) -> Result<usize> {
    strong_coarse_pass1(n_nodes, s_row_ptr, s_col_idx, splitting, b_row_ptr)
}

/// Standard interpolation, pass 2: fill B's column indices and weights
///
/// `b_row_ptr` must come from [`standard_interpolation_pass1`]. On return,
/// column indices are in coarse-grid numbering.
#[allow(clippy::too_many_arguments)]
pub fn standard_interpolation_pass2<I: IndexElement, V: ValueElement>(
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
    sink: &mut dyn DiagnosticSink,
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
    let f_node = I::from_index(F_NODE);

    for i in 0..n_nodes {
        if splitting[i] == c_node {
            let pos = b_row_ptr[i].to_index();
            b_col_idx[pos] = I::from_index(i);
            b_values[pos] = V::one();
            continue;
        }

        // Denominator: diagonal plus the weak couplings. Start from the
        // whole row of A and subtract the strong off-diagonals.
        let mut denominator = V::zero();
        for mm in a_row_ptr[i].to_index()..a_row_ptr[i + 1].to_index() {
            denominator += a_values[mm];
        }
        for mm in s_row_ptr[i].to_index()..s_row_ptr[i + 1].to_index() {
            if s_col_idx[mm].to_index() != i {
                denominator -= s_values[mm];
            }
        }

        let mut pos = b_row_ptr[i].to_index();
        for jj in s_row_ptr[i].to_index()..s_row_ptr[i + 1].to_index() {
            let j = s_col_idx[jj].to_index();
            if splitting[j] != c_node || j == i {
                continue;
            }
            b_col_idx[pos] = s_col_idx[jj];

            let mut numerator = s_values[jj];

            // Route each strong F-neighbor's coupling through the coarse
            // set.
            for kk in s_row_ptr[i].to_index()..s_row_ptr[i + 1].to_index() {
                let k = s_col_idx[kk].to_index();
                if splitting[k] != f_node || k == i {
                    continue;
                }

                let mut a_kj = V::zero();
                for search in a_row_ptr[k].to_index()..a_row_ptr[k + 1].to_index() {
                    if a_col_idx[search].to_index() == j {
                        a_kj = a_values[search];
                    }
                }
                if a_kj == V::zero() {
                    continue;
                }

                // Inner denominator: k's couplings to the row's strong
                // C-neighbors, restricted to terms whose sign matches a_kj.
                let mut inner_denominator = V::zero();
                let mut added_to = false;
                for ll in s_row_ptr[i].to_index()..s_row_ptr[i + 1].to_index() {
                    let l = s_col_idx[ll].to_index();
                    if splitting[l] != c_node || l == i {
                        continue;
                    }
                    for search in a_row_ptr[k].to_index()..a_row_ptr[k + 1].to_index() {
                        if a_col_idx[search].to_index() == l
                            && a_kj * a_values[search] > V::zero()
                        {
                            added_to = true;
                            inner_denominator += a_values[search];
                        }
                    }
                }

                if inner_denominator == V::zero() {
                    sink.report(if added_to {
                        Diagnostic::InnerDenominatorCancellation { row: i, neighbor: k }
                    } else {
                        Diagnostic::FineNeighborWithoutCoarseConnection { row: i, neighbor: k }
                    });
                }
                numerator += s_values[kk] * a_kj / inner_denominator;
            }

            if denominator == V::zero() {
                sink.report(Diagnostic::ZeroRowDenominator { row: i });
            }
            b_values[pos] = -numerator / denominator;
            pos += 1;
        }
    }

    remap_to_coarse(n_nodes, splitting, b_row_ptr, b_col_idx);
    Ok(())
}
