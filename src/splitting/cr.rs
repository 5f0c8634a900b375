//! Compatible-relaxation candidate promotion
//!
//! Between relaxation sweeps, compatible relaxation measures how poorly
//! each current F-point was smoothed (the relaxed vector against the
//! near-null-space target), collects the badly smoothed ones as coarse-grid
//! candidates, and greedily promotes an independent set of them by weight.
//! Steps 3.1d-3.1f of Falgout & Brannick (2010).
//!
//! # Boundary encoding
//!
//! This kernel keeps its historic splitting convention: the buffer is
//! 0/1-coded, 0-marked nodes form the candidate pool (and the F block of
//! the rebuilt index array), promotion writes 1. The interface it was
//! inherited with labels the values the other way around (0 = C, 1 = F);
//! the behavior is preserved exactly for regression compatibility, and
//! callers translate with [`super::cf_adapters`] rather than
//! reinterpreting the constants in [`super`].
//!
//! # Index layout
//!
//! `indices` has n + 1 elements: `indices[0]` is the F-point count nf,
//! `indices[1..=nf]` the F-points, `indices[nf+1..]` the C-points. The
//! rebuilt C block is ordered largest index first.

use crate::csr::{nnz, validate_len, validate_row_ptr};
use crate::element::{IndexElement, ValueElement};
use crate::error::Result;

/// Compatible-relaxation candidate promotion
///
/// In-place update of `splitting`, `indices`, `gamma`, `e`, and the
/// work-estimate accumulator `cost` (two F-sweeps of `nf / nnz(A)` work
/// units each). `b` is the near-null-space target, `e` the relaxed vector;
/// `theta_cs` is the candidate threshold on the normalized measure.
#[allow(clippy::too_many_arguments)]
pub fn cr_promote_candidates<I: IndexElement, V: ValueElement>(
    a_row_ptr: &[I],
    a_col_idx: &[I],
    b: &[V],
    e: &mut [V],
    indices: &mut [I],
    splitting: &mut [I],
    gamma: &mut [V],
    theta_cs: V,
    cost: &mut [V],
) -> Result<()> {
    let n = splitting.len();
    validate_row_ptr(a_row_ptr, n)?;
    validate_len("a_col_idx", a_col_idx, nnz(a_row_ptr, n))?;
    validate_len("b", b, n)?;
    validate_len("e", e, n)?;
    validate_len("indices", indices, n + 1)?;
    validate_len("gamma", gamma, n)?;
    validate_len("cost", cost, 1)?;

    let a_nnz = V::from_f64(a_col_idx.len() as f64);
    let num_fpts = indices[0].to_index();
    let f_sweep_cost = V::from_f64(num_fpts as f64) / a_nnz;

    // Normalize the relaxed vector against the target and take the sup
    // over the current F-points.
    let mut inf_norm = V::zero();
    for idx in 1..=num_fpts {
        let pt = indices[idx].to_index();
        e[pt] = (e[pt] / b[pt]).abs();
        if e[pt] > inf_norm {
            inf_norm = e[pt];
        }
    }
    cost[0] += f_sweep_cost;

    // Candidate set: F-points whose measure exceeds the threshold.
    let mut candidates: Vec<usize> = Vec::new();
    for idx in 1..=num_fpts {
        let pt = indices[idx].to_index();
        gamma[pt] = e[pt] / inf_norm;
        if gamma[pt] > theta_cs {
            candidates.push(pt);
        }
    }
    cost[0] += f_sweep_cost;

    // Weights: neighbor count outside the coarse set, plus the measure.
    let mut omega = vec![V::zero(); n];
    for &pt in &candidates {
        let mut num_neighbors = 0usize;
        for jj in a_row_ptr[pt].to_index()..a_row_ptr[pt + 1].to_index() {
            if splitting[a_col_idx[jj].to_index()].to_index() == 0 {
                num_neighbors += 1;
            }
        }
        omega[pt] = V::from_f64(num_neighbors as f64) + gamma[pt];
    }

    // Greedy maximum-independent-set promotion.
    loop {
        let mut max_weight = V::zero();
        let mut new_pt: Option<usize> = None;
        for &pt in &candidates {
            if omega[pt] > max_weight {
                max_weight = omega[pt];
                new_pt = Some(pt);
            }
        }
        let Some(new_pt) = new_pt else {
            break;
        };
        splitting[new_pt] = I::from_index(1);
        gamma[new_pt] = V::zero();

        // Everything adjacent to the promoted point leaves the candidate
        // pool; their remaining neighbors become slightly better picks.
        let nb_start = a_row_ptr[new_pt].to_index();
        let nb_end = a_row_ptr[new_pt + 1].to_index();
        for jj in nb_start..nb_end {
            omega[a_col_idx[jj].to_index()] = V::zero();
        }
        for jj in nb_start..nb_end {
            let q = a_col_idx[jj].to_index();
            for kk in a_row_ptr[q].to_index()..a_row_ptr[q + 1].to_index() {
                let r = a_col_idx[kk].to_index();
                if omega[r] != V::zero() {
                    omega[r] += V::one();
                }
            }
        }
    }

    // Rebuild the index layout: F block in front, C block from the back
    // (largest index first).
    let mut num_fpts = 0usize;
    let mut next_f = 1usize;
    let mut next_c = n;
    for i in 0..n {
        if splitting[i].to_index() == 0 {
            indices[next_f] = I::from_index(i);
            next_f += 1;
            num_fpts += 1;
        } else {
            indices[next_c] = I::from_index(i);
            next_c -= 1;
        }
    }
    indices[0] = I::from_index(num_fpts);

    Ok(())
}
