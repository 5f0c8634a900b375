//! Approximate ideal restriction (AIR)
//!
//! The ideal restriction for a C/F-partitioned operator is
//! `R = [-A_cf A_ff^{-1}  I]`; AIR approximates it locally. For each coarse
//! point c, the row of R is supported on the strongly connected F-points
//! Nf of c, with weights chosen so that `(R·A)` vanishes on that support:
//! a dense solve against the principal submatrix `A[Nf, Nf]` with
//! right-hand side `-A[c, Nf]`, plus a unit identity entry at c.
//!
//! Pass 1 sizes the rows and, when a row's neighborhood exceeds `max_row`,
//! prunes the weakest couplings *in place* in the strength matrix, so the
//! trim carries over to every later consumer of S. Pass 2 assembles the
//! rows, delegating the dense solves to an injected
//! [`LeastSquaresSolver`].

use smallvec::SmallVec;

use crate::csr::{nnz, validate_len, validate_row_ptr};
use crate::diag::{Diagnostic, DiagnosticSink};
use crate::element::{IndexElement, ValueElement};
use crate::error::Result;
use crate::linalg::LeastSquaresSolver;
use crate::splitting::F_NODE;

/// Couplings at or below this magnitude never enter a neighborhood.
const STRENGTH_CUTOFF: f64 = 1e-16;

/// AIR, pass 1: size R's rows and trim oversized neighborhoods
///
/// `c_*` is the strength matrix S over the fine grid (`c_values` is mutated
/// when trimming); `c_pts` lists the coarse points in the order their rows
/// will appear in R. A neighborhood larger than `max_row` is sorted
/// ascending by signed strength and the entries past `max_row` are zeroed
/// in `c_values`. Do not share S with another kernel during this call.
///
/// Writes `r_row_ptr` (one row per coarse point, including the identity
/// entry) and returns nnz(R).
pub fn approx_ideal_restriction_pass1<I: IndexElement, V: ValueElement>(
    r_row_ptr: &mut [I],
    c_row_ptr: &[I],
    c_col_idx: &[I],
    c_values: &mut [V],
    c_pts: &[I],
    splitting: &[I],
    max_row: Option<usize>,
) -> Result<usize> {
    let n = c_row_ptr.len().saturating_sub(1);
    validate_row_ptr(r_row_ptr, c_pts.len())?;
    let c_nnz = nnz(c_row_ptr, n);
    validate_len("c_col_idx", c_col_idx, c_nnz)?;
    validate_len("c_values", c_values, c_nnz)?;
    validate_len("splitting", splitting, n)?;

    let f_node = I::from_index(F_NODE);
    let cutoff = V::from_f64(STRENGTH_CUTOFF);
    let max_row = max_row.unwrap_or(usize::MAX);

    let mut r_nnz = 0usize;
    r_row_ptr[0] = I::from_index(0);

    for (row, &cpt) in c_pts.iter().enumerate() {
        let cpoint = cpt.to_index();

        // Strongly connected F-points, with their storage positions so the
        // trim can zero them in place.
        let mut neighborhood: SmallVec<[(usize, V); 16]> = SmallVec::new();
        for idx in c_row_ptr[cpoint].to_index()..c_row_ptr[cpoint + 1].to_index() {
            if splitting[c_col_idx[idx].to_index()] == f_node
                && c_values[idx].magnitude() > cutoff
            {
                neighborhood.push((idx, c_values[idx]));
            }
        }

        let size = neighborhood.len();
        if size > max_row {
            // Ascending by signed value keeps the most negative (for an
            // M-matrix: strongest) couplings in front.
            neighborhood.sort_unstable_by(|a, b| {
                a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal)
            });
            for &(idx, _) in &neighborhood[max_row..] {
                c_values[idx] = V::zero();
            }
        }

        r_nnz += 1 + size.min(max_row);
        r_row_ptr[row + 1] = I::from_index(r_nnz);
    }

    Ok(r_nnz)
}

/// AIR, pass 2: assemble R's column indices and weights
///
/// `r_row_ptr` must come from [`approx_ideal_restriction_pass1`] and the
/// strength matrix must be the (possibly trimmed) one that call left
/// behind. Each row receives its neighborhood columns, the dense solve's
/// weights, and a trailing `(c, 1)` identity entry. Column indices are in
/// fine-grid numbering.
///
/// A disagreement between a row pointer and the neighborhood found here is
/// reported through `sink` and assembly continues.
#[allow(clippy::too_many_arguments)]
pub fn approx_ideal_restriction_pass2<I: IndexElement, V: ValueElement>(
    r_row_ptr: &[I],
    r_col_idx: &mut [I],
    r_values: &mut [V],
    a_row_ptr: &[I],
    a_col_idx: &[I],
    a_values: &[V],
    c_row_ptr: &[I],
    c_col_idx: &[I],
    c_values: &[V],
    c_pts: &[I],
    splitting: &[I],
    solver: &mut dyn LeastSquaresSolver<V>,
    sink: &mut dyn DiagnosticSink,
) -> Result<()> {
    let n = c_row_ptr.len().saturating_sub(1);
    validate_row_ptr(r_row_ptr, c_pts.len())?;
    validate_row_ptr(a_row_ptr, n)?;
    let r_nnz = nnz(r_row_ptr, c_pts.len());
    validate_len("r_col_idx", r_col_idx, r_nnz)?;
    validate_len("r_values", r_values, r_nnz)?;
    let a_nnz = nnz(a_row_ptr, n);
    validate_len("a_col_idx", a_col_idx, a_nnz)?;
    validate_len("a_values", a_values, a_nnz)?;
    let c_nnz = nnz(c_row_ptr, n);
    validate_len("c_col_idx", c_col_idx, c_nnz)?;
    validate_len("c_values", c_values, c_nnz)?;
    validate_len("splitting", splitting, n)?;

    let f_node = I::from_index(F_NODE);
    let cutoff = V::from_f64(STRENGTH_CUTOFF);

    for (row, &cpt) in c_pts.iter().enumerate() {
        let cpoint = cpt.to_index();
        let row_start = r_row_ptr[row].to_index();
        let row_end = r_row_ptr[row + 1].to_index();

        // Columns of this row: the surviving strong F-neighborhood.
        let mut ind = row_start;
        for idx in c_row_ptr[cpoint].to_index()..c_row_ptr[cpoint + 1].to_index() {
            if splitting[c_col_idx[idx].to_index()] == f_node
                && c_values[idx].magnitude() > cutoff
            {
                r_col_idx[ind] = c_col_idx[idx];
                ind += 1;
            }
        }

        if ind + 1 != row_end {
            sink.report(Diagnostic::RestrictionRowMismatch {
                row: cpoint,
                expected: (row_end - row_start).saturating_sub(1),
                written: ind - row_start,
            });
        }

        // Local system, column-major: column q holds row Nf[q] of A
        // restricted to the neighborhood, so the stored matrix is
        // A[Nf, Nf] transposed.
        let m = ind - row_start;
        let mut a0 = vec![V::zero(); m * m];
        let mut write = 0usize;
        for jpos in row_start..ind {
            let source_row = r_col_idx[jpos].to_index();
            for ipos in row_start..ind {
                let want = r_col_idx[ipos];
                let mut value = V::zero();
                for search in
                    a_row_ptr[source_row].to_index()..a_row_ptr[source_row + 1].to_index()
                {
                    if a_col_idx[search] == want {
                        value = a_values[search];
                        break;
                    }
                }
                a0[write] = value;
                write += 1;
            }
        }

        // Right-hand side: the negated couplings from the coarse point into
        // its neighborhood, so the solved weights cancel A over Nf.
        let mut b0 = vec![V::zero(); m];
        for (slot, ipos) in (row_start..ind).enumerate() {
            let want = r_col_idx[ipos];
            for search in a_row_ptr[cpoint].to_index()..a_row_ptr[cpoint + 1].to_index() {
                if a_col_idx[search] == want {
                    b0[slot] = -a_values[search];
                    break;
                }
            }
        }

        // Least squares solves exactly when full rank.
        solver.solve(
            &mut a0,
            &mut b0,
            &mut r_values[row_start..ind],
            m,
            m,
            true,
        )?;

        // Identity on the coarse point closes the row.
        r_col_idx[ind] = cpt;
        r_values[ind] = V::one();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::VecSink;
    use crate::linalg::QrLstsq;
    use crate::splitting::{C_NODE, F_NODE};

    #[test]
    fn two_point_system_recovers_the_ideal_weight() {
        // A = [2 -1; -1 2], sigma = (F, C), one coarse point.
        let ap = vec![0i64, 2, 4];
        let aj = vec![0i64, 1, 0, 1];
        let ax = vec![2.0, -1.0, -1.0, 2.0];
        let sigma = vec![F_NODE as i64, C_NODE as i64];
        let c_pts = vec![1i64];

        let mut sx = ax.clone();
        let mut rp = vec![0i64; 2];
        let r_nnz =
            approx_ideal_restriction_pass1(&mut rp, &ap, &aj, &mut sx, &c_pts, &sigma, None)
                .unwrap();
        assert_eq!(rp, vec![0, 2]);

        let mut rj = vec![0i64; r_nnz];
        let mut rx = vec![0.0f64; r_nnz];
        let mut sink = VecSink::default();
        approx_ideal_restriction_pass2(
            &rp, &mut rj, &mut rx, &ap, &aj, &ax, &ap, &aj, &sx, &c_pts, &sigma, &mut QrLstsq,
            &mut sink,
        )
        .unwrap();

        assert!(sink.events.is_empty());
        assert_eq!(rj, vec![0, 1]);
        // Ideal weight: -a_cf / a_ff = -(-1)/2 = 0.5, then the identity.
        assert!((rx[0] - 0.5).abs() < 1e-14);
        assert_eq!(rx[1], 1.0);
    }

    #[test]
    fn oversized_neighborhoods_are_trimmed_in_place() {
        // Coarse point 3 strongly couples to F-points 0, 1, 2 with
        // strengths -1, -3, -2; max_row = 2 keeps the two most negative.
        let sp = vec![0i64, 1, 2, 3, 7];
        let sj = vec![0i64, 1, 2, 0, 1, 2, 3];
        let mut sx = vec![1.0f64, 1.0, 1.0, -1.0, -3.0, -2.0, 4.0];
        let sigma = vec![
            F_NODE as i64,
            F_NODE as i64,
            F_NODE as i64,
            C_NODE as i64,
        ];
        let c_pts = vec![3i64];

        let mut rp = vec![0i64; 2];
        let r_nnz =
            approx_ideal_restriction_pass1(&mut rp, &sp, &sj, &mut sx, &c_pts, &sigma, Some(2))
                .unwrap();
        assert_eq!(r_nnz, 3);
        assert_eq!(rp, vec![0, 3]);
        // The weakest coupling (-1, to F-point 0) was zeroed in S.
        assert_eq!(sx[3], 0.0);
        assert_eq!(sx[4], -3.0);
        assert_eq!(sx[5], -2.0);
    }

    #[test]
    fn row_pointer_disagreement_is_reported() {
        // Hand the second pass a row pointer promising two neighbors when
        // only one survives the strength cutoff.
        let ap = vec![0i64, 2, 4];
        let aj = vec![0i64, 1, 0, 1];
        let ax = vec![2.0, -1.0, -1.0, 2.0];
        let sigma = vec![F_NODE as i64, C_NODE as i64];
        let c_pts = vec![1i64];
        let rp = vec![0i64, 3];

        let mut rj = vec![0i64; 3];
        let mut rx = vec![0.0f64; 3];
        let mut sink = VecSink::default();
        approx_ideal_restriction_pass2(
            &rp, &mut rj, &mut rx, &ap, &aj, &ax, &ap, &aj, &ax, &c_pts, &sigma, &mut QrLstsq,
            &mut sink,
        )
        .unwrap();
        assert_eq!(
            sink.events,
            vec![Diagnostic::RestrictionRowMismatch {
                row: 1,
                expected: 2,
                written: 1,
            }]
        );
    }
}
