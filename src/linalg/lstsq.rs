//! Small dense least-squares solves

use crate::csr::validate_len;
use crate::element::ValueElement;
use crate::error::Result;

/// Injected dense least-squares capability
///
/// Solves `min ||A x - b||_2` for an m-by-n system; when A has full rank
/// the solve is exact. Implementations may clobber `a` and `b` as scratch.
pub trait LeastSquaresSolver<V: ValueElement> {
    /// Solve the system and write the solution into `x[..n]`.
    ///
    /// `a` holds the m-by-n matrix, column-major when `column_major` is
    /// set, row-major otherwise. Near-singular systems may produce
    /// non-finite entries in `x`; no error is raised for them.
    fn solve(
        &mut self,
        a: &mut [V],
        b: &mut [V],
        x: &mut [V],
        m: usize,
        n: usize,
        column_major: bool,
    ) -> Result<()>;
}

/// Householder thin-QR least-squares solver
///
/// Factors A = QR with Householder reflections, forms Qᵀb, and
/// back-substitutes the triangular system. For n > m the trailing
/// components of `x` are zero (basic solution, not minimum-norm).
#[derive(Debug, Default, Clone, Copy)]
pub struct QrLstsq;

impl<V: ValueElement> LeastSquaresSolver<V> for QrLstsq {
    fn solve(
        &mut self,
        a: &mut [V],
        b: &mut [V],
        x: &mut [V],
        m: usize,
        n: usize,
        column_major: bool,
    ) -> Result<()> {
        validate_len("a", a, m * n)?;
        validate_len("b", b, m)?;
        validate_len("x", x, n)?;

        // Work column-major internally: mat[col * m + row].
        let mut mat = vec![V::zero(); m * n];
        if column_major {
            mat.copy_from_slice(&a[..m * n]);
        } else {
            for row in 0..m {
                for col in 0..n {
                    mat[col * m + row] = a[row * n + col];
                }
            }
        }
        let rhs = &mut b[..m];

        let k_max = m.min(n);
        let mut v = vec![V::zero(); m];

        for k in 0..k_max {
            // Householder vector for column k below the diagonal.
            let mut norm_sq = V::zero();
            for row in k..m {
                let e = mat[k * m + row];
                norm_sq += e * e;
            }
            let norm = norm_sq.sqrt();
            if norm == V::zero() {
                continue;
            }
            let pivot = mat[k * m + k];
            let alpha = if pivot > V::zero() { -norm } else { norm };

            let len = m - k;
            v[0] = pivot - alpha;
            v[1..len].copy_from_slice(&mat[(k * m + k + 1)..(k * m + m)]);
            let mut vtv = V::zero();
            for item in v[..len].iter() {
                vtv += *item * *item;
            }
            if vtv == V::zero() {
                continue;
            }
            let two = V::one() + V::one();

            // Reflect the remaining columns and the right-hand side.
            for col in k..n {
                let base = col * m + k;
                let mut dot = V::zero();
                for row in 0..len {
                    dot += v[row] * mat[base + row];
                }
                let factor = two * dot / vtv;
                for row in 0..len {
                    mat[base + row] -= factor * v[row];
                }
            }
            let mut dot = V::zero();
            for row in 0..len {
                dot += v[row] * rhs[k + row];
            }
            let factor = two * dot / vtv;
            for row in 0..len {
                rhs[k + row] -= factor * v[row];
            }
        }

        // Back substitution on the k_max-by-k_max upper triangle. A zero
        // pivot flows through as a non-finite component, by contract.
        for item in x[..n].iter_mut() {
            *item = V::zero();
        }
        for row in (0..k_max).rev() {
            let mut sum = V::zero();
            for col in (row + 1)..k_max {
                sum += mat[col * m + row] * x[col];
            }
            x[row] = (rhs[row] - sum) / mat[row * m + row];
        }

        Ok(())
    }
}
