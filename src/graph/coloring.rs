//! Vertex coloring over the strength graph

use crate::csr::{nnz, validate_len, validate_row_ptr};
use crate::element::IndexElement;
use crate::error::Result;

/// Injected vertex-coloring capability
///
/// Colors the n-vertex graph whose adjacency is the CSR pattern
/// `(s_row_ptr, s_col_idx)`; self-loops (diagonal entries) are ignored.
/// Every color class must be an independent set.
pub trait VertexColorer<I: IndexElement> {
    /// Write one color per vertex into `coloring` and return the number of
    /// colors used.
    fn color(
        &mut self,
        n: usize,
        s_row_ptr: &[I],
        s_col_idx: &[I],
        coloring: &mut [I],
    ) -> Result<usize>;
}

/// Greedy first-fit coloring
///
/// Sweeps vertices in index order and assigns each the smallest color not
/// used by an already-colored neighbor. Color class 0 is a maximal
/// independent set, which is the property the CLJP weight seeding relies
/// on. Deterministic; at most `max_degree + 1` colors.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyMisColoring;

impl<I: IndexElement> VertexColorer<I> for GreedyMisColoring {
    fn color(
        &mut self,
        n: usize,
        s_row_ptr: &[I],
        s_col_idx: &[I],
        coloring: &mut [I],
    ) -> Result<usize> {
        validate_row_ptr(s_row_ptr, n)?;
        validate_len("s_col_idx", s_col_idx, nnz(s_row_ptr, n))?;
        validate_len("coloring", coloring, n)?;

        const UNSET: usize = usize::MAX;
        let mut assigned = vec![UNSET; n];
        let mut used = vec![false; n + 1];
        let mut ncolors = 0usize;

        for i in 0..n {
            let row_start = s_row_ptr[i].to_index();
            let row_end = s_row_ptr[i + 1].to_index();

            for jj in row_start..row_end {
                let j = s_col_idx[jj].to_index();
                if j != i && assigned[j] != UNSET {
                    used[assigned[j]] = true;
                }
            }

            let mut color = 0usize;
            while used[color] {
                color += 1;
            }
            assigned[i] = color;
            ncolors = ncolors.max(color + 1);

            // Clear the marks for the next vertex.
            for jj in row_start..row_end {
                let j = s_col_idx[jj].to_index();
                if j != i && assigned[j] != UNSET {
                    used[assigned[j]] = false;
                }
            }
        }

        for i in 0..n {
            coloring[i] = I::from_index(assigned[i]);
        }

        Ok(ncolors)
    }
}
