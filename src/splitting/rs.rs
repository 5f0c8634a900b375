//! Ruge-Stüben coarse/fine splitting
//!
//! Nodes are selected as coarse points in descending order of a priority
//! `lambda[i] = |{j : i in S_j}| + influence[i]` - the number of nodes that
//! strongly depend on i, plus a caller-supplied bias. Selecting a coarse
//! point demotes the nodes that depend on it to fine, which in turn promotes
//! *their* strong neighbors; priorities therefore change constantly, and the
//! kernel keeps them in a bucketed structure that supports peek-max,
//! increment and decrement in O(1).
//!
//! # Determinism
//!
//! Among nodes of equal priority the one with the largest node id is chosen.
//! Regression behavior depends on this tie-break and on the exact swap
//! sequences of the bucket structure; both are preserved here verbatim.

use crate::csr::{nnz, validate_len, validate_row_ptr};
use crate::element::IndexElement;
use crate::error::Result;

use super::{C_NODE, F_NODE, PRE_F_NODE, U_NODE};

/// Bucketed priority structure over node priorities
///
/// Nodes live in a flat slot array ordered by ascending priority; the
/// interval of slots holding priority `l` starts at `interval_ptr[l]` and
/// holds `interval_count[l]` nodes. `index_to_node` and `node_to_index` are
/// inverse position maps. All four arrays must move together: each swap
/// updates `node_to_index` for both endpoints before exchanging the
/// `index_to_node` entries.
pub(crate) struct LambdaBuckets {
    pub(crate) interval_ptr: Vec<usize>,
    pub(crate) interval_count: Vec<usize>,
    pub(crate) index_to_node: Vec<usize>,
    pub(crate) node_to_index: Vec<usize>,
}

impl LambdaBuckets {
    /// Counting-sort the nodes into priority intervals.
    ///
    /// `size` must exceed every priority the structure will ever hold, plus
    /// one slot of headroom for increments.
    pub(crate) fn build(lambda: &[usize], size: usize) -> Self {
        let n = lambda.len();
        let mut interval_ptr = vec![0usize; size];
        let mut interval_count = vec![0usize; size];
        let mut index_to_node = vec![0usize; n];
        let mut node_to_index = vec![0usize; n];

        for &l in lambda {
            interval_count[l] += 1;
        }
        let mut cumsum = 0usize;
        for l in 0..size {
            interval_ptr[l] = cumsum;
            cumsum += interval_count[l];
            interval_count[l] = 0;
        }
        for (i, &l) in lambda.iter().enumerate() {
            let index = interval_ptr[l] + interval_count[l];
            index_to_node[index] = i;
            node_to_index[i] = index;
            interval_count[l] += 1;
        }

        Self {
            interval_ptr,
            interval_count,
            index_to_node,
            node_to_index,
        }
    }

    /// Move node `k`, currently at priority `lambda_k`, to the front of the
    /// next-higher interval.
    pub(crate) fn promote(&mut self, k: usize, lambda_k: usize) {
        let old_pos = self.node_to_index[k];
        let new_pos = self.interval_ptr[lambda_k] + self.interval_count[lambda_k] - 1;

        self.node_to_index[self.index_to_node[old_pos]] = new_pos;
        self.node_to_index[self.index_to_node[new_pos]] = old_pos;
        self.index_to_node.swap(old_pos, new_pos);

        self.interval_count[lambda_k] -= 1;
        self.interval_count[lambda_k + 1] += 1;
        self.interval_ptr[lambda_k + 1] = new_pos;
    }

    /// Move node `j`, currently at priority `lambda_j`, to the start of the
    /// next-lower interval.
    pub(crate) fn demote(&mut self, j: usize, lambda_j: usize) {
        let old_pos = self.node_to_index[j];
        let new_pos = self.interval_ptr[lambda_j];

        self.node_to_index[self.index_to_node[old_pos]] = new_pos;
        self.node_to_index[self.index_to_node[new_pos]] = old_pos;
        self.index_to_node.swap(old_pos, new_pos);

        self.interval_count[lambda_j] -= 1;
        self.interval_count[lambda_j - 1] += 1;
        self.interval_ptr[lambda_j] += 1;
        self.interval_ptr[lambda_j - 1] =
            self.interval_ptr[lambda_j] - self.interval_count[lambda_j - 1];
    }

    /// Deterministic tie-break: swap the largest-id node remaining in the
    /// `lambda_i` interval into `top_index` and return it. The interval
    /// count must already exclude the slot at `top_index`.
    pub(crate) fn take_largest(&mut self, top_index: usize, lambda_i: usize) -> usize {
        let mut max_node = self.index_to_node[top_index];
        let mut max_index = top_index;
        let lo = self.interval_ptr[lambda_i];
        let hi = lo + self.interval_count[lambda_i];
        for pos in lo..hi {
            if self.index_to_node[pos] > max_node {
                max_node = self.index_to_node[pos];
                max_index = pos;
            }
        }

        self.node_to_index[self.index_to_node[top_index]] = max_index;
        self.node_to_index[self.index_to_node[max_index]] = top_index;
        self.index_to_node.swap(top_index, max_index);

        self.index_to_node[top_index]
    }
}

/// Ruge-Stüben coarse/fine splitting
///
/// `s_*` is the strength matrix S (pattern only; values are not read) and
/// `t_*` its transpose, so `t_row_ptr[i+1] - t_row_ptr[i]` counts the nodes
/// that strongly depend on i. `influence[i]` is added to node i's initial
/// priority; pass zeros for the unbiased splitting.
///
/// On return every entry of `splitting` is [`F_NODE`] or [`C_NODE`].
pub fn rs_cf_splitting<I: IndexElement>(
    n_nodes: usize,
    s_row_ptr: &[I],
    s_col_idx: &[I],
    t_row_ptr: &[I],
    t_col_idx: &[I],
    influence: &[I],
    splitting: &mut [I],
) -> Result<()> {
    validate_row_ptr(s_row_ptr, n_nodes)?;
    validate_row_ptr(t_row_ptr, n_nodes)?;
    validate_len("s_col_idx", s_col_idx, nnz(s_row_ptr, n_nodes))?;
    validate_len("t_col_idx", t_col_idx, nnz(t_row_ptr, n_nodes))?;
    validate_len("influence", influence, n_nodes)?;
    validate_len("splitting", splitting, n_nodes)?;

    if n_nodes == 0 {
        return Ok(());
    }

    let f_node = I::from_index(F_NODE);
    let c_node = I::from_index(C_NODE);
    let u_node = I::from_index(U_NODE);
    let pre_f_node = I::from_index(PRE_F_NODE);

    let mut lambda = vec![0usize; n_nodes];
    let mut lambda_max = 0usize;
    for i in 0..n_nodes {
        lambda[i] =
            t_row_ptr[i + 1].to_index() - t_row_ptr[i].to_index() + influence[i].to_index();
        lambda_max = lambda_max.max(lambda[i]);
    }

    let size = (lambda_max * 2).max(n_nodes + 1);
    let mut buckets = LambdaBuckets::build(&lambda, size);

    for s in splitting[..n_nodes].iter_mut() {
        *s = u_node;
    }

    // Nodes nothing depends on start out fine; so do nodes whose only
    // dependent is themselves.
    for i in 0..n_nodes {
        let t_start = t_row_ptr[i].to_index();
        let t_end = t_row_ptr[i + 1].to_index();
        if lambda[i] == 0
            || (lambda[i] == 1 && t_end - t_start == 1 && t_col_idx[t_start].to_index() == i)
        {
            splitting[i] = f_node;
        }
    }

    // Assign nodes to C and F in descending priority order.
    for top_index in (0..n_nodes).rev() {
        let i = buckets.index_to_node[top_index];
        let lambda_i = lambda[i];

        // Remove i from its interval.
        buckets.interval_count[lambda_i] -= 1;

        if splitting[i] == f_node {
            continue;
        }
        debug_assert!(splitting[i] == u_node);

        let i = buckets.take_largest(top_index, lambda_i);
        splitting[i] = c_node;

        // Nodes depending on the new C-point become tentative F.
        for jj in t_row_ptr[i].to_index()..t_row_ptr[i + 1].to_index() {
            let j = t_col_idx[jj].to_index();
            if splitting[j] == u_node {
                splitting[j] = pre_f_node;
            }
        }

        for jj in t_row_ptr[i].to_index()..t_row_ptr[i + 1].to_index() {
            let j = t_col_idx[jj].to_index();
            if splitting[j] != pre_f_node {
                continue;
            }
            splitting[j] = f_node;

            // Each new F-point makes its unassigned strong neighbors more
            // attractive as C-points.
            for kk in s_row_ptr[j].to_index()..s_row_ptr[j + 1].to_index() {
                let k = s_col_idx[kk].to_index();
                if splitting[k] != u_node {
                    continue;
                }
                // Saturation guard: clamp instead of growing past the
                // bucket range.
                if lambda[k] >= n_nodes - 1 {
                    continue;
                }
                buckets.promote(k, lambda[k]);
                lambda[k] += 1;
            }
        }

        // Unassigned nodes the new C-point depends on lose priority.
        for jj in s_row_ptr[i].to_index()..s_row_ptr[i + 1].to_index() {
            let j = s_col_idx[jj].to_index();
            if splitting[j] != u_node {
                continue;
            }
            if lambda[j] == 0 {
                continue;
            }
            buckets.demote(j, lambda[j]);
            lambda[j] -= 1;
        }
    }

    Ok(())
}
