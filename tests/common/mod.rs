//! Shared CSR helpers for the integration suite
//!
//! Matrix construction, transpose, and dense products are the caller's
//! business in the library proper; the tests need small versions of them.

#![allow(dead_code)]

/// CSR transpose via counting sort. Returns `(row_ptr, col_idx, values)` of
/// the n_cols-by-n_rows transpose.
pub fn csr_transpose(
    n_rows: usize,
    n_cols: usize,
    row_ptr: &[i64],
    col_idx: &[i64],
    values: &[f64],
) -> (Vec<i64>, Vec<i64>, Vec<f64>) {
    let nnz = row_ptr[n_rows] as usize;
    let mut t_row_ptr = vec![0i64; n_cols + 1];
    for &j in &col_idx[..nnz] {
        t_row_ptr[j as usize + 1] += 1;
    }
    for j in 0..n_cols {
        t_row_ptr[j + 1] += t_row_ptr[j];
    }

    let mut t_col_idx = vec![0i64; nnz];
    let mut t_values = vec![0.0f64; nnz];
    let mut next = t_row_ptr.clone();
    for i in 0..n_rows {
        for idx in row_ptr[i] as usize..row_ptr[i + 1] as usize {
            let j = col_idx[idx] as usize;
            let pos = next[j] as usize;
            t_col_idx[pos] = i as i64;
            t_values[pos] = values[idx];
            next[j] += 1;
        }
    }
    (t_row_ptr, t_col_idx, t_values)
}

/// Expand a CSR matrix into a dense row-major buffer.
pub fn dense_from_csr(
    n_rows: usize,
    n_cols: usize,
    row_ptr: &[i64],
    col_idx: &[i64],
    values: &[f64],
) -> Vec<f64> {
    let mut dense = vec![0.0f64; n_rows * n_cols];
    for i in 0..n_rows {
        for idx in row_ptr[i] as usize..row_ptr[i + 1] as usize {
            dense[i * n_cols + col_idx[idx] as usize] += values[idx];
        }
    }
    dense
}

/// Dense row-major product of an m-by-k and a k-by-n matrix.
pub fn dense_matmul(m: usize, k: usize, n: usize, a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut c = vec![0.0f64; m * n];
    for i in 0..m {
        for l in 0..k {
            let a_il = a[i * k + l];
            if a_il == 0.0 {
                continue;
            }
            for j in 0..n {
                c[i * n + j] += a_il * b[l * n + j];
            }
        }
    }
    c
}

/// 1D Laplacian stencil tridiag(-1, 2, -1) on n points.
pub fn laplacian_1d(n: usize) -> (Vec<i64>, Vec<i64>, Vec<f64>) {
    let mut row_ptr = vec![0i64; n + 1];
    let mut col_idx = Vec::new();
    let mut values = Vec::new();
    for i in 0..n {
        if i > 0 {
            col_idx.push((i - 1) as i64);
            values.push(-1.0);
        }
        col_idx.push(i as i64);
        values.push(2.0);
        if i + 1 < n {
            col_idx.push((i + 1) as i64);
            values.push(-1.0);
        }
        row_ptr[i + 1] = col_idx.len() as i64;
    }
    (row_ptr, col_idx, values)
}
