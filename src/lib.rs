//! # amgr
//!
//! **Classical Ruge-Stüben algebraic multigrid setup kernels for Rust.**
//!
//! amgr provides the sparse-matrix kernels at the heart of a classical AMG
//! setup phase: strength-of-connection filtering, coarse/fine splitting,
//! interpolation (prolongator) assembly, and approximate ideal restriction -
//! all operating directly on caller-owned CSR buffers.
//!
//! ## Pipeline
//!
//! ```text
//! A ──► SoC(S) ──► splitting(C/F) ──► interpolation P  (and/or AIR R)
//! ```
//!
//! ## Why amgr?
//!
//! - **Buffer-oriented**: kernels fill preallocated output slices; the core
//!   never owns your matrices. Predictable for callers that pin memory.
//! - **Deterministic**: every traversal and tie-break is specified, so two
//!   runs over the same buffers produce the same splitting and operators.
//! - **Generic**: kernels are parameterized over the CSR index type
//!   ([`element::IndexElement`]: `i32`, `i64`, `usize`) and the scalar type
//!   ([`element::ValueElement`]: `f32`, `f64`).
//! - **Injectable collaborators**: vertex coloring and dense least squares
//!   are trait seams with ready defaults, not hard links.
//!
//! ## Kernels
//!
//! - [`strength`]: classical strength-of-connection filter, per-row maxima
//! - [`splitting`]: Ruge-Stüben and CLJP C/F splitting, compatible-relaxation
//!   candidate promotion
//! - [`interpolation`]: direct and standard two-pass interpolation
//! - [`restriction`]: approximate ideal restriction (AIR)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use amgr::prelude::*;
//!
//! // A is CSR: (a_row_ptr, a_col_idx, a_values), n rows.
//! let mut s_row_ptr = vec![0i64; n + 1];
//! let mut s_col_idx = vec![0i64; a_col_idx.len() + n];
//! let mut s_values = vec![0.0f64; a_col_idx.len() + n];
//! let nnz_s = classical_strength_of_connection(
//!     n, 0.25, &a_row_ptr, &a_col_idx, &a_values,
//!     &mut s_row_ptr, &mut s_col_idx, &mut s_values,
//! )?;
//!
//! let mut sigma = vec![0i64; n];
//! rs_cf_splitting(n, &s_row_ptr, &s_col_idx, &t_row_ptr, &t_col_idx,
//!                 &influence, &mut sigma)?;
//! ```
//!
//! ## Scope
//!
//! Matrix construction, CSR transpose and normalization, Galerkin products,
//! smoothers, and the cycle driver are the caller's business. Kernels are
//! single-threaded; parallelize across independent problems, not inside one.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod csr;

pub mod diag;
pub mod element;
pub mod error;
pub mod graph;
pub mod interpolation;
pub mod linalg;
pub mod restriction;
pub mod splitting;
pub mod strength;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::diag::{Diagnostic, DiagnosticSink, StderrSink, VecSink};
    pub use crate::element::{IndexElement, ValueElement};
    pub use crate::error::{Error, Result};
    pub use crate::graph::{GreedyMisColoring, VertexColorer};
    pub use crate::interpolation::{
        direct_interpolation_pass1, direct_interpolation_pass2, standard_interpolation_pass1,
        standard_interpolation_pass2,
    };
    pub use crate::linalg::{LeastSquaresSolver, QrLstsq};
    pub use crate::restriction::{approx_ideal_restriction_pass1, approx_ideal_restriction_pass2};
    pub use crate::splitting::{
        cljp_splitting, cr_promote_candidates, rs_cf_splitting, C_NODE, F_NODE, PRE_F_NODE, U_NODE,
    };
    pub use crate::strength::{classical_strength_of_connection, maximum_row_value};
}
