//! Dense linear-algebra collaborators
//!
//! The restriction assembly solves one small dense system per coarse point.
//! The solver is an injected capability ([`LeastSquaresSolver`]) so callers
//! can route the solves through LAPACK or a batched backend; [`QrLstsq`] is
//! the in-crate default.

pub mod lstsq;

pub use lstsq::{LeastSquaresSolver, QrLstsq};
