//! Restriction assembly
//!
//! Approximate ideal restriction (AIR) builds R row by row over the coarse
//! points so that R·A vanishes on each row's fine-point sparsity; see
//! [`air`].

pub mod air;

pub use air::{approx_ideal_restriction_pass1, approx_ideal_restriction_pass2};
