//! Graph utilities consumed by the splitting kernels
//!
//! The CLJP splitting can seed its tie-breaking weights from a vertex
//! coloring of the strength graph. The colorer is an injected capability
//! ([`VertexColorer`]) rather than a hard dependency; [`GreedyMisColoring`]
//! is the in-crate default.

pub mod coloring;

pub use coloring::{GreedyMisColoring, VertexColorer};
