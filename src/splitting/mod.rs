//! Coarse/fine splitting kernels
//!
//! A splitting assigns every node of the strength graph to the coarse (C) or
//! fine (F) set. Two algorithms are provided: the sequential Ruge-Stüben
//! method with bucketed priorities ([`rs_cf_splitting`]) and the
//! CLJP independent-set method ([`cljp_splitting`]). A compatible-relaxation
//! helper ([`cr_promote_candidates`]) promotes poorly relaxed F-points to
//! the coarse set between relaxation sweeps.
//!
//! Splitting arrays store node classes as plain integers of the CSR index
//! type, using the constants below. `U_NODE` and `PRE_F_NODE` are transient
//! states; after a splitting kernel returns, every entry is `F_NODE` or
//! `C_NODE`.

pub mod cljp;
pub mod cr;
pub mod rs;

pub use cljp::cljp_splitting;
pub use cr::cr_promote_candidates;
pub use rs::rs_cf_splitting;

/// Fine node
pub const F_NODE: usize = 0;
/// Coarse node
pub const C_NODE: usize = 1;
/// Unassigned node (transient during splitting)
pub const U_NODE: usize = 2;
/// Tentative fine node during Ruge-Stüben update propagation
pub const PRE_F_NODE: usize = 3;

/// Adapters for the compatible-relaxation boundary encoding
///
/// [`cr_promote_candidates`] predates the node-class constants and codes
/// its splitting buffer with bare 0/1: the 0-marked nodes form the
/// candidate (F) block of the rebuilt index array and promotion writes 1.
/// Its inherited interface documentation labels the values the other way
/// around; the behavior is what these helpers pin down, so callers never
/// have to reinterpret the constants themselves.
pub mod cf_adapters {
    use super::{C_NODE, F_NODE};
    use crate::element::IndexElement;

    /// Rewrite node classes into the compatible-relaxation boundary
    /// encoding: [`C_NODE`] becomes 1 (kept coarse), everything else 0
    /// (candidate pool).
    pub fn to_cr_encoding<I: IndexElement>(splitting: &mut [I]) {
        for s in splitting.iter_mut() {
            let v = if s.to_index() == C_NODE { 1 } else { 0 };
            *s = I::from_index(v);
        }
    }

    /// Inverse of [`to_cr_encoding`]: 0 becomes [`F_NODE`], anything else
    /// [`C_NODE`].
    pub fn from_cr_encoding<I: IndexElement>(splitting: &mut [I]) {
        for s in splitting.iter_mut() {
            let v = if s.to_index() == 0 { F_NODE } else { C_NODE };
            *s = I::from_index(v);
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::splitting::U_NODE;

        #[test]
        fn encoding_roundtrips_and_normalizes() {
            let mut sigma = vec![F_NODE as i64, C_NODE as i64, U_NODE as i64, F_NODE as i64];
            to_cr_encoding(&mut sigma);
            assert_eq!(sigma, vec![0, 1, 0, 0]);
            from_cr_encoding(&mut sigma);
            assert_eq!(
                sigma,
                vec![F_NODE as i64, C_NODE as i64, F_NODE as i64, F_NODE as i64]
            );
        }
    }
}
