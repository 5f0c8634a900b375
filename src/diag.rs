//! Diagnostic events and the injected sink they flow through
//!
//! Numerical degeneracies in the setup kernels are not errors: a kernel
//! reports an event and keeps going, and the affected entries may come out
//! non-finite. Callers decide the policy - abort, repair, or ignore - after
//! the kernel returns. The default sink writes one line per event to
//! standard error.

use std::fmt;

/// A numerical or structural condition worth surfacing to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// Standard interpolation: a strongly connected fine neighbor of `row`
    /// has no same-signed coupling to any of `row`'s strong coarse
    /// neighbors, so its inner denominator is zero.
    FineNeighborWithoutCoarseConnection {
        /// Fine-grid row being interpolated
        row: usize,
        /// The offending fine neighbor
        neighbor: usize,
    },

    /// Standard interpolation: the inner denominator for a fine neighbor of
    /// `row` summed to zero even though couplings were accumulated.
    InnerDenominatorCancellation {
        /// Fine-grid row being interpolated
        row: usize,
        /// The offending fine neighbor
        neighbor: usize,
    },

    /// Standard interpolation: the diagonal plus the sum of weak couplings
    /// of `row` is zero.
    ZeroRowDenominator {
        /// Fine-grid row being interpolated
        row: usize,
    },

    /// Restriction assembly: the neighborhood written for a coarse row does
    /// not match the count recorded in its row pointer.
    RestrictionRowMismatch {
        /// Fine-grid index of the coarse point
        row: usize,
        /// Entry count the row pointer promises (excluding the identity)
        expected: usize,
        /// Entry count actually written
        written: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Diagnostic::FineNeighborWithoutCoarseConnection { row, neighbor } => write!(
                f,
                "row {row}: strongly connected fine point {neighbor} has no \
                 connections to the coarse interpolation set"
            ),
            Diagnostic::InnerDenominatorCancellation { row, neighbor } => write!(
                f,
                "row {row}: inner denominator for fine point {neighbor} was \
                 zero due to cancellation"
            ),
            Diagnostic::ZeroRowDenominator { row } => write!(
                f,
                "row {row}: diagonal plus sum of weak connections was zero"
            ),
            Diagnostic::RestrictionRowMismatch {
                row,
                expected,
                written,
            } => write!(
                f,
                "coarse point {row}: row pointer does not agree with \
                 neighborhood size (expected {expected}, wrote {written})"
            ),
        }
    }
}

/// Where kernels deliver [`Diagnostic`] events
pub trait DiagnosticSink {
    /// Deliver one event. Called at the point the condition is detected.
    fn report(&mut self, event: Diagnostic);
}

/// Default sink: one line per event on standard error
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&mut self, event: Diagnostic) {
        eprintln!("{event}");
    }
}

/// Sink that collects events in memory
///
/// Useful when the caller wants to decide policy after the kernel returns,
/// and in tests.
#[derive(Debug, Default)]
pub struct VecSink {
    /// Events in the order they were reported
    pub events: Vec<Diagnostic>,
}

impl DiagnosticSink for VecSink {
    fn report(&mut self, event: Diagnostic) {
        self.events.push(event);
    }
}
