//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`], plus helpers that check shape and
//! value invariants of signal and result arrays.

use crate::error::IoError;

/// Largest number of per-element messages recorded by a single check.
const MAX_REPORTED: usize = 8;

// ---------------------------------------------------------------------------
// ValidationCollector
// ---------------------------------------------------------------------------

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
///
/// Create a collector, push zero or more error messages, then call
/// [`finish`](Self::finish) to obtain `Ok(())` when everything is valid or a
/// single `Err` that summarises every violation.
#[derive(Debug, Default)]
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Move every error of `other` into this collector.
    pub(crate) fn merge(&mut self, other: ValidationCollector) {
        self.errors.extend(other.errors);
    }

    /// Returns `true` when no errors have been recorded.
    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Standalone validation helpers
// ---------------------------------------------------------------------------

/// Check that `shape` has at least `min_rank` axes and the element count
/// matches `len`.
pub(crate) fn validate_shape(shape: &[usize], min_rank: usize, len: usize) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    if shape.len() < min_rank {
        c.push(format!(
            "rank {} is below the minimum of {min_rank}",
            shape.len()
        ));
    }

    let expected = shape.iter().product::<usize>();
    if expected != len {
        c.push(format!(
            "shape {shape:?} holds {expected} values, got {len}"
        ));
    }

    c
}

/// Check that every value is finite.
///
/// Records one message per offending index, up to a fixed cap, then a
/// summary of the remainder.
pub(crate) fn validate_finite(values: &[f64]) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    let bad: Vec<(usize, f64)> = values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| !v.is_finite())
        .collect();

    for &(i, v) in bad.iter().take(MAX_REPORTED) {
        c.push(format!("non-finite value at flat index {i}: {v}"));
    }
    if bad.len() > MAX_REPORTED {
        c.push(format!(
            "{} more non-finite values",
            bad.len() - MAX_REPORTED
        ));
    }

    c
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
