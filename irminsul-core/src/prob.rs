//! Log-space probabilities and probability-distribution validation.
//!
//! [`LogProb`] represents probabilities as natural logarithms. Zero maps to
//! negative infinity without any error signalling: a zero matrix entry is an
//! expected event (an unreachable state or an impossible emission), not an
//! exceptional one.

use crate::{IrminsulError, Result};

/// Allowed deviation of a probability row's sum from 1.0.
pub const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// Natural-log probability score.
///
/// Scores of valid probabilities lie in `[-inf, 0]`; `-inf` is an ordinary
/// value meaning the event cannot happen.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogProb(pub f64);

impl LogProb {
    /// Take the logarithm of an already-validated probability.
    ///
    /// `p == 0.0` yields [`LogProb::impossible`] instead of an error.
    pub fn of(p: f64) -> Self {
        if p == 0.0 {
            Self::impossible()
        } else {
            Self(p.ln())
        }
    }

    /// Log of the uniform probability `1/n` over `n` outcomes.
    ///
    /// `n == 0` has no outcomes and yields [`LogProb::impossible`].
    pub fn uniform(n: usize) -> Self {
        if n == 0 {
            return Self::impossible();
        }
        Self((1.0 / n as f64).ln())
    }

    /// Joint score of two independent events.
    pub fn ln_mul(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }

    /// Whether this is the impossible event `ln(0)`.
    pub fn is_impossible(self) -> bool {
        self.0 == f64::NEG_INFINITY
    }

    /// `ln(0)`.
    pub const fn impossible() -> Self {
        Self(f64::NEG_INFINITY)
    }
}

/// Validate that `row` is a discrete probability distribution.
///
/// Every entry must be finite and non-negative, and the entries must sum to
/// 1.0 within [`ROW_SUM_TOLERANCE`]. `what` names the matrix in the error
/// message (e.g. `"transition"`), `index` the offending row.
///
/// # Errors
///
/// Returns [`IrminsulError::Validation`] describing the first violation.
pub fn validate_distribution(row: &[f64], what: &str, index: usize) -> Result<()> {
    for (j, &p) in row.iter().enumerate() {
        if !p.is_finite() {
            return Err(IrminsulError::Validation(format!(
                "{what} row {index} entry {j} is not finite ({p})"
            )));
        }
        if p < 0.0 {
            return Err(IrminsulError::Validation(format!(
                "{what} row {index} entry {j} is negative ({p})"
            )));
        }
    }
    let sum: f64 = row.iter().sum();
    if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
        return Err(IrminsulError::Validation(format!(
            "{what} row {index} sums to {sum}, expected ~1.0"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn of_takes_natural_log() {
        assert!((LogProb::of(0.25).0 - 0.25_f64.ln()).abs() < EPS);
        assert_eq!(LogProb::of(1.0).0, 0.0);
    }

    #[test]
    fn of_zero_is_impossible_not_an_error() {
        let lp = LogProb::of(0.0);
        assert!(lp.is_impossible());
        assert_eq!(lp, LogProb::impossible());
    }

    #[test]
    fn uniform_matches_reciprocal_log() {
        assert_eq!(LogProb::uniform(7).0, (1.0_f64 / 7.0).ln());
        assert_eq!(LogProb::uniform(1).0, 0.0);
        assert!(LogProb::uniform(0).is_impossible());
    }

    #[test]
    fn ln_mul_with_impossible_stays_impossible() {
        let half = LogProb::of(0.5);
        assert!(half.ln_mul(LogProb::impossible()).is_impossible());
        assert!(LogProb::impossible().ln_mul(LogProb::impossible()).is_impossible());
        assert!((half.ln_mul(half).0 - 0.25_f64.ln()).abs() < EPS);
    }

    #[test]
    fn distribution_accepts_stochastic_row_with_zeros() {
        assert!(validate_distribution(&[0.25, 0.0, 0.75], "emission", 0).is_ok());
        assert!(validate_distribution(&[1.0], "transition", 3).is_ok());
    }

    #[test]
    fn distribution_rejects_bad_sum() {
        let err = validate_distribution(&[0.3, 0.3], "transition", 2).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("transition row 2"));
    }

    #[test]
    fn distribution_rejects_negative_entry() {
        let err = validate_distribution(&[1.5, -0.5], "emission", 1).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn distribution_rejects_non_finite_entry() {
        assert!(validate_distribution(&[f64::NAN, 1.0], "emission", 0).is_err());
        assert!(validate_distribution(&[f64::INFINITY], "emission", 0).is_err());
    }

    #[test]
    fn distribution_tolerance_is_inclusive_of_rounding() {
        // 0.1 * 10 does not sum to exactly 1.0 in binary floating point.
        assert!(validate_distribution(&[0.1; 10], "transition", 0).is_ok());
        assert!(validate_distribution(&[0.5, 0.5 + 1e-5], "transition", 0).is_err());
    }
}
