//! Accuracy against a known reference and trellis overlay data.
//!
//! Nothing here draws anything. [`Trellis`] describes which (time, state)
//! cells a renderer should highlight. Time runs along one axis and states
//! along the other. The reconstructed path is always shown; the reference
//! path is marked only where it disagrees.

use irminsul_core::{Scored, Summarizable};

/// Position-by-position comparison of a restored path with a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccuracyReport {
    /// Number of compared positions.
    pub total: usize,
    /// Positions where restored and reference agree.
    pub matches: usize,
    /// Positions where they differ.
    pub mismatches: usize,
    /// Indices of the differing positions, ascending.
    pub mismatch_positions: Vec<usize>,
}

impl AccuracyReport {
    /// Compare `restored` with `reference`.
    ///
    /// A reference longer than the restored path is truncated to its length.
    /// A shorter one cannot be aligned and yields `None`.
    pub fn compare<T: PartialEq>(restored: &[T], reference: &[T]) -> Option<Self> {
        if reference.len() < restored.len() {
            return None;
        }
        let reference = &reference[..restored.len()];
        let mismatch_positions: Vec<usize> = restored
            .iter()
            .zip(reference)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect();
        let total = restored.len();
        let mismatches = mismatch_positions.len();
        Some(Self {
            total,
            matches: total - mismatches,
            mismatches,
            mismatch_positions,
        })
    }

    /// Percentage of matching positions, 0 when nothing was compared.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.matches as f64 / self.total as f64 * 100.0
    }

    /// Whether every compared position matched.
    pub fn is_perfect(&self) -> bool {
        self.mismatches == 0
    }
}

impl Scored for AccuracyReport {
    fn score(&self) -> f64 {
        self.accuracy()
    }
}

impl Summarizable for AccuracyReport {
    fn summary(&self) -> String {
        format!(
            "Accuracy: {:.1}% ({}/{} correct, {} mismatches)",
            self.accuracy(),
            self.matches,
            self.total,
            self.mismatches
        )
    }
}

/// Highlight of one trellis cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellMark {
    /// Not on either path.
    Empty,
    /// On the reconstructed path.
    Reconstructed,
    /// On the reference path where it differs from the reconstruction.
    Reference,
}

/// Reconstructed and reference paths laid over the observation timeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trellis {
    /// Observed code at each time step (the x-axis ticks).
    pub observations: Vec<u8>,
    /// Decoded state index at each time step.
    pub reconstructed: Vec<usize>,
    /// Reference state index at each time step, if one of matching length was given.
    pub reference: Option<Vec<usize>>,
}

impl Trellis {
    /// Build an overlay. A reference whose length differs from the
    /// observation timeline is dropped.
    pub fn new(
        observations: Vec<u8>,
        reconstructed: Vec<usize>,
        reference: Option<Vec<usize>>,
    ) -> Self {
        let reference = reference.filter(|r| r.len() == observations.len());
        Self {
            observations,
            reconstructed,
            reference,
        }
    }

    /// Number of time steps.
    pub fn n_steps(&self) -> usize {
        self.observations.len()
    }

    /// Whether a reference path is present and disagrees somewhere.
    pub fn differs(&self) -> bool {
        self.reference
            .as_ref()
            .is_some_and(|r| r.iter().zip(&self.reconstructed).any(|(a, b)| a != b))
    }

    /// Mark for the cell at time `t`, state `s`.
    pub fn cell(&self, t: usize, s: usize) -> CellMark {
        let recon = self.reconstructed.get(t).copied();
        if recon == Some(s) {
            return CellMark::Reconstructed;
        }
        match self.reference.as_ref().and_then(|r| r.get(t)) {
            Some(&r) if r == s && recon != Some(r) => CellMark::Reference,
            _ => CellMark::Empty,
        }
    }

    /// Every cell as a `n_steps x n_states` table of marks.
    pub fn cells(&self, n_states: usize) -> Vec<Vec<CellMark>> {
        (0..self.n_steps())
            .map(|t| (0..n_states).map(|s| self.cell(t, s)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_counts_mismatches() {
        let report = AccuracyReport::compare(b"DEDEPDHCG", b"DEEEPAHHG").unwrap();
        assert_eq!(report.total, 9);
        assert_eq!(report.matches, 6);
        assert_eq!(report.mismatches, 3);
        assert_eq!(report.mismatch_positions, vec![2, 5, 7]);
        assert_eq!(report.summary(), "Accuracy: 66.7% (6/9 correct, 3 mismatches)");
        assert!(!report.is_perfect());
    }

    #[test]
    fn compare_truncates_long_reference() {
        let report = AccuracyReport::compare(&[1, 2], &[1, 2, 3, 4]).unwrap();
        assert_eq!(report.total, 2);
        assert!(report.is_perfect());
        assert_eq!(report.accuracy(), 100.0);
        assert_eq!(report.score(), 100.0);
    }

    #[test]
    fn compare_short_reference_is_none() {
        assert!(AccuracyReport::compare(&[1, 2, 3], &[1, 2]).is_none());
    }

    #[test]
    fn empty_comparison_has_zero_accuracy() {
        let report = AccuracyReport::compare::<u8>(&[], &[]).unwrap();
        assert_eq!(report.accuracy(), 0.0);
        assert!(report.is_perfect());
    }

    #[test]
    fn trellis_marks_cells() {
        let trellis = Trellis::new(b"AWB".to_vec(), vec![0, 1, 1], Some(vec![0, 2, 1]));
        assert!(trellis.differs());
        assert_eq!(trellis.cell(0, 0), CellMark::Reconstructed);
        assert_eq!(trellis.cell(1, 1), CellMark::Reconstructed);
        assert_eq!(trellis.cell(1, 2), CellMark::Reference);
        assert_eq!(trellis.cell(1, 0), CellMark::Empty);
        assert_eq!(trellis.cell(5, 0), CellMark::Empty);
        let cells = trellis.cells(3);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[2], vec![CellMark::Empty, CellMark::Reconstructed, CellMark::Empty]);
    }

    #[test]
    fn trellis_drops_misaligned_reference() {
        let trellis = Trellis::new(b"AB".to_vec(), vec![0, 1], Some(vec![0]));
        assert!(trellis.reference.is_none());
        assert!(!trellis.differs());
    }

    #[test]
    fn trellis_identical_reference_does_not_differ() {
        let trellis = Trellis::new(b"AB".to_vec(), vec![0, 1], Some(vec![0, 1]));
        assert!(!trellis.differs());
        assert!(trellis
            .cells(2)
            .iter()
            .flatten()
            .all(|&m| m != CellMark::Reference));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn matches_plus_mismatches_is_total(
            restored in proptest::collection::vec(0usize..4, 0..30),
            extra in proptest::collection::vec(0usize..4, 0..5),
            noise in proptest::collection::vec(0usize..4, 0..30),
        ) {
            let mut reference: Vec<usize> = restored
                .iter()
                .zip(noise.iter().chain(std::iter::repeat(&0)))
                .map(|(&r, &n)| if n == 0 { (r + 1) % 4 } else { r })
                .collect();
            reference.extend(extra);
            let report = AccuracyReport::compare(&restored, &reference).unwrap();
            prop_assert_eq!(report.matches + report.mismatches, report.total);
            prop_assert_eq!(report.total, restored.len());
            prop_assert!(report.accuracy() >= 0.0 && report.accuracy() <= 100.0);
        }
    }
}
