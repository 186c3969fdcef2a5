//! Model parameters: state labels, transition and emission matrices.
//!
//! A [`ModelParams`] is validated once at construction and never mutated
//! afterwards, so a single instance can be shared by reference between any
//! number of concurrent decodes.

use std::collections::HashMap;

use irminsul_core::{validate_distribution, Grid, IrminsulError, LogProb, Result};

/// Validated parameters of a discrete first-order HMM.
///
/// Probabilities are kept as given, and log-space copies of both matrices
/// are precomputed for the decoder (`ln(0) = -inf`).
#[derive(Debug, Clone)]
pub struct ModelParams {
    /// Ordered state labels (length `n_states`).
    labels: Vec<String>,
    /// Label -> state index.
    index: HashMap<String, usize>,
    /// A[i][j] = P(state_j | state_i), `n_states x n_states`.
    transition: Grid<f64>,
    /// B[s][o] = P(symbol_o | state_s), `n_states x n_symbols`.
    emission: Grid<f64>,
    log_transition: Grid<f64>,
    log_emission: Grid<f64>,
}

impl ModelParams {
    /// Build a parameter set after validating shapes and probability rows.
    ///
    /// # Errors
    ///
    /// Returns [`IrminsulError::Validation`] if:
    /// - there are no states or no observation symbols
    /// - the transition matrix is not `N x N` or the emission matrix not `N x M`
    /// - any entry is negative or not finite
    /// - any row does not sum to 1.0 (tolerance 1e-6)
    /// - the number of labels differs from `N`, or a label is empty or repeated
    pub fn new<S: Into<String>>(
        transition: Vec<Vec<f64>>,
        emission: Vec<Vec<f64>>,
        labels: Vec<S>,
    ) -> Result<Self> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let transition = Grid::from_rows(transition, "transition")?;
        let emission = Grid::from_rows(emission, "emission")?;

        let n_states = transition.rows();
        if n_states == 0 {
            return Err(IrminsulError::Validation(
                "transition matrix has no states".into(),
            ));
        }
        if transition.cols() != n_states {
            return Err(IrminsulError::Validation(format!(
                "transition matrix is {}x{}, expected square",
                n_states,
                transition.cols()
            )));
        }
        if emission.rows() != n_states {
            return Err(IrminsulError::Validation(format!(
                "emission matrix has {} rows, expected n_states {}",
                emission.rows(),
                n_states
            )));
        }
        if emission.cols() == 0 {
            return Err(IrminsulError::Validation(
                "emission matrix has no observation symbols".into(),
            ));
        }
        if labels.len() != n_states {
            return Err(IrminsulError::Validation(format!(
                "{} labels given for {} states",
                labels.len(),
                n_states
            )));
        }

        for (i, row) in transition.iter_rows().enumerate() {
            validate_distribution(row, "transition", i)?;
        }
        for (i, row) in emission.iter_rows().enumerate() {
            validate_distribution(row, "emission", i)?;
        }

        let mut index = HashMap::with_capacity(n_states);
        for (i, label) in labels.iter().enumerate() {
            if label.is_empty() {
                return Err(IrminsulError::Validation(format!("label {i} is empty")));
            }
            if let Some(prev) = index.insert(label.clone(), i) {
                return Err(IrminsulError::Validation(format!(
                    "label {label:?} used for states {prev} and {i}"
                )));
            }
        }

        let log_transition = transition.map(|&p| LogProb::of(p).0);
        let log_emission = emission.map(|&p| LogProb::of(p).0);

        Ok(Self {
            labels,
            index,
            transition,
            emission,
            log_transition,
            log_emission,
        })
    }

    /// Number of hidden states (N).
    pub fn n_states(&self) -> usize {
        self.labels.len()
    }

    /// Number of observable symbols (M).
    pub fn n_symbols(&self) -> usize {
        self.emission.cols()
    }

    /// Ordered state labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of state `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Index of the state labelled `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// The transition matrix in probability space.
    pub fn transition(&self) -> &Grid<f64> {
        &self.transition
    }

    /// The emission matrix in probability space.
    pub fn emission(&self) -> &Grid<f64> {
        &self.emission
    }

    /// `ln(A[from][to])`.
    #[inline]
    pub(crate) fn log_transition(&self, from: usize, to: usize) -> f64 {
        self.log_transition[(from, to)]
    }

    /// `ln(B[state][symbol])`.
    #[inline]
    pub(crate) fn log_emission(&self, state: usize, symbol: usize) -> f64 {
        self.log_emission[(state, symbol)]
    }

    /// Check an observation sequence against this parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`IrminsulError::InvalidObservation`] if the sequence is empty
    /// or contains a symbol index `>= n_symbols`.
    pub fn validate_observations(&self, observations: &[usize]) -> Result<()> {
        if observations.is_empty() {
            return Err(IrminsulError::InvalidObservation(
                "observation sequence is empty".into(),
            ));
        }
        let m = self.n_symbols();
        if let Some((t, &o)) = observations.iter().enumerate().find(|&(_, &o)| o >= m) {
            return Err(IrminsulError::InvalidObservation(format!(
                "observation[{t}] = {o} out of range (n_symbols = {m})"
            )));
        }
        Ok(())
    }
}
