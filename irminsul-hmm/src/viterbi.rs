//! Viterbi decoding of the most probable hidden-state path.
//!
//! All scores are natural-log probabilities. A zero probability becomes
//! `-inf` and simply never wins a comparison; a column where every state
//! is `-inf` resolves to state 0.
//!
//! # Initial-state prior
//!
//! The decoder assumes a uniform prior `1/N` over the starting state. This
//! is fixed, not a parameter: when the true distribution of starting states
//! is far from uniform, decoded accuracy near the start of a sequence is
//! biased accordingly.
//!
//! # Tie-breaking
//!
//! Every maximisation (best predecessor, best final state) keeps the first
//! maximal candidate in index order, so ties always go to the lowest state
//! index and decoding is fully deterministic.

use irminsul_core::{Grid, LogProb, Result, Scored};

use crate::params::ModelParams;

/// Whether a decode keeps its score lattice for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LatticeMode {
    /// Return only the decoded path.
    #[default]
    Discard,
    /// Also return the score and backpointer tables.
    Keep,
}

/// The dynamic-programming tables built by one decode.
///
/// Rows are time steps and columns are states. Scores of `-inf` mark
/// unreachable cells; `serde_json` renders those as `null`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lattice {
    /// `scores[(t, s)]`: best log-probability of any path ending in `s` at `t`.
    pub scores: Grid<f64>,
    /// `backpointers[(t, s)]`: predecessor of `s` on that best path. Row 0
    /// has no predecessors and is all zeros.
    pub backpointers: Grid<usize>,
    /// The argmax state chosen at each time step during backtracking.
    pub best_states: Vec<usize>,
}

impl Lattice {
    /// Number of time steps (T).
    pub fn n_steps(&self) -> usize {
        self.scores.rows()
    }

    /// Number of states (N).
    pub fn n_states(&self) -> usize {
        self.scores.cols()
    }

    /// Best score of state `s` at time `t`.
    pub fn score(&self, t: usize, s: usize) -> Option<f64> {
        self.scores.get(t, s).copied()
    }

    /// Predecessor of state `s` at time `t`.
    pub fn backpointer(&self, t: usize, s: usize) -> Option<usize> {
        self.backpointers.get(t, s).copied()
    }
}

/// Output of [`decode`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeResult {
    /// State index at each time step.
    pub path: Vec<usize>,
    /// State label at each time step.
    pub labels: Vec<String>,
    /// Log-probability of the decoded path (`-inf` if every path is impossible).
    pub log_probability: f64,
    /// Score and backpointer tables, present only for [`LatticeMode::Keep`].
    pub lattice: Option<Lattice>,
}

impl DecodeResult {
    /// Number of decoded time steps.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the decoded path is empty.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The decoded labels concatenated, e.g. `"DEDEPDHCG"`.
    pub fn joined(&self) -> String {
        self.labels.concat()
    }

    /// Whether every path through the model was impossible.
    pub fn is_impossible(&self) -> bool {
        LogProb(self.log_probability).is_impossible()
    }
}

impl Scored for DecodeResult {
    fn score(&self) -> f64 {
        self.log_probability
    }
}

/// First maximal element of `values` in index order, as `(index, value)`.
///
/// An empty or all-`-inf` sequence yields `(0, -inf)`.
fn argmax_first(values: impl Iterator<Item = f64>) -> (usize, f64) {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, v) in values.enumerate() {
        if v > best.1 {
            best = (i, v);
        }
    }
    best
}

/// Find the most probable state path that explains `observations`.
///
/// Runs in `O(T * N^2)` time and `O(T * N)` space. The score lattice is
/// returned alongside the path when `mode` is [`LatticeMode::Keep`].
///
/// # Errors
///
/// Returns [`IrminsulError::InvalidObservation`](irminsul_core::IrminsulError::InvalidObservation)
/// if `observations` is empty or contains an index `>= params.n_symbols()`.
/// Nothing is computed for invalid input.
pub fn decode(
    params: &ModelParams,
    observations: &[usize],
    mode: LatticeMode,
) -> Result<DecodeResult> {
    params.validate_observations(observations)?;

    let n = params.n_states();
    let t_len = observations.len();
    let _span = tracing::debug_span!("viterbi", steps = t_len, states = n).entered();

    let mut scores = Grid::new(t_len, n, f64::NEG_INFINITY);
    let mut backpointers = Grid::new(t_len, n, 0usize);

    // Initialization: uniform prior over the starting state.
    let prior = LogProb::uniform(n).0;
    let o0 = observations[0];
    for s in 0..n {
        scores[(0, s)] = prior + params.log_emission(s, o0);
    }

    // Recursion
    for t in 1..t_len {
        let ot = observations[t];
        for s in 0..n {
            let emit = params.log_emission(s, ot);
            let prev = scores.row(t - 1);
            let (best_prev, best_val) = argmax_first(
                prev.iter()
                    .enumerate()
                    .map(|(p, &score)| score + params.log_transition(p, s) + emit),
            );
            scores[(t, s)] = best_val;
            backpointers[(t, s)] = best_prev;
        }
    }

    // Termination
    let (best_final, best_score) = argmax_first(scores.row(t_len - 1).iter().copied());

    // Backtrack
    let mut path = vec![0usize; t_len];
    path[t_len - 1] = best_final;
    for t in (0..t_len - 1).rev() {
        path[t] = backpointers[(t + 1, path[t + 1])];
    }

    if best_score == f64::NEG_INFINITY {
        tracing::debug!("no path has non-zero probability; ties resolved to lowest state index");
    }
    tracing::debug!(log_probability = best_score, final_state = best_final, "decoded");

    let labels = path
        .iter()
        .map(|&s| params.labels()[s].clone())
        .collect();

    let lattice = match mode {
        LatticeMode::Discard => None,
        LatticeMode::Keep => Some(Lattice {
            scores,
            backpointers,
            best_states: path.clone(),
        }),
    };

    Ok(DecodeResult {
        path,
        labels,
        log_probability: best_score,
        lattice,
    })
}

impl ModelParams {
    /// Decode `observations` against these parameters.
    ///
    /// Convenience wrapper around [`decode`].
    pub fn decode(&self, observations: &[usize], mode: LatticeMode) -> Result<DecodeResult> {
        decode(self, observations, mode)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// A random row-stochastic matrix with strictly positive weights.
    fn stochastic(rows: usize, cols: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
        proptest::collection::vec(proptest::collection::vec(0.01f64..1.0, cols), rows).prop_map(
            |rows| {
                rows.into_iter()
                    .map(|row| {
                        let sum: f64 = row.iter().sum();
                        row.into_iter().map(|w| w / sum).collect()
                    })
                    .collect()
            },
        )
    }

    fn model_and_obs() -> impl Strategy<Value = (ModelParams, Vec<usize>)> {
        (1usize..6, 1usize..8)
            .prop_flat_map(|(n, extra)| {
                let m = n + extra - 1;
                (
                    stochastic(n, n),
                    stochastic(n, m),
                    proptest::collection::vec(0..m, 1..40),
                )
            })
            .prop_map(|(transition, emission, obs)| {
                let labels: Vec<String> = (0..transition.len()).map(|i| format!("s{i}")).collect();
                let params = ModelParams::new(transition, emission, labels).unwrap();
                (params, obs)
            })
    }

    proptest! {
        #[test]
        fn path_has_one_valid_state_per_observation((params, obs) in model_and_obs()) {
            let result = params.decode(&obs, LatticeMode::Discard).unwrap();
            prop_assert_eq!(result.len(), obs.len());
            prop_assert!(result.path.iter().all(|&s| s < params.n_states()));
            prop_assert!(result.log_probability.is_finite());
        }

        #[test]
        fn decoding_is_deterministic((params, obs) in model_and_obs()) {
            let a = params.decode(&obs, LatticeMode::Keep).unwrap();
            let b = params.decode(&obs, LatticeMode::Keep).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn backpointers_trace_the_path((params, obs) in model_and_obs()) {
            let result = params.decode(&obs, LatticeMode::Keep).unwrap();
            let lattice = result.lattice.as_ref().unwrap();
            for t in 1..obs.len() {
                prop_assert_eq!(lattice.backpointers[(t, result.path[t])], result.path[t - 1]);
            }
        }

        #[test]
        fn uniform_parameters_decode_to_zeros(
            n in 1usize..6,
            m in 1usize..6,
            obs in proptest::collection::vec(0usize..100, 1..30),
        ) {
            let labels: Vec<String> = (0..n).map(|i| format!("s{i}")).collect();
            let params = ModelParams::new(
                vec![vec![1.0 / n as f64; n]; n],
                vec![vec![1.0 / m as f64; m]; n],
                labels,
            ).unwrap();
            let obs: Vec<usize> = obs.into_iter().map(|o| o % m).collect();
            let result = params.decode(&obs, LatticeMode::Discard).unwrap();
            prop_assert_eq!(result.path, vec![0; obs.len()]);
        }

        #[test]
        fn most_likely_emissions_round_trip(
            path in proptest::collection::vec(0usize..4, 1..40),
        ) {
            // Uniform transitions and a strongly diagonal emission matrix:
            // emitting each state's favourite symbol must decode back exactly.
            let n = 4;
            let emission: Vec<Vec<f64>> = (0..n)
                .map(|s| {
                    let mut row = vec![0.01; n + 1];
                    row[s] = 0.96;
                    row
                })
                .collect();
            let labels: Vec<String> = (0..n).map(|i| format!("s{i}")).collect();
            let params = ModelParams::new(vec![vec![0.25; n]; n], emission, labels).unwrap();
            let obs: Vec<usize> = path
                .iter()
                .map(|&s| {
                    let row = params.emission().row(s);
                    argmax_first(row.iter().copied()).0
                })
                .collect();
            let result = params.decode(&obs, LatticeMode::Discard).unwrap();
            prop_assert_eq!(result.path, path);
        }
    }
}
