//! End-to-end restoration of a withered code record.
//!
//! A [`Restorer`] ties a [`ModelParams`] to the alphabets that translate
//! between code strings and indices. [`Restorer::restore`] cleans the raw
//! input, decodes it, and reports accuracy against an optional pure record.

use irminsul_core::{IrminsulError, Result, Summarizable};

use crate::alphabet::Alphabet;
use crate::elemental::{elemental_model, observation_alphabet, state_alphabet};
use crate::params::ModelParams;
use crate::report::{AccuracyReport, Trellis};
use crate::viterbi::{DecodeResult, LatticeMode};

/// Default cap on the number of codes read from each input record.
pub const DEFAULT_MAX_LEN: usize = 16;

/// Options for [`Restorer::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestoreConfig {
    /// Keep at most this many valid codes of each input; `None` keeps all.
    pub max_len: Option<usize>,
    /// Whether to return the decoding lattice.
    pub lattice: LatticeMode,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            max_len: Some(DEFAULT_MAX_LEN),
            lattice: LatticeMode::Discard,
        }
    }
}

/// Outcome of restoring one record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Restoration {
    /// The withered record after cleaning.
    pub withered: String,
    /// The pure reference record after cleaning, if one was given.
    pub pure: Option<String>,
    /// The restored record.
    pub restored: String,
    /// Full decoder output.
    pub decoded: DecodeResult,
    /// Comparison with the pure record, when it is at least as long.
    pub accuracy: Option<AccuracyReport>,
    /// Overlay data for a trellis renderer.
    pub trellis: Trellis,
}

impl Summarizable for Restoration {
    fn summary(&self) -> String {
        match &self.accuracy {
            Some(acc) => format!("{} -> {} ({})", self.withered, self.restored, acc.summary()),
            None => format!("{} -> {}", self.withered, self.restored),
        }
    }
}

/// Model parameters bundled with their code alphabets.
#[derive(Debug, Clone)]
pub struct Restorer {
    params: ModelParams,
    observations: Alphabet,
    states: Alphabet,
}

impl Restorer {
    /// Bundle `params` with the alphabets for observations and states.
    ///
    /// # Errors
    ///
    /// Returns [`IrminsulError::Validation`] if the observation alphabet size
    /// differs from `params.n_symbols()`, or the state alphabet does not
    /// spell out `params.labels()` in order.
    pub fn new(params: ModelParams, observations: Alphabet, states: Alphabet) -> Result<Self> {
        if observations.len() != params.n_symbols() {
            return Err(IrminsulError::Validation(format!(
                "observation alphabet has {} codes, model has {} symbols",
                observations.len(),
                params.n_symbols()
            )));
        }
        if states.labels() != params.labels() {
            return Err(IrminsulError::Validation(format!(
                "state alphabet {:?} does not match model labels {:?}",
                String::from_utf8_lossy(states.codes()),
                params.labels()
            )));
        }
        Ok(Self {
            params,
            observations,
            states,
        })
    }

    /// The built-in elemental restorer.
    pub fn elemental() -> Result<Self> {
        Self::new(elemental_model()?, observation_alphabet()?, state_alphabet()?)
    }

    /// The model parameters.
    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// The observation alphabet.
    pub fn observations(&self) -> &Alphabet {
        &self.observations
    }

    /// The state alphabet.
    pub fn states(&self) -> &Alphabet {
        &self.states
    }

    /// Restore `withered`, optionally scoring the result against `pure`.
    ///
    /// Both inputs are uppercased, stripped of unknown characters and
    /// truncated to `config.max_len`. The pure record may only use state
    /// codes; the withered one may also use corrupted markers.
    ///
    /// # Errors
    ///
    /// Returns [`IrminsulError::InvalidObservation`] if no valid code remains
    /// in `withered` after cleaning.
    pub fn restore(
        &self,
        withered: &str,
        pure: Option<&str>,
        config: &RestoreConfig,
    ) -> Result<Restoration> {
        let withered = self.observations.sanitize(withered, config.max_len);
        if withered.is_empty() {
            return Err(IrminsulError::InvalidObservation(format!(
                "withered record has no valid codes (expected any of {})",
                String::from_utf8_lossy(self.observations.codes())
            )));
        }
        let pure = pure
            .map(|p| self.states.sanitize(p, config.max_len))
            .filter(|p| !p.is_empty());

        let obs = self.observations.encode(&withered)?;
        let decoded = self.params.decode(&obs, config.lattice)?;
        let restored = decoded.joined();

        let (accuracy, reference) = match &pure {
            Some(p) => {
                let mut reference = self.states.encode(p)?;
                let accuracy = AccuracyReport::compare(&decoded.path, &reference);
                reference.truncate(decoded.len());
                (accuracy.clone(), accuracy.map(|_| reference))
            }
            None => (None, None),
        };

        let trellis = Trellis::new(withered.as_bytes().to_vec(), decoded.path.clone(), reference);

        tracing::debug!(
            withered = %withered,
            restored = %restored,
            mismatches = accuracy.as_ref().map(|a| a.mismatches),
            "restored record"
        );

        Ok(Restoration {
            withered,
            pure,
            restored,
            decoded,
            accuracy,
            trellis,
        })
    }
}
