//! Restoration of corrupted symbol sequences with discrete Hidden Markov Models.
//!
//! Given a state-transition matrix, a state-to-observation emission matrix
//! and a sequence of observations (which may contain a dedicated
//! "corrupted" symbol), the Viterbi decoder recovers the single most
//! probable hidden-state sequence. All scoring happens in natural-log space.
//!
//! - **Parameters**: [`ModelParams`], validated once and immutable
//! - **Decoding**: [`decode`] / [`ModelParams::decode`], optionally keeping
//!   the score [`Lattice`]
//! - **Batches**: [`decode_batch`] (rayon-parallel with the `parallel` feature)
//! - **Codes**: [`Alphabet`] maps code strings to indices and cleans raw input
//! - **Reporting**: [`AccuracyReport`] and [`Trellis`] overlay data
//! - **Elemental model**: the built-in `PHECADG` / `W` model and [`Restorer`]
//!
//! # Quick start
//!
//! ```
//! use irminsul_hmm::{ModelParams, LatticeMode};
//!
//! // 2-state fair/loaded coin; symbols: heads, tails
//! let transition = vec![
//!     vec![0.9, 0.1], // fair   -> fair, loaded
//!     vec![0.2, 0.8], // loaded -> fair, loaded
//! ];
//! let emission = vec![
//!     vec![0.5, 0.5], // fair:   P(H), P(T)
//!     vec![0.8, 0.2], // loaded: P(H), P(T)
//! ];
//! let model = ModelParams::new(transition, emission, vec!["F", "L"]).unwrap();
//!
//! let result = model.decode(&[0, 0, 1, 0, 0], LatticeMode::Discard).unwrap();
//! assert_eq!(result.path.len(), 5);
//! assert!(result.lattice.is_none());
//! ```
//!
//! Restoring a withered elemental record:
//!
//! ```
//! use irminsul_hmm::{Restorer, RestoreConfig};
//!
//! let restorer = Restorer::elemental().unwrap();
//! let r = restorer
//!     .restore("DEWEPWHWG", Some("DEEEPAHHG"), &RestoreConfig::default())
//!     .unwrap();
//! assert_eq!(r.restored, "DEDEPDHCG");
//! assert_eq!(r.accuracy.unwrap().matches, 6);
//! ```

pub mod alphabet;
pub mod batch;
pub mod elemental;
pub mod params;
pub mod report;
pub mod restore;
pub mod viterbi;

pub use alphabet::Alphabet;
pub use batch::decode_batch;
pub use elemental::{
    elemental_model, observation_alphabet, state_alphabet, BASE_MATRIX, ELEMENTS,
    EMISSION_MATRIX, OBSERVATION_CODES, WITHERED,
};
pub use params::ModelParams;
pub use report::{AccuracyReport, CellMark, Trellis};
pub use restore::{Restoration, RestoreConfig, Restorer, DEFAULT_MAX_LEN};
pub use viterbi::{decode, DecodeResult, Lattice, LatticeMode};

pub use irminsul_core::{IrminsulError, Result};
