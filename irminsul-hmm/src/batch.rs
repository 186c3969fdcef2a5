//! Decoding many independent sequences against one parameter set.
//!
//! Each sequence gets its own lattice; the parameters are only read. With
//! the `parallel` feature the sequences are spread over the rayon pool.

use irminsul_core::{IrminsulError, Result};

use crate::params::ModelParams;
use crate::viterbi::{decode, DecodeResult, LatticeMode};

fn decode_indexed(
    params: &ModelParams,
    i: usize,
    observations: &[usize],
    mode: LatticeMode,
) -> Result<DecodeResult> {
    decode(params, observations, mode).map_err(|e| match e {
        IrminsulError::InvalidObservation(msg) => {
            IrminsulError::InvalidObservation(format!("sequence {i}: {msg}"))
        }
        other => other,
    })
}

/// Decode every sequence in `sequences`, returning results in input order.
///
/// # Errors
///
/// Returns the error of an invalid sequence with its index prefixed to the
/// message. Without `parallel` this is always the lowest failing index.
pub fn decode_batch(
    params: &ModelParams,
    sequences: &[&[usize]],
    mode: LatticeMode,
) -> Result<Vec<DecodeResult>> {
    tracing::debug!(sequences = sequences.len(), "batch decode");
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        sequences
            .par_iter()
            .enumerate()
            .map(|(i, obs)| decode_indexed(params, i, obs, mode))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    sequences
        .iter()
        .enumerate()
        .map(|(i, obs)| decode_indexed(params, i, obs, mode))
        .collect()
}
