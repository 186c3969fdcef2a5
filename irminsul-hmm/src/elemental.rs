//! The built-in elemental model.
//!
//! Seven hidden states, one per element: Pyro, Hydro, Electro, Cryo, Anemo,
//! Dendro, Geo (`PHECADG`). Observations use the same seven codes plus `W`,
//! the withered marker, which every element emits with probability 0.30.
//!
//! Transition rows favour elemental reactions (Pyro to Hydro/Dendro,
//! Anemo swirling into P/H/E/C, Geo crystallizing P/H/E/C). Emission rows
//! give each element a ~0.6 chance of being recorded faithfully.

use irminsul_core::Result;

use crate::alphabet::Alphabet;
use crate::params::ModelParams;

/// Hidden-state codes, in state-index order.
pub const ELEMENTS: &[u8; 7] = b"PHECADG";

/// Observation codes, in symbol-index order. The last one is [`WITHERED`].
pub const OBSERVATION_CODES: &[u8; 8] = b"PHECADGW";

/// The corrupted-record marker.
pub const WITHERED: u8 = b'W';

/// Element-to-element transition probabilities (rows: from, columns: to).
pub const BASE_MATRIX: [[f64; 7]; 7] = [
    [0.10, 0.25, 0.15, 0.05, 0.15, 0.25, 0.05], // Pyro: vaporize, burning, swirl
    [0.25, 0.10, 0.15, 0.10, 0.15, 0.25, 0.00], // Hydro: vaporize, bloom, swirl, freeze
    [0.15, 0.20, 0.10, 0.05, 0.15, 0.30, 0.05], // Electro: quicken, electro-charged, swirl
    [0.10, 0.25, 0.05, 0.15, 0.15, 0.03, 0.27], // Cryo: freeze, swirl, shatter
    [0.22, 0.22, 0.22, 0.22, 0.04, 0.04, 0.04], // Anemo: swirls P/H/E/C
    [0.25, 0.25, 0.30, 0.03, 0.02, 0.10, 0.05], // Dendro: sticks to P/H/E
    [0.20, 0.20, 0.20, 0.20, 0.02, 0.02, 0.16], // Geo: crystallizes P/H/E/C
];

/// Element-to-record emission probabilities (columns follow [`OBSERVATION_CODES`]).
pub const EMISSION_MATRIX: [[f64; 8]; 7] = [
    //  P     H     E     C     A     D     G     W
    [0.60, 0.02, 0.02, 0.01, 0.02, 0.01, 0.02, 0.30],
    [0.02, 0.60, 0.02, 0.02, 0.01, 0.02, 0.01, 0.30],
    [0.02, 0.02, 0.60, 0.02, 0.02, 0.01, 0.01, 0.30],
    [0.01, 0.02, 0.02, 0.60, 0.02, 0.01, 0.02, 0.30],
    [0.02, 0.02, 0.02, 0.02, 0.60, 0.01, 0.01, 0.30],
    [0.01, 0.01, 0.01, 0.01, 0.01, 0.65, 0.00, 0.30], // Dendro records more stably
    [0.02, 0.01, 0.01, 0.02, 0.01, 0.00, 0.63, 0.30],
];

/// Build the elemental [`ModelParams`].
///
/// # Errors
///
/// Never fails for the built-in constants; the `Result` comes from
/// [`ModelParams::new`] validation.
pub fn elemental_model() -> Result<ModelParams> {
    ModelParams::new(
        BASE_MATRIX.iter().map(|row| row.to_vec()).collect(),
        EMISSION_MATRIX.iter().map(|row| row.to_vec()).collect(),
        state_alphabet()?.labels(),
    )
}

/// Alphabet of observation codes, `PHECADGW`.
pub fn observation_alphabet() -> Result<Alphabet> {
    Alphabet::new(OBSERVATION_CODES)
}

/// Alphabet of state codes, `PHECADG`.
pub fn state_alphabet() -> Result<Alphabet> {
    Alphabet::new(ELEMENTS)
}
