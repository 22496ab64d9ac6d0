//! Derived quantities of a double-well trajectory

pub mod energy;
pub mod spectrum;

pub use energy::{energies, starting_state, EnergySeries};
pub use spectrum::{compute_spectrum, fourier_magnitudes, Spectrum};
