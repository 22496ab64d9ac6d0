//! Shared constants and helpers

pub mod constants;

pub use constants::*;
