//! Fourier spectrum of a position time series

use num_complex::Complex64;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{SimError, SimResult};
use crate::state::{TimeGrid, Trajectory};

/// Non-negative half of a DFT magnitude spectrum
///
/// `frequencies[i] = i / (N·Δt)` in ordinary (cycles per unit time) units;
/// `magnitudes[i] = |X_i|` without windowing or scaling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Spectrum {
    pub frequencies: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Magnitudes scaled so the largest retained bin is 1
    ///
    /// An all-zero spectrum is returned unchanged.
    pub fn normalized(&self) -> Spectrum {
        let max = self.magnitudes.iter().copied().fold(0.0, f64::max);
        if max <= 0.0 {
            return self.clone();
        }
        Spectrum {
            frequencies: self.frequencies.clone(),
            magnitudes: self.magnitudes.iter().map(|m| m / max).collect(),
        }
    }

    /// Frequencies as angular frequencies `2πf`
    pub fn angular_frequencies(&self) -> Vec<f64> {
        self.frequencies.iter().map(|f| 2.0 * PI * f).collect()
    }

    /// Strongest bin above DC as `(frequency, magnitude)`
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.frequencies
            .iter()
            .zip(&self.magnitudes)
            .skip(1)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(&f, &m)| (f, m))
    }
}

/// Magnitudes of the full complex DFT of a real signal
pub fn fourier_magnitudes(signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }

    let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);

    buffer.iter().map(|c| c.norm()).collect()
}

/// Spectrum of the position component of `trajectory` sampled on `grid`
///
/// The trajectory must cover the whole grid: a truncated trajectory from a
/// failed integration would pair `N` frequencies with fewer samples, so it is
/// rejected with [`SimError::LengthMismatch`]. The grid must be uniform.
/// Keeps the first `⌈N/2⌉` bins.
pub fn compute_spectrum(trajectory: &Trajectory, grid: &TimeGrid) -> SimResult<Spectrum> {
    let n = grid.len();
    if trajectory.len() != n {
        return Err(SimError::LengthMismatch {
            signal: trajectory.len(),
            grid: n,
        });
    }
    let dt = grid.uniform_step().ok_or(SimError::NonUniformGrid)?;

    let full = fourier_magnitudes(&trajectory.positions());
    let half = n.div_ceil(2);
    let resolution = 1.0 / (n as f64 * dt);

    Ok(Spectrum {
        frequencies: (0..half).map(|i| i as f64 * resolution).collect(),
        magnitudes: full[..half].to_vec(),
    })
}
