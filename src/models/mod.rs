//! # Spectrum Models
//!
//! Closed-form functions that calibrated spectra are fitted against, with
//! helpers for the starting parameters a solver needs. The solver itself is
//! left to the caller.
//!
//! | Model | Use |
//! |-------|-----|
//! | [`GaussianPeak`] | photopeaks (gamma, X-ray fluorescence, Compton) |
//! | [`ExponentialDecay`] | muon decay-time histograms |
//! | [`compton_energy`] | expected scattered-photon energy |

mod constants;

#[cfg(test)]
mod tests;

pub use constants::PhysicalConstants;

use serde::{Deserialize, Serialize};

use crate::spectrum::CalibratedTable;

/// Normalised Gaussian `norm / (σ √(2π)) · exp(-(x - μ)² / 2σ²)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianPeak {
    /// Standard deviation σ
    pub std_dev: f64,
    /// Centre μ
    pub mean: f64,
    /// Area under the curve
    pub norm: f64,
}

impl GaussianPeak {
    /// Evaluate at `x`
    pub fn eval(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        self.norm / (self.std_dev * (2.0 * std::f64::consts::PI).sqrt()) * (-0.5 * z * z).exp()
    }

    /// Starting parameters for fitting a peak that fills `window`.
    ///
    /// The centre guess is the middle of the window, the width guess is half
    /// the window, and the norm guess is the tallest count. `None` for fewer
    /// than two points.
    pub fn initial_guess(window: &CalibratedTable) -> Option<Self> {
        let (&first, &last) = (window.x().first()?, window.x().last()?);
        if window.len() < 2 {
            return None;
        }
        let mean = (first + last) / 2.0;
        let norm = window.counts().iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            std_dev: mean - first,
            mean,
            norm,
        })
    }

    /// Full width at half maximum, `2 √(2 ln 2) σ`
    pub fn fwhm(&self) -> f64 {
        2.0 * (2.0 * std::f64::consts::LN_2).sqrt() * self.std_dev
    }
}

/// Decay curve with flat background `coeff · exp(-x / tau) + background`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentialDecay {
    /// Amplitude at `x = 0`
    pub coeff: f64,
    /// Lifetime, in the units of the calibrated x-axis
    pub tau: f64,
    /// Constant background
    pub background: f64,
}

impl ExponentialDecay {
    /// Evaluate at `x`
    pub fn eval(&self, x: f64) -> f64 {
        self.coeff * (-x / self.tau).exp() + self.background
    }

    /// Half-life `tau · ln 2`
    pub fn half_life(&self) -> f64 {
        self.tau * std::f64::consts::LN_2
    }
}

/// Energy of a photon of `incident_kev` after Compton scattering through `theta_rad`
pub fn compton_energy(theta_rad: f64, incident_kev: f64, constants: &PhysicalConstants) -> f64 {
    incident_kev / (1.0 + (incident_kev / constants.electron_rest_energy_kev()) * (1.0 - theta_rad.cos()))
}
