use serde::Serialize;

use super::SpectrumError;

/// A spectrum whose x-axis holds physical values.
///
/// Produced by [`ChannelTable::calibrate`](super::ChannelTable::calibrate) or
/// read from a pre-reduced CSV. The x-axis is expected in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CalibratedTable {
    x: Vec<f64>,
    counts: Vec<f64>,
}

/// Count-weighted location and spread of a spectrum region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakMoments {
    /// Sum of counts
    pub total: f64,
    /// Count-weighted mean x
    pub mean: f64,
    /// Count-weighted (population) standard deviation of x
    pub std_dev: f64,
}

impl CalibratedTable {
    /// Build a table from equal-length columns
    pub fn new(x: Vec<f64>, counts: Vec<f64>) -> Result<Self, SpectrumError> {
        if x.len() != counts.len() {
            return Err(SpectrumError::LengthMismatch {
                x_len: x.len(),
                counts_len: counts.len(),
            });
        }
        Ok(Self { x, counts })
    }

    pub(crate) fn from_parts(x: Vec<f64>, counts: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), counts.len());
        Self { x, counts }
    }

    /// Calibrated x-values
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Counts, unchanged by calibration
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the table has no points
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over `(x, count)` pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.counts.iter().copied())
    }

    /// Points with `lower <= x <= upper`; a missing bound is open.
    pub fn window(&self, lower: Option<f64>, upper: Option<f64>) -> Result<Self, SpectrumError> {
        if let (Some(lower), Some(upper)) = (lower, upper) {
            if lower >= upper {
                return Err(SpectrumError::InvalidWindow { lower, upper });
            }
        }

        let (x, counts): (Vec<f64>, Vec<f64>) = self
            .points()
            .filter(|&(x, _)| lower.map_or(true, |l| x >= l) && upper.map_or(true, |u| x <= u))
            .unzip();
        Ok(Self { x, counts })
    }

    /// Counts at `x`, linearly interpolated between neighbouring points.
    ///
    /// Outside the table the nearest edge pair is extrapolated. `None` for an
    /// empty table.
    pub fn interpolate(&self, x: f64) -> Option<f64> {
        let len = self.x.len();
        match len {
            0 => return None,
            1 => return Some(self.counts[0]),
            _ => {}
        }

        let pos = self.x.partition_point(|&v| v < x);
        if pos < len && self.x[pos] == x {
            return Some(self.counts[pos]);
        }

        let (lo, hi) = match pos {
            0 => (0, 1),
            p if p == len => (len - 2, len - 1),
            p => (p - 1, p),
        };
        let dx = self.x[hi] - self.x[lo];
        if dx == 0.0 {
            return Some(self.counts[lo]);
        }
        let slope = (self.counts[hi] - self.counts[lo]) / dx;
        Some(self.counts[lo] + slope * (x - self.x[lo]))
    }

    /// Subtract a background spectrum (e.g. a noise-floor run), clamping at zero.
    ///
    /// The background is sampled at this table's x-values with
    /// [`interpolate`](Self::interpolate), so both spectra only need to share units.
    pub fn subtract_background(&self, background: &CalibratedTable) -> Self {
        let counts = self
            .points()
            .map(|(x, count)| {
                let floor = background.interpolate(x).unwrap_or(0.0);
                (count - floor).max(0.0)
            })
            .collect();
        Self {
            x: self.x.clone(),
            counts,
        }
    }

    /// Point with the most counts (first one on ties)
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.points()
            .fold(None, |best: Option<(f64, f64)>, (x, c)| match best {
                Some((_, best_count)) if best_count >= c => best,
                _ => Some((x, c)),
            })
    }

    /// Count-weighted mean and standard deviation; `None` without positive counts.
    pub fn moments(&self) -> Option<PeakMoments> {
        let total: f64 = self.counts.iter().sum();
        if total.is_nan() || total <= 0.0 {
            return None;
        }

        let mean = self.points().map(|(x, c)| x * c).sum::<f64>() / total;
        let variance = self
            .points()
            .map(|(x, c)| c * (x - mean) * (x - mean))
            .sum::<f64>()
            / total;

        Some(PeakMoments {
            total,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}
