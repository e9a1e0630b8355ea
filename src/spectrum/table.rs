use serde::Serialize;

use super::CalibratedTable;
use crate::calibration::CalibrationCurve;

/// One channel of a [`ChannelTable`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelRecord {
    /// Channel index
    pub channel: usize,
    /// Counts recorded in the channel
    pub count: f64,
}

/// Raw MCA histogram: `N` contiguous channels, channel `i` at x-value `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChannelTable {
    counts: Vec<f64>,
}

impl ChannelTable {
    /// Table of `len` channels, all counts zero
    pub fn zeroed(len: usize) -> Self {
        Self {
            counts: vec![0.0; len],
        }
    }

    /// Table from counts in channel order
    pub fn from_counts(counts: Vec<f64>) -> Self {
        Self { counts }
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the table has no channels
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Counts in channel order
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Counts of one channel, `None` past the end
    pub fn count(&self, channel: usize) -> Option<f64> {
        self.counts.get(channel).copied()
    }

    /// Iterate over `(channel, count)` records
    pub fn records(&self) -> impl Iterator<Item = ChannelRecord> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(channel, &count)| ChannelRecord { channel, count })
    }

    /// Uncalibrated x-axis `0, 1, .., N-1`
    pub fn x_values(&self) -> Vec<f64> {
        (0..self.counts.len()).map(|i| i as f64).collect()
    }

    /// Sum of all counts
    pub fn total_counts(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Store a count; returns `false` (and stores nothing) past the end.
    pub(crate) fn set_count(&mut self, channel: usize, count: f64) -> bool {
        match self.counts.get_mut(channel) {
            Some(slot) => {
                *slot = count;
                true
            }
            None => false,
        }
    }

    /// New table with the x-axis mapped through `curve`; `self` is left untouched.
    pub fn calibrate(&self, curve: &CalibrationCurve) -> CalibratedTable {
        CalibratedTable::from_parts(curve.map(&self.x_values()), self.counts.clone())
    }

    /// Same data with channel numbers as x-values, for raw diagnostic output
    pub fn uncalibrated(&self) -> CalibratedTable {
        CalibratedTable::from_parts(self.x_values(), self.counts.clone())
    }
}
