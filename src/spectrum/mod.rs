//! Spectrum tables.
//!
//! [`ChannelTable`] is the raw histogram as read from the instrument;
//! [`CalibratedTable`] is a new value produced from it (or from a pre-reduced
//! CSV) with physical x-values. Calibrating never modifies the raw table, so
//! it stays available for diagnostic plots.

mod calibrated;
mod error;
mod table;

#[cfg(test)]
mod tests;

pub use calibrated::{CalibratedTable, PeakMoments};
pub use error::SpectrumError;
pub use table::{ChannelRecord, ChannelTable};
