//! # IEC 1455 Spectrum Reader
//!
//! Reads the text files written by multichannel analyzers into a
//! [`ChannelTable`] plus the calibration markers embedded in the file.
//!
//! ## Record Layout
//!
//! ```text
//! A004<description>                line 1
//! A004  <time>  ...  <N>           line 2: header, last token is the channel count
//! A004<date and time>              line 3
//! ...
//! A004SPARE                        opens the calibration block
//! A004 <v> <c> <v> <c>             two (value, channel) pairs per record
//! A004 0 0 0 0                     (0, 0) ends the marker list
//! A004USERDEFINED                  opens the channel data block
//! A004 <start> <n0> <n1> <n2> <n3> <n4>
//! ```
//!
//! Lines without the record prefix are ignored. Sections only move forward:
//! header, then calibration, then data.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mcaspec::iec::IecReader;
//!
//! let spectrum = IecReader::new().open("cs137.IEC")?;
//! println!("{} channels, {} markers", spectrum.table.len(), spectrum.markers.len());
//! # Ok::<(), mcaspec::iec::IecError>(())
//! ```

mod error;
mod format;
mod header;
mod reader;


pub use error::IecError;
pub use format::IecFormat;
pub use header::IecHeader;
pub use reader::IecReader;

use serde::Serialize;

use crate::calibration::{CalibrationCurve, CalibrationError, CalibrationMarker, CalibrationOptions};
use crate::spectrum::{CalibratedTable, ChannelTable};

/// Everything read from one IEC file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IecSpectrum {
    /// Acquisition metadata
    pub header: IecHeader,
    /// Raw histogram, `header.channel_count` channels
    pub table: ChannelTable,
    /// Calibration markers in file order, sentinel removed
    pub markers: Vec<CalibrationMarker>,
}

impl IecSpectrum {
    /// Split into the `(table, markers)` pair
    pub fn into_parts(self) -> (ChannelTable, Vec<CalibrationMarker>) {
        (self.table, self.markers)
    }

    /// Build a curve from the embedded markers
    pub fn curve(&self, options: &CalibrationOptions) -> Result<CalibrationCurve, CalibrationError> {
        CalibrationCurve::build(&self.markers, options)
    }

    /// Calibrate the table with the embedded markers
    pub fn calibrate(&self, options: &CalibrationOptions) -> Result<CalibratedTable, CalibrationError> {
        Ok(self.table.calibrate(&self.curve(options)?))
    }
}
