//! # mcaspec - Multichannel-Analyzer Spectra and Calibration
//!
//! `mcaspec` reads spectra recorded by multichannel analyzers (MCAs) in the
//! IEC 1455 text format, converts channel numbers into physical units
//! (keV, microseconds, ...) with a piecewise-linear calibration, and hands
//! the calibrated table on to fitting and plotting code.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mcaspec::calibration::{CalibrationCurve, CalibrationOptions};
//! use mcaspec::iec::IecReader;
//!
//! let spectrum = IecReader::new().open("Cs137_run1.IEC")?;
//! let curve = CalibrationCurve::build(&spectrum.markers, &CalibrationOptions::default())?;
//! let calibrated = spectrum.table.calibrate(&curve);
//!
//! for (energy, counts) in calibrated.points() {
//!     println!("{energy:.3} keV  {counts}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Data Flow
//!
//! ```text
//!  .IEC file
//!      │
//!      ▼
//!  ┌──────────┐   ChannelTable + CalibrationMarkers
//!  │   iec    │ ──────────────────────────────────┐
//!  └──────────┘                                   ▼
//!                                       ┌──────────────────┐
//!  external markers (TOML/CSV) ───────► │   calibration    │ CalibrationCurve
//!                                       └──────────────────┘
//!                                                 │
//!                                                 ▼
//!                                       ┌──────────────────┐
//!                                       │    spectrum      │ CalibratedTable
//!                                       └──────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`iec`]: single-pass reader for IEC 1455 MCA text files
//! - [`calibration`]: markers, bounded marker sets and calibration curves
//! - [`spectrum`]: channel tables, calibrated tables, windows and background subtraction
//! - [`tabular`]: pre-reduced CSV spectra (`channel,count[,error]`)
//! - [`models`]: closed-form model functions and the physical constants table
//! - [`report`]: append-only plain-text results log
//! - [`batch`]: loading several files with one set of options

pub mod batch;
pub mod calibration;
pub mod iec;
pub mod models;
pub mod report;
pub mod spectrum;
pub mod tabular;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::batch::{load_many, load_one, BatchError, BatchOptions, LoadedSpectrum};
    pub use crate::calibration::{
        CalibrationCurve, CalibrationError, CalibrationMarker, CalibrationOptions,
        CalibrationStrategy, CurveMode, MarkerSet, OvershootPolicy, TwoPointFormula,
    };
    pub use crate::iec::{IecError, IecFormat, IecHeader, IecReader, IecSpectrum};
    pub use crate::models::{compton_energy, ExponentialDecay, GaussianPeak, PhysicalConstants};
    pub use crate::report::{ReportError, ResultsEntry, ResultsLog};
    pub use crate::spectrum::{CalibratedTable, ChannelRecord, ChannelTable, SpectrumError};
    pub use crate::tabular::{TabularError, TabularSpectrum};
}
