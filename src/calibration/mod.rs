//! # Channel Calibration
//!
//! Turns calibration markers into a monotone mapping from channel numbers to
//! physical units and applies it to a whole x-axis in one pass.
//!
//! ## Curve Modes
//!
//! | Distinct markers | Strategy        | Mode                                   |
//! |------------------|-----------------|----------------------------------------|
//! | 0 or 1           | any             | [`CalibrationError::InsufficientMarkers`] |
//! | 2                | `Piecewise`     | uniform scale factor ([`TwoPointFormula`]) |
//! | 3 or more        | `Piecewise`     | piecewise-linear with cursor ([`OvershootPolicy`]) |
//! | 2 or more        | `LeastSquares`  | one fitted line                        |
//!
//! ## Example
//!
//! ```rust
//! use mcaspec::calibration::{CalibrationCurve, CalibrationMarker, CalibrationOptions};
//!
//! let markers = [
//!     CalibrationMarker::new(10.0, 100.0),
//!     CalibrationMarker::new(20.0, 150.0),
//! ];
//! let curve = CalibrationCurve::build(&markers, &CalibrationOptions::default())?;
//! assert_eq!(curve.map(&[0.0, 10.0, 20.0, 30.0]), vec![0.0, 50.0, 100.0, 150.0]);
//! # Ok::<(), mcaspec::calibration::CalibrationError>(())
//! ```

mod curve;
mod error;
mod marker;
mod options;

#[cfg(test)]
mod tests;

pub use curve::{CalibrationCurve, CurveMode};
pub use error::CalibrationError;
pub use marker::{Breakpoint, CalibrationMarker, MarkerPush, MarkerSet};
pub use options::{CalibrationOptions, CalibrationStrategy, OvershootPolicy, TwoPointFormula};
