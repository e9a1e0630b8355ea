use std::fmt;

use serde::{Deserialize, Serialize};

use super::MarkerSet;

/// How a curve is derived from its markers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalibrationStrategy {
    /// Piecewise-linear through every breakpoint (two markers: uniform scaling)
    #[default]
    Piecewise,
    /// Single least-squares line through all markers
    LeastSquares,
}

/// Scale factor used when exactly two breakpoints remain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TwoPointFormula {
    /// `(v1 - v0) / (c1 - c0)`
    #[default]
    RatioOfDeltas,
    /// `v0 / c0` of the lowest-channel marker.
    ///
    /// Markers are sorted by channel first, so on a file listing them out of
    /// order this is not the first marker as written.
    RatioOfValues,
}

/// What the piecewise cursor does when a value lies beyond the current breakpoint.
///
/// With integer channel positions and fractional breakpoints a value can step
/// over a breakpoint without ever equalling it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OvershootPolicy {
    /// Move the cursor forward to the segment that contains the value
    #[default]
    Advance,
    /// Keep extrapolating the current segment; the cursor only moves on an exact hit
    HoldSegment,
}

/// Options for [`CalibrationCurve::build`](super::CalibrationCurve::build)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationOptions {
    /// Curve construction strategy
    pub strategy: CalibrationStrategy,
    /// Scale formula for the two-breakpoint case
    pub two_point_formula: TwoPointFormula,
    /// Cursor behaviour for piecewise curves
    pub overshoot: OvershootPolicy,
    /// Markers beyond this count are ignored
    pub max_markers: usize,
}

impl Default for CalibrationOptions {
    fn default() -> Self {
        Self {
            strategy: CalibrationStrategy::default(),
            two_point_formula: TwoPointFormula::default(),
            overshoot: OvershootPolicy::default(),
            max_markers: MarkerSet::DEFAULT_LIMIT,
        }
    }
}

impl CalibrationOptions {
    /// Options reproducing the original lab scripts' cursor behaviour
    pub fn legacy() -> Self {
        Self {
            overshoot: OvershootPolicy::HoldSegment,
            ..Self::default()
        }
    }
}

impl fmt::Display for CalibrationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationStrategy::Piecewise => write!(f, "piecewise"),
            CalibrationStrategy::LeastSquares => write!(f, "least-squares"),
        }
    }
}

impl fmt::Display for TwoPointFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwoPointFormula::RatioOfDeltas => write!(f, "ratio-of-deltas"),
            TwoPointFormula::RatioOfValues => write!(f, "ratio-of-values"),
        }
    }
}

impl fmt::Display for OvershootPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OvershootPolicy::Advance => write!(f, "advance"),
            OvershootPolicy::HoldSegment => write!(f, "hold-segment"),
        }
    }
}
