//! TOML configuration file support.
//!
//! Every key is optional; command-line flags override the file, and the file
//! overrides the built-in IEC defaults:
//!
//! ```toml
//! # mcaspec.toml
//! [format]
//! record_prefix = "A004"
//! data_slots_per_record = 5
//! max_markers = 24
//!
//! [calibration]
//! strategy = "piecewise"
//! two_point_formula = "ratio-of-deltas"
//! overshoot = "advance"
//! markers = [
//!     { channel = 120.5, value = 661.7 },
//!     { channel = 301.2, value = 1332.5 },
//! ]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use mcaspec::calibration::{
    CalibrationMarker, CalibrationOptions, CalibrationStrategy, OvershootPolicy, TwoPointFormula,
};
use mcaspec::iec::IecFormat;

/// Root configuration structure for mcaspec.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// IEC record layout.
    #[serde(default)]
    pub format: FormatConfig,

    /// Calibration curve settings.
    #[serde(default)]
    pub calibration: CalibrationConfig,
}

/// Overrides for the IEC record layout.
#[derive(Debug, Default, Deserialize)]
pub struct FormatConfig {
    pub record_prefix: Option<String>,
    pub calibration_tag: Option<String>,
    pub data_tag: Option<String>,
    pub marker_pair_slots_per_record: Option<usize>,
    pub data_slots_per_record: Option<usize>,
    pub max_markers: Option<usize>,
    pub max_channels: Option<usize>,
    pub extension: Option<String>,
}

/// Calibration settings.
#[derive(Debug, Default, Deserialize)]
pub struct CalibrationConfig {
    /// `piecewise` or `least-squares`.
    pub strategy: Option<CalibrationStrategy>,

    /// `ratio-of-deltas` or `ratio-of-values`.
    pub two_point_formula: Option<TwoPointFormula>,

    /// `advance` or `hold-segment`.
    pub overshoot: Option<OvershootPolicy>,

    /// Markers kept when building a curve; defaults to `[format] max_markers`.
    pub max_markers: Option<usize>,

    /// Markers used instead of those embedded in the input files.
    pub markers: Option<Vec<CalibrationMarker>>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Record layout with the `[format]` overrides applied.
    pub fn iec_format(&self) -> IecFormat {
        self.format.apply(IecFormat::default())
    }

    /// Calibration options with the `[calibration]` overrides applied.
    ///
    /// `max_markers` follows `[format] max_markers` unless `[calibration]` sets it.
    pub fn calibration_options(&self) -> CalibrationOptions {
        let base = CalibrationOptions {
            max_markers: self.iec_format().max_markers,
            ..CalibrationOptions::default()
        };
        self.calibration.apply(base)
    }
}

impl FormatConfig {
    /// Apply the overrides on top of `format`.
    pub fn apply(&self, format: IecFormat) -> IecFormat {
        IecFormat {
            record_prefix: self.record_prefix.clone().unwrap_or(format.record_prefix),
            calibration_tag: self.calibration_tag.clone().unwrap_or(format.calibration_tag),
            data_tag: self.data_tag.clone().unwrap_or(format.data_tag),
            marker_pair_slots_per_record: self
                .marker_pair_slots_per_record
                .unwrap_or(format.marker_pair_slots_per_record),
            data_slots_per_record: self
                .data_slots_per_record
                .unwrap_or(format.data_slots_per_record),
            max_markers: self.max_markers.unwrap_or(format.max_markers),
            max_channels: self.max_channels.unwrap_or(format.max_channels),
            extension: self.extension.clone().unwrap_or(format.extension),
        }
    }
}

impl CalibrationConfig {
    /// Apply the overrides on top of `options`.
    pub fn apply(&self, options: CalibrationOptions) -> CalibrationOptions {
        CalibrationOptions {
            strategy: self.strategy.unwrap_or(options.strategy),
            two_point_formula: self.two_point_formula.unwrap_or(options.two_point_formula),
            overshoot: self.overshoot.unwrap_or(options.overshoot),
            max_markers: self.max_markers.unwrap_or(options.max_markers),
        }
    }
}
