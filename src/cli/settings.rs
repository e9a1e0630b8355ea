//! Resolution of config file and command-line flags into library options.

use anyhow::{Context, Result};
use log::{debug, info};

use mcaspec::batch::BatchOptions;
use mcaspec::calibration::{CalibrationMarker, CalibrationOptions, MarkerSet};
use mcaspec::iec::IecFormat;
use mcaspec::tabular;

use super::config::Config;
use super::CalibrationArgs;

/// Effective options for one command invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub format: IecFormat,
    pub calibration: CalibrationOptions,
    /// External markers; `None` means use the markers embedded in each file.
    pub markers: Option<Vec<CalibrationMarker>>,
}

impl Settings {
    /// Flags override the config file, which overrides the defaults.
    pub fn resolve(args: &CalibrationArgs) -> Result<Self> {
        let config = match &args.config {
            Some(path) => {
                info!("Loading config: {}", path.display());
                Config::from_file(path)?
            }
            None => Config::default(),
        };

        let format = config.iec_format();

        let mut calibration = config.calibration_options();
        if let Some(strategy) = args.strategy {
            calibration.strategy = strategy.into();
        }
        if let Some(formula) = args.two_point {
            calibration.two_point_formula = formula.into();
        }
        if let Some(overshoot) = args.overshoot {
            calibration.overshoot = overshoot.into();
        }

        let markers = if let Some(path) = &args.markers {
            Some(tabular::read_markers(path).with_context(|| {
                format!("Failed to read calibration markers: {}", path.display())
            })?)
        } else if let (Some(period), Some(path)) = (args.period, &args.period_channels) {
            let channels = tabular::read_column(path).with_context(|| {
                format!("Failed to read calibrator channels: {}", path.display())
            })?;
            Some(MarkerSet::periodic(&channels, period))
        } else {
            config.calibration.markers
        };

        if let Some(markers) = &markers {
            debug!("Using {} external calibration markers", markers.len());
        }
        debug!(
            "Calibration: strategy={}, two-point={}, overshoot={}",
            calibration.strategy, calibration.two_point_formula, calibration.overshoot
        );

        Ok(Self {
            format,
            calibration,
            markers,
        })
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            format: self.format.clone(),
            calibration: self.calibration,
            markers: self.markers.clone(),
        }
    }
}
