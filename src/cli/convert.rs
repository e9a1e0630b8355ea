use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mcaspec::calibration::CalibrationCurve;
use mcaspec::report::ResultsEntry;
use mcaspec::tabular::TabularSpectrum;

use super::calibrate::{output_path, write_table};
use super::settings::Settings;
use super::CalibrationArgs;

/// Calibrate a pre-reduced channel,count CSV
pub fn run(input: PathBuf, output: Option<PathBuf>, args: CalibrationArgs) -> Result<()> {
    let settings = Settings::resolve(&args)?;
    let markers = settings.markers.as_deref().context(
        "A CSV spectrum carries no markers: pass --markers, --period with --period-channels, \
         or set [calibration].markers in the config file",
    )?;

    let output = output.unwrap_or_else(|| output_path(&input, None));

    info!("mcaspec - CSV calibration");
    info!("=========================");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());

    let spectrum = TabularSpectrum::open(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let curve = CalibrationCurve::build(markers, &settings.calibration)
        .context("Failed to build calibration curve")?;

    let entry = ResultsEntry::new()
        .field("Data file", input.display())
        .field("Rows", spectrum.len());

    write_table(spectrum.calibrate(&curve), &curve, entry, &output, &args)?;
    info!("Conversion complete!");
    Ok(())
}
