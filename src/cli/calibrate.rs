use anyhow::{Context, Result};
use chrono::Local;
use log::{error, info};
use std::path::{Path, PathBuf};

use mcaspec::batch::{self, LoadedSpectrum};
use mcaspec::calibration::CalibrationCurve;
use mcaspec::report::{ResultsEntry, ResultsLog};
use mcaspec::spectrum::CalibratedTable;
use mcaspec::tabular;

use super::settings::Settings;
use super::CalibrationArgs;

/// Calibrate IEC spectra and write them as CSV
pub fn run(
    inputs: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    background: Option<PathBuf>,
    args: CalibrationArgs,
) -> Result<()> {
    let settings = Settings::resolve(&args)?;
    let options = settings.batch_options();

    info!("mcaspec - IEC calibration");
    info!("=========================");
    info!("Inputs: {}", inputs.len());
    info!("Strategy: {}", settings.calibration.strategy);

    let background = match &background {
        Some(path) => {
            let loaded = batch::load_one(path, &options)
                .with_context(|| format!("Failed to load background: {}", path.display()))?;
            info!("Background: {}", path.display());
            Some(loaded.calibrated)
        }
        None => None,
    };

    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let results = batch::load_many(&inputs, &options);
    let mut failed = 0;

    for (input, result) in inputs.iter().zip(results) {
        let outcome = result
            .with_context(|| format!("Failed to calibrate {}", input.display()))
            .and_then(|loaded| {
                let output = output_path(input, output_dir.as_deref());
                write_loaded(loaded, background.as_ref(), &output, &args)
            });

        if let Err(e) = outcome {
            error!("{:#}", e);
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} inputs failed", failed, inputs.len());
    }
    info!("Calibration complete!");
    Ok(())
}

fn write_loaded(
    loaded: LoadedSpectrum,
    background: Option<&CalibratedTable>,
    output: &Path,
    args: &CalibrationArgs,
) -> Result<()> {
    let table = match background {
        Some(bg) => loaded.calibrated.subtract_background(bg),
        None => loaded.calibrated,
    };

    let entry = ResultsEntry::new()
        .field("Data file", loaded.path.display())
        .field("Description", &loaded.spectrum.header.description)
        .field("Channels", loaded.spectrum.header.channel_count);
    let entry = match loaded.spectrum.header.acquisition_time_s {
        Some(seconds) => entry.field("Acquisition time (s)", seconds),
        None => entry,
    };

    write_table(table, &loaded.curve, entry, output, args)
}

/// Window, write and optionally log one calibrated table.
pub(super) fn write_table(
    table: CalibratedTable,
    curve: &CalibrationCurve,
    entry: ResultsEntry,
    output: &Path,
    args: &CalibrationArgs,
) -> Result<()> {
    let table = table
        .window(args.lower, args.upper)
        .context("Invalid analysis window")?;

    tabular::write_csv_file(&table, &args.x_label, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("  {} -> {} points", output.display(), table.len());

    let Some(log_path) = &args.log else {
        return Ok(());
    };

    let mut entry = entry
        .field("Output file", output.display())
        .field("Calibration", curve.mode())
        .field("Breakpoints", curve.breakpoints().len());
    if let Some(lower) = args.lower {
        entry = entry.field("Lower bound", lower);
    }
    if let Some(upper) = args.upper {
        entry = entry.field("Upper bound", upper);
    }
    if let Some((x, count)) = table.peak() {
        entry = entry.field("Peak", x).field("Peak count", count);
    }
    if let Some(moments) = table.moments() {
        entry = entry
            .field("Total counts", moments.total)
            .field("Mean", moments.mean)
            .field("Std dev", moments.std_dev);
    }

    ResultsLog::new(log_path)
        .append(&entry.with_timestamp(Local::now()))
        .with_context(|| format!("Failed to append to {}", log_path.display()))
}

/// `<dir>/<stem>.calibrated.csv`, next to the input unless a directory is given
pub(super) fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let name = format!("{stem}.calibrated.csv");
    match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}
