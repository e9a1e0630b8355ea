use anyhow::{Context, Result};
use std::path::PathBuf;

use mcaspec::calibration::CalibrationOptions;
use mcaspec::iec::{IecReader, IecSpectrum};

use super::config::Config;

/// Display header, markers and totals of an IEC file
pub fn run(file: PathBuf, config: Option<PathBuf>, json: bool) -> Result<()> {
    let config = match &config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let reader = IecReader::with_format(config.iec_format());
    let spectrum = reader
        .open(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let options = config.calibration_options();

    if json {
        let text = serde_json::to_string_pretty(&spectrum).context("Failed to serialize spectrum")?;
        println!("{}", text);
        return Ok(());
    }

    #[cfg(feature = "colorized_output")]
    {
        print!("{}", format_colored(&file, &spectrum, &options));
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        print!("{}", format_plain(&file, &spectrum, &options));
    }

    Ok(())
}

#[cfg_attr(feature = "colorized_output", allow(dead_code))]
fn curve_summary(spectrum: &IecSpectrum, options: &CalibrationOptions) -> String {
    match spectrum.curve(options) {
        Ok(curve) => curve.mode().to_string(),
        Err(e) => format!("unavailable ({e})"),
    }
}

#[cfg_attr(feature = "colorized_output", allow(dead_code))]
fn format_plain(file: &std::path::Path, spectrum: &IecSpectrum, options: &CalibrationOptions) -> String {
    let header = &spectrum.header;
    let mut out = String::new();

    out.push_str("IEC Spectrum Information\n");
    out.push_str("========================\n");
    out.push_str(&format!("File: {}\n\n", file.display()));

    out.push_str("Header:\n");
    out.push_str(&format!("  Description: {}\n", header.description));
    if let Some(seconds) = header.acquisition_time_s {
        out.push_str(&format!("  Acquisition time: {} s\n", seconds));
    }
    if let Some(at) = &header.acquired_at {
        out.push_str(&format!("  Acquired at: {}\n", at));
    }
    out.push_str(&format!("  Channels: {}\n", header.channel_count));
    out.push_str(&format!("  Total counts: {}\n\n", spectrum.table.total_counts()));

    out.push_str(&format!("Calibration markers ({}):\n", spectrum.markers.len()));
    for (i, marker) in spectrum.markers.iter().enumerate() {
        out.push_str(&format!(
            "  {:3}. channel {:>10.3} -> {}\n",
            i + 1,
            marker.channel,
            marker.value
        ));
    }
    out.push_str(&format!("Curve: {}\n", curve_summary(spectrum, options)));
    out
}

#[cfg(feature = "colorized_output")]
fn format_colored(file: &std::path::Path, spectrum: &IecSpectrum, options: &CalibrationOptions) -> String {
    use console::style;

    let header = &spectrum.header;
    let mut out = String::new();

    out.push_str(&format!("{}\n", style("IEC Spectrum Information").bold().cyan()));
    out.push_str(&format!("{}\n", style("========================").cyan()));
    out.push_str(&format!("{}: {}\n\n", style("File").bold(), file.display()));

    out.push_str(&format!("{}\n", style("Header:").bold()));
    out.push_str(&format!("  Description: {}\n", header.description));
    if let Some(seconds) = header.acquisition_time_s {
        out.push_str(&format!("  Acquisition time: {} s\n", seconds));
    }
    if let Some(at) = &header.acquired_at {
        out.push_str(&format!("  Acquired at: {}\n", at));
    }
    out.push_str(&format!("  Channels: {}\n", style(header.channel_count).green()));
    out.push_str(&format!(
        "  Total counts: {}\n\n",
        style(spectrum.table.total_counts()).green()
    ));

    out.push_str(&format!(
        "{} ({}):\n",
        style("Calibration markers").bold(),
        spectrum.markers.len()
    ));
    for (i, marker) in spectrum.markers.iter().enumerate() {
        out.push_str(&format!(
            "  {:3}. channel {:>10.3} -> {}\n",
            i + 1,
            marker.channel,
            marker.value
        ));
    }

    let curve = match spectrum.curve(options) {
        Ok(curve) => style(curve.mode().to_string()).green(),
        Err(e) => style(format!("unavailable ({e})")).yellow(),
    };
    out.push_str(&format!("{}: {}\n", style("Curve").bold(), curve));
    out
}
