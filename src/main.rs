//! # mcaspec
//!
//! Command-line front end for reading and calibrating multichannel-analyzer
//! spectra.
//!
//! ## Usage
//!
//! ```bash
//! # Show header and embedded calibration of a spectrum
//! mcaspec info cs137.IEC
//!
//! # Calibrate with the embedded markers and log peak statistics
//! mcaspec calibrate cs137.IEC co60.IEC -o calibrated/ --log results.txt
//!
//! # Muon lifetime: time calibration from periodic pulses
//! mcaspec calibrate muon.IEC --period 1.0 --period-channels pulses.csv
//!
//! # Calibrate a pre-reduced channel,count CSV
//! mcaspec convert spectrum.csv --markers markers.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
