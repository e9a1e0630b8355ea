use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use mcaspec::calibration::{CalibrationStrategy, OvershootPolicy, TwoPointFormula};

mod calibrate;
mod convert;
mod info;

mod config;
mod settings;

/// mcaspec - Multichannel-Analyzer Spectrum Reader and Calibrator
#[derive(Parser)]
#[command(name = "mcaspec")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Curve construction strategy.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StrategyArg {
    /// Piecewise-linear through every marker
    Piecewise,
    /// One least-squares line through all markers
    LeastSquares,
}

/// Scale factor formula when only two markers remain.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TwoPointArg {
    /// (v1 - v0) / (c1 - c0)
    RatioOfDeltas,
    /// v0 / c0
    RatioOfValues,
}

/// Cursor behaviour when a channel steps over a marker.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OvershootArg {
    /// Move to the segment containing the channel
    Advance,
    /// Keep extrapolating the current segment
    HoldSegment,
}

impl From<StrategyArg> for CalibrationStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Piecewise => CalibrationStrategy::Piecewise,
            StrategyArg::LeastSquares => CalibrationStrategy::LeastSquares,
        }
    }
}

impl From<TwoPointArg> for TwoPointFormula {
    fn from(arg: TwoPointArg) -> Self {
        match arg {
            TwoPointArg::RatioOfDeltas => TwoPointFormula::RatioOfDeltas,
            TwoPointArg::RatioOfValues => TwoPointFormula::RatioOfValues,
        }
    }
}

impl From<OvershootArg> for OvershootPolicy {
    fn from(arg: OvershootArg) -> Self {
        match arg {
            OvershootArg::Advance => OvershootPolicy::Advance,
            OvershootArg::HoldSegment => OvershootPolicy::HoldSegment,
        }
    }
}

/// Calibration and output flags shared by `calibrate` and `convert`
#[derive(Args, Debug, Clone, Default)]
pub struct CalibrationArgs {
    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Calibration markers as a channel,value CSV (replaces embedded markers)
    #[arg(long, value_name = "CSV")]
    markers: Option<PathBuf>,

    /// Period of a time calibrator; pulse i is placed at period * (i + 1)
    #[arg(long, requires = "period_channels")]
    period: Option<f64>,

    /// CSV whose first column holds the channel of each calibrator pulse
    #[arg(long, value_name = "CSV", requires = "period")]
    period_channels: Option<PathBuf>,

    /// Curve construction strategy
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Scale formula for two markers
    #[arg(long, value_enum)]
    two_point: Option<TwoPointArg>,

    /// Cursor behaviour between fractional markers
    #[arg(long, value_enum)]
    overshoot: Option<OvershootArg>,

    /// Keep only points with calibrated x >= LOWER
    #[arg(long)]
    lower: Option<f64>,

    /// Keep only points with calibrated x <= UPPER
    #[arg(long)]
    upper: Option<f64>,

    /// Append a summary of each run to this results file
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Header of the calibrated x column
    #[arg(long, default_value = "x")]
    x_label: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Display header, markers and totals of an IEC file
    Info {
        /// Input IEC file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Load record layout from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the parsed spectrum as JSON
        #[arg(long)]
        json: bool,
    },

    /// Calibrate IEC spectra and write them as CSV
    Calibrate {
        /// Input IEC file paths
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for the calibrated CSV files (defaults to each input's directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// IEC noise-floor run to subtract after calibration
        #[arg(long, value_name = "FILE")]
        background: Option<PathBuf>,

        #[command(flatten)]
        calibration: CalibrationArgs,
    },

    /// Calibrate a pre-reduced channel,count CSV
    Convert {
        /// Input CSV file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output CSV file path (defaults to <INPUT>.calibrated.csv)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        #[command(flatten)]
        calibration: CalibrationArgs,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info { file, config, json } => info::run(file, config, json),
        Commands::Calibrate {
            inputs,
            output_dir,
            background,
            calibration,
        } => calibrate::run(inputs, output_dir, background, calibration),
        Commands::Convert {
            input,
            output,
            calibration,
        } => convert::run(input, output, calibration),
    }
}
