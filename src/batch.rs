//! Loading several spectra with one set of options.
//!
//! Files are independent, so with the `parallel` feature they are parsed and
//! calibrated on the rayon thread pool. Results always come back in input
//! order, one per path, so a bad file does not hide the others.

use std::path::{Path, PathBuf};

use log::{info, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::calibration::{CalibrationCurve, CalibrationError, CalibrationMarker, CalibrationOptions};
use crate::iec::{IecError, IecFormat, IecReader, IecSpectrum};
use crate::spectrum::CalibratedTable;

/// Errors for one file of a batch
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// The file could not be read
    #[error(transparent)]
    Iec(#[from] IecError),

    /// The file was read but no curve could be built for it
    #[error("Calibration failed for {}: {source}", path.display())]
    Calibration {
        /// File being calibrated
        path: PathBuf,
        /// Underlying calibration error
        source: CalibrationError,
    },
}

/// Options shared by every file of a batch
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Record layout of the input files
    pub format: IecFormat,
    /// Curve construction options
    pub calibration: CalibrationOptions,
    /// Markers used instead of the ones embedded in each file
    pub markers: Option<Vec<CalibrationMarker>>,
}

impl BatchOptions {
    /// Curve for one spectrum: the override markers if set, else the file's own
    pub fn curve_for(&self, spectrum: &IecSpectrum) -> Result<CalibrationCurve, CalibrationError> {
        let markers = self.markers.as_deref().unwrap_or(spectrum.markers.as_slice());
        CalibrationCurve::build(markers, &self.calibration)
    }
}

/// One parsed and calibrated file
#[derive(Debug, Clone)]
pub struct LoadedSpectrum {
    /// Source file
    pub path: PathBuf,
    /// Parsed file contents, raw table included
    pub spectrum: IecSpectrum,
    /// Curve applied to the table
    pub curve: CalibrationCurve,
    /// Calibrated table
    pub calibrated: CalibratedTable,
}

/// Parse and calibrate one file
pub fn load_one<P: AsRef<Path>>(path: P, options: &BatchOptions) -> Result<LoadedSpectrum, BatchError> {
    let path = path.as_ref();
    let reader = IecReader::with_format(options.format.clone());
    let spectrum = reader.open(path)?;

    let curve = options
        .curve_for(&spectrum)
        .map_err(|source| BatchError::Calibration {
            path: path.to_path_buf(),
            source,
        })?;
    let calibrated = spectrum.table.calibrate(&curve);

    Ok(LoadedSpectrum {
        path: path.to_path_buf(),
        spectrum,
        curve,
        calibrated,
    })
}

/// Parse and calibrate every file, keeping input order
pub fn load_many<P>(paths: &[P], options: &BatchOptions) -> Vec<Result<LoadedSpectrum, BatchError>>
where
    P: AsRef<Path> + Sync,
{
    info!("Loading {} spectra", paths.len());

    #[cfg(feature = "parallel")]
    let results: Vec<_> = paths.par_iter().map(|path| load_one(path, options)).collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = paths.iter().map(|path| load_one(path, options)).collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        warn!("{} of {} spectra failed to load", failed, paths.len());
    }
    results
}
