//! Comma-separated spectra and marker lists.
//!
//! Pre-reduced spectra are stored as `channel,count[,error]` with one header
//! line. Marker lists use `channel,value`. Calibrated tables are written back
//! as two columns.

mod error;


pub use error::TabularError;

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use log::{debug, info};
use serde::Serialize;

use crate::calibration::{CalibrationCurve, CalibrationMarker};
use crate::spectrum::CalibratedTable;

/// Spectrum read from a `channel,count[,error]` CSV file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TabularSpectrum {
    /// Channel column
    pub channels: Vec<f64>,
    /// Count column
    pub counts: Vec<f64>,
    /// Per-channel uncertainty, when the file has a third column
    pub errors: Option<Vec<f64>>,
}

impl TabularSpectrum {
    /// Read a `.csv` file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TabularError> {
        let reader = open_csv(path.as_ref())?;
        Self::from_reader(reader)
    }

    /// Read from any source; the first line is a header and is skipped.
    ///
    /// Channels must be non-decreasing, since calibration walks them in order.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TabularError> {
        let mut spectrum = Self::default();
        let mut errors = Vec::new();

        for (line, values) in numeric_rows(reader, 2)? {
            let has_error = values.len() > 2;
            if spectrum.channels.is_empty() {
                if has_error {
                    spectrum.errors = Some(Vec::new());
                }
            } else if has_error != spectrum.errors.is_some() {
                return Err(TabularError::MalformedRow {
                    row: line,
                    reason: "error column must be present on every row or none".to_string(),
                });
            }
            if spectrum.channels.last().is_some_and(|&previous| values[0] < previous) {
                return Err(TabularError::MalformedRow {
                    row: line,
                    reason: format!("channel {} is out of ascending order", values[0]),
                });
            }

            spectrum.channels.push(values[0]);
            spectrum.counts.push(values[1]);
            if has_error {
                errors.push(values[2]);
            }
        }

        if let Some(slot) = spectrum.errors.as_mut() {
            *slot = errors;
        }
        debug!("Read {} tabular rows", spectrum.len());
        Ok(spectrum)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the file had no data rows
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Map the channel column through `curve`; channels are ascending after [`Self::from_reader`]
    pub fn calibrate(&self, curve: &CalibrationCurve) -> CalibratedTable {
        CalibratedTable::from_parts(curve.map(&self.channels), self.counts.clone())
    }

    /// Same data with the channel column as x-values
    pub fn uncalibrated(&self) -> CalibratedTable {
        CalibratedTable::from_parts(self.channels.clone(), self.counts.clone())
    }
}

/// Read a `channel,value` marker list
pub fn read_markers<P: AsRef<Path>>(path: P) -> Result<Vec<CalibrationMarker>, TabularError> {
    let reader = open_csv(path.as_ref())?;
    read_markers_from(reader)
}

/// Read a `channel,value` marker list from any source
pub fn read_markers_from<R: Read>(reader: R) -> Result<Vec<CalibrationMarker>, TabularError> {
    let markers: Vec<CalibrationMarker> = numeric_rows(reader, 2)?
        .into_iter()
        .map(|(_, values)| CalibrationMarker::new(values[0], values[1]))
        .collect();
    debug!("Read {} calibration markers", markers.len());
    Ok(markers)
}

/// Read the first column of a CSV file, e.g. peak channels for a periodic calibration
pub fn read_column<P: AsRef<Path>>(path: P) -> Result<Vec<f64>, TabularError> {
    let reader = open_csv(path.as_ref())?;
    Ok(numeric_rows(reader, 1)?
        .into_iter()
        .map(|(_, values)| values[0])
        .collect())
}

/// Write a table as `<x_label>,counts`
pub fn write_csv<W: Write>(
    table: &CalibratedTable,
    x_label: &str,
    writer: W,
) -> Result<(), TabularError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([x_label, "counts"])?;
    for (x, count) in table.points() {
        csv_writer.write_record(&[x.to_string(), count.to_string()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a table to a new file
pub fn write_csv_file<P: AsRef<Path>>(
    table: &CalibratedTable,
    x_label: &str,
    path: P,
) -> Result<(), TabularError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(table, x_label, file)?;
    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

fn open_csv(path: &Path) -> Result<BufReader<File>, TabularError> {
    let file = File::open(path).map_err(|source| TabularError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(TabularError::FileType {
            path: path.to_path_buf(),
        });
    }
    Ok(BufReader::new(file))
}

/// Parse every data row into numbers, requiring at least `min_columns`.
///
/// Fields keep their column positions. Trailing empty fields are dropped and
/// fully blank rows are skipped; any other empty field is malformed.
fn numeric_rows<R: Read>(
    reader: R,
    min_columns: usize,
) -> Result<Vec<(u64, Vec<f64>)>, TabularError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map_or(index as u64 + 2, |pos| pos.line());

        let mut fields: Vec<&str> = record.iter().collect();
        while fields.last().is_some_and(|field| field.is_empty()) {
            fields.pop();
        }
        if fields.is_empty() {
            continue;
        }

        let values = fields
            .iter()
            .enumerate()
            .map(|(column, field)| {
                if field.is_empty() {
                    return Err(TabularError::MalformedRow {
                        row: line,
                        reason: format!("column {} is empty", column + 1),
                    });
                }
                field.parse::<f64>().map_err(|_| TabularError::MalformedRow {
                    row: line,
                    reason: format!("'{field}' is not a number"),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if values.len() < min_columns {
            return Err(TabularError::MalformedRow {
                row: line,
                reason: format!("expected at least {min_columns} columns, found {}", values.len()),
            });
        }
        rows.push((line, values));
    }
    Ok(rows)
}
