use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};

use super::{IecError, IecFormat, IecHeader, IecSpectrum};
use crate::calibration::{CalibrationMarker, MarkerPush, MarkerSet};
use crate::spectrum::ChannelTable;

/// Line of the description record
const DESCRIPTION_LINE: usize = 1;
/// Line of the header record holding the channel count
const HEADER_LINE: usize = 2;
/// Line of the acquisition date record
const DATE_LINE: usize = 3;

/// Section of the file the reader is in; only ever moves forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Header,
    Calibration,
    Data,
}

/// Reader for IEC 1455 spectrum files.
///
/// Holds only the record layout; each call to [`parse`](Self::parse) or
/// [`open`](Self::open) keeps its own state, so one reader can be shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct IecReader {
    format: IecFormat,
}

impl IecReader {
    /// Reader for the default `A004` layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader for a custom record layout
    pub fn with_format(format: IecFormat) -> Self {
        Self { format }
    }

    /// Record layout in use
    pub fn format(&self) -> &IecFormat {
        &self.format
    }

    /// Open and parse a file.
    ///
    /// The file is opened before its extension is checked, so a missing file
    /// reports [`IecError::NotFound`] whatever its name.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<IecSpectrum, IecError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| IecError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let extension_ok = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.format.extension));
        if !extension_ok {
            return Err(IecError::FileType {
                path: path.to_path_buf(),
                expected: self.format.extension.clone(),
            });
        }

        info!("Reading IEC spectrum: {}", path.display());
        self.parse(BufReader::new(file))
    }

    /// Parse records from any buffered source, one line at a time
    pub fn parse<R: BufRead>(&self, mut reader: R) -> Result<IecSpectrum, IecError> {
        let mut state = ParseState::new(&self.format);
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            let line = String::from_utf8_lossy(&buf);
            state.consume(line_no, line.trim_end_matches(['\r', '\n']))?;
        }

        state.finish()
    }
}

/// Call-local parser state
struct ParseState<'a> {
    format: &'a IecFormat,
    calibration_marker: String,
    data_marker: String,
    section: Section,
    header: Option<IecHeader>,
    header_seen: bool,
    table: ChannelTable,
    markers: MarkerSet,
    data_records: usize,
    skipped_slots: usize,
    skipped_markers: usize,
}

impl<'a> ParseState<'a> {
    fn new(format: &'a IecFormat) -> Self {
        Self {
            format,
            calibration_marker: format.calibration_marker(),
            data_marker: format.data_marker(),
            section: Section::Header,
            header: None,
            header_seen: false,
            table: ChannelTable::default(),
            markers: MarkerSet::new(format.max_markers),
            data_records: 0,
            skipped_slots: 0,
            skipped_markers: 0,
        }
    }

    fn payload<'l>(&self, line: &'l str) -> &'l str {
        self.format.payload(line).unwrap_or(line)
    }

    fn consume(&mut self, line_no: usize, line: &str) -> Result<(), IecError> {
        match line_no {
            DESCRIPTION_LINE => {
                self.header = Some(IecHeader {
                    description: self.payload(line).trim().to_string(),
                    ..Default::default()
                });
                return Ok(());
            }
            HEADER_LINE => return self.header_record(line_no, line),
            _ => {}
        }

        if line.contains(&self.calibration_marker) {
            self.enter(Section::Calibration, line_no);
            return Ok(());
        }
        if line.contains(&self.data_marker) {
            self.enter(Section::Data, line_no);
            return Ok(());
        }

        if line_no == DATE_LINE {
            let date = self.payload(line).trim();
            if let Some(header) = self.header.as_mut() {
                header.acquired_at = (!date.is_empty()).then(|| date.to_string());
            }
            return Ok(());
        }

        let Some(payload) = self.format.payload(line) else {
            return Ok(());
        };

        match self.section {
            Section::Header => Ok(()),
            Section::Calibration => self.calibration_record(line_no, payload),
            Section::Data => self.data_record(line_no, payload),
        }
    }

    fn enter(&mut self, section: Section, line_no: usize) {
        if section > self.section {
            debug!("Line {}: entering {:?} section", line_no, section);
            self.section = section;
        } else {
            debug!(
                "Line {}: ignoring {:?} tag while in {:?} section",
                line_no, section, self.section
            );
        }
    }

    fn header_record(&mut self, line_no: usize, line: &str) -> Result<(), IecError> {
        let (acquisition_time_s, channel_count) = IecHeader::parse_record(self.payload(line))
            .map_err(|reason| IecError::malformed(line_no, reason))?;
        if channel_count > self.format.max_channels {
            return Err(IecError::malformed(
                line_no,
                format!(
                    "channel count {} exceeds the limit of {}",
                    channel_count, self.format.max_channels
                ),
            ));
        }

        let header = self.header.get_or_insert_with(IecHeader::default);
        header.acquisition_time_s = acquisition_time_s;
        header.channel_count = channel_count;
        self.table = ChannelTable::zeroed(channel_count);
        self.header_seen = true;
        Ok(())
    }

    fn calibration_record(&mut self, line_no: usize, payload: &str) -> Result<(), IecError> {
        if self.markers.is_closed() {
            return Ok(());
        }

        let tokens: Vec<&str> = payload.split_whitespace().collect();
        let channel_count = self.table.len() as f64;

        for slot in 0..self.format.marker_pair_slots_per_record {
            let value = parse_number(&tokens, 2 * slot, line_no, "calibration value")?;
            let channel = parse_number(&tokens, 2 * slot + 1, line_no, "calibration channel")?;
            let marker = CalibrationMarker::new(channel, value);

            if !marker.is_sentinel() && channel >= channel_count {
                debug!(
                    "Line {}: discarding marker at channel {} beyond {} channels",
                    line_no, channel, channel_count
                );
                self.skipped_markers += 1;
                continue;
            }

            match self.markers.push(marker) {
                MarkerPush::Accepted => {}
                MarkerPush::Terminated => {
                    debug!("Line {}: end of calibration markers", line_no);
                    break;
                }
                MarkerPush::Full | MarkerPush::Closed => {
                    debug!(
                        "Line {}: marker limit of {} reached",
                        line_no,
                        self.markers.limit()
                    );
                    break;
                }
            }
        }
        Ok(())
    }

    fn data_record(&mut self, line_no: usize, payload: &str) -> Result<(), IecError> {
        let tokens: Vec<&str> = payload.split_whitespace().collect();
        let Some(first) = tokens.first() else {
            return Err(IecError::malformed(line_no, "data record has no start channel"));
        };
        let start = first.parse::<usize>().map_err(|_| {
            IecError::malformed(
                line_no,
                format!("start channel '{first}' is not a non-negative integer"),
            )
        })?;

        self.data_records += 1;
        let slots = self.format.data_slots_per_record;

        for offset in 0..slots {
            let channel = start.saturating_add(offset);
            if channel >= self.table.len() {
                self.skipped_slots += slots - offset;
                debug!(
                    "Line {}: skipping {} slots from channel {} beyond {} channels",
                    line_no,
                    slots - offset,
                    channel,
                    self.table.len()
                );
                break;
            }

            let count = parse_number(&tokens, offset + 1, line_no, "channel count")?;
            if !count.is_finite() || count < 0.0 {
                return Err(IecError::malformed(
                    line_no,
                    format!("count {count} for channel {channel} is negative or not finite"),
                ));
            }
            self.table.set_count(channel, count);
        }
        Ok(())
    }

    fn finish(self) -> Result<IecSpectrum, IecError> {
        let header_seen = self.header_seen;
        let Some(header) = self.header.filter(|_| header_seen) else {
            return Err(IecError::malformed(HEADER_LINE, "missing header record"));
        };

        if self.data_records == 0 {
            warn!("No data records found; all {} channels are zero", self.table.len());
        }
        if self.skipped_slots > 0 || self.skipped_markers > 0 {
            debug!(
                "Skipped {} data slots and {} markers beyond the channel range",
                self.skipped_slots, self.skipped_markers
            );
        }
        info!(
            "Parsed {} channels, {} data records, {} calibration markers",
            self.table.len(),
            self.data_records,
            self.markers.len()
        );

        Ok(IecSpectrum {
            header,
            table: self.table,
            markers: self.markers.into_vec(),
        })
    }
}

fn parse_number(tokens: &[&str], index: usize, line_no: usize, what: &str) -> Result<f64, IecError> {
    let token = tokens
        .get(index)
        .ok_or_else(|| IecError::malformed(line_no, format!("missing {what}")))?;
    token
        .parse::<f64>()
        .map_err(|_| IecError::malformed(line_no, format!("{what} '{token}' is not a number")))
}
