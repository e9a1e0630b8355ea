use serde::{Deserialize, Serialize};

use crate::calibration::MarkerSet;

/// Record layout of an IEC 1455 text file.
///
/// Every instrument variant the lab uses is one value of this struct; the
/// reader itself has no per-instrument code paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IecFormat {
    /// Tag that starts every record (`A004`)
    pub record_prefix: String,
    /// Section tag appended to the prefix that opens the calibration block
    pub calibration_tag: String,
    /// Section tag appended to the prefix that opens the channel data block
    pub data_tag: String,
    /// `(value, channel)` pairs per calibration record
    pub marker_pair_slots_per_record: usize,
    /// Counts per data record, after the start channel
    pub data_slots_per_record: usize,
    /// Markers kept from the calibration block
    pub max_markers: usize,
    /// Largest channel count accepted from a header record
    pub max_channels: usize,
    /// Accepted file extension, compared case-insensitively
    pub extension: String,
}

impl Default for IecFormat {
    fn default() -> Self {
        Self {
            record_prefix: "A004".to_string(),
            calibration_tag: "SPARE".to_string(),
            data_tag: "USERDEFINED".to_string(),
            marker_pair_slots_per_record: 2,
            data_slots_per_record: 5,
            max_markers: MarkerSet::DEFAULT_LIMIT,
            max_channels: 1 << 20,
            extension: "IEC".to_string(),
        }
    }
}

impl IecFormat {
    /// Full tag line opening the calibration block, e.g. `A004SPARE`
    pub fn calibration_marker(&self) -> String {
        format!("{}{}", self.record_prefix, self.calibration_tag)
    }

    /// Full tag line opening the data block, e.g. `A004USERDEFINED`
    pub fn data_marker(&self) -> String {
        format!("{}{}", self.record_prefix, self.data_tag)
    }

    /// Text following the record prefix, or `None` for lines without one
    pub fn payload<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.find(&self.record_prefix)
            .map(|pos| &line[pos + self.record_prefix.len()..])
    }
}
