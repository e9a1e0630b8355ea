use serde::Serialize;

/// Acquisition metadata from the first three records of an IEC file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IecHeader {
    /// Free-text detector / run description (line 1)
    pub description: String,
    /// Acquisition time in seconds, when the header record carries one
    pub acquisition_time_s: Option<f64>,
    /// Number of channels `N` (last token of line 2)
    pub channel_count: usize,
    /// Acquisition date and time as written by the instrument (line 3)
    pub acquired_at: Option<String>,
}

impl IecHeader {
    /// Decode the header record payload: `[time ...] N`
    pub(crate) fn parse_record(payload: &str) -> Result<(Option<f64>, usize), String> {
        let tokens: Vec<&str> = payload.split_whitespace().collect();
        let Some(last) = tokens.last() else {
            return Err("header record has no channel count".to_string());
        };
        let channel_count = last
            .parse::<usize>()
            .map_err(|_| format!("channel count '{last}' is not a non-negative integer"))?;

        let acquisition_time_s = if tokens.len() > 1 {
            tokens[0].parse::<f64>().ok().filter(|t| t.is_finite())
        } else {
            None
        };

        Ok((acquisition_time_s, channel_count))
    }
}
