/// Errors that can occur while building a calibration curve
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalibrationError {
    /// Not enough distinct markers to define any mapping
    #[error("Insufficient calibration markers: need at least {required} distinct channels, found {found}")]
    InsufficientMarkers {
        /// Distinct channels left after sentinel truncation and deduplication
        found: usize,
        /// Minimum required by the selected strategy
        required: usize,
    },

    /// A marker carries a value that cannot take part in a calibration
    #[error("Invalid calibration marker (channel {channel}, value {value}): {reason}")]
    InvalidMarker {
        /// Channel of the offending marker
        channel: f64,
        /// Physical value of the offending marker
        value: f64,
        /// What is wrong with it
        reason: &'static str,
    },

    /// The markers would produce a division by zero
    #[error("Degenerate calibration markers: {0}")]
    DegenerateMarkers(String),
}
