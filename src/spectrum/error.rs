/// Errors that can occur when building or slicing spectrum tables
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpectrumError {
    /// x and count columns differ in length
    #[error("Length mismatch: {x_len} x-values but {counts_len} counts")]
    LengthMismatch {
        /// Number of x-values supplied
        x_len: usize,
        /// Number of counts supplied
        counts_len: usize,
    },

    /// Window bounds are not strictly increasing
    #[error("Invalid window: lower bound {lower} must be less than upper bound {upper}")]
    InvalidWindow {
        /// Requested lower bound
        lower: f64,
        /// Requested upper bound
        upper: f64,
    },
}
