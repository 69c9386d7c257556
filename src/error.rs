//! Error types

use thiserror::Error;

/// Result type for building filter inputs
pub type Result<T> = core::result::Result<T, SampleError>;

/// Errors raised while turning untyped sensor data into a [`RawSample`](crate::RawSample)
///
/// The filter update itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SampleError {
    /// The channel slice did not hold exactly one gyroscope and one accelerometer triple
    #[error("expected 6 sensor channels, got {actual}")]
    ChannelCount { actual: usize },
}
