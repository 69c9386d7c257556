//! Raw 6-channel IMU reading consumed by the filter

use nalgebra::Vector3;

use crate::error::{Result, SampleError};

/// Number of channels in a raw reading: three gyroscope, three accelerometer
pub const CHANNEL_COUNT: usize = 6;

/// One IMU reading, already in body axes
///
/// The gyroscope is expected in radians per second and already calibrated.
/// The accelerometer can use any unit since the filter only looks at its
/// direction.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use mahony_imu::RawSample;
///
/// let sample = RawSample::from_channels([0.01, 0.0, -0.02, 0.0, 0.0, 9.81]);
/// assert_eq!(sample.gyroscope, Vector3::new(0.01, 0.0, -0.02));
/// assert_eq!(sample.accelerometer, Vector3::new(0.0, 0.0, 9.81));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    /// Angular rate in rad/s
    pub gyroscope: Vector3<f32>,
    /// Specific force, arbitrary consistent units
    pub accelerometer: Vector3<f32>,
}

impl RawSample {
    pub fn new(gyroscope: Vector3<f32>, accelerometer: Vector3<f32>) -> Self {
        Self {
            gyroscope,
            accelerometer,
        }
    }

    /// Split a channel array into gyroscope (0..3) and accelerometer (3..6)
    pub fn from_channels(channels: [f32; CHANNEL_COUNT]) -> Self {
        Self {
            gyroscope: Vector3::new(channels[0], channels[1], channels[2]),
            accelerometer: Vector3::new(channels[3], channels[4], channels[5]),
        }
    }

    /// Channels in the same order [`from_channels`](Self::from_channels) reads them
    pub fn channels(&self) -> [f32; CHANNEL_COUNT] {
        [
            self.gyroscope.x,
            self.gyroscope.y,
            self.gyroscope.z,
            self.accelerometer.x,
            self.accelerometer.y,
            self.accelerometer.z,
        ]
    }

    /// True when every accelerometer channel is exactly zero
    ///
    /// A sensor that lost its gravity signal reports this; the filter skips
    /// such samples.
    pub fn accelerometer_is_degenerate(&self) -> bool {
        self.accelerometer.x == 0.0 && self.accelerometer.y == 0.0 && self.accelerometer.z == 0.0
    }
}

impl TryFrom<&[f32]> for RawSample {
    type Error = SampleError;

    fn try_from(channels: &[f32]) -> Result<Self> {
        let array: [f32; CHANNEL_COUNT] = channels
            .try_into()
            .map_err(|_| SampleError::ChannelCount {
                actual: channels.len(),
            })?;
        Ok(Self::from_channels(array))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_channels_order() {
        let sample = RawSample::from_channels([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(sample.gyroscope, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(sample.accelerometer, Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(sample.channels(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_try_from_slice() {
        let data = [0.1f32, 0.2, 0.3, 0.0, 0.0, 1.0];
        let sample = RawSample::try_from(&data[..]).unwrap();
        assert_eq!(sample.accelerometer.z, 1.0);
    }

    #[test]
    fn test_try_from_wrong_length() {
        let short = [0.0f32; 5];
        assert_eq!(
            RawSample::try_from(&short[..]),
            Err(SampleError::ChannelCount { actual: 5 })
        );

        // 9-axis frames are not accepted either
        let long = [0.0f32; 9];
        assert_eq!(
            RawSample::try_from(&long[..]),
            Err(SampleError::ChannelCount { actual: 9 })
        );
    }

    #[test]
    fn test_degenerate_accelerometer() {
        let zero = RawSample::new(Vector3::new(1.0, 1.0, 1.0), Vector3::zeros());
        assert!(zero.accelerometer_is_degenerate());

        // Negative zero still compares equal to zero
        let negative_zero = RawSample::new(Vector3::zeros(), Vector3::new(-0.0, 0.0, -0.0));
        assert!(negative_zero.accelerometer_is_degenerate());

        let tiny = RawSample::new(Vector3::zeros(), Vector3::new(0.0, 1e-30, 0.0));
        assert!(!tiny.accelerometer_is_degenerate());
    }
}
