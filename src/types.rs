//! Settings, modes and diagnostic types for the attitude filter

use nalgebra::Vector3;

/// Proportional gain governing the rate of convergence to the accelerometer
pub const DEFAULT_PROPORTIONAL_GAIN: f32 = 10.0;

/// Integral gain governing the rate of convergence of the gyroscope bias estimate
pub const DEFAULT_INTEGRAL_GAIN: f32 = 0.005;

/// Half of the default 2.5 ms sample period (400 Hz), in seconds
pub const DEFAULT_HALF_SAMPLE_PERIOD: f32 = 0.00125;

/// How the gyroscope channels of a [`RawSample`](crate::RawSample) take part in an update.
///
/// The flight build this filter comes from zeroed the gyroscope inputs and let
/// only the accelerometer-driven PI correction rotate the quaternion. That
/// behavior is the default; `Integrated` is the textbook filter.
///
/// # Example
/// ```
/// use mahony_imu::{AttitudeFilter, FilterSettings, GyroscopeInput};
///
/// let settings = FilterSettings {
///     gyroscope: GyroscopeInput::Integrated,
///     ..Default::default()
/// };
/// let filter = AttitudeFilter::with_settings(settings);
/// assert_eq!(filter.settings().gyroscope, GyroscopeInput::Integrated);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GyroscopeInput {
    /// Gyroscope channels are replaced by zero before the correction step
    #[default]
    Ignored,
    /// Gyroscope channels are corrected and integrated
    Integrated,
}

/// Numeric method used to scale vectors back to unit length.
///
/// `Exact` divides by `sqrt(x² + y² + z² ...)` and is the reference behavior.
/// `FastInverseSqrt` multiplies by a bit-trick approximation with one
/// Newton-Raphson step instead. It is cheaper on cores without an FPU square
/// root but leaves the quaternion off the unit sphere by up to ~0.2%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Normalization {
    /// Divide by the exact Euclidean norm
    #[default]
    Exact,
    /// Multiply by an approximate inverse square root
    FastInverseSqrt,
}

/// Attitude filter settings
///
/// # Example
/// ```
/// use mahony_imu::{FilterSettings, GyroscopeInput, Normalization};
///
/// let settings = FilterSettings {
///     proportional_gain: 2.0,
///     integral_gain: 0.01,
///     half_sample_period: 0.005,      // 100 Hz
///     gyroscope: GyroscopeInput::Integrated,
///     normalization: Normalization::Exact,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterSettings {
    /// Kp, weight of the instantaneous accelerometer error
    pub proportional_gain: f32,
    /// Ki, weight of each error sample added to the bias accumulator
    pub integral_gain: f32,
    /// Half the update interval in seconds
    pub half_sample_period: f32,
    /// Whether measured angular rate is integrated
    pub gyroscope: GyroscopeInput,
    /// Normalization method for the accelerometer and the quaternion
    pub normalization: Normalization,
}

impl FilterSettings {
    /// Half sample period for a sample period given in microseconds
    pub fn half_period_from_micros(period_us: f32) -> f32 {
        (period_us / 1_000_000.0) / 2.0
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            proportional_gain: DEFAULT_PROPORTIONAL_GAIN,
            integral_gain: DEFAULT_INTEGRAL_GAIN,
            half_sample_period: DEFAULT_HALF_SAMPLE_PERIOD,
            gyroscope: GyroscopeInput::default(),
            normalization: Normalization::default(),
        }
    }
}

/// Filter internal states
///
/// Snapshot of the values a tuning session usually prints: the current gains,
/// the last attitude error and the accumulated bias estimate.
///
/// # Example
/// ```
/// use mahony_imu::AttitudeFilter;
///
/// let filter = AttitudeFilter::new();
/// let states = filter.internal_states();
/// assert_eq!(states.accelerometer_magnitude, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterInternalStates {
    /// Error vector (measured × expected gravity) of the last accepted sample
    pub error: Vector3<f32>,
    /// Accumulated integral error, in rad/s
    pub integral_error: Vector3<f32>,
    /// Norm of the last accepted accelerometer reading, before normalization
    ///
    /// Close to 1 g at rest. Values far from it mean the accelerometer is
    /// measuring motion as well as gravity.
    pub accelerometer_magnitude: f32,
    /// Current Kp
    pub proportional_gain: f32,
    /// Current Ki
    pub integral_gain: f32,
    /// Current half sample period in seconds
    pub half_sample_period: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = FilterSettings::default();
        assert_eq!(settings.proportional_gain, 10.0);
        assert_eq!(settings.integral_gain, 0.005);
        assert_eq!(settings.half_sample_period, 0.00125);
        assert_eq!(settings.gyroscope, GyroscopeInput::Ignored);
        assert_eq!(settings.normalization, Normalization::Exact);
    }

    #[test]
    fn test_half_period_from_micros() {
        // 2500 us is the default loop period
        let half = FilterSettings::half_period_from_micros(2500.0);
        assert!((half - DEFAULT_HALF_SAMPLE_PERIOD).abs() < 1e-9);

        let half = FilterSettings::half_period_from_micros(10_000.0);
        assert!((half - 0.005).abs() < 1e-9);
    }
}
