//! Quaternion attitude filter with proportional-integral drift correction

use core::time::Duration;

use log::{debug, info, trace};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::math::unit_scale;
use crate::sample::RawSample;
use crate::types::{FilterInternalStates, FilterSettings, GyroscopeInput};

/// Attitude filter
///
/// Fuses angular rate and accelerometer readings into a unit quaternion that
/// rotates body axes into the reference frame. The accelerometer is trusted as
/// the gravity direction; the angle between it and the gravity predicted by the
/// current orientation drives a PI correction of the angular rate, which is then
/// integrated over half the sample period.
///
/// The filter owns all of its state and is updated through `&mut self`. Share
/// it between tasks only behind a mutex: a reader observing the quaternion in
/// the middle of an update would see a torn value.
#[derive(Debug, Clone)]
pub struct AttitudeFilter {
    settings: FilterSettings,
    /// Body to reference rotation (w, x, y, z)
    quaternion: UnitQuaternion<f32>,
    /// Accumulated `error * Ki`, never clamped
    integral_error: Vector3<f32>,
    /// Error of the last accepted sample, kept for diagnostics
    error: Vector3<f32>,
    /// Squared norm of the last accepted accelerometer reading
    accelerometer_norm_squared: f32,
}

impl AttitudeFilter {
    /// Create a filter with default gains and sample period
    pub fn new() -> Self {
        Self::with_settings(FilterSettings::default())
    }

    /// Create a filter with the given settings
    pub fn with_settings(settings: FilterSettings) -> Self {
        Self {
            settings,
            quaternion: UnitQuaternion::identity(),
            integral_error: Vector3::zeros(),
            error: Vector3::zeros(),
            accelerometer_norm_squared: 0.0,
        }
    }

    /// Return to the identity orientation and clear the integral error
    ///
    /// Gains, sample period and modes are kept. Call this when the integral
    /// term has wound up under a sustained disturbance.
    pub fn reset(&mut self) {
        info!("attitude filter reset");
        self.quaternion = UnitQuaternion::identity();
        self.integral_error = Vector3::zeros();
        self.error = Vector3::zeros();
        self.accelerometer_norm_squared = 0.0;
    }

    /// Replace all settings at once
    pub fn set_settings(&mut self, settings: FilterSettings) {
        debug!(
            "attitude filter settings: kp={} ki={} half_period={}s gyroscope={:?} normalization={:?}",
            settings.proportional_gain,
            settings.integral_gain,
            settings.half_sample_period,
            settings.gyroscope,
            settings.normalization
        );
        self.settings = settings;
    }

    /// Current settings
    pub fn settings(&self) -> FilterSettings {
        self.settings
    }

    /// Run one filter step
    ///
    /// # Arguments
    /// * `sample` - Gyroscope (rad/s) and accelerometer reading in body axes
    /// * `elapsed` - Sample period for this step only; `None` uses the
    ///   configured period
    ///
    /// A sample whose accelerometer is exactly `(0, 0, 0)` carries no gravity
    /// information and is skipped without touching any state. Every other
    /// sample is processed, however extreme.
    ///
    /// # Example
    /// ```
    /// use nalgebra::Vector3;
    /// use mahony_imu::{AttitudeFilter, RawSample};
    ///
    /// let mut filter = AttitudeFilter::new();
    /// let sample = RawSample::new(Vector3::zeros(), Vector3::new(0.0, 0.2, 0.98));
    ///
    /// filter.update(sample, None);
    ///
    /// let [w, x, y, z] = filter.components();
    /// assert!(((w * w + x * x + y * y + z * z) - 1.0).abs() < 1e-5);
    /// ```
    pub fn update(&mut self, sample: RawSample, elapsed: Option<Duration>) {
        if sample.accelerometer_is_degenerate() {
            trace!("accelerometer reads (0, 0, 0), sample skipped");
            return;
        }

        let half_period = match elapsed {
            Some(period) => period.as_secs_f32() / 2.0,
            None => self.settings.half_sample_period,
        };

        let gyroscope = match self.settings.gyroscope {
            GyroscopeInput::Integrated => sample.gyroscope,
            GyroscopeInput::Ignored => Vector3::zeros(),
        };

        let accelerometer = sample.accelerometer;
        let norm_squared = accelerometer.x * accelerometer.x
            + accelerometer.y * accelerometer.y
            + accelerometer.z * accelerometer.z;
        let scale = unit_scale(norm_squared, self.settings.normalization);
        let measured = accelerometer.map(|value| scale.apply(value));

        let error = measured.cross(&self.gravity());

        self.integral_error += error * self.settings.integral_gain;

        let corrected = Vector3::new(
            gyroscope.x + self.settings.proportional_gain * error.x + self.integral_error.x,
            gyroscope.y + self.settings.proportional_gain * error.y + self.integral_error.y,
            gyroscope.z + self.settings.proportional_gain * error.z + self.integral_error.z,
        );

        self.integrate(corrected, half_period);

        self.error = error;
        self.accelerometer_norm_squared = norm_squared;
    }

    /// Orientation as a unit quaternion
    pub fn quaternion(&self) -> UnitQuaternion<f32> {
        self.quaternion
    }

    /// Orientation components in `[w, x, y, z]` order
    pub fn components(&self) -> [f32; 4] {
        let q = self.quaternion.as_ref();
        [q.w, q.i, q.j, q.k]
    }

    /// Seed the orientation, e.g. from a previous run
    pub fn set_quaternion(&mut self, quaternion: UnitQuaternion<f32>) {
        self.quaternion = quaternion;
    }

    /// Accumulated gyroscope bias estimate in rad/s
    pub fn integral_error(&self) -> Vector3<f32> {
        self.integral_error
    }

    /// Gravity direction in body axes predicted by the current orientation
    ///
    /// Third row of the rotation matrix. Equals `(0, 0, 1)` at identity.
    pub fn gravity(&self) -> Vector3<f32> {
        let q = self.quaternion.as_ref();
        let (q0, q1, q2, q3) = (q.w, q.i, q.j, q.k);

        Vector3::new(
            2.0 * (q1 * q3 - q0 * q2),
            2.0 * (q0 * q1 + q2 * q3),
            q0 * q0 - q1 * q1 - q2 * q2 + q3 * q3,
        )
    }

    /// Proportional gain Kp
    pub fn proportional_gain(&self) -> f32 {
        self.settings.proportional_gain
    }

    /// Set Kp, effective from the next update. Not validated.
    pub fn set_proportional_gain(&mut self, gain: f32) {
        debug!("proportional gain {} -> {}", self.settings.proportional_gain, gain);
        self.settings.proportional_gain = gain;
    }

    /// Integral gain Ki
    pub fn integral_gain(&self) -> f32 {
        self.settings.integral_gain
    }

    /// Set Ki, effective from the next update. Not validated.
    pub fn set_integral_gain(&mut self, gain: f32) {
        debug!("integral gain {} -> {}", self.settings.integral_gain, gain);
        self.settings.integral_gain = gain;
    }

    /// Set the sample period in microseconds
    ///
    /// Until this is called the compiled-in default of 2.5 ms is used.
    pub fn set_sample_period(&mut self, period_us: f32) {
        self.settings.half_sample_period = FilterSettings::half_period_from_micros(period_us);
        debug!(
            "sample period {}us, half period {}s",
            period_us, self.settings.half_sample_period
        );
    }

    /// Half the sample period in seconds
    pub fn half_sample_period(&self) -> f32 {
        self.settings.half_sample_period
    }

    /// Get internal filter states
    pub fn internal_states(&self) -> FilterInternalStates {
        FilterInternalStates {
            error: self.error,
            integral_error: self.integral_error,
            accelerometer_magnitude: libm::sqrtf(self.accelerometer_norm_squared),
            proportional_gain: self.settings.proportional_gain,
            integral_gain: self.settings.integral_gain,
            half_sample_period: self.settings.half_sample_period,
        }
    }

    /// First-order integration of `q_dot = 0.5 * q ⊗ (0, rate)` followed by renormalization
    ///
    /// `half_period` carries the 0.5 factor. Every component is computed from
    /// the quaternion as it was before this step.
    fn integrate(&mut self, rate: Vector3<f32>, half_period: f32) {
        let q = self.quaternion.as_ref();
        let (q0, q1, q2, q3) = (q.w, q.i, q.j, q.k);
        let (gx, gy, gz) = (rate.x, rate.y, rate.z);

        let w = q0 + (-q1 * gx - q2 * gy - q3 * gz) * half_period;
        let x = q1 + (q0 * gx + q2 * gz - q3 * gy) * half_period;
        let y = q2 + (q0 * gy - q1 * gz + q3 * gx) * half_period;
        let z = q3 + (q0 * gz + q1 * gy - q2 * gx) * half_period;

        let scale = unit_scale(w * w + x * x + y * y + z * z, self.settings.normalization);

        self.quaternion = UnitQuaternion::new_unchecked(Quaternion::new(
            scale.apply(w),
            scale.apply(x),
            scale.apply(y),
            scale.apply(z),
        ));
    }
}

impl Default for AttitudeFilter {
    fn default() -> Self {
        Self::new()
    }
}
