//! Sensor-to-body axis mapping applied by the caller before an update
//!
//! The filter never remaps axes. Boards usually mount the IMU rotated relative
//! to the airframe, so readings are permuted and sign-flipped first.
//!
//! # Example
//! ```
//! use nalgebra::Vector3;
//! use mahony_imu::{AxisMapping, SignedAxis};
//!
//! // Body X = +sensor Y, body Y = -sensor X, body Z = +sensor Z
//! let mapping = AxisMapping::new([SignedAxis::PY, SignedAxis::NX, SignedAxis::PZ]);
//! let body = mapping.apply(Vector3::new(1.0, 2.0, 3.0));
//! assert_eq!(body, Vector3::new(2.0, -1.0, 3.0));
//! ```

use nalgebra::Vector3;

use crate::sample::RawSample;

/// Sensor axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Sensor axis feeding one body axis, possibly inverted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedAxis {
    pub axis: Axis,
    pub negated: bool,
}

impl SignedAxis {
    pub const PX: Self = Self::positive(Axis::X);
    pub const PY: Self = Self::positive(Axis::Y);
    pub const PZ: Self = Self::positive(Axis::Z);
    pub const NX: Self = Self::negative(Axis::X);
    pub const NY: Self = Self::negative(Axis::Y);
    pub const NZ: Self = Self::negative(Axis::Z);

    pub const fn positive(axis: Axis) -> Self {
        Self {
            axis,
            negated: false,
        }
    }

    pub const fn negative(axis: Axis) -> Self {
        Self {
            axis,
            negated: true,
        }
    }

    #[inline]
    fn read(self, sensor: &Vector3<f32>) -> f32 {
        let value = sensor[self.axis.index()];
        if self.negated { -value } else { value }
    }
}

/// Where each body axis (X, Y, Z in that order) reads from in sensor coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMapping {
    body: [SignedAxis; 3],
}

impl AxisMapping {
    /// Body axes equal sensor axes
    pub const IDENTITY: Self = Self::new([SignedAxis::PX, SignedAxis::PY, SignedAxis::PZ]);

    pub const fn new(body: [SignedAxis; 3]) -> Self {
        Self { body }
    }

    /// Remap a sensor-frame vector into body axes
    #[inline]
    pub fn apply(&self, sensor: Vector3<f32>) -> Vector3<f32> {
        Vector3::new(
            self.body[0].read(&sensor),
            self.body[1].read(&sensor),
            self.body[2].read(&sensor),
        )
    }

    /// Whether every sensor axis is used exactly once
    ///
    /// Mappings that read the same sensor axis twice are accepted by
    /// [`apply`](Self::apply) but do not describe a physical mounting.
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; 3];
        for signed in self.body {
            seen[signed.axis.index()] = true;
        }
        seen.iter().all(|&used| used)
    }
}

impl Default for AxisMapping {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Axis mappings for both sensors of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorLayout {
    pub gyroscope: AxisMapping,
    pub accelerometer: AxisMapping,
}

impl SensorLayout {
    /// No remapping
    pub const IDENTITY: Self = Self {
        gyroscope: AxisMapping::IDENTITY,
        accelerometer: AxisMapping::IDENTITY,
    };

    /// Quadcopter flight board: both sensors `(+Y, -X, +Z)`
    ///
    /// Gyroscope and accelerometer share one chip, so they share one rotation.
    pub const QUADCOPTER_BOARD: Self = Self::rigid(AxisMapping::new([
        SignedAxis::PY,
        SignedAxis::NX,
        SignedAxis::PZ,
    ]));

    /// Same mapping for both sensors, as for a single 6-axis chip
    pub const fn rigid(mapping: AxisMapping) -> Self {
        Self {
            gyroscope: mapping,
            accelerometer: mapping,
        }
    }

    /// Remap both triples of a sensor-frame sample into body axes
    pub fn apply(&self, sample: RawSample) -> RawSample {
        RawSample::new(
            self.gyroscope.apply(sample.gyroscope),
            self.accelerometer.apply(sample.accelerometer),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        let sensor = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(AxisMapping::IDENTITY.apply(sensor), sensor);
        assert_eq!(AxisMapping::default(), AxisMapping::IDENTITY);
    }

    #[test]
    fn test_mapping_preserves_magnitude() {
        let sensor = Vector3::new(1.0f32, -2.0, 3.0);
        let mapping = AxisMapping::new([SignedAxis::NZ, SignedAxis::PX, SignedAxis::NY]);
        let body = mapping.apply(sensor);

        assert_eq!(body, Vector3::new(-3.0, 1.0, 2.0));
        assert!((body.norm() - sensor.norm()).abs() < 1e-6);
    }

    #[test]
    fn test_is_permutation() {
        assert!(AxisMapping::IDENTITY.is_permutation());
        assert!(SensorLayout::QUADCOPTER_BOARD.gyroscope.is_permutation());
        assert!(SensorLayout::QUADCOPTER_BOARD.accelerometer.is_permutation());

        let repeated = AxisMapping::new([SignedAxis::PX, SignedAxis::NX, SignedAxis::PZ]);
        assert!(!repeated.is_permutation());
    }

    #[test]
    fn test_quadcopter_board_layout() {
        // Raw driver order: gyro x, y, z then accel x, y, z
        let raw = RawSample::from_channels([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let body = SensorLayout::QUADCOPTER_BOARD.apply(raw);

        assert_eq!(body.gyroscope, Vector3::new(2.0, -1.0, 3.0));
        assert_eq!(body.accelerometer, Vector3::new(5.0, -4.0, 6.0));
    }

    #[test]
    fn test_board_layout_is_a_rotation() {
        let layout = SensorLayout::QUADCOPTER_BOARD;
        assert_eq!(layout.gyroscope, layout.accelerometer);

        // Proper rotation: handedness survives, so cross products map through
        let a = Vector3::new(0.3f32, -1.2, 0.7);
        let b = Vector3::new(-0.4f32, 0.5, 2.0);
        let mapping = layout.accelerometer;
        let mapped_cross = mapping.apply(a.cross(&b));
        let cross_mapped = mapping.apply(a).cross(&mapping.apply(b));
        assert!((mapped_cross - cross_mapped).norm() < 1e-6);
    }

    #[test]
    fn test_zero_vector() {
        let layout = SensorLayout::QUADCOPTER_BOARD;
        let body = layout.apply(RawSample::new(Vector3::zeros(), Vector3::zeros()));
        assert!(body.accelerometer_is_degenerate());
    }
}
