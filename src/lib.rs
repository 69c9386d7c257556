#![cfg_attr(not(test), no_std)]

//! Mahony IMU - a quaternion attitude filter for flight stabilization loops
//!
//! The filter fuses gyroscope and accelerometer samples into a unit quaternion.
//! The accelerometer is taken as the gravity direction; its disagreement with
//! the gravity predicted by the current orientation feeds a proportional-integral
//! correction of the angular rate, which is then integrated once per sample
//! period.
//!
//! # Features
//!
//! - Fixed-cost update, no allocation, `#![no_std]`
//! - Runtime tunable proportional and integral gains
//! - Accelerometer-only mode matching the reference flight build
//! - Optional fast inverse square root normalization
//! - Axis remapping helpers for rotated sensor mountings
//! - `serde` feature for loading [`FilterSettings`]
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use mahony_imu::{AttitudeFilter, RawSample};
//!
//! let mut filter = AttitudeFilter::new();
//! filter.set_sample_period(2500.0); // 400 Hz loop, in microseconds
//!
//! // Gyroscope in rad/s, accelerometer in any unit
//! let sample = RawSample::new(Vector3::new(0.01, 0.0, 0.0), Vector3::new(0.0, 0.0, 9.81));
//!
//! filter.update(sample, None);
//!
//! let [w, x, y, z] = filter.components();
//! let (roll, pitch, yaw) = filter.quaternion().euler_angles();
//! ```

pub mod axes;
mod error;
mod filter;
mod math;
mod sample;
mod types;

pub use axes::{Axis, AxisMapping, SensorLayout, SignedAxis};
pub use error::{Result, SampleError};
pub use filter::AttitudeFilter;
pub use math::fast_inverse_sqrt;
pub use sample::{CHANNEL_COUNT, RawSample};
pub use types::*;
