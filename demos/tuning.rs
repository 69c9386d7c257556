//! Compares how fast different gain pairs level a tilted estimate.
//!
//! Prints one line per gain pair, like a bench tuning session over a serial port.

use mahony_imu::{AttitudeFilter, FilterSettings, GyroscopeInput, RawSample};
use nalgebra::Vector3;

const SAMPLE_PERIOD_US: f32 = 2500.0;
const TOLERANCE_DEG: f32 = 0.5;
const MAX_UPDATES: usize = 40_000;

fn main() {
    // Board held at 20 degrees of roll and 10 degrees of pitch
    let roll = 20.0f32.to_radians();
    let pitch = 10.0f32.to_radians();
    let accelerometer = Vector3::new(
        -pitch.sin(),
        roll.sin() * pitch.cos(),
        roll.cos() * pitch.cos(),
    );
    let sample = RawSample::new(Vector3::new(0.02, -0.01, 0.0), accelerometer);

    let gains = [(1.0, 0.0), (10.0, 0.0), (10.0, 0.005), (10.0, 0.05), (30.0, 0.005)];

    for gyroscope in [GyroscopeInput::Ignored, GyroscopeInput::Integrated] {
        println!("gyroscope: {:?}", gyroscope);

        for (kp, ki) in gains {
            let mut filter = AttitudeFilter::with_settings(FilterSettings {
                proportional_gain: kp,
                integral_gain: ki,
                gyroscope,
                ..Default::default()
            });
            filter.set_sample_period(SAMPLE_PERIOD_US);

            let settled = (1..=MAX_UPDATES).find(|_| {
                filter.update(sample, None);
                let angle = filter.gravity().angle(&accelerometer).to_degrees();
                angle < TOLERANCE_DEG
            });

            let states = filter.internal_states();
            match settled {
                Some(updates) => println!(
                    "  kp {:>5.1} ki {:>6.3}: within {} deg after {} updates ({:.3} s), bias estimate {:.4?}",
                    kp,
                    ki,
                    TOLERANCE_DEG,
                    updates,
                    updates as f32 * SAMPLE_PERIOD_US / 1_000_000.0,
                    states.integral_error.as_slice()
                ),
                None => println!(
                    "  kp {:>5.1} ki {:>6.3}: not settled after {} updates, error {:.4}",
                    kp,
                    ki,
                    MAX_UPDATES,
                    states.error.norm()
                ),
            }
        }
    }
}
