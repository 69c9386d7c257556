use mahony_imu::{AttitudeFilter, RawSample, SensorLayout};

const SAMPLE_PERIOD_US: f32 = 2500.0; // 400 Hz stabilization loop

fn main() {
    let mut filter = AttitudeFilter::new();
    filter.set_sample_period(SAMPLE_PERIOD_US);

    let layout = SensorLayout::QUADCOPTER_BOARD;

    for _ in 0..10 {
        // this loop should repeat each time the IMU driver delivers a reading
        let channels = [0.0, 0.0, 0.0, 0.0, 0.0, 1.0]; // replace with gyro (rad/s) and accel channels
        let sample = layout.apply(RawSample::from_channels(channels));

        filter.update(sample, None);

        let (roll, pitch, yaw) = filter.quaternion().euler_angles();

        println!(
            "Roll: {:.2}, Pitch: {:.2}, Yaw: {:.2}",
            roll.to_degrees(),
            pitch.to_degrees(),
            yaw.to_degrees()
        );
    }
}
