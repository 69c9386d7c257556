//! Loading tuning settings through the `serde` feature
#![cfg(feature = "serde")]

use std::error::Error;

use mahony_imu::{AttitudeFilter, FilterSettings, GyroscopeInput, Normalization};

const TUNING_TABLE: &str = "\
proportional_gain,integral_gain,half_sample_period,gyroscope,normalization
10.0,0.005,0.00125,Ignored,Exact
2.0,0.01,0.005,Integrated,FastInverseSqrt
";

#[test]
fn test_settings_from_tuning_table() -> Result<(), Box<dyn Error>> {
    let mut reader = csv::Reader::from_reader(TUNING_TABLE.as_bytes());
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<FilterSettings>, _>>()?;

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], FilterSettings::default());

    let tuned = rows[1];
    assert_eq!(tuned.proportional_gain, 2.0);
    assert_eq!(tuned.integral_gain, 0.01);
    assert_eq!(tuned.half_sample_period, 0.005);
    assert_eq!(tuned.gyroscope, GyroscopeInput::Integrated);
    assert_eq!(tuned.normalization, Normalization::FastInverseSqrt);

    let filter = AttitudeFilter::with_settings(tuned);
    assert_eq!(filter.proportional_gain(), 2.0);
    Ok(())
}

#[test]
fn test_unknown_mode_is_rejected() {
    let table = "\
proportional_gain,integral_gain,half_sample_period,gyroscope,normalization
1.0,0.0,0.001,Sometimes,Exact
";
    let mut reader = csv::Reader::from_reader(table.as_bytes());
    let result: Result<Vec<FilterSettings>, _> = reader.deserialize().collect();
    assert!(result.is_err());
}
