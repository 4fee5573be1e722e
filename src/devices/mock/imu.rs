//! Mock inertial sensor for testing

use heapless::Deque;

use crate::devices::traits::{
    AccelFullScale, GyroFullScale, InertialError, OutputDataRate, RawImuSample, RawInertial,
};

/// Capacity of the scripted sample queue
const SAMPLE_QUEUE_LEN: usize = 64;

/// Mock gyro/accelerometer pair
///
/// Samples are scripted with [`MockInertial::push_sample`];
/// `check_for_new_data` reports `true` while the queue is non-empty and
/// `read_raw` pops the front. Reading past the script repeats the last
/// sample, matching a real part whose output registers hold their value.
pub struct MockInertial {
    samples: Deque<RawImuSample, SAMPLE_QUEUE_LEN>,
    last: RawImuSample,
    gyro_fs: GyroFullScale,
    accel_fs: AccelFullScale,
    odr: OutputDataRate,
    /// Whether `initialize` has been called
    pub initialized: bool,
}

impl MockInertial {
    /// Create a mock sensor with the default Romi configuration
    pub fn new() -> Self {
        Self {
            samples: Deque::new(),
            last: RawImuSample::at_rest(AccelFullScale::G4),
            gyro_fs: GyroFullScale::Dps500,
            accel_fs: AccelFullScale::G4,
            odr: OutputDataRate::Hz208,
            initialized: false,
        }
    }

    /// Queue one scripted sample
    ///
    /// Panics if the script exceeds the queue capacity; tests size their
    /// scripts accordingly.
    pub fn push_sample(&mut self, sample: RawImuSample) {
        self.samples
            .push_back(sample)
            .expect("mock sample queue full");
    }

    /// Number of scripted samples not yet consumed
    pub fn pending(&self) -> usize {
        self.samples.len()
    }
}

impl Default for MockInertial {
    fn default() -> Self {
        Self::new()
    }
}

impl RawInertial for MockInertial {
    fn initialize(&mut self) -> Result<(), InertialError> {
        self.initialized = true;
        Ok(())
    }

    fn set_gyro_full_scale(&mut self, fs: GyroFullScale) {
        self.gyro_fs = fs;
    }

    fn set_accel_full_scale(&mut self, fs: AccelFullScale) {
        self.accel_fs = fs;
    }

    fn set_data_rate(&mut self, odr: OutputDataRate) {
        self.odr = odr;
    }

    fn gyro_full_scale(&self) -> GyroFullScale {
        self.gyro_fs
    }

    fn accel_full_scale(&self) -> AccelFullScale {
        self.accel_fs
    }

    fn data_rate(&self) -> OutputDataRate {
        self.odr
    }

    fn check_for_new_data(&mut self) -> bool {
        !self.samples.is_empty()
    }

    fn read_raw(&mut self) -> RawImuSample {
        if let Some(sample) = self.samples.pop_front() {
            self.last = sample;
        }
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_new_data_tracks_queue() {
        let mut imu = MockInertial::new();
        assert!(!imu.check_for_new_data());

        imu.push_sample(RawImuSample::at_rest(AccelFullScale::G4));
        assert!(imu.check_for_new_data());

        let _ = imu.read_raw();
        assert!(!imu.check_for_new_data());
    }

    #[test]
    fn test_read_past_script_repeats_last() {
        let mut imu = MockInertial::new();
        let sample = RawImuSample {
            gyro: Vector3::new(100.0, 0.0, 0.0),
            accel: Vector3::zeros(),
        };
        imu.push_sample(sample);

        let first = imu.read_raw();
        let second = imu.read_raw();
        assert_eq!(first.gyro.x, 100.0);
        assert_eq!(second.gyro.x, 100.0);
    }

    #[test]
    fn test_configuration_round_trip() {
        let mut imu = MockInertial::new();
        imu.set_gyro_full_scale(GyroFullScale::Dps1000);
        imu.set_data_rate(OutputDataRate::Hz104);

        assert_eq!(imu.gyro_full_scale(), GyroFullScale::Dps1000);
        assert_eq!(imu.data_rate(), OutputDataRate::Hz104);
        assert_eq!(imu.accel_full_scale(), AccelFullScale::G4);
    }
}
