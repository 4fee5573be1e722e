//! Complementary-filter orientation estimator
//!
//! One `update` per available inertial sample. Behavior branches on whether
//! the robot is stationary:
//!
//! - **Stationary**: the raw sample *is* the bias (coarse recalibration);
//!   the orientation estimate is left untouched.
//! - **Active**: tilt-from-gravity is computed from the accelerometer, the
//!   gyro is integrated from the previous cycle's angles, the two are blended
//!   per axis, and the gyro bias gets a small proportional trim toward
//!   whatever the accelerometer disagrees about.
//!
//! The two bias paths are mutually exclusive within one update; the branch is
//! taken exactly once on entry.
//!
//! The integration interval comes from the configured output data rate, not
//! from measured timestamps. Jitter in the real sampling cadence is an
//! accepted approximation, not something this module tries to compensate.

use nalgebra::Vector3;

use crate::devices::traits::{AccelFullScale, GyroFullScale, OutputDataRate, RawImuSample};

/// Orientation estimate in degrees
///
/// - `pitch`: rotation about X (positive = nose up)
/// - `roll`: rotation about Y
/// - `yaw`: heading, wrapped to [0, 360)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EulerAngles {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
}

/// Estimator configuration
///
/// `kappa` weights the accelerometer's absolute tilt in the blend (small:
/// the gyro is trusted short-term). `epsilon` scales the continuous gyro-bias
/// trim. The remaining fields are the sensor's unit conversions, derived from
/// its configured ranges.
#[derive(Debug, Clone, Copy)]
pub struct EstimatorConfig {
    /// Accelerometer weight in the complementary blend
    pub kappa: f32,
    /// Gyro-bias fine-trim gain
    pub epsilon: f32,
    /// Configured output data rate (Hz)
    pub odr_hz: f32,
    /// Gyro sensitivity (mdps/LSB)
    pub mdps_per_lsb: f32,
    /// Accelerometer sensitivity (mg/LSB)
    pub mg_per_lsb: f32,
    /// Raw LSB count equal to 1 g
    pub lsb_per_g: f32,
}

impl EstimatorConfig {
    /// Build a configuration from the sensor's range/rate settings
    pub fn new(odr: OutputDataRate, gyro_fs: GyroFullScale, accel_fs: AccelFullScale) -> Self {
        Self {
            kappa: 0.01,
            epsilon: 0.0001,
            odr_hz: odr.hz(),
            mdps_per_lsb: gyro_fs.mdps_per_lsb(),
            mg_per_lsb: accel_fs.mg_per_lsb(),
            lsb_per_g: accel_fs.lsb_per_g(),
        }
    }

    /// Degrees of rotation represented by one gyro LSB over one sample
    /// interval: (1/ODR) * sensitivity, with mdps folded down to dps.
    fn sdt(&self) -> f32 {
        1.0 / self.odr_hz * self.mdps_per_lsb / 1000.0
    }
}

impl Default for EstimatorConfig {
    /// Romi defaults: 208 Hz ODR, +-500 dps, +-4 g
    fn default() -> Self {
        Self::new(
            OutputDataRate::Hz208,
            GyroFullScale::Dps500,
            AccelFullScale::G4,
        )
    }
}

/// Complementary-filter orientation estimator
pub struct OrientationEstimator {
    config: EstimatorConfig,
    angles: EulerAngles,
    prev_angles: EulerAngles,
    gyro_bias: Vector3<f32>,
    accel_bias: Vector3<f32>,
}

impl OrientationEstimator {
    /// Create an estimator with zeroed state
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            angles: EulerAngles::default(),
            prev_angles: EulerAngles::default(),
            gyro_bias: Vector3::zeros(),
            accel_bias: Vector3::zeros(),
        }
    }

    /// Current orientation estimate (degrees)
    pub fn angles(&self) -> EulerAngles {
        self.angles
    }

    /// Current gyro bias estimate (raw LSB)
    pub fn gyro_bias(&self) -> Vector3<f32> {
        self.gyro_bias
    }

    /// Current accelerometer bias estimate (raw LSB)
    pub fn accel_bias(&self) -> Vector3<f32> {
        self.accel_bias
    }

    /// Overwrite the orientation estimate (test/SITL injection)
    #[cfg(any(test, feature = "mock"))]
    pub fn force_angles(&mut self, angles: EulerAngles) {
        self.angles = angles;
        self.prev_angles = angles;
    }

    /// Process one raw sample pair
    ///
    /// `stationary` selects the branch: coarse bias recalibration at rest,
    /// fusion plus fine bias trim in motion. Never both.
    pub fn update(&mut self, sample: &RawImuSample, stationary: bool) {
        // The gyro integration below must reference the previous cycle's
        // estimate, never a partially-updated one.
        self.prev_angles = self.angles;

        if stationary {
            self.recalibrate_bias(sample);
        } else {
            self.fuse(sample);
        }
    }

    /// Coarse bias recalibration from a single at-rest sample
    ///
    /// Gravity (1 g on +Z) is excluded from the accelerometer bias so the
    /// tilt reference survives recalibration. The orientation estimate is
    /// left unchanged.
    fn recalibrate_bias(&mut self, sample: &RawImuSample) {
        self.gyro_bias = sample.gyro;
        self.accel_bias = sample.accel - Vector3::new(0.0, 0.0, self.config.lsb_per_g);
    }

    /// Active-branch fusion: accel tilt + gyro integration, blended
    fn fuse(&mut self, sample: &RawImuSample) {
        let cfg = &self.config;

        // Accelerometer tilt, in g units
        let acc = (sample.accel - self.accel_bias) * cfg.mg_per_lsb / 1000.0;
        let acc_pitch = libm::atan2f(-acc.x, acc.z).to_degrees();
        let acc_roll = libm::atan2f(acc.y, acc.z).to_degrees();

        // Gyro integration from the previous cycle's angles
        let sdt = cfg.sdt();
        let rate = sample.gyro - self.gyro_bias;
        let gyro_pitch = self.prev_angles.pitch + rate.x * sdt;
        let gyro_roll = self.prev_angles.roll + rate.y * sdt;
        let gyro_yaw = self.prev_angles.yaw + rate.z * sdt;

        // Complementary blend. Gravity carries no yaw information, so yaw is
        // pure integration.
        self.angles.pitch = cfg.kappa * acc_pitch + (1.0 - cfg.kappa) * gyro_pitch;
        self.angles.roll = cfg.kappa * acc_roll + (1.0 - cfg.kappa) * gyro_roll;
        self.angles.yaw = wrap_360(gyro_yaw);

        // Fine bias trim: walk the gyro bias toward whatever the
        // accelerometer disagrees about, pitch and roll axes only.
        self.gyro_bias.x -= cfg.epsilon / sdt * (acc_pitch - gyro_pitch);
        self.gyro_bias.y -= cfg.epsilon / sdt * (acc_roll - gyro_roll);
    }
}

/// Wrap an angle in degrees into [0, 360)
fn wrap_360(angle: f32) -> f32 {
    let wrapped = angle % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}
