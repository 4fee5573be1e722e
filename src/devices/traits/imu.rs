//! Raw Inertial Sensor Trait
//!
//! Device-independent interface for an LSM6-class gyro/accelerometer pair
//! without on-chip fusion. The orientation estimator consumes raw LSB counts
//! and converts them itself, using the per-LSB scale constants implied by the
//! configured full-scale ranges.
//!
//! ## Usage
//!
//! ```ignore
//! use romi_grid::devices::traits::{RawInertial, GyroFullScale, AccelFullScale, OutputDataRate};
//!
//! fn setup<I: RawInertial>(imu: &mut I) -> Result<(), &'static str> {
//!     imu.initialize()?;
//!     imu.set_gyro_full_scale(GyroFullScale::Dps500);
//!     imu.set_accel_full_scale(AccelFullScale::G4);
//!     imu.set_data_rate(OutputDataRate::Hz208);
//!     Ok(())
//! }
//! ```

use nalgebra::Vector3;

/// Inertial sensor error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InertialError {
    /// I2C/SPI communication failed
    BusError,
    /// Driver not initialized
    NotInitialized,
    /// Sensor identity check failed (wrong WHO_AM_I)
    WrongDevice,
}

/// Gyroscope full-scale range
///
/// Each range fixes the sensitivity of the 16-bit output, in
/// milli-degrees-per-second per LSB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroFullScale {
    /// ±245 °/s
    Dps245,
    /// ±500 °/s
    Dps500,
    /// ±1000 °/s
    Dps1000,
    /// ±2000 °/s
    Dps2000,
}

impl GyroFullScale {
    /// Sensitivity in mdps/LSB for this range
    pub fn mdps_per_lsb(self) -> f32 {
        match self {
            GyroFullScale::Dps245 => 8.75,
            GyroFullScale::Dps500 => 17.50,
            GyroFullScale::Dps1000 => 35.0,
            GyroFullScale::Dps2000 => 70.0,
        }
    }
}

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelFullScale {
    /// ±2 g
    G2,
    /// ±4 g
    G4,
    /// ±8 g
    G8,
    /// ±16 g
    G16,
}

impl AccelFullScale {
    /// Sensitivity in mg/LSB for this range
    pub fn mg_per_lsb(self) -> f32 {
        match self {
            AccelFullScale::G2 => 0.061,
            AccelFullScale::G4 => 0.122,
            AccelFullScale::G8 => 0.244,
            AccelFullScale::G16 => 0.488,
        }
    }

    /// Raw LSB count corresponding to 1 g at this range
    pub fn lsb_per_g(self) -> f32 {
        1000.0 / self.mg_per_lsb()
    }
}

/// Output data rate shared by gyro and accelerometer
///
/// The estimator derives its integration interval from this configured rate,
/// not from measured timestamps. Jitter in the actual sampling cadence is an
/// accepted approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputDataRate {
    Hz52,
    Hz104,
    Hz208,
    Hz416,
}

impl OutputDataRate {
    /// Rate in Hz
    pub fn hz(self) -> f32 {
        match self {
            OutputDataRate::Hz52 => 52.0,
            OutputDataRate::Hz104 => 104.0,
            OutputDataRate::Hz208 => 208.0,
            OutputDataRate::Hz416 => 416.0,
        }
    }
}

/// One raw gyro + accelerometer sample pair
///
/// Values are signed LSB counts straight from the output registers, widened
/// to f32 for the estimator's math. No bias or scale has been applied.
#[derive(Debug, Clone, Copy)]
pub struct RawImuSample {
    /// Angular rate, LSB counts (x = pitch axis, y = roll axis, z = yaw axis)
    pub gyro: Vector3<f32>,
    /// Specific force, LSB counts
    pub accel: Vector3<f32>,
}

impl Default for RawImuSample {
    fn default() -> Self {
        Self {
            gyro: Vector3::zeros(),
            accel: Vector3::zeros(),
        }
    }
}

impl RawImuSample {
    /// A plausible at-rest sample: zero rates, 1 g on +Z at the given range
    pub fn at_rest(accel_fs: AccelFullScale) -> Self {
        Self {
            gyro: Vector3::zeros(),
            accel: Vector3::new(0.0, 0.0, accel_fs.lsb_per_g()),
        }
    }
}

/// Raw inertial sensor interface
///
/// All methods are non-blocking; `check_for_new_data` is a status-register
/// poll, and `read_raw` returns whatever the output registers currently hold.
pub trait RawInertial {
    /// Bring up the sensor
    fn initialize(&mut self) -> Result<(), InertialError>;

    /// Configure the gyroscope full-scale range
    fn set_gyro_full_scale(&mut self, fs: GyroFullScale);

    /// Configure the accelerometer full-scale range
    fn set_accel_full_scale(&mut self, fs: AccelFullScale);

    /// Configure the shared output data rate
    fn set_data_rate(&mut self, odr: OutputDataRate);

    /// Currently configured gyro range
    fn gyro_full_scale(&self) -> GyroFullScale;

    /// Currently configured accelerometer range
    fn accel_full_scale(&self) -> AccelFullScale;

    /// Currently configured output data rate
    fn data_rate(&self) -> OutputDataRate;

    /// Poll for a fresh sample pair
    ///
    /// Returns `true` at most once per sample; the matching data is then
    /// available via `read_raw`.
    fn check_for_new_data(&mut self) -> bool;

    /// Read the latest raw sample pair
    fn read_raw(&mut self) -> RawImuSample;
}
