//! Device trait definitions
//!
//! Device-independent interfaces for the robot's sensors and actuators.
//! All of them are non-blocking: "is it time / is there data" checks return
//! immediately with a boolean, and absence of data is a normal outcome.

pub mod chassis;
pub mod imu;
pub mod line_sensor;
pub mod remote;

pub use chassis::Chassis;
pub use imu::{
    AccelFullScale, GyroFullScale, InertialError, OutputDataRate, RawImuSample, RawInertial,
};
pub use line_sensor::LineSensor;
pub use remote::RemoteDecoder;
