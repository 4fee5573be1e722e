//! Mock device implementations for testing
//!
//! Scripted stand-ins for the hardware collaborators. Tests queue readings
//! and timer events up front, run loop iterations, and inspect what the core
//! commanded.

pub mod chassis;
pub mod imu;
pub mod line_sensor;

pub use chassis::MockChassis;
pub use imu::MockInertial;
pub use line_sensor::MockLineSensor;
