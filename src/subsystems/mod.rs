//! Sensor fusion subsystems

pub mod ahrs;
