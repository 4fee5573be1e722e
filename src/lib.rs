#![cfg_attr(not(test), no_std)]

//! romi_grid - Control core for a grid-navigating Romi-class rover
//!
//! This library provides the cooperative, single-threaded control loop for a
//! small wheeled robot that follows taped lines across a grid course, climbs
//! ramps, and talks to an ESP32-style coprocessor over a byte link.
//!
//! The loop never blocks: every collaborator check is a non-blocking poll and
//! absence of data is a normal, frequent outcome. Hardware sits behind the
//! traits in [`devices::traits`]; host tests run against the mocks in
//! [`devices::mock`].

// Crate-wide infrastructure (logging macros)
pub mod core;

// Hardware collaborator traits and mock implementations
pub mod devices;

// Reusable controllers (line-follow steering)
pub mod libraries;

// Coprocessor link: messages, wire codec, command dispatcher
pub mod communication;

// Sensor fusion subsystems (orientation estimator)
pub mod subsystems;

// Robot state machine and control loop
pub mod robot;

pub use robot::{OperatingMode, Robot, RobotController};
