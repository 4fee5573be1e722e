//! Hardware collaborator interfaces
//!
//! The control core never touches hardware directly. Every sensor and
//! actuator sits behind a trait in [`traits`], and host tests run against the
//! mock implementations in [`mock`].

pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use traits::{
    AccelFullScale, Chassis, GyroFullScale, InertialError, LineSensor, OutputDataRate,
    RawImuSample, RawInertial, RemoteDecoder,
};
