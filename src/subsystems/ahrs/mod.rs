//! AHRS (Attitude and Heading Reference System)
//!
//! Orientation estimation for the grid robot: a complementary filter fusing
//! one gyro + accelerometer sample pair per update into pitch/roll/yaw, with
//! slowly-adapting per-axis bias estimates.
//!
//! The estimator is deliberately light. Gyro integration carries the
//! short-term estimate; the accelerometer's absolute tilt pulls pitch and
//! roll back at a small fixed weight to cancel drift. Yaw has no absolute
//! reference on this robot and is pure integration wrapped to [0, 360).

pub mod estimator;

pub use estimator::{EstimatorConfig, EulerAngles, OrientationEstimator};
