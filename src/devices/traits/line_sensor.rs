//! Line Sensor Trait
//!
//! Interface to the reflectance array under the robot's nose. The sensor
//! implementation owns digitization and intersection detection; the core
//! consumes two things: a lateral error for steering and an intersection
//! event flag.

/// Reflectance line sensor interface
pub trait LineSensor {
    /// Bring up the sensor array
    ///
    /// The elements typically default to inputs already; initialization is
    /// still performed for completeness.
    fn initialize(&mut self) -> Result<(), &'static str>;

    /// Poll for an intersection crossing
    ///
    /// Returns `true` at most once per detected intersection (the event is
    /// consumed by the read).
    fn check_intersection(&mut self) -> bool;

    /// Lateral offset of the line under the array
    ///
    /// Normalized to roughly [-1, 1]: negative = line left of center,
    /// positive = line right of center, 0 = centered.
    fn line_error(&mut self) -> f32;
}
