//! Chassis Trait
//!
//! Interface to the drive base: differential motor control behind a periodic
//! update timer. The control core decides *what* the wheels should do
//! (a twist of forward effort and turning effort); the chassis implementation
//! owns PWM, encoders, and the speed PID entirely.
//!
//! ## Update cadence
//!
//! Motor control runs on a fixed period owned by the chassis. The core polls
//! [`Chassis::check_timer`] every loop iteration and only performs its
//! mode-specific steering update and [`Chassis::update_motors`] when the
//! period has elapsed.

/// Drive base interface
///
/// Implementations map the commanded twist onto wheel targets when
/// `update_motors` is called. All methods are non-blocking.
pub trait Chassis {
    /// Bring up motor drivers and encoders
    ///
    /// Returns `Err` if the drive hardware cannot be initialized.
    fn initialize(&mut self) -> Result<(), &'static str>;

    /// Immediately command zero output on both wheels
    ///
    /// Also clears any previously commanded twist.
    fn stop(&mut self);

    /// Poll the motor-control timer
    ///
    /// Returns `true` at most once per control period. The caller must treat
    /// `false` as the common case, not an error.
    fn check_timer(&mut self) -> bool;

    /// Set the commanded twist
    ///
    /// # Arguments
    ///
    /// * `forward` - baseline driving effort (signed, implementation units)
    /// * `turn` - differential steering effort (positive = turn left)
    fn set_twist(&mut self, forward: f32, turn: f32);

    /// Apply the latest commanded twist to the motors
    ///
    /// Called by the core once per elapsed control period, after the
    /// mode-specific update has refreshed the twist.
    fn update_motors(&mut self);
}
