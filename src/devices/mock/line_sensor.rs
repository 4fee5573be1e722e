//! Mock line sensor for testing

use crate::devices::traits::LineSensor;

/// Mock reflectance array
///
/// The lateral error is a plain settable value; intersection events are
/// scripted one at a time and consumed by `check_intersection`.
#[derive(Debug, Default)]
pub struct MockLineSensor {
    error: f32,
    intersection_pending: bool,
    /// Whether `initialize` has been called
    pub initialized: bool,
}

impl MockLineSensor {
    /// Create a centered mock sensor with no pending intersection
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lateral error reported to the follower
    pub fn set_line_error(&mut self, error: f32) {
        self.error = error;
    }

    /// Script one intersection crossing
    pub fn trigger_intersection(&mut self) {
        self.intersection_pending = true;
    }
}

impl LineSensor for MockLineSensor {
    fn initialize(&mut self) -> Result<(), &'static str> {
        self.initialized = true;
        Ok(())
    }

    fn check_intersection(&mut self) -> bool {
        core::mem::take(&mut self.intersection_pending)
    }

    fn line_error(&mut self) -> f32 {
        self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_consumed_by_read() {
        let mut sensor = MockLineSensor::new();
        assert!(!sensor.check_intersection());

        sensor.trigger_intersection();
        assert!(sensor.check_intersection());
        assert!(!sensor.check_intersection());
    }

    #[test]
    fn test_line_error_settable() {
        let mut sensor = MockLineSensor::new();
        assert_eq!(sensor.line_error(), 0.0);

        sensor.set_line_error(-0.4);
        assert_eq!(sensor.line_error(), -0.4);
    }
}
