//! Mock Chassis implementation for testing

use crate::devices::traits::Chassis;

/// Mock drive base
///
/// Records commanded twists and counts calls. The motor-control timer is
/// scripted: each call to [`MockChassis::elapse_timer`] makes the next
/// `check_timer` poll return `true` once.
#[derive(Debug, Default)]
pub struct MockChassis {
    timer_due: bool,
    /// Last twist passed to `set_twist`, if any
    pub twist: Option<(f32, f32)>,
    /// Twist in effect when `update_motors` last ran
    pub applied_twist: Option<(f32, f32)>,
    /// Number of `stop` calls
    pub stop_count: u32,
    /// Number of `update_motors` calls
    pub update_count: u32,
    /// Whether `initialize` has been called
    pub initialized: bool,
}

impl MockChassis {
    /// Create a mock chassis with no pending timer event
    pub fn new() -> Self {
        Self::default()
    }

    /// Script one elapsed motor-control period
    pub fn elapse_timer(&mut self) {
        self.timer_due = true;
    }
}

impl Chassis for MockChassis {
    fn initialize(&mut self) -> Result<(), &'static str> {
        self.initialized = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.stop_count += 1;
        self.twist = None;
    }

    fn check_timer(&mut self) -> bool {
        core::mem::take(&mut self.timer_due)
    }

    fn set_twist(&mut self, forward: f32, turn: f32) {
        self.twist = Some((forward, turn));
    }

    fn update_motors(&mut self) {
        self.update_count += 1;
        self.applied_twist = self.twist;
    }
}
