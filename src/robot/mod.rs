//! Robot state machine and control loop
//!
//! - [`mode`]: the discrete operating-mode enumeration
//! - [`controller`]: `RobotController`, owner of all mutable robot state
//!
//! [`Robot`] wires a controller, a dispatcher, and a frame link into the
//! per-iteration `tick` that a firmware main loop calls forever.

pub mod controller;
pub mod mode;

pub use controller::RobotController;
pub use mode::OperatingMode;

use crate::communication::link::{CommandDispatcher, DispatchOutcome, FrameLink};
use crate::devices::traits::{Chassis, LineSensor, RawInertial};

/// The assembled robot: controller + dispatcher + coprocessor link
///
/// One `tick` per pass through the firmware main loop. Every step inside is
/// a non-blocking poll; `tick` returns quickly no matter what arrived.
pub struct Robot<C, L, I, T> {
    controller: RobotController<C, L, I>,
    dispatcher: CommandDispatcher,
    link: T,
}

impl<C, L, I, T> Robot<C, L, I, T>
where
    C: Chassis,
    L: LineSensor,
    I: RawInertial,
    T: FrameLink,
{
    /// Assemble a robot from its collaborators
    pub fn new(chassis: C, line_sensor: L, imu: I, link: T) -> Self {
        Self {
            controller: RobotController::new(chassis, line_sensor, imu),
            dispatcher: CommandDispatcher::new(),
            link,
        }
    }

    /// Bring up all hardware and enter the initial mode
    pub fn initialize(&mut self) -> Result<(), &'static str> {
        self.controller.initialize()
    }

    /// Run one loop iteration
    ///
    /// Fixed order: motor cadence and mode update, event checks, orientation
    /// update, then command ingestion. The link poll stays last — when
    /// nothing is pending the iteration simply ends, and everything before
    /// it has already run.
    pub fn tick(&mut self) -> DispatchOutcome {
        self.controller.service(&mut self.link);
        self.dispatcher.poll(&mut self.controller, &mut self.link)
    }

    /// Access the controller (telemetry, diagnostics)
    pub fn controller(&self) -> &RobotController<C, L, I> {
        &self.controller
    }

    /// Mutable controller access (external path logic: centering entry,
    /// completion signal)
    pub fn controller_mut(&mut self) -> &mut RobotController<C, L, I> {
        &mut self.controller
    }

    /// Access the dispatcher's records (tag sightings)
    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Access the link (tests, SITL harnesses)
    pub fn link_mut(&mut self) -> &mut T {
        &mut self.link
    }
}
