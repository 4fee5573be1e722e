//! Robot controller
//!
//! Owner of every piece of mutable robot state: the operating mode, the
//! orientation estimator, grid bookkeeping, and the drive collaborators.
//! Nothing here is global; subcomponents get the controller by reference,
//! which keeps the single-writer-per-field rules visible in the signatures:
//!
//! - `mode` changes only through the `enter_*` operations
//! - `target` is written only by the command dispatcher
//! - `current` is written only by the centering-completion path
//!
//! ## Ramp hysteresis
//!
//! While ramping, an "on ramp" flag rises once |pitch| exceeds 5° and the
//! run ends (back to Idle) once |pitch| falls under 2°. The 3° band keeps
//! the flag from chattering at the ramp transition edge.

use heapless::String;

use crate::communication::link::codec;
use crate::communication::link::{FrameLink, GridCell, GridReport};
use crate::devices::traits::{
    AccelFullScale, Chassis, GyroFullScale, LineSensor, OutputDataRate, RawInertial,
};
use crate::libraries::LineFollower;
use crate::subsystems::ahrs::{EstimatorConfig, EulerAngles, OrientationEstimator};

use super::mode::OperatingMode;

/// |pitch| above this marks ramp entry (degrees)
const RAMP_ENTER_DEG: f32 = 5.0;

/// |pitch| below this marks ramp exit (degrees); must stay well under
/// `RAMP_ENTER_DEG` to form the hysteresis band
const RAMP_EXIT_DEG: f32 = 2.0;

/// Baseline speed used when initialization drops straight into line-following
const DEFAULT_BASE_SPEED: f32 = 10.0;

/// Capacity of the reserved remote-keypress buffer
const KEY_BUFFER_LEN: usize = 16;

/// The robot's state machine and per-tick coordinator
pub struct RobotController<C, L, I> {
    chassis: C,
    line_sensor: L,
    imu: I,
    follower: LineFollower,
    estimator: OrientationEstimator,
    mode: OperatingMode,
    base_speed: f32,
    on_ramp: bool,
    /// Current discretized location; written only on centering completion
    current: GridCell,
    /// Commanded destination; written only by the dispatcher
    target: GridCell,
    /// Cell the active centering maneuver is aligning into
    centering_into: Option<GridCell>,
    centering_complete: bool,
    intersections: u32,
    /// Pending remote keypresses (reserved; cleared on idle entry)
    key_buffer: String<KEY_BUFFER_LEN>,
}

impl<C, L, I> RobotController<C, L, I>
where
    C: Chassis,
    L: LineSensor,
    I: RawInertial,
{
    /// Create a controller in Idle with zeroed state
    pub fn new(chassis: C, line_sensor: L, imu: I) -> Self {
        Self {
            chassis,
            line_sensor,
            imu,
            follower: LineFollower::new(),
            estimator: OrientationEstimator::new(EstimatorConfig::default()),
            mode: OperatingMode::Idle,
            base_speed: 0.0,
            on_ramp: false,
            current: GridCell::default(),
            target: GridCell::default(),
            centering_into: None,
            centering_complete: false,
            intersections: 0,
            key_buffer: String::new(),
        }
    }

    /// Bring up all hardware, configure the IMU, and start line-following
    pub fn initialize(&mut self) -> Result<(), &'static str> {
        self.chassis.initialize()?;

        self.imu.initialize().map_err(|_| "IMU init failed")?;
        self.imu.set_gyro_full_scale(GyroFullScale::Dps500);
        self.imu.set_accel_full_scale(AccelFullScale::G4);
        self.imu.set_data_rate(OutputDataRate::Hz208);

        // The estimator's unit conversions must match the ranges just set.
        self.estimator = OrientationEstimator::new(EstimatorConfig::new(
            self.imu.data_rate(),
            self.imu.gyro_full_scale(),
            self.imu.accel_full_scale(),
        ));

        self.line_sensor.initialize()?;

        self.enter_line_following(DEFAULT_BASE_SPEED);
        Ok(())
    }

    // ========== Entry operations (the only mode mutation points) ==========

    /// Halt drive output, drop any pending keypresses, go Idle
    pub fn enter_idle(&mut self) {
        self.chassis.stop();
        self.key_buffer.clear();
        self.set_mode(OperatingMode::Idle);
    }

    /// Start line-following at the given baseline speed
    pub fn enter_line_following(&mut self, speed: f32) {
        self.base_speed = speed;
        self.set_mode(OperatingMode::Lining);
    }

    /// Start a ramp run at the given baseline speed
    pub fn enter_ramping(&mut self, speed: f32) {
        self.base_speed = speed;
        self.on_ramp = false;
        self.set_mode(OperatingMode::Ramping);
    }

    /// Start a turn; turn mechanics live in the chassis layer
    pub fn enter_turn(&mut self, speed: f32) {
        self.base_speed = speed;
        self.set_mode(OperatingMode::Turning);
    }

    /// Start centering into `cell` (called by external path logic)
    ///
    /// The maneuver itself runs outside this core; completion is signalled
    /// via [`RobotController::set_centering_complete`].
    pub fn enter_centering(&mut self, cell: GridCell) {
        self.centering_into = Some(cell);
        self.centering_complete = false;
        self.set_mode(OperatingMode::Centering);
    }

    fn set_mode(&mut self, mode: OperatingMode) {
        crate::log_info!("-> {}", mode.name());
        self.mode = mode;
    }

    // ========== External signals ==========

    /// Signal that the centering maneuver finished
    ///
    /// Consumed on the next tick, and only while in Centering.
    pub fn set_centering_complete(&mut self) {
        self.centering_complete = true;
    }

    /// Overwrite the target cell (dispatcher only)
    pub fn set_target(&mut self, cell: GridCell) {
        self.target = cell;
    }

    /// Append a decoded remote keypress (reserved hook)
    pub fn buffer_key(&mut self, key: char) {
        // Buffer full means the oldest intent is stale anyway; drop the key.
        let _ = self.key_buffer.push(key);
    }

    // ========== Per-tick behavior ==========

    /// Run one iteration of everything except command ingestion
    ///
    /// Order is fixed: motor cadence with the mode-specific update, event
    /// checks, then the orientation update. The caller polls the command
    /// link after this returns.
    pub fn service<T: FrameLink>(&mut self, link: &mut T) {
        // Synchronous motor control: the mode update must refresh the twist
        // in the same iteration the motors consume it.
        if self.chassis.check_timer() {
            self.mode_update();
            self.chassis.update_motors();
        }

        self.check_events(link);

        if self.imu.check_for_new_data() {
            let sample = self.imu.read_raw();
            // Idle is the only mode where the robot is known stationary;
            // that gates coarse recalibration vs. fusion, never both.
            let stationary = self.mode == OperatingMode::Idle;
            self.estimator.update(&sample, stationary);
        }
    }

    /// Mode-specific positional update, one dispatch point for all modes
    fn mode_update(&mut self) {
        match self.mode {
            OperatingMode::Lining => self.follow_line(),
            OperatingMode::Ramping => {
                self.follow_line();
                self.ramp_update();
            }
            // Idle/Turning/Centering drive no twist from here; reserved
            // modes have no behavior yet.
            _ => {}
        }
    }

    /// Asynchronous event checks, one dispatch point for all modes
    fn check_events<T: FrameLink>(&mut self, link: &mut T) {
        match self.mode {
            OperatingMode::Lining => {
                if self.line_sensor.check_intersection() {
                    self.handle_intersection();
                }
            }
            OperatingMode::Centering => {
                if core::mem::take(&mut self.centering_complete) {
                    self.finish_centering(link);
                }
            }
            _ => {}
        }
    }

    fn follow_line(&mut self) {
        let error = self.line_sensor.line_error();
        let (forward, turn) = self.follower.update(error, self.base_speed);
        self.chassis.set_twist(forward, turn);
    }

    /// Ramp-tilt detection with hysteresis
    fn ramp_update(&mut self) {
        let pitch = self.estimator.angles().pitch;

        if self.on_ramp {
            if libm::fabsf(pitch) < RAMP_EXIT_DEG {
                crate::log_info!("ramp crested, pitch {}", pitch);
                self.on_ramp = false;
                self.enter_idle();
            }
        } else if libm::fabsf(pitch) > RAMP_ENTER_DEG {
            crate::log_info!("on ramp, pitch {}", pitch);
            self.on_ramp = true;
        }
    }

    /// Intersection hook; grid path logic hangs off this counter
    fn handle_intersection(&mut self) {
        self.intersections += 1;
        crate::log_debug!("intersection #{}", self.intersections);
    }

    /// Centering finished: commit the cell, go Idle, report the arrival
    fn finish_centering<T: FrameLink>(&mut self, link: &mut T) {
        if let Some(cell) = self.centering_into.take() {
            self.current = cell;
        }
        self.enter_idle();

        let report = GridReport { cell: self.current };
        let frame = codec::encode_report(&report);
        if link.send_frame(&frame).is_err() {
            // Report lost; the server re-syncs from the next completion.
            crate::log_warn!("grid report send failed");
        }
    }

    // ========== Accessors ==========

    /// Current operating mode
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Latest orientation estimate (degrees)
    pub fn orientation(&self) -> EulerAngles {
        self.estimator.angles()
    }

    /// Current grid cell
    pub fn current(&self) -> GridCell {
        self.current
    }

    /// Commanded target cell
    pub fn target(&self) -> GridCell {
        self.target
    }

    /// Baseline speed set by the last mode entry
    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    /// Whether the ramp flag is currently raised
    pub fn on_ramp(&self) -> bool {
        self.on_ramp
    }

    /// Intersections seen while lining
    pub fn intersections(&self) -> u32 {
        self.intersections
    }

    /// Pending remote keypresses (reserved)
    pub fn key_buffer(&self) -> &str {
        &self.key_buffer
    }

    /// Direct chassis access (platform wiring, simulation)
    pub fn chassis_mut(&mut self) -> &mut C {
        &mut self.chassis
    }

    /// Direct line-sensor access (platform wiring, simulation)
    pub fn line_sensor_mut(&mut self) -> &mut L {
        &mut self.line_sensor
    }

    /// Direct inertial-sensor access (platform wiring, simulation)
    pub fn imu_mut(&mut self) -> &mut I {
        &mut self.imu
    }

    /// Inject an orientation estimate (test/SITL)
    #[cfg(any(test, feature = "mock"))]
    pub fn force_orientation(&mut self, angles: EulerAngles) {
        self.estimator.force_angles(angles);
    }
}
