//! End-to-end control-loop tests
//!
//! Drives the assembled [`Robot`] through the public trait surface with
//! simulated collaborators: scripted frames on the link, scripted IMU
//! samples, a chassis that records what it was told. The orientation math
//! here is the real estimator, not an injected state.

use std::collections::VecDeque;

use nalgebra::Vector3;

use romi_grid::communication::link::{
    codec, DispatchOutcome, FrameLink, GridCell, LinkError, ModeRequest, RequestedMode,
    ServerCommand, TagSighting, MAX_FRAME_LEN,
};
use romi_grid::devices::traits::{
    AccelFullScale, Chassis, GyroFullScale, InertialError, LineSensor, OutputDataRate,
    RawImuSample, RawInertial,
};
use romi_grid::{OperatingMode, Robot};

// ========== Simulated collaborators ==========

#[derive(Default)]
struct SimChassis {
    timer_due: bool,
    twist: Option<(f32, f32)>,
    stop_count: u32,
    update_count: u32,
}

impl SimChassis {
    fn elapse_timer(&mut self) {
        self.timer_due = true;
    }
}

impl Chassis for SimChassis {
    fn initialize(&mut self) -> Result<(), &'static str> {
        Ok(())
    }

    fn stop(&mut self) {
        self.stop_count += 1;
        self.twist = None;
    }

    fn check_timer(&mut self) -> bool {
        std::mem::take(&mut self.timer_due)
    }

    fn set_twist(&mut self, forward: f32, turn: f32) {
        self.twist = Some((forward, turn));
    }

    fn update_motors(&mut self) {
        self.update_count += 1;
    }
}

#[derive(Default)]
struct SimLineSensor {
    error: f32,
    intersection: bool,
}

impl LineSensor for SimLineSensor {
    fn initialize(&mut self) -> Result<(), &'static str> {
        Ok(())
    }

    fn check_intersection(&mut self) -> bool {
        std::mem::take(&mut self.intersection)
    }

    fn line_error(&mut self) -> f32 {
        self.error
    }
}

struct SimImu {
    samples: VecDeque<RawImuSample>,
    gyro_fs: GyroFullScale,
    accel_fs: AccelFullScale,
    odr: OutputDataRate,
}

impl SimImu {
    fn new() -> Self {
        Self {
            samples: VecDeque::new(),
            gyro_fs: GyroFullScale::Dps500,
            accel_fs: AccelFullScale::G4,
            odr: OutputDataRate::Hz208,
        }
    }

    fn push(&mut self, sample: RawImuSample) {
        self.samples.push_back(sample);
    }
}

impl RawInertial for SimImu {
    fn initialize(&mut self) -> Result<(), InertialError> {
        Ok(())
    }

    fn set_gyro_full_scale(&mut self, fs: GyroFullScale) {
        self.gyro_fs = fs;
    }

    fn set_accel_full_scale(&mut self, fs: AccelFullScale) {
        self.accel_fs = fs;
    }

    fn set_data_rate(&mut self, odr: OutputDataRate) {
        self.odr = odr;
    }

    fn gyro_full_scale(&self) -> GyroFullScale {
        self.gyro_fs
    }

    fn accel_full_scale(&self) -> AccelFullScale {
        self.accel_fs
    }

    fn data_rate(&self) -> OutputDataRate {
        self.odr
    }

    fn check_for_new_data(&mut self) -> bool {
        !self.samples.is_empty()
    }

    fn read_raw(&mut self) -> RawImuSample {
        self.samples.pop_front().unwrap_or_default()
    }
}

#[derive(Default)]
struct SimLink {
    inbound: VecDeque<Vec<u8>>,
    sent: Vec<Vec<u8>>,
}

impl SimLink {
    fn push_frame(&mut self, bytes: &[u8]) {
        self.inbound.push_back(bytes.to_vec());
    }
}

impl FrameLink for SimLink {
    fn poll_frame(&mut self, buf: &mut [u8; MAX_FRAME_LEN]) -> Option<usize> {
        let frame = self.inbound.pop_front()?;
        buf[..frame.len()].copy_from_slice(&frame);
        Some(frame.len())
    }

    fn send_frame(&mut self, frame: &[u8]) -> Result<(), LinkError> {
        self.sent.push(frame.to_vec());
        Ok(())
    }
}

type SimRobot = Robot<SimChassis, SimLineSensor, SimImu, SimLink>;

fn robot() -> SimRobot {
    let mut robot = Robot::new(
        SimChassis::default(),
        SimLineSensor::default(),
        SimImu::new(),
        SimLink::default(),
    );
    robot.initialize().expect("initialize failed");
    robot
}

/// Degrees of rotation per gyro LSB per sample at the default configuration
fn sdt() -> f32 {
    1.0 / OutputDataRate::Hz208.hz() * GyroFullScale::Dps500.mdps_per_lsb() / 1000.0
}

/// Level sample whose gyro X rate integrates `deg` of pitch in one update
fn pitch_step(deg: f32) -> RawImuSample {
    RawImuSample {
        gyro: Vector3::new(deg / sdt(), 0.0, 0.0),
        accel: RawImuSample::at_rest(AccelFullScale::G4).accel,
    }
}

fn target_command(i: u8, j: u8) -> Vec<u8> {
    codec::encode_command(&ServerCommand {
        target: Some(GridCell::new(i, j)),
        mode: None,
    })
    .to_vec()
}

fn mode_command(mode: RequestedMode, speed: f32) -> Vec<u8> {
    codec::encode_command(&ServerCommand {
        target: None,
        mode: Some(ModeRequest {
            mode,
            base_speed: speed,
        }),
    })
    .to_vec()
}

// ========== Scenarios ==========

#[test]
fn queued_frames_drain_one_per_iteration() {
    let mut robot = robot();

    let first = target_command(1, 1);
    let second = target_command(2, 2);
    robot.link_mut().push_frame(&first);
    robot.link_mut().push_frame(&second);

    // First pass consumes exactly one message.
    assert_eq!(robot.tick(), DispatchOutcome::Command);
    assert_eq!(robot.controller().target(), GridCell::new(1, 1));

    // Second pass consumes the second.
    assert_eq!(robot.tick(), DispatchOutcome::Command);
    assert_eq!(robot.controller().target(), GridCell::new(2, 2));

    // Third pass finds the link empty.
    assert_eq!(robot.tick(), DispatchOutcome::Unavailable);
}

#[test]
fn tag_sightings_are_tracked_not_dispatched() {
    let mut robot = robot();
    let mode_before = robot.controller().mode();

    let frame = codec::encode_tag(&TagSighting {
        id: 7,
        bearing_cdeg: -1250,
    });
    robot.link_mut().push_frame(&frame);

    assert_eq!(robot.tick(), DispatchOutcome::Tag);
    assert_eq!(robot.controller().mode(), mode_before);
    assert_eq!(robot.dispatcher().tags_seen(), 1);
    let tag = robot.dispatcher().last_tag().unwrap();
    assert_eq!(tag.id, 7);
    assert!((tag.bearing_deg() + 12.5).abs() < 1e-6);
}

#[test]
fn ramp_mission_runs_to_idle_on_real_fusion() {
    let mut robot = robot();

    // Server starts a ramp run.
    robot
        .link_mut()
        .push_frame(&mode_command(RequestedMode::Ramping, 12.0));
    assert_eq!(robot.tick(), DispatchOutcome::Command);
    assert_eq!(robot.controller().mode(), OperatingMode::Ramping);
    assert_eq!(robot.controller().base_speed(), 12.0);
    assert!(!robot.controller().on_ramp());

    // Climb: one sample integrates the nose 6.1 degrees up. The level
    // accelerometer pulls 1% of that back in the blend, leaving ~6.04.
    // The tilt check runs before this sample lands, so the flag is
    // still down after the pass.
    robot.controller_mut().imu_mut().push(pitch_step(6.1));
    robot.controller_mut().chassis_mut().elapse_timer();
    assert_eq!(robot.tick(), DispatchOutcome::Unavailable);
    let pitch = robot.controller().orientation().pitch;
    assert!((pitch - 6.04).abs() < 0.1, "pitch was {pitch}");
    assert!(!robot.controller().on_ramp());

    // Crest: this pass raises the flag off the stored 6-degree estimate,
    // then integrates the nose back down to ~1 degree.
    let step_down = 1.0 / 0.99 - pitch;
    robot.controller_mut().imu_mut().push(pitch_step(step_down));
    robot.controller_mut().chassis_mut().elapse_timer();
    robot.tick();
    assert!(robot.controller().on_ramp());
    assert_eq!(robot.controller().mode(), OperatingMode::Ramping);
    let pitch = robot.controller().orientation().pitch;
    assert!((pitch - 1.0).abs() < 0.1, "pitch was {pitch}");

    // Level again: the falling edge ends the run.
    robot.controller_mut().chassis_mut().elapse_timer();
    robot.tick();
    assert!(!robot.controller().on_ramp());
    assert_eq!(robot.controller().mode(), OperatingMode::Idle);
    assert!(robot.controller_mut().chassis_mut().stop_count >= 1);
    // Motors ticked on each of the three elapsed control periods.
    assert_eq!(robot.controller_mut().chassis_mut().update_count, 3);
}

#[test]
fn centering_completion_reports_arrival_over_the_link() {
    let mut robot = robot();

    robot.controller_mut().set_target(GridCell::new(3, 0));
    robot.controller_mut().enter_centering(GridCell::new(2, 0));
    robot.controller_mut().set_centering_complete();
    assert_eq!(robot.tick(), DispatchOutcome::Unavailable);

    assert_eq!(robot.controller().mode(), OperatingMode::Idle);
    assert_eq!(robot.controller().current(), GridCell::new(2, 0));

    // Exactly one 2-byte report carrying the arrived-at cell.
    {
        let sent = &robot.link_mut().sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(&sent[0][..], &[2, 0]);
    }

    // The signal was consumed; nothing further goes out.
    robot.tick();
    assert_eq!(robot.link_mut().sent.len(), 1);
}

#[test]
fn intersections_accumulate_during_line_following() {
    let mut robot = robot();
    assert_eq!(robot.controller().mode(), OperatingMode::Lining);

    for _ in 0..3 {
        robot.controller_mut().line_sensor_mut().intersection = true;
        robot.tick();
    }
    assert_eq!(robot.controller().intersections(), 3);

    // The line error steers on the motor cadence.
    robot.controller_mut().line_sensor_mut().error = 0.5;
    robot.controller_mut().chassis_mut().elapse_timer();
    robot.tick();
    let (forward, turn) = robot.controller_mut().chassis_mut().twist.unwrap();
    assert_eq!(forward, 10.0);
    assert!(turn < 0.0);
}

#[test]
fn runt_frames_are_dropped_without_stalling_the_loop() {
    let mut robot = robot();

    robot.link_mut().push_frame(&[0xff; 3]);
    let second = target_command(5, 5);
    robot.link_mut().push_frame(&second);

    assert_eq!(robot.tick(), DispatchOutcome::UnknownShape);
    assert_eq!(robot.tick(), DispatchOutcome::Command);
    assert_eq!(robot.controller().target(), GridCell::new(5, 5));
}
