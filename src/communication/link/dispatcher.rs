//! Command ingestion
//!
//! One dispatcher poll per loop iteration, consuming at most one inbound
//! frame — a burst of queued messages drains at one message per pass, which
//! bounds iteration latency. An empty link ends the iteration's dispatcher
//! work outright.
//!
//! All state-machine mutation goes through the controller's entry
//! operations; the dispatcher never touches the mode directly.

use crate::devices::traits::{Chassis, LineSensor, RawInertial};
use crate::robot::RobotController;

use super::codec;
use super::messages::{InboundMessage, RequestedMode, ServerCommand, TagSighting};
use super::transport::{FrameLink, MAX_FRAME_LEN};

/// What one dispatcher poll did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchOutcome {
    /// Nothing pending, or the read failed (indistinguishable)
    Unavailable,
    /// A tag sighting was recorded
    Tag,
    /// A server command was applied
    Command,
    /// Frame length matched no known message shape; payload dropped
    UnknownShape,
    /// Recognized shape failed validation; message abandoned, no mode change
    DecodeFailed,
}

/// Inbound command dispatcher
///
/// Owns the tag-sighting record (a hook for future behavior) and nothing
/// else; everything it decides lands on the controller.
#[derive(Debug, Default)]
pub struct CommandDispatcher {
    tags_seen: u32,
    last_tag: Option<TagSighting>,
}

impl CommandDispatcher {
    /// Create a dispatcher with no recorded sightings
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tag sightings received so far
    pub fn tags_seen(&self) -> u32 {
        self.tags_seen
    }

    /// Most recent tag sighting, if any
    pub fn last_tag(&self) -> Option<TagSighting> {
        self.last_tag
    }

    /// Drain at most one inbound message and interpret it
    pub fn poll<C, L, I, T>(
        &mut self,
        robot: &mut RobotController<C, L, I>,
        link: &mut T,
    ) -> DispatchOutcome
    where
        C: Chassis,
        L: LineSensor,
        I: RawInertial,
        T: FrameLink,
    {
        let mut buf = [0u8; MAX_FRAME_LEN];
        let Some(len) = link.poll_frame(&mut buf) else {
            return DispatchOutcome::Unavailable;
        };

        match codec::decode_frame(&buf[..len]) {
            Ok(Some(InboundMessage::Tag(tag))) => {
                crate::log_info!("tag sighting: id={}", tag.id);
                self.tags_seen += 1;
                self.last_tag = Some(tag);
                DispatchOutcome::Tag
            }
            Ok(Some(InboundMessage::Command(cmd))) => {
                self.apply_command(robot, &cmd);
                DispatchOutcome::Command
            }
            Ok(None) => {
                crate::log_debug!("dropping {}-byte frame of unknown shape", len);
                DispatchOutcome::UnknownShape
            }
            Err(e) => {
                crate::log_warn!("command decode failed: {:?}", e);
                DispatchOutcome::DecodeFailed
            }
        }
    }

    fn apply_command<C, L, I>(&mut self, robot: &mut RobotController<C, L, I>, cmd: &ServerCommand)
    where
        C: Chassis,
        L: LineSensor,
        I: RawInertial,
    {
        if let Some(cell) = cmd.target {
            robot.set_target(cell);
        }

        if let Some(req) = cmd.mode {
            match req.mode {
                RequestedMode::Idle => robot.enter_idle(),
                // Driving is a protocol alias for Lining
                RequestedMode::Driving | RequestedMode::Lining => {
                    robot.enter_line_following(req.base_speed)
                }
                RequestedMode::Turning => robot.enter_turn(req.base_speed),
                RequestedMode::Ramping => robot.enter_ramping(req.base_speed),
                reserved => {
                    // Accepted by the protocol, no behavior yet.
                    crate::log_debug!("reserved mode request ignored: {:?}", reserved);
                }
            }
        }
    }
}
