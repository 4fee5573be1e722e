//! Fixed-size wire codec
//!
//! The coprocessor protocol carries no type tag: a frame's serialized length
//! *is* its discriminant. That contract is honored here and only here —
//! everything past `decode_frame` is a tagged [`InboundMessage`].
//!
//! Wire structs are `#[repr(C)]` Pod types with distinct sizes, exchanged
//! between two little-endian parts; multi-byte fields are little-endian on
//! the wire.

use bytemuck::{Pod, Zeroable};

use super::messages::{
    GridCell, GridReport, InboundMessage, ModeRequest, RequestedMode, ServerCommand, TagSighting,
};

/// Wire decode failures for frames of a recognized size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Flag byte carries bits outside the defined set
    ReservedFlags,
    /// Mode field present but outside the protocol enumeration
    UnknownMode,
}

/// Tag sighting as serialized by the coprocessor
#[repr(C)]
#[derive(Clone, Copy, Default, Pod, Zeroable)]
struct TagSightingWire {
    id: u16,
    bearing_cdeg: i16,
}

/// Server command as serialized by the coprocessor
///
/// `flags` marks which optional fields are populated (protobuf-style
/// presence bits); unpopulated fields are zeroed on the wire.
#[repr(C)]
#[derive(Clone, Copy, Default, Pod, Zeroable)]
struct ServerCommandWire {
    flags: u8,
    mode: u8,
    target_i: u8,
    target_j: u8,
    base_speed: f32,
}

/// Grid report as serialized for the coprocessor
#[repr(C)]
#[derive(Clone, Copy, Default, Pod, Zeroable)]
struct GridReportWire {
    i: u8,
    j: u8,
}

const FLAG_HAS_TARGET: u8 = 1 << 0;
const FLAG_HAS_MODE: u8 = 1 << 1;
const FLAG_ALL: u8 = FLAG_HAS_TARGET | FLAG_HAS_MODE;

/// Serialized size of a tag sighting frame
pub const TAG_SIGHTING_SIZE: usize = core::mem::size_of::<TagSightingWire>();

/// Serialized size of a server command frame
pub const SERVER_COMMAND_SIZE: usize = core::mem::size_of::<ServerCommandWire>();

/// Serialized size of an outbound grid report
pub const GRID_REPORT_SIZE: usize = core::mem::size_of::<GridReportWire>();

/// Decode one inbound frame by its length
///
/// Returns `Ok(None)` when the length matches no known message shape (the
/// payload is silently ignored per the protocol contract), `Err` when a
/// recognized shape fails validation.
pub fn decode_frame(frame: &[u8]) -> Result<Option<InboundMessage>, DecodeError> {
    match frame.len() {
        TAG_SIGHTING_SIZE => {
            // Infallible given the length check; Pod has no invalid bit patterns.
            let wire: TagSightingWire = bytemuck::pod_read_unaligned(frame);
            Ok(Some(InboundMessage::Tag(TagSighting {
                id: wire.id,
                bearing_cdeg: wire.bearing_cdeg,
            })))
        }
        SERVER_COMMAND_SIZE => {
            let wire: ServerCommandWire = bytemuck::pod_read_unaligned(frame);
            decode_command(&wire).map(|cmd| Some(InboundMessage::Command(cmd)))
        }
        _ => Ok(None),
    }
}

fn decode_command(wire: &ServerCommandWire) -> Result<ServerCommand, DecodeError> {
    if wire.flags & !FLAG_ALL != 0 {
        return Err(DecodeError::ReservedFlags);
    }

    let target = if wire.flags & FLAG_HAS_TARGET != 0 {
        Some(GridCell::new(wire.target_i, wire.target_j))
    } else {
        None
    };

    let mode = if wire.flags & FLAG_HAS_MODE != 0 {
        let mode = RequestedMode::from_wire(wire.mode).ok_or(DecodeError::UnknownMode)?;
        Some(ModeRequest {
            mode,
            base_speed: wire.base_speed,
        })
    } else {
        None
    };

    Ok(ServerCommand { target, mode })
}

/// Serialize a grid report for the link
pub fn encode_report(report: &GridReport) -> [u8; GRID_REPORT_SIZE] {
    let wire = GridReportWire {
        i: report.cell.i,
        j: report.cell.j,
    };
    let mut frame = [0u8; GRID_REPORT_SIZE];
    frame.copy_from_slice(bytemuck::bytes_of(&wire));
    frame
}

/// Serialize a server command (coprocessor side of the contract; used by
/// tests and SITL tooling)
pub fn encode_command(cmd: &ServerCommand) -> [u8; SERVER_COMMAND_SIZE] {
    let mut wire = ServerCommandWire::default();
    if let Some(cell) = cmd.target {
        wire.flags |= FLAG_HAS_TARGET;
        wire.target_i = cell.i;
        wire.target_j = cell.j;
    }
    if let Some(req) = cmd.mode {
        wire.flags |= FLAG_HAS_MODE;
        wire.mode = req.mode.to_wire();
        wire.base_speed = req.base_speed;
    }
    let mut frame = [0u8; SERVER_COMMAND_SIZE];
    frame.copy_from_slice(bytemuck::bytes_of(&wire));
    frame
}

/// Serialize a tag sighting (coprocessor side; tests/SITL)
pub fn encode_tag(tag: &TagSighting) -> [u8; TAG_SIGHTING_SIZE] {
    let wire = TagSightingWire {
        id: tag.id,
        bearing_cdeg: tag.bearing_cdeg,
    };
    let mut frame = [0u8; TAG_SIGHTING_SIZE];
    frame.copy_from_slice(bytemuck::bytes_of(&wire));
    frame
}
