//! Decoded link messages
//!
//! These are the in-core representations: tagged, with real `Option` fields.
//! Their byte-level shapes live in [`super::codec`].

/// Discretized (row, column) location on the course grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridCell {
    /// Row index
    pub i: u8,
    /// Column index
    pub j: u8,
}

impl GridCell {
    pub const fn new(i: u8, j: u8) -> Self {
        Self { i, j }
    }
}

/// Operating mode requested by the server
///
/// Mirrors the coprocessor protocol's state enumeration. `Driving` is a
/// protocol-level alias for `Lining`; the tail of the enumeration is
/// reserved: accepted on the wire, no behavior yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestedMode {
    Idle,
    Driving,
    Lining,
    Turning,
    Ramping,
    Searching,
    Targeting,
    Weighing,
    Lifting,
    GimmieThatTag,
}

impl RequestedMode {
    /// Convert from the wire byte
    ///
    /// Returns `None` for values outside the protocol enumeration.
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(RequestedMode::Idle),
            1 => Some(RequestedMode::Driving),
            2 => Some(RequestedMode::Lining),
            3 => Some(RequestedMode::Turning),
            4 => Some(RequestedMode::Ramping),
            5 => Some(RequestedMode::Searching),
            6 => Some(RequestedMode::Targeting),
            7 => Some(RequestedMode::Weighing),
            8 => Some(RequestedMode::Lifting),
            9 => Some(RequestedMode::GimmieThatTag),
            _ => None,
        }
    }

    /// Convert to the wire byte
    pub fn to_wire(self) -> u8 {
        match self {
            RequestedMode::Idle => 0,
            RequestedMode::Driving => 1,
            RequestedMode::Lining => 2,
            RequestedMode::Turning => 3,
            RequestedMode::Ramping => 4,
            RequestedMode::Searching => 5,
            RequestedMode::Targeting => 6,
            RequestedMode::Weighing => 7,
            RequestedMode::Lifting => 8,
            RequestedMode::GimmieThatTag => 9,
        }
    }

    /// Whether this request has no implemented behavior yet
    pub fn is_reserved(self) -> bool {
        matches!(
            self,
            RequestedMode::Searching
                | RequestedMode::Targeting
                | RequestedMode::Weighing
                | RequestedMode::Lifting
                | RequestedMode::GimmieThatTag
        )
    }
}

/// Mode request with its associated speed parameter
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeRequest {
    pub mode: RequestedMode,
    /// Baseline driving speed for the requested mode
    pub base_speed: f32,
}

/// Server command: all fields optional, present fields independent
///
/// Transient; exists for one loop iteration only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServerCommand {
    /// New target grid cell, if present
    pub target: Option<GridCell>,
    /// Mode request, if present
    pub mode: Option<ModeRequest>,
}

/// AprilTag sighting reported by the coprocessor's camera
///
/// Recorded for future use; currently has no effect on the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TagSighting {
    /// Tag identifier
    pub id: u16,
    /// Bearing to the tag, centidegrees (positive = left of camera axis)
    pub bearing_cdeg: i16,
}

impl TagSighting {
    /// Bearing in degrees
    pub fn bearing_deg(&self) -> f32 {
        self.bearing_cdeg as f32 / 100.0
    }
}

/// Grid-location report sent on centering completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridReport {
    /// The robot's current (not target) cell
    pub cell: GridCell,
}

/// Any decoded inbound message
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InboundMessage {
    Tag(TagSighting),
    Command(ServerCommand),
}
