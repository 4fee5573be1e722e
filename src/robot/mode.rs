//! Operating modes
//!
//! Exactly one mode is active at any time, owned by the controller and
//! changed only through its entry operations. The tail of the enumeration is
//! reserved: the coprocessor protocol names those states, the robot accepts
//! them, and no per-tick behavior exists yet.

/// Discrete operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Stationary; orientation biases recalibrate in this mode
    Idle,
    /// Following the taped line at the commanded base speed
    Lining,
    /// Line-following up a ramp, watching pitch for the crest
    Ramping,
    /// Centering into a grid cell (maneuver driven by external path logic)
    Centering,
    /// Executing a turn (turn mechanics live in the chassis layer)
    Turning,
    /// Reserved: searching for a target (no behavior yet)
    Searching,
    /// Reserved: visual servoing onto a target (no behavior yet)
    Targeting,
    /// Reserved: weighing a payload (no behavior yet)
    Weighing,
    /// Reserved: lifting a payload (no behavior yet)
    Lifting,
    /// Reserved: tag-grab maneuver (no behavior yet)
    GimmieThatTag,
}

impl Default for OperatingMode {
    fn default() -> Self {
        Self::Idle
    }
}

impl OperatingMode {
    /// Mode name for logging and telemetry
    pub fn name(self) -> &'static str {
        match self {
            OperatingMode::Idle => "Idle",
            OperatingMode::Lining => "Lining",
            OperatingMode::Ramping => "Ramping",
            OperatingMode::Centering => "Centering",
            OperatingMode::Turning => "Turning",
            OperatingMode::Searching => "Searching",
            OperatingMode::Targeting => "Targeting",
            OperatingMode::Weighing => "Weighing",
            OperatingMode::Lifting => "Lifting",
            OperatingMode::GimmieThatTag => "GimmieThatTag",
        }
    }

    /// Whether this mode has no implemented per-tick behavior
    pub fn is_reserved(self) -> bool {
        matches!(
            self,
            OperatingMode::Searching
                | OperatingMode::Targeting
                | OperatingMode::Weighing
                | OperatingMode::Lifting
                | OperatingMode::GimmieThatTag
        )
    }
}
