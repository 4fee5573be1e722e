//! Frame link contract
//!
//! The transport owns UART framing, checksums, and delivery. The core sees
//! whole frames or nothing, and never waits: `poll_frame` returns
//! immediately, and the common outcome is "nothing pending".

/// Largest frame either side may send
///
/// Comfortably above every message in the codec; a real transport sizes its
/// RX buffer to this.
pub const MAX_FRAME_LEN: usize = 16;

/// Link transmit errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Frame exceeds `MAX_FRAME_LEN`
    FrameTooLong,
    /// Transport refused or dropped the frame
    TxFailed,
}

/// Non-blocking framed byte link to the coprocessor
pub trait FrameLink {
    /// Poll for one pending inbound frame
    ///
    /// Copies the frame into `buf` and returns its length. Returns `None`
    /// when nothing is pending **or** the read failed — the link cannot
    /// distinguish the two, and callers must treat both as the same
    /// unavailable outcome.
    fn poll_frame(&mut self, buf: &mut [u8; MAX_FRAME_LEN]) -> Option<usize>;

    /// Queue one frame for transmission
    fn send_frame(&mut self, frame: &[u8]) -> Result<(), LinkError>;
}
