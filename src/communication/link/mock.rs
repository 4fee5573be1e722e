//! Mock frame link for testing

use heapless::{Deque, Vec};

use super::transport::{FrameLink, LinkError, MAX_FRAME_LEN};

/// Capacity of the scripted inbound queue and the sent-frame record
const QUEUE_LEN: usize = 8;

type Frame = Vec<u8, MAX_FRAME_LEN>;

/// Scripted frame link
///
/// Inbound frames are queued up front with [`MockFrameLink::push_frame`] and
/// handed out one per poll; outbound frames are recorded in `sent`.
#[derive(Default)]
pub struct MockFrameLink {
    inbound: Deque<Frame, QUEUE_LEN>,
    /// Every frame the core sent, in order
    pub sent: Vec<Frame, QUEUE_LEN>,
    /// When set, `send_frame` reports `TxFailed`
    pub fail_tx: bool,
}

impl MockFrameLink {
    /// Create an empty mock link
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one inbound frame
    ///
    /// Panics if the frame exceeds `MAX_FRAME_LEN` or the queue is full;
    /// tests size their scripts accordingly.
    pub fn push_frame(&mut self, bytes: &[u8]) {
        let frame = Frame::from_slice(bytes).expect("mock frame too long");
        self.inbound.push_back(frame).expect("mock inbound queue full");
    }

    /// Number of inbound frames not yet polled
    pub fn pending(&self) -> usize {
        self.inbound.len()
    }
}

impl FrameLink for MockFrameLink {
    fn poll_frame(&mut self, buf: &mut [u8; MAX_FRAME_LEN]) -> Option<usize> {
        let frame = self.inbound.pop_front()?;
        buf[..frame.len()].copy_from_slice(&frame);
        Some(frame.len())
    }

    fn send_frame(&mut self, frame: &[u8]) -> Result<(), LinkError> {
        if frame.len() > MAX_FRAME_LEN {
            return Err(LinkError::FrameTooLong);
        }
        if self.fail_tx {
            return Err(LinkError::TxFailed);
        }
        let frame = Frame::from_slice(frame).map_err(|_| LinkError::FrameTooLong)?;
        self.sent.push(frame).map_err(|_| LinkError::TxFailed)
    }
}
