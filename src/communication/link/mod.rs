//! Coprocessor link
//!
//! - [`messages`]: decoded message types (tagged enum, optional fields)
//! - [`codec`]: fixed-size wire structs and the size-discriminated decode
//!   that keeps compatibility with the coprocessor's untagged protocol
//! - [`transport`]: the non-blocking [`FrameLink`] contract
//! - [`dispatcher`]: per-iteration command ingestion
//!
//! Internally every inbound payload becomes an [`InboundMessage`] variant;
//! the by-size discrimination exists only at the codec boundary.

pub mod codec;
pub mod dispatcher;
pub mod messages;
pub mod transport;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use dispatcher::{CommandDispatcher, DispatchOutcome};
pub use messages::{GridCell, GridReport, InboundMessage, ModeRequest, RequestedMode, ServerCommand, TagSighting};
pub use transport::{FrameLink, LinkError, MAX_FRAME_LEN};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockFrameLink;
