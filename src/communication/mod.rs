//! Communication protocols
//!
//! The robot talks to an ESP32-class coprocessor over a framed byte link.
//! The transport owns framing and delivery; this module owns what the
//! decoded content means.

pub mod link;
