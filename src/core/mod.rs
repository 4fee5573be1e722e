//! Core functionality
//!
//! This module contains crate-wide infrastructure shared by every subsystem,
//! currently the logging abstraction.

pub mod logging;
