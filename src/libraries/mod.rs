//! Reusable control libraries

pub mod line_follow;

pub use line_follow::{LineFollowConfig, LineFollower};
