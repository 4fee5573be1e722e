//! Line-follow heading correction
//!
//! Converts the line sensor's lateral error into a steering effort around the
//! commanded base speed. Used identically during line-following and
//! ramp-climbing; the state machine decides *when* it runs, this module only
//! decides *how hard* to steer.

/// Line-follow controller configuration
#[derive(Debug, Clone, Copy)]
pub struct LineFollowConfig {
    /// Proportional gain from lateral error to steering effort
    pub kp: f32,
    /// Steering effort clamp (symmetric)
    pub max_turn: f32,
}

impl Default for LineFollowConfig {
    fn default() -> Self {
        Self {
            kp: 0.6,
            max_turn: 1.0,
        }
    }
}

/// Proportional line follower
///
/// Stateless beyond its gains; heading memory lives in the sensor reading.
#[derive(Debug, Default)]
pub struct LineFollower {
    config: LineFollowConfig,
}

impl LineFollower {
    /// Create a follower with default gains
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a follower with custom gains
    pub fn with_config(config: LineFollowConfig) -> Self {
        Self { config }
    }

    /// Compute the chassis twist for one control period
    ///
    /// # Arguments
    ///
    /// * `line_error` - normalized lateral error from the line sensor
    /// * `base_speed` - baseline driving effort set on mode entry
    ///
    /// # Returns
    ///
    /// `(forward, turn)` twist; `turn` steers against the error, clamped to
    /// the configured maximum.
    pub fn update(&self, line_error: f32, base_speed: f32) -> (f32, f32) {
        let turn = (-self.config.kp * line_error).clamp(-self.config.max_turn, self.config.max_turn);
        (base_speed, turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_line_drives_straight() {
        let follower = LineFollower::new();
        let (forward, turn) = follower.update(0.0, 10.0);
        assert_eq!(forward, 10.0);
        assert_eq!(turn, 0.0);
    }

    #[test]
    fn test_steering_opposes_error() {
        let follower = LineFollower::new();

        // Line right of center: steer right (negative turn).
        let (_, turn) = follower.update(0.5, 10.0);
        assert!(turn < 0.0);

        let (_, turn) = follower.update(-0.5, 10.0);
        assert!(turn > 0.0);
    }

    #[test]
    fn test_steering_clamped() {
        let follower = LineFollower::with_config(LineFollowConfig {
            kp: 10.0,
            max_turn: 1.0,
        });
        let (_, turn) = follower.update(1.0, 10.0);
        assert_eq!(turn, -1.0);
    }
}
