//! Player flight model
//!
//! Converts per-frame steering input into the player node's rotation and
//! velocity. The craft always thrusts along its own forward axis; speed is
//! kept inside a configured km/h band by decay and a hard clamp.

use crate::config::PlayerConfig;
use crate::foundation::math::{Quat, Vec3};
use crate::scene::Node;

/// Units-per-second to km/h
const KMH_PER_UNIT: f32 = 3.6;

/// One frame of steering input
#[derive(Debug, Clone, Copy, Default)]
pub struct SteerIntent {
    /// Throttle boost held this frame
    pub boost: bool,

    /// Pitch change in radians
    pub pitch_delta: f32,

    /// Yaw change in radians
    pub yaw_delta: f32,
}

/// Player flight controller
///
/// Owns the accumulated orientation angles so that the node's stored rotation
/// can stay a smoothed follower of the steering target.
#[derive(Debug, Clone)]
pub struct PlayerController {
    config: PlayerConfig,
    yaw: f32,
    pitch: f32,
    bank: f32,
}

impl PlayerController {
    /// Create a controller from configuration
    #[must_use]
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            config: config.clone(),
            yaw: 0.0,
            pitch: 0.0,
            bank: 0.0,
        }
    }

    /// Craft-local forward axis in world space
    #[must_use]
    pub fn forward(rotation: &Quat) -> Vec3 {
        rotation * Vec3::x()
    }

    /// Apply one frame of steering to the player node
    ///
    /// A non-positive `dt` leaves the node untouched.
    pub fn update(&mut self, node: &mut Node, intent: &SteerIntent, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        self.yaw -= intent.yaw_delta;
        self.pitch += intent.pitch_delta;

        // Banking follows the yaw input and relaxes back toward level.
        self.bank = (self.bank + intent.yaw_delta) / 1.4;

        let target = Quat::from_axis_angle(&Vec3::y_axis(), self.yaw)
            * Quat::from_axis_angle(&Vec3::z_axis(), self.pitch)
            * Quat::from_axis_angle(&Vec3::x_axis(), self.bank);

        // Frame-rate independent smoothing toward the steering target.
        let blend = 1.0 - (-1.5 * dt).exp();
        let current = node.rotation();
        let smoothed = current.try_slerp(&target, blend, 1.0e-6).unwrap_or(target);
        node.set_rotation(smoothed);

        let mut velocity = node.velocity.unwrap_or_else(Vec3::zeros);
        let thrust = if intent.boost {
            self.config.acceleration * 1.4
        } else {
            self.config.acceleration
        };
        velocity += Self::forward(&smoothed) * thrust * dt;

        let speed_kmh = velocity.norm() * KMH_PER_UNIT;
        if speed_kmh > self.config.min_speed_kmh {
            velocity *= self.config.decay;
        }
        if speed_kmh > self.config.max_speed_kmh {
            velocity = velocity.normalize() * (self.config.max_speed_kmh / KMH_PER_UNIT);
        }

        node.velocity = Some(velocity);
    }
}
