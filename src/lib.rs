//! Bullet World - a scrollable 2D world with bullet-pattern spawners
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (bullets, patterns, spawners, world, player)
//! - `config`: Construction-time parameters (JSON via serde)
//! - `error`: Configuration errors raised at construction time

pub mod config;
pub mod error;
pub mod sim;

pub use config::{PlayerConfig, SimConfig, SpawnerConfig, ViewportConfig, WorldConfig};
pub use error::ConfigError;

use glam::Vec2;

/// Simulation defaults (the original scrollable-world demo)
pub mod consts {
    /// World dimensions
    pub const WORLD_WIDTH: u32 = 800;
    pub const WORLD_HEIGHT: u32 = 1000;

    /// Viewport (window) dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    /// 8 units per frame at 60 Hz, expressed per second
    pub const PLAYER_SPEED: f32 = 8.0 * 60.0;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 100.0;
    pub const BULLET_LIFETIME: f32 = 5.0;
    pub const BULLET_RADIUS: f32 = 5.0;

    /// Spiral defaults (degrees, emissions per second, seconds)
    pub const SPIRAL_ANGLE_STEP_DEG: f32 = 20.0;
    pub const SPIRAL_SPAWN_RATE: f32 = 10.0;
    pub const SPIRAL_DURATION: f32 = 10.0;

    /// Largest frame delta the clock will hand to the simulation
    pub const MAX_FRAME_DELTA: f32 = 0.25;
}

/// Wrap an angle (radians) into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Direction of a vector in radians, in (-π, π]
#[inline]
pub fn direction_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((wrap_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-5);
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!(wrap_angle(-1e-9) < TAU);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, PI / 2.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
        assert!((direction_of(p) - PI / 2.0).abs() < 1e-5);
    }
}
