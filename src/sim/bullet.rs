//! Bullet state and lifecycle
//!
//! A bullet is plain numeric state. How it looks is up to whoever reads the
//! frame snapshot.

use glam::Vec2;

use super::world::EntityId;
use crate::{direction_of, polar_to_cartesian};

/// A single projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    /// Registry id (assigned by the owning spawner when registered)
    pub id: EntityId,
    pub pos: Vec2,
    /// World units per second
    pub vel: Vec2,
    /// Seconds since creation
    pub age: f32,
    /// Seconds the bullet lives for
    pub lifetime: f32,
    /// Presentation size
    pub radius: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, lifetime: f32, radius: f32) -> Self {
        Self {
            id: EntityId::UNREGISTERED,
            pos,
            vel,
            age: 0.0,
            lifetime,
            radius,
        }
    }

    /// Create a bullet heading along `angle` (radians) at `speed`
    pub fn from_angle(pos: Vec2, speed: f32, angle: f32, lifetime: f32, radius: f32) -> Self {
        Self::new(pos, polar_to_cartesian(speed, angle), lifetime, radius)
    }

    /// Move and age the bullet by `dt` seconds.
    ///
    /// Returns `false` once the bullet's age has reached its lifetime; the
    /// owner must drop it.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        self.age += dt;
        self.is_active()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.age < self.lifetime
    }

    /// Seconds left before expiry (0 once expired)
    pub fn remaining(&self) -> f32 {
        (self.lifetime - self.age).max(0.0)
    }

    /// Heading in radians
    pub fn direction(&self) -> f32 {
        direction_of(self.vel)
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_advance_moves_and_ages() {
        let mut bullet = Bullet::new(Vec2::new(10.0, 20.0), Vec2::new(100.0, -50.0), 1.0, 5.0);
        assert!(bullet.advance(0.5));
        assert_eq!(bullet.pos, Vec2::new(60.0, -5.0));
        assert_eq!(bullet.age, 0.5);
        assert_eq!(bullet.remaining(), 0.5);
    }

    #[test]
    fn test_expires_exactly_at_lifetime() {
        let mut bullet = Bullet::new(Vec2::ZERO, Vec2::X, 1.0, 5.0);
        assert!(bullet.advance(0.5));
        assert!(!bullet.advance(0.5));
        assert!(!bullet.is_active());
        assert_eq!(bullet.remaining(), 0.0);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut bullet = Bullet::from_angle(Vec2::new(3.0, 4.0), 100.0, 0.3, 2.0, 5.0);
        let before = bullet.clone();
        for _ in 0..10 {
            assert!(bullet.advance(0.0));
        }
        assert_eq!(bullet, before);
    }

    #[test]
    fn test_from_angle_velocity() {
        let bullet = Bullet::from_angle(Vec2::ZERO, 100.0, FRAC_PI_2, 1.0, 5.0);
        assert!(bullet.vel.x.abs() < 1e-4);
        assert!((bullet.vel.y - 100.0).abs() < 1e-4);
        assert!((bullet.speed() - 100.0).abs() < 1e-4);
        assert!((bullet.direction() - FRAC_PI_2).abs() < 1e-5);
        assert!(!bullet.id.is_registered());
    }

    proptest! {
        #[test]
        fn prop_active_until_age_reaches_lifetime(
            lifetime in 0.01f32..10.0,
            steps in prop::collection::vec(0.0f32..0.5, 1..100),
        ) {
            let mut bullet = Bullet::new(Vec2::ZERO, Vec2::ONE, lifetime, 1.0);
            for dt in steps {
                let age_before = bullet.age;
                let alive = bullet.advance(dt);
                prop_assert_eq!(alive, bullet.age < lifetime);
                if !alive {
                    // Expiry happens on the frame age first reaches lifetime
                    prop_assert!(age_before < lifetime);
                    break;
                }
            }
        }
    }
}
