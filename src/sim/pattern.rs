//! Bullet pattern generation
//!
//! Pure functions mapping a center point and parameters to freshly built
//! bullets. All angles are radians here; configuration speaks degrees and
//! converts once when a spawner is built.
//!
//! Nothing in this module samples randomness. Angle jitter is passed in as
//! explicit offsets so every pattern is reproducible.

use std::f32::consts::TAU;

use glam::Vec2;

use super::bullet::Bullet;
use crate::error::{ConfigError, ensure_finite, ensure_non_negative};
use crate::wrap_angle;

/// The closed set of pattern shapes
#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    /// One bullet per emission; the heading advances by `step` each time
    Spiral {
        step: f32,
        /// Wrap the running angle into [0, 2π) instead of letting it grow
        wrap: bool,
    },
    /// Every angle at once, `bullets_per_angle` bullets each
    Stream {
        angles: Vec<f32>,
        bullets_per_angle: u32,
    },
    /// `count` evenly spaced headings starting at `offset`
    Ring { count: u32, offset: f32 },
}

impl PatternKind {
    /// Check shape parameters. Called once when a spawner is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            PatternKind::Spiral { step, .. } => {
                ensure_finite("spiral angle step", *step)?;
            }
            PatternKind::Stream {
                angles,
                bullets_per_angle,
            } => {
                if angles.is_empty() {
                    return Err(ConfigError::EmptyAngleSet);
                }
                if *bullets_per_angle == 0 {
                    return Err(ConfigError::NonPositiveCount);
                }
                for angle in angles {
                    ensure_finite("stream angle", *angle)?;
                }
            }
            PatternKind::Ring { count, offset } => {
                if *count == 0 {
                    return Err(ConfigError::NonPositiveCount);
                }
                ensure_finite("ring offset", *offset)?;
            }
        }
        Ok(())
    }

    /// How many headings one emission uses (one jitter offset per heading)
    pub fn heading_count(&self) -> usize {
        match self {
            PatternKind::Spiral { .. } => 1,
            PatternKind::Stream { angles, .. } => angles.len(),
            PatternKind::Ring { count, .. } => *count as usize,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Spiral { .. } => "spiral",
            PatternKind::Stream { .. } => "stream",
            PatternKind::Ring { .. } => "ring",
        }
    }
}

/// Per-bullet parameters shared by every shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletParams {
    pub center: Vec2,
    pub speed: f32,
    pub lifetime: f32,
    pub radius: f32,
    /// Extra speed for each repetition at the same heading
    pub speed_step: f32,
}

impl BulletParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("spawner center x", self.center.x)?;
        ensure_finite("spawner center y", self.center.y)?;
        ensure_non_negative("bullet speed", self.speed)?;
        ensure_finite("bullet speed step", self.speed_step)?;
        ensure_non_negative("bullet radius", self.radius)?;
        let lifetime = ensure_finite("bullet lifetime", self.lifetime)?;
        if lifetime <= 0.0 {
            return Err(ConfigError::NonPositiveLifetime(lifetime));
        }
        Ok(())
    }
}

/// One bullet per (angle, repetition) pair, angle-major order
pub fn generate(params: &BulletParams, angles: &[f32], bullets_per_angle: u32) -> Vec<Bullet> {
    let mut bullets = Vec::with_capacity(angles.len() * bullets_per_angle as usize);
    for &angle in angles {
        for rep in 0..bullets_per_angle {
            let speed = params.speed + params.speed_step * rep as f32;
            bullets.push(Bullet::from_angle(
                params.center,
                speed,
                angle,
                params.lifetime,
                params.radius,
            ));
        }
    }
    bullets
}

/// Full angle set in one call, nothing carried between calls
pub fn stream(params: &BulletParams, angles: &[f32], bullets_per_angle: u32) -> Vec<Bullet> {
    generate(params, angles, bullets_per_angle)
}

/// Emit one bullet at `*running_angle`, then advance it by `step`.
///
/// The caller owns the running angle and must keep it between emissions.
pub fn spiral(params: &BulletParams, running_angle: &mut f32, step: f32, wrap: bool) -> Bullet {
    let bullet = Bullet::from_angle(
        params.center,
        params.speed,
        *running_angle,
        params.lifetime,
        params.radius,
    );
    *running_angle += step;
    if wrap {
        *running_angle = wrap_angle(*running_angle);
    }
    bullet
}

/// `count` evenly spaced headings starting at `offset`
pub fn ring_angles(count: u32, offset: f32) -> Vec<f32> {
    (0..count)
        .map(|i| offset + i as f32 / count as f32 * TAU)
        .collect()
}

/// Add caller-supplied offsets to headings. Missing offsets count as zero.
pub fn jitter(angles: &[f32], offsets: &[f32]) -> Vec<f32> {
    angles
        .iter()
        .enumerate()
        .map(|(i, a)| a + offsets.get(i).copied().unwrap_or(0.0))
        .collect()
}

/// Build one emission of `kind`.
///
/// `running_angle` is only read and advanced by spirals. `offsets` holds one
/// jitter value per heading (see [`PatternKind::heading_count`]); pass an
/// empty slice for none.
pub fn emit(
    kind: &PatternKind,
    params: &BulletParams,
    running_angle: &mut f32,
    offsets: &[f32],
) -> Vec<Bullet> {
    match kind {
        PatternKind::Spiral { step, wrap } => {
            let mut bullet = spiral(params, running_angle, *step, *wrap);
            if let Some(offset) = offsets.first().copied().filter(|o| *o != 0.0) {
                let heading = bullet.direction() + offset;
                bullet.vel = crate::polar_to_cartesian(params.speed, heading);
            }
            vec![bullet]
        }
        PatternKind::Stream {
            angles,
            bullets_per_angle,
        } => stream(params, &jitter(angles, offsets), *bullets_per_angle),
        PatternKind::Ring { count, offset } => {
            generate(params, &jitter(&ring_angles(*count, *offset), offsets), 1)
        }
    }
}
