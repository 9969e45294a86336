//! Simulation configuration
//!
//! Construction-time parameters only. Angles are written in degrees here and
//! converted to radians when a spawner is built. Loaded from JSON; any
//! section left out falls back to the original demo values.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ensure_finite, ensure_non_negative};
use crate::sim::pattern::{BulletParams, PatternKind};

/// World bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

/// Visible window onto the world (drives the camera offset)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

impl ViewportConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Player start state and movement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Top-left corner at start
    pub start: Vec2,
    pub size: Vec2,
    /// World units per second along each held direction
    pub speed: f32,
    /// Scale diagonal movement down to `speed` (off keeps the faster diagonals)
    pub normalize_diagonal: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            normalize_diagonal: false,
        }
    }
}

/// Pattern shape as written in config (degrees)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternConfig {
    Spiral {
        angle_step: f32,
        #[serde(default)]
        wrap: bool,
    },
    Stream {
        angles: Vec<f32>,
        #[serde(default = "default_bullets_per_angle")]
        bullets_per_angle: u32,
    },
    Ring {
        count: u32,
        #[serde(default)]
        offset: f32,
    },
}

fn default_bullets_per_angle() -> u32 {
    1
}

impl PatternConfig {
    /// Convert to the runtime shape (radians)
    pub fn to_kind(&self) -> PatternKind {
        match self {
            PatternConfig::Spiral { angle_step, wrap } => PatternKind::Spiral {
                step: angle_step.to_radians(),
                wrap: *wrap,
            },
            PatternConfig::Stream {
                angles,
                bullets_per_angle,
            } => PatternKind::Stream {
                angles: angles.iter().map(|a| a.to_radians()).collect(),
                bullets_per_angle: *bullets_per_angle,
            },
            PatternConfig::Ring { count, offset } => PatternKind::Ring {
                count: *count,
                offset: offset.to_radians(),
            },
        }
    }
}

/// One bullet spawner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub pattern: PatternConfig,
    pub center: Vec2,
    /// Seconds between emissions
    pub interval: f32,
    /// Stop emitting after this many seconds (None = forever)
    pub duration: Option<f32>,
    pub speed: f32,
    /// Extra speed per repeated bullet at the same heading
    pub speed_step: f32,
    pub lifetime: f32,
    pub radius: f32,
    /// Random heading offset in [-jitter, jitter] degrees (0 = none)
    pub jitter_degrees: f32,
    /// Also expire bullets that leave the world bounds
    pub cull_outside_world: bool,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            pattern: PatternConfig::Spiral {
                angle_step: SPIRAL_ANGLE_STEP_DEG,
                wrap: false,
            },
            center: Vec2::new(WORLD_WIDTH as f32 / 2.0, WORLD_HEIGHT as f32 / 2.0),
            interval: 1.0 / SPIRAL_SPAWN_RATE,
            duration: Some(SPIRAL_DURATION),
            speed: BULLET_SPEED,
            speed_step: 0.0,
            lifetime: BULLET_LIFETIME,
            radius: BULLET_RADIUS,
            jitter_degrees: 0.0,
            cull_outside_world: false,
        }
    }
}

impl SpawnerConfig {
    /// Set the interval from emissions per second
    pub fn with_rate(mut self, per_second: f32) -> Self {
        self.interval = 1.0 / per_second;
        self
    }

    /// Per-bullet parameters for the pattern generator
    pub fn bullet_params(&self) -> BulletParams {
        BulletParams {
            center: self.center,
            speed: self.speed,
            lifetime: self.lifetime,
            radius: self.radius,
            speed_step: self.speed_step,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let interval = ensure_finite("spawn interval", self.interval)?;
        if interval <= 0.0 {
            return Err(ConfigError::NonPositiveInterval(interval));
        }
        if let Some(duration) = self.duration {
            let duration = ensure_finite("spawn duration", duration)?;
            if duration <= 0.0 {
                return Err(ConfigError::NonPositiveDuration(duration));
            }
        }
        ensure_non_negative("jitter degrees", self.jitter_degrees)?;
        self.pattern.to_kind().validate()?;
        self.bullet_params().validate()
    }
}

/// Everything needed to build a [`crate::sim::Simulation`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub viewport: ViewportConfig,
    pub player: PlayerConfig,
    pub spawners: Vec<SpawnerConfig>,
    /// Largest dt the frame clock hands out (seconds)
    pub max_frame_delta: f32,
    /// Seed for spawner jitter
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            viewport: ViewportConfig::default(),
            player: PlayerConfig::default(),
            spawners: vec![SpawnerConfig::default()],
            max_frame_delta: MAX_FRAME_DELTA,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Parse from a JSON string and validate
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every section. Building a simulation runs this too.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(ConfigError::NonPositiveWorldSize {
                width: self.world.width,
                height: self.world.height,
            });
        }
        ensure_non_negative("viewport width", self.viewport.width)?;
        ensure_non_negative("viewport height", self.viewport.height)?;
        ensure_non_negative("player speed", self.player.speed)?;
        ensure_finite("player start x", self.player.start.x)?;
        ensure_finite("player start y", self.player.start.y)?;
        ensure_non_negative("player width", self.player.size.x)?;
        ensure_non_negative("player height", self.player.size.y)?;
        if self.player.size.x > self.world.width as f32
            || self.player.size.y > self.world.height as f32
        {
            return Err(ConfigError::PlayerLargerThanWorld);
        }
        let max_delta = ensure_finite("max frame delta", self.max_frame_delta)?;
        if max_delta <= 0.0 {
            return Err(ConfigError::NonPositiveInterval(max_delta));
        }
        for spawner in &self.spawners {
            spawner.validate()?;
        }
        Ok(())
    }
}
