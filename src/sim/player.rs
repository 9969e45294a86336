//! Player movement and camera follow

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::world::{EntityId, EntityKind, World};
use crate::config::PlayerConfig;
use crate::error::{ConfigError, ensure_finite, ensure_non_negative};

/// A movement direction the input collaborator can report as held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Snapshot of held movement directions for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn press(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up = true,
            Direction::Down => self.down = true,
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
        }
    }

    /// Unit steps per axis (screen coordinates: up is -y). Opposite
    /// directions cancel out.
    pub fn axis(&self) -> Vec2 {
        Vec2::new(
            self.right as i32 as f32 - self.left as i32 as f32,
            self.down as i32 as f32 - self.up as i32 as f32,
        )
    }
}

impl FromIterator<Direction> for HeldDirections {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut held = Self::default();
        for direction in iter {
            held.press(direction);
        }
        held
    }
}

/// The player-controlled box
#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    /// Top-left corner
    pos: Vec2,
    size: Vec2,
    /// World units per second along each held direction
    speed: f32,
    normalize_diagonal: bool,
}

impl Player {
    /// Register a player in `world`, clamping the start position into bounds
    pub fn new(config: &PlayerConfig, world: &mut World) -> Result<Self, ConfigError> {
        ensure_finite("player start x", config.start.x)?;
        ensure_finite("player start y", config.start.y)?;
        ensure_non_negative("player width", config.size.x)?;
        ensure_non_negative("player height", config.size.y)?;
        ensure_non_negative("player speed", config.speed)?;
        if config.size.x > world.width() as f32 || config.size.y > world.height() as f32 {
            return Err(ConfigError::PlayerLargerThanWorld);
        }

        let id = world.add_entity(EntityKind::Player);
        Ok(Self {
            id,
            pos: world.clamp_to_bounds(config.start, config.size),
            size: config.size,
            speed: config.speed,
            normalize_diagonal: config.normalize_diagonal,
        })
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Center of the player box
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Apply a delta and clamp the result into the world
    pub fn move_by(&mut self, delta: Vec2, world: &World) {
        self.pos = world.clamp_to_bounds(self.pos + delta, self.size);
    }

    /// Move according to held directions for `dt` seconds.
    ///
    /// Each axis moves at full speed on its own, so diagonals cover more
    /// ground unless `normalize_diagonal` is set.
    pub fn apply_input(&mut self, held: &HeldDirections, dt: f32, world: &World) {
        let mut axis = held.axis();
        if self.normalize_diagonal {
            axis = axis.normalize_or_zero();
        }
        if axis != Vec2::ZERO {
            self.move_by(axis * self.speed * dt, world);
        }
    }

    /// Translation that keeps the player centered in a viewport.
    ///
    /// Ignores world bounds: near an edge the player stays clamped while the
    /// camera keeps following, so the world edge scrolls into view.
    pub fn camera_offset(&self, viewport: Vec2) -> Vec2 {
        -self.pos + viewport / 2.0 - self.size / 2.0
    }
}
