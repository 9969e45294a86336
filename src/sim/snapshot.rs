//! Per-frame output for the presentation layer
//!
//! Plain data only. Whatever draws the world maps these onto shapes and
//! drops visuals for bullet ids that no longer appear.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::world::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

/// Everything observable after one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    /// Simulated seconds since start
    pub time: f64,
    /// Live bullets, spawner order then creation order
    pub bullets: Vec<BulletView>,
    pub player: PlayerView,
    pub camera_offset: Vec2,
}

impl FrameSnapshot {
    /// Bullet ids present in this frame
    pub fn bullet_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.bullets.iter().map(|b| b.id)
    }

    /// Ids present in `previous` but gone now (visuals to remove)
    pub fn removed_since(&self, previous: &FrameSnapshot) -> Vec<EntityId> {
        let current: std::collections::BTreeSet<EntityId> = self.bullet_ids().collect();
        previous
            .bullet_ids()
            .filter(|id| !current.contains(id))
            .collect()
    }
}
