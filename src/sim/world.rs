//! World bounds and entity registry
//!
//! The world does not update anything itself. It holds the fixed playable
//! rectangle, answers geometry questions about it, and keeps track of which
//! entities are alive this frame.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Stable identifier handed out by the world registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Placeholder id for entities not yet registered
    pub const UNREGISTERED: EntityId = EntityId(0);

    pub fn is_registered(self) -> bool {
        self != Self::UNREGISTERED
    }
}

/// What a registered entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    /// Bullet owned by the spawner at this index
    Bullet { spawner: usize },
}

/// Fixed rectangular world, origin at the top-left corner
#[derive(Debug, Clone)]
pub struct World {
    width: u32,
    height: u32,
    /// Live entities (sorted by id for stable iteration)
    entities: BTreeMap<EntityId, EntityKind>,
    next_id: u32,
}

impl World {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::NonPositiveWorldSize { width, height });
        }
        Ok(Self {
            width,
            height,
            entities: BTreeMap::new(),
            next_id: 1,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// World extent as a vector
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Register an entity and return its new id
    pub fn add_entity(&mut self, kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, kind);
        id
    }

    /// Unregister an entity. Returns false if it was not registered.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        self.entities.remove(&id).is_some()
    }

    pub fn is_registered(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        self.entities.get(&id).copied()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Registered entities in id order
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, EntityKind)> + '_ {
        self.entities.iter().map(|(id, kind)| (*id, *kind))
    }

    /// Number of registered bullets across all spawners
    pub fn bullet_count(&self) -> usize {
        self.entities
            .values()
            .filter(|k| matches!(k, EntityKind::Bullet { .. }))
            .count()
    }

    /// True iff `0 <= x < width` and `0 <= y < height`
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width as f32
            && point.y < self.height as f32
    }

    /// Clamp a top-left position so an entity of `entity_size` stays inside.
    ///
    /// An entity larger than the world is pinned to the origin on that axis.
    pub fn clamp_to_bounds(&self, position: Vec2, entity_size: Vec2) -> Vec2 {
        let max = self.size() - entity_size;
        // min-then-max rather than f32::clamp: clamp panics when max < 0
        Vec2::new(
            position.x.min(max.x).max(0.0),
            position.y.min(max.y).max(0.0),
        )
    }
}
