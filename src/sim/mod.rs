//! Real-time entity simulation
//!
//! Everything that moves lives here. This module must stay free of I/O:
//! - Time comes in as a delta (or a host timestamp via `FrameClock`)
//! - Randomness only through seeded, per-spawner RNGs
//! - Stable iteration order (spawner order, then creation order)
//! - No rendering dependencies; `FrameSnapshot` is the output

pub mod bullet;
pub mod pattern;
pub mod player;
pub mod snapshot;
pub mod spawner;
pub mod tick;
pub mod world;

pub use bullet::Bullet;
pub use pattern::{BulletParams, PatternKind};
pub use player::{Direction, HeldDirections, Player};
pub use snapshot::{BulletView, FrameSnapshot, PlayerView};
pub use spawner::{Spawner, SpawnerState, SpawnerUpdate};
pub use tick::{FrameClock, Simulation, TickInput, TickReport, tick};
pub use world::{EntityId, EntityKind, World};
