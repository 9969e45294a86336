//! Timed bullet spawner
//!
//! A spawner owns every bullet it creates. Each update it accumulates time,
//! emits at most one pattern once the accumulator reaches the interval, then
//! advances its bullets and drops the ones that expired, unregistering them
//! from the world in the same call.
//!
//! The accumulator is reduced by one interval per emission, so leftover time
//! carries into the next cycle. Whole intervals beyond the first in a single
//! frame are dropped, never queued.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bullet::Bullet;
use super::pattern::{self, BulletParams, PatternKind};
use super::world::{EntityKind, World};
use crate::config::SpawnerConfig;
use crate::error::ConfigError;

/// Where the spawner is in its emit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnerState {
    /// Accumulating time toward the next emission
    Idle,
    /// Spawn duration elapsed; no more emissions
    Finished,
}

/// What one update did (for logging and tests)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnerUpdate {
    /// Bullets created by this update's emission
    pub spawned: usize,
    /// Bullets dropped because their lifetime ran out
    pub expired: usize,
    /// Bullets dropped because they left the world
    pub culled: usize,
}

impl SpawnerUpdate {
    pub fn emitted(&self) -> bool {
        self.spawned > 0
    }
}

#[derive(Debug, Clone)]
pub struct Spawner {
    /// Position in the simulation's spawner list (tags registered bullets)
    index: usize,
    kind: PatternKind,
    params: BulletParams,
    interval: f32,
    duration: Option<f32>,
    /// Max heading offset in radians
    jitter: f32,
    cull_outside_world: bool,
    rng: Pcg32,

    accumulator: f32,
    elapsed: f32,
    /// Next spiral heading (radians), carried across emissions
    running_angle: f32,
    emissions: u32,
    state: SpawnerState,
    bullets: Vec<Bullet>,
}

impl Spawner {
    /// Build a spawner, rejecting malformed parameters up front.
    ///
    /// `seed` drives heading jitter only; it is mixed with `index` so
    /// spawners sharing a seed still differ.
    pub fn new(index: usize, config: &SpawnerConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let stream_seed = seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Ok(Self {
            index,
            kind: config.pattern.to_kind(),
            params: config.bullet_params(),
            interval: config.interval,
            duration: config.duration,
            jitter: config.jitter_degrees.to_radians(),
            cull_outside_world: config.cull_outside_world,
            rng: Pcg32::seed_from_u64(stream_seed),
            accumulator: 0.0,
            elapsed: 0.0,
            running_angle: 0.0,
            emissions: 0,
            state: SpawnerState::Idle,
            bullets: Vec::new(),
        })
    }

    /// Advance the spawner by `dt` seconds
    pub fn update(&mut self, dt: f32, world: &mut World) -> SpawnerUpdate {
        let mut report = SpawnerUpdate::default();

        if self.state == SpawnerState::Idle {
            self.elapsed += dt;
            match self.duration {
                Some(duration) if self.elapsed > duration => {
                    self.state = SpawnerState::Finished;
                    log::info!(
                        "Spawner {} finished after {} emissions",
                        self.index,
                        self.emissions
                    );
                }
                _ => {
                    self.accumulator += dt;
                    if self.accumulator >= self.interval {
                        self.accumulator -= self.interval;
                        if self.accumulator >= self.interval {
                            log::debug!(
                                "Spawner {} dropping {} late emissions",
                                self.index,
                                (self.accumulator / self.interval).floor()
                            );
                            self.accumulator %= self.interval;
                        }
                        let kind = self.kind.clone();
                        report.spawned = self.emit(&kind, world);
                    }
                }
            }
        }

        let cull = self.cull_outside_world;
        let (mut expired, mut culled) = (0, 0);
        self.bullets.retain_mut(|bullet| {
            let alive = bullet.advance(dt);
            let inside = !cull || world.contains(bullet.pos);
            if alive && inside {
                return true;
            }
            world.remove_entity(bullet.id);
            if alive {
                culled += 1;
            } else {
                expired += 1;
            }
            false
        });
        report.expired = expired;
        report.culled = culled;

        if culled > 0 {
            log::debug!("Spawner {} culled {} bullets outside the world", self.index, culled);
        }

        report
    }

    /// Emit the configured pattern right now, ignoring the timer.
    ///
    /// The accumulator is untouched. Returns the bullets just created.
    pub fn spawn_now(&mut self, world: &mut World) -> &[Bullet] {
        let kind = self.kind.clone();
        let start = self.bullets.len();
        self.emit(&kind, world);
        &self.bullets[start..]
    }

    /// Emit an arbitrary pattern right now (scripted bursts).
    ///
    /// Spirals share this spawner's running angle.
    pub fn spawn_pattern_now(
        &mut self,
        kind: &PatternKind,
        world: &mut World,
    ) -> Result<&[Bullet], ConfigError> {
        kind.validate()?;
        let start = self.bullets.len();
        self.emit(kind, world);
        Ok(&self.bullets[start..])
    }

    /// Drop every owned bullet and unregister it
    pub fn clear(&mut self, world: &mut World) {
        for bullet in self.bullets.drain(..) {
            world.remove_entity(bullet.id);
        }
    }

    /// Generate one pattern, register the bullets and take ownership
    fn emit(&mut self, kind: &PatternKind, world: &mut World) -> usize {
        let offsets: Vec<f32> = if self.jitter > 0.0 {
            let jitter = self.jitter;
            (0..kind.heading_count())
                .map(|_| self.rng.random_range(-jitter..=jitter))
                .collect()
        } else {
            Vec::new()
        };

        let mut fresh = pattern::emit(kind, &self.params, &mut self.running_angle, &offsets);
        for bullet in &mut fresh {
            bullet.id = world.add_entity(EntityKind::Bullet { spawner: self.index });
        }

        let count = fresh.len();
        self.bullets.append(&mut fresh);
        self.emissions += 1;
        log::debug!(
            "Spawner {} emitted {} ({} bullets, {} live)",
            self.index,
            kind.name(),
            count,
            self.bullets.len()
        );
        count
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    pub fn params(&self) -> &BulletParams {
        &self.params
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Seconds since the spawner started (stops counting once finished)
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn running_angle(&self) -> f32 {
        self.running_angle
    }

    /// Pattern emissions so far, timed and immediate
    pub fn emissions(&self) -> u32 {
        self.emissions
    }

    pub fn state(&self) -> SpawnerState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SpawnerState::Finished
    }
}
