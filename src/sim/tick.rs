//! Frame-driven simulation loop
//!
//! One tick: every spawner updates (emit, advance, prune), then the player
//! moves. All work is synchronous and bounded; the host stops the
//! simulation simply by not calling it again.

use glam::Vec2;

use super::player::{HeldDirections, Player};
use super::snapshot::{BulletView, FrameSnapshot, PlayerView};
use super::spawner::{Spawner, SpawnerUpdate};
use super::world::World;
use crate::config::SimConfig;
use crate::error::ConfigError;

/// Input for a single tick (read-only snapshot from the input collaborator)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Movement directions currently held
    pub held: HeldDirections,
}

impl From<HeldDirections> for TickInput {
    fn from(held: HeldDirections) -> Self {
        Self { held }
    }
}

/// Turns host timestamps into frame deltas.
///
/// The first frame yields 0. Deltas are never negative (clock anomalies)
/// and never larger than `max_delta` (stalls).
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    max_delta: f32,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last: None,
            max_delta,
        }
    }

    /// Delta in seconds since the previous timestamp
    pub fn delta(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) => now - last,
            None => 0.0,
        };
        self.last = Some(now);

        if dt < 0.0 {
            log::warn!("Clock went backwards by {:.4}s, using dt = 0", -dt);
            return 0.0;
        }
        let dt = dt as f32;
        if dt > self.max_delta {
            log::debug!("Capping frame delta {:.4}s to {:.4}s", dt, self.max_delta);
            return self.max_delta;
        }
        dt
    }

    /// Forget the previous timestamp (e.g. after the host paused)
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Totals from one tick across all spawners
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: usize,
    pub expired: usize,
    pub culled: usize,
}

impl TickReport {
    fn add(&mut self, update: SpawnerUpdate) {
        self.spawned += update.spawned;
        self.expired += update.expired;
        self.culled += update.culled;
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    pub world: World,
    pub player: Player,
    pub spawners: Vec<Spawner>,
    viewport: Vec2,
    clock: FrameClock,
    /// Ticks run so far
    frame: u64,
    /// Simulated seconds
    time: f64,
}

impl Simulation {
    /// Build everything from config, failing fast on bad parameters
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new(config.world.width, config.world.height)?;
        let player = Player::new(&config.player, &mut world)?;
        let spawners = config
            .spawners
            .iter()
            .enumerate()
            .map(|(index, spawner)| Spawner::new(index, spawner, config.seed))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Simulation ready: world {}x{}, {} spawners, seed {}",
            world.width(),
            world.height(),
            spawners.len(),
            config.seed
        );

        Ok(Self {
            world,
            player,
            spawners,
            viewport: config.viewport.size(),
            clock: FrameClock::new(config.max_frame_delta),
            frame: 0,
            time: 0.0,
        })
    }

    /// Advance by an explicit delta (seconds). Negative deltas count as 0.
    pub fn tick(&mut self, dt: f32, input: &TickInput) -> TickReport {
        let dt = dt.max(0.0);
        let mut report = TickReport::default();

        for spawner in &mut self.spawners {
            report.add(spawner.update(dt, &mut self.world));
        }
        self.player.apply_input(&input.held, dt, &self.world);

        self.frame += 1;
        self.time += dt as f64;
        report
    }

    /// Advance using a host timestamp (seconds, monotonic)
    pub fn frame(&mut self, timestamp: f64, input: &TickInput) -> TickReport {
        let dt = self.clock.delta(timestamp);
        self.tick(dt, input)
    }

    pub fn camera_offset(&self) -> Vec2 {
        self.player.camera_offset(self.viewport)
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Live bullets across all spawners
    pub fn bullet_count(&self) -> usize {
        self.spawners.iter().map(|s| s.bullets().len()).sum()
    }

    /// True once every spawner has finished and its bullets are gone
    pub fn is_settled(&self) -> bool {
        self.spawners
            .iter()
            .all(|s| s.is_finished() && s.bullets().is_empty())
    }

    /// Observable output for the presentation layer
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.frame,
            time: self.time,
            bullets: self
                .spawners
                .iter()
                .flat_map(|s| s.bullets())
                .map(|b| BulletView {
                    id: b.id,
                    pos: b.pos,
                    radius: b.radius,
                })
                .collect(),
            player: PlayerView {
                pos: self.player.pos(),
                size: self.player.size(),
            },
            camera_offset: self.camera_offset(),
        }
    }

    /// Drop every bullet, leaving only the player registered
    pub fn clear_bullets(&mut self) {
        for spawner in &mut self.spawners {
            spawner.clear(&mut self.world);
        }
    }
}

/// Advance the simulation by one frame
pub fn tick(sim: &mut Simulation, input: &TickInput, dt: f32) -> TickReport {
    sim.tick(dt, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PatternConfig, SpawnerConfig};
    use crate::sim::player::Direction;

    fn stream_config() -> SimConfig {
        SimConfig {
            spawners: vec![SpawnerConfig {
                pattern: PatternConfig::Stream {
                    angles: vec![0.0, 90.0, 180.0, 270.0],
                    bullets_per_angle: 1,
                },
                interval: 1.0,
                duration: None,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new(0.25);
        assert_eq!(clock.delta(10.0), 0.0);
        assert!((clock.delta(10.016) - 0.016).abs() < 1e-6);
        // Backwards clock clamps to zero
        assert_eq!(clock.delta(9.0), 0.0);
        // Stalls are capped
        assert_eq!(clock.delta(20.0), 0.25);
        clock.reset();
        assert_eq!(clock.delta(100.0), 0.0);
    }

    #[test]
    fn test_zero_tick_is_idempotent() {
        let mut sim = Simulation::new(&stream_config()).unwrap();
        tick(&mut sim, &TickInput::default(), 1.0);
        let before = sim.snapshot();
        let emissions = sim.spawners[0].emissions();

        let held: HeldDirections = [Direction::Right].into_iter().collect();
        for _ in 0..10 {
            let report = tick(&mut sim, &held.into(), 0.0);
            assert_eq!(report, TickReport::default());
        }

        let after = sim.snapshot();
        assert_eq!(after.bullets, before.bullets);
        assert_eq!(after.player, before.player);
        assert_eq!(sim.spawners[0].emissions(), emissions);
        assert_eq!(sim.spawners[0].bullets()[0].age, 1.0);
    }

    #[test]
    fn test_world_tracks_player_and_bullets() {
        let mut sim = Simulation::new(&stream_config()).unwrap();
        assert_eq!(sim.world.entity_count(), 1);

        sim.tick(1.0, &TickInput::default());
        assert_eq!(sim.bullet_count(), 4);
        assert_eq!(sim.world.bullet_count(), 4);
        for bullet in sim.spawners[0].bullets() {
            assert!(sim.world.is_registered(bullet.id));
        }

        sim.clear_bullets();
        assert_eq!(sim.world.entity_count(), 1);
        assert!(sim.world.is_registered(sim.player.id));
    }

    #[test]
    fn test_snapshot_reports_camera_and_player() {
        let mut sim = Simulation::new(&SimConfig::default()).unwrap();
        let held: HeldDirections = [Direction::Up, Direction::Left].into_iter().collect();
        for _ in 0..60 {
            sim.tick(1.0 / 60.0, &held.into());
        }

        let snapshot = sim.snapshot();
        assert_eq!(snapshot.frame, 60);
        assert_eq!(snapshot.player.pos, Vec2::ZERO);
        assert_eq!(snapshot.camera_offset, Vec2::new(384.0, 284.0));
        assert!(!snapshot.bullets.is_empty());
    }

    #[test]
    fn test_frame_uses_timestamps() {
        let mut sim = Simulation::new(&stream_config()).unwrap();
        let input = TickInput::default();
        sim.frame(5.0, &input);
        assert_eq!(sim.time(), 0.0);
        sim.frame(5.2, &input);
        sim.frame(5.1, &input); // backwards, no-op
        sim.frame(5.3, &input);
        assert!((sim.time() - 0.4).abs() < 1e-6);
        assert_eq!(sim.frame_count(), 4);
        assert_eq!(sim.spawners[0].emissions(), 0);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let mut config = stream_config();
        config.spawners[0].interval = 0.0;
        assert!(matches!(
            Simulation::new(&config),
            Err(ConfigError::NonPositiveInterval(_))
        ));
    }
}
