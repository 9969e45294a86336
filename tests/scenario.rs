//! End-to-end frame loop scenarios

use bullet_world::config::{PatternConfig, SimConfig, SpawnerConfig};
use bullet_world::sim::{Direction, HeldDirections, Simulation, TickInput, tick};

fn spawner(pattern: PatternConfig, interval: f32) -> SpawnerConfig {
    SpawnerConfig {
        pattern,
        interval,
        duration: None,
        ..Default::default()
    }
}

#[test]
fn test_interval_scenario_reset_by_subtraction() {
    let config = SimConfig {
        spawners: vec![spawner(
            PatternConfig::Stream {
                angles: vec![0.0, 90.0, 180.0, 270.0],
                bullets_per_angle: 1,
            },
            1.0,
        )],
        ..Default::default()
    };
    let mut sim = Simulation::new(&config).unwrap();
    let input = TickInput::default();

    let spawned: Vec<usize> = (0..4).map(|_| tick(&mut sim, &input, 0.4).spawned).collect();
    assert_eq!(spawned, vec![0, 0, 4, 0]);
    assert_eq!(sim.spawners[0].emissions(), 1);
    assert!((sim.spawners[0].accumulator() - 0.6).abs() < 1e-5);
}

#[test]
fn test_default_demo_runs_to_completion() {
    let mut sim = Simulation::new(&SimConfig::default()).unwrap();
    let held: HeldDirections = [Direction::Right, Direction::Down].into_iter().collect();
    let input: TickInput = held.into();

    // 10s of spawning plus 5s bullet lifetime, at 60 Hz
    let mut previous = sim.snapshot();
    for i in 1..=(16 * 60) {
        sim.frame(i as f64 / 60.0, &input);

        let snapshot = sim.snapshot();
        // Every vanished bullet is also gone from the world registry
        for id in snapshot.removed_since(&previous) {
            assert!(!sim.world.is_registered(id));
        }
        previous = snapshot;

        let p = sim.player.pos();
        assert!(p.x >= 0.0 && p.x <= 800.0 - 32.0);
        assert!(p.y >= 0.0 && p.y <= 1000.0 - 32.0);
    }

    let spawner = &sim.spawners[0];
    assert!(spawner.is_finished());
    // ~10 emissions per second for 10 seconds
    assert!((95..=101).contains(&spawner.emissions()), "{}", spawner.emissions());
    assert!(sim.is_settled());
    assert_eq!(sim.world.entity_count(), 1);

    // Player ended in the bottom-right corner; camera still recenters it
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.player.pos.x, 768.0);
    assert_eq!(snapshot.player.pos.y, 968.0);
    assert_eq!(snapshot.camera_offset.x, -768.0 + 400.0 - 16.0);
    assert_eq!(snapshot.camera_offset.y, -968.0 + 300.0 - 16.0);
}

#[test]
fn test_spiral_headings_across_ticks() {
    let config = SimConfig {
        spawners: vec![spawner(
            PatternConfig::Spiral {
                angle_step: 10.0,
                wrap: false,
            },
            0.5,
        )],
        ..Default::default()
    };
    let mut sim = Simulation::new(&config).unwrap();
    for _ in 0..6 {
        sim.tick(0.5, &TickInput::default());
    }

    let headings: Vec<f32> = sim.spawners[0]
        .bullets()
        .iter()
        .map(|b| b.direction().to_degrees())
        .collect();
    assert_eq!(headings.len(), 6);
    for (i, heading) in headings.iter().enumerate() {
        assert!((heading - 10.0 * i as f32).abs() < 1e-3, "{headings:?}");
    }
    assert!((sim.spawners[0].running_angle().to_degrees() - 60.0).abs() < 1e-3);
}

#[test]
fn test_multiple_spawners_share_world() {
    let config = SimConfig {
        spawners: vec![
            spawner(PatternConfig::Ring { count: 8, offset: 0.0 }, 1.0),
            spawner(
                PatternConfig::Stream {
                    angles: vec![45.0],
                    bullets_per_angle: 3,
                },
                0.5,
            ),
        ],
        ..Default::default()
    };
    let mut sim = Simulation::new(&config).unwrap();
    let report = sim.tick(1.0, &TickInput::default());
    assert_eq!(report.spawned, 11);
    assert_eq!(sim.world.bullet_count(), 11);
    assert_eq!(sim.snapshot().bullets.len(), 11);

    // Ids are unique across spawners
    let mut ids: Vec<_> = sim.snapshot().bullet_ids().collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 11);
}

#[test]
fn test_config_file_round_trip() {
    let dir = std::env::temp_dir().join(format!("bullet-world-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");

    let config = SimConfig::default();
    std::fs::write(&path, config.to_json_pretty().unwrap()).unwrap();
    assert_eq!(SimConfig::load(&path).unwrap(), config);

    assert!(SimConfig::load(dir.join("missing.json")).is_err());
    std::fs::remove_dir_all(&dir).unwrap();
}
