//! # Emitter Scenario Tests
//!
//! Drives whole emitters frame by frame and checks the lifecycle from the
//! outside: spawning, retirement, culling, pooling and forces.

use ember_core::ObjectPool;
use ember_particles::{
    Color, EmitterConfig, EmitterState, Environment, Particle, ParticleEmitter, ParticleError,
    Rect, SpawnOptions, Texture, UpdateOptions, ValueRange, Vector1Physics, Vector2Physics,
};
use proptest::prelude::*;

/// 60 fps frame.
const FRAME_MS: f32 = 16.0;

fn sprite() -> Particle {
    Particle::new(Texture::new(1, 10.0, 10.0))
}

fn config(rate: f32, lifespan: ValueRange) -> EmitterConfig {
    EmitterConfig::new(
        SpawnOptions {
            lifespan: Some(lifespan),
            ..SpawnOptions::default()
        },
        UpdateOptions {
            spawn_rate: Vector1Physics::value(rate),
            ..UpdateOptions::default()
        },
    )
}

fn run(emitter: &mut ParticleEmitter, frames: usize) {
    for _ in 0..frames {
        emitter.tick(FRAME_MS);
    }
}

/// Test: A particle with a one second lifespan goes back to the pool.
#[test]
fn test_lifespan_retires_particle() {
    let mut emitter = ParticleEmitter::new(sprite, config(1.0, ValueRange::between(1.0, 1.0)))
        .unwrap()
        .with_seed(1);

    emitter.start(true);
    emitter.tick(FRAME_MS);
    emitter.set_spawning(false);
    assert_eq!(emitter.particles().len(), 1);

    // 56 frames = 896 ms lived
    run(&mut emitter, 55);
    assert_eq!(emitter.particles().len(), 1, "retired before its lifespan");

    run(&mut emitter, 10);
    let stats = emitter.stats();
    assert_eq!(stats.live, 0);
    assert_eq!(stats.idle, 1);
    assert_eq!(stats.created, 1);
    assert_eq!(stats.total_spawned, 1);
    assert_eq!(stats.total_retired, 1);
}

/// Test: The live count saturates at the cap and stays there.
#[test]
fn test_live_count_saturates_at_max() {
    let mut cfg = config(10.0, ValueRange::fixed(10.0));
    cfg.max_particles = Some(5);
    let mut emitter = ParticleEmitter::new(sprite, cfg).unwrap().with_seed(2);
    emitter.start(true);

    // 2000 ms
    for _ in 0..125 {
        emitter.tick(FRAME_MS);
        assert!(emitter.particles().len() <= 5);
    }
    assert_eq!(emitter.particles().len(), 5);
    assert_eq!(emitter.stats().created, 5);
}

/// Test: A fast particle is culled on the first tick it is fully outside.
#[test]
fn test_particle_leaves_bounding_frame() {
    let mut cfg = config(1.0, ValueRange::fixed(60.0));
    cfg.bounding_frame = Some(Rect::new(0.0, 0.0, 100.0, 100.0));
    cfg.spawn.position = Vector2Physics {
        velocity_x: Some(ValueRange::fixed(1000.0)),
        ..Vector2Physics::at(50.0, 50.0)
    };
    let mut emitter = ParticleEmitter::new(sprite, cfg).unwrap().with_seed(3);
    emitter.start(true);
    emitter.tick(FRAME_MS);
    emitter.set_spawning(false);

    let mut frames = 1;
    while !emitter.particles().is_empty() {
        let x = emitter.particles()[0].x;
        assert!(x < 100.0, "particle at x={x} should have been culled");
        emitter.tick(FRAME_MS);
        frames += 1;
    }
    // x = 50 + 16 * frames, first past the frame at frame 4
    assert_eq!(frames, 4);
    assert_eq!(emitter.stats().retired_last_tick, 1);
}

/// Test: A bounding frame alone is a valid termination condition.
#[test]
fn test_frame_without_lifespan() {
    let mut cfg = config(1.0, ValueRange::fixed(0.0));
    cfg.spawn.lifespan = None;
    cfg.bounding_frame = Some(Rect::new(0.0, 0.0, 50.0, 50.0));
    cfg.spawn.position = Vector2Physics {
        velocity_y: Some(ValueRange::fixed(-500.0)),
        ..Vector2Physics::at(10.0, 10.0)
    };
    let mut emitter = ParticleEmitter::new(sprite, cfg).unwrap().with_seed(4);
    emitter.start(true);
    emitter.tick(FRAME_MS);
    emitter.set_spawning(false);
    assert_eq!(emitter.particles()[0].lifespan, f32::INFINITY);

    run(&mut emitter, 5);
    assert!(emitter.particles().is_empty());
}

/// Test: Spawning switches itself off while the clock keeps running.
#[test]
fn test_spawn_duration_auto_stop() {
    let mut cfg = config(10.0, ValueRange::fixed(10.0));
    cfg.update.spawn_duration = Some(500.0);
    let mut emitter = ParticleEmitter::new(sprite, cfg).unwrap().with_seed(5);
    emitter.start(true);

    // 31 frames = 496 ms
    run(&mut emitter, 31);
    assert!(emitter.is_spawning());

    emitter.tick(FRAME_MS);
    assert!(!emitter.is_spawning());
    assert_eq!(emitter.state(), EmitterState::Running);

    let live = emitter.particles().len();
    let life = emitter.particles()[0].current_life;
    run(&mut emitter, 30);
    assert_eq!(emitter.particles().len(), live, "no spawns after auto-stop");
    assert!(emitter.particles()[0].current_life > life);
}

/// Test: A pooled particle comes back with every field reset.
#[test]
fn test_pool_round_trip_resets_particle() {
    let options = SpawnOptions {
        position: Vector2Physics {
            velocity: Some(ValueRange::fixed(40.0)),
            max_velocity: Some(80.0),
            ..Vector2Physics::at(3.0, 4.0)
        },
        color: Some(ember_particles::ColorOption::Fixed(Color::from_hex(0x00ff00))),
        lifespan: Some(ValueRange::fixed(2.0)),
        ..SpawnOptions::default()
    }
    .with_on_update(|p, _, _| p.mass = 3.0);

    let mut pool = ObjectPool::new(sprite, 0);
    let mut rng = rand::thread_rng();
    let mut particle = pool.get(|p| p.init(&options, None, &mut rng));
    particle.update(FRAME_MS, None);
    assert_eq!(particle.mass, 3.0);
    pool.release(particle);

    let reused = pool.get(|_| {});
    assert_eq!(pool.created_count(), 1);
    assert_eq!((reused.x, reused.y), (0.0, 0.0));
    assert_eq!((reused.velocity_x, reused.velocity_y), (0.0, 0.0));
    assert_eq!(reused.max_velocity_x, None);
    assert_eq!(reused.tint, Color::WHITE);
    assert_eq!(reused.mass, 1.0);
    assert_eq!(reused.lifespan, f32::INFINITY);
    assert_eq!(reused.current_life, 0.0);
    assert_eq!(reused.texture(), Texture::new(1, 10.0, 10.0));

    // No hook survives the reset
    let mut reused = reused;
    reused.update(FRAME_MS, None);
    assert_eq!(reused.mass, 1.0);
}

/// Test: Retired particles are reused by later spawns.
#[test]
fn test_emitter_reuses_pooled_particles() {
    let mut emitter = ParticleEmitter::new(sprite, config(10.0, ValueRange::fixed(0.05)))
        .unwrap()
        .with_seed(6);
    emitter.start(true);

    // 3 s at 10/s with 50 ms lifespans never needs more than a couple alive
    run(&mut emitter, 190);
    let stats = emitter.stats();
    assert!(stats.total_spawned >= 25);
    assert!(stats.created <= 2, "pool grew to {}", stats.created);
}

/// Test: Velocity caps hold under acceleration and gravity.
#[test]
fn test_velocity_cap_with_gravity() {
    let mut cfg = config(1.0, ValueRange::fixed(10.0));
    cfg.spawn.position = Vector2Physics {
        acceleration_y: Some(ValueRange::fixed(500.0)),
        max_velocity_y: Some(200.0),
        ..Vector2Physics::default()
    };
    cfg.update.environment.gravity = 1000.0;
    let mut emitter = ParticleEmitter::new(sprite, cfg).unwrap().with_seed(7);
    emitter.start(true);
    emitter.tick(FRAME_MS);
    emitter.set_spawning(false);

    for _ in 0..60 {
        emitter.tick(FRAME_MS);
        // Environment runs after the particle caps itself, so allow one
        // frame of gravity on top
        assert!(emitter.particles()[0].velocity_y <= 200.0 + 1000.0 * 0.016 + 1e-3);
    }

    emitter.set_gravity(0.0);
    emitter.tick(FRAME_MS);
    assert!(emitter.particles()[0].velocity_y <= 200.0);
}

/// Test: Drag slows a particle proportionally and never reverses it.
#[test]
fn test_air_resistance_drag() {
    let mut cfg = config(1.0, ValueRange::fixed(10.0));
    cfg.spawn.position = Vector2Physics {
        velocity_x: Some(ValueRange::fixed(100.0)),
        ..Vector2Physics::default()
    };
    cfg.update.environment = Environment {
        air_resistance: 1.0,
        ..Environment::default()
    };
    let mut emitter = ParticleEmitter::new(sprite, cfg).unwrap().with_seed(8);
    emitter.start(true);
    emitter.tick(FRAME_MS);
    emitter.set_spawning(false);

    assert!((emitter.particles()[0].velocity_x - 98.4).abs() < 1e-3);

    let mut last = emitter.particles()[0].velocity_x;
    for _ in 0..100 {
        emitter.tick(FRAME_MS);
        let vx = emitter.particles()[0].velocity_x;
        assert!(vx < last && vx > 0.0);
        last = vx;
    }

    // One 2 s stall drags the velocity to exactly zero
    emitter.tick(2000.0);
    assert_eq!(emitter.particles()[0].velocity_x, 0.0);
}

/// Test: An update hook can keep particles inside the frame.
#[test]
fn test_update_hook_wraps_particles() {
    let mut cfg = config(1.0, ValueRange::fixed(10.0));
    cfg.bounding_frame = Some(Rect::new(0.0, 0.0, 100.0, 100.0));
    cfg.spawn = SpawnOptions {
        position: Vector2Physics {
            velocity_x: Some(ValueRange::fixed(1000.0)),
            ..Vector2Physics::at(50.0, 50.0)
        },
        lifespan: Some(ValueRange::fixed(10.0)),
        ..SpawnOptions::default()
    }
    .with_on_update(|p, _, frame| {
        if let Some(frame) = frame {
            if p.x >= frame.right() {
                p.x -= frame.width;
            }
        }
    });
    let mut emitter = ParticleEmitter::new(sprite, cfg).unwrap().with_seed(9);
    emitter.start(true);
    emitter.tick(FRAME_MS);
    emitter.set_spawning(false);

    run(&mut emitter, 60);
    assert_eq!(emitter.particles().len(), 1);
    assert!(emitter.particles()[0].x < 100.0);
}

/// Test: Construction fails without any termination condition.
#[test]
fn test_no_termination_condition() {
    let cfg = EmitterConfig::new(SpawnOptions::default(), UpdateOptions::default());
    let err = ParticleEmitter::new(sprite, cfg).unwrap_err();
    assert!(matches!(err, ParticleError::NoTerminationCondition));
    assert!(err.to_string().contains("lifespan"));
}

/// Test: Same seed, same simulation.
#[test]
fn test_seeded_emitters_are_deterministic() {
    let fire = || {
        let mut cfg = config(30.0, ValueRange::between(0.35, 0.5));
        cfg.spawn.position = Vector2Physics {
            velocity_x: Some(ValueRange::between(-150.0, 150.0)),
            velocity_y: Some(ValueRange::between(-750.0, -1000.0)),
            ..Vector2Physics::at([-10.0, 10.0], [-10.0, 10.0])
        };
        let mut emitter = ParticleEmitter::new(sprite, cfg).unwrap().with_seed(42);
        emitter.start(true);
        run(&mut emitter, 40);
        emitter.instances().to_vec()
    };

    let first = fire();
    assert!(!first.is_empty());
    assert_eq!(first, fire());
}

/// Test: Loading a config from disk.
#[test]
fn test_config_from_file() {
    let path = std::env::temp_dir().join(format!("ember_emitter_{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "max_particles = 3\n[spawn]\nlifespan = 1\n[update]\nspawn_rate = { value = 100 }\n",
    )
    .unwrap();

    let cfg = EmitterConfig::from_toml_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let mut emitter = ParticleEmitter::new(sprite, cfg).unwrap().with_seed(10);
    emitter.start(true);
    run(&mut emitter, 10);
    assert_eq!(emitter.particles().len(), 3);
}

proptest! {
    /// The live set never exceeds the cap, whatever the frame pacing.
    #[test]
    fn prop_live_never_exceeds_max(
        max in 1usize..20,
        rate in 1.0f32..200.0,
        deltas in prop::collection::vec(0.0f32..250.0, 1..80),
    ) {
        let mut cfg = config(rate, ValueRange::between(0.1, 2.0));
        cfg.max_particles = Some(max);
        let mut emitter = ParticleEmitter::new(sprite, cfg).unwrap().with_seed(0);
        emitter.start(true);

        for delta in deltas {
            emitter.tick(delta);
            let stats = emitter.stats();
            prop_assert!(stats.live <= max);
            prop_assert_eq!(stats.live, emitter.instances().len());
            prop_assert_eq!(stats.idle + stats.live, stats.created);
        }
    }
}
