//! # Fire
//!
//! Short-lived flames that shoot upward, grow, and fade from white to red.
//! Each particle draws with one of ten fire sprites, picked when the
//! particle is constructed and kept for every reuse.

use ember_core::{pick, Color};
use ember_particles::{
    AlphaOption, ColorOption, EmitterConfig, Easing, Particle, ScaleOption, SpawnOptions,
    StartEnd, Texture, UpdateOptions, ValueRange, Vector1Physics, Vector2Physics,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Sprite names, indexed by texture slot.
pub const FIRE_TEXTURE_NAMES: [&str; 10] = [
    "particle_fire_0.png",
    "particle_fire_1.png",
    "particle_fire_2.png",
    "particle_fire_3.png",
    "particle_fire_4.png",
    "particle_fire_5.png",
    "particle_fire_6.png",
    "particle_fire_7.png",
    "particle_fire_8.png",
    "particle_fire_9.png",
];

/// Pixel extent of every fire sprite.
pub const FIRE_TEXTURE_EXTENT: f32 = 64.0;

/// Bundled TOML form of [`fire_config`].
pub const FIRE_CONFIG_TOML: &str = include_str!("../assets/fire.toml");

/// Constructor for fire particles.
///
/// The returned closure owns its RNG so the emitter RNG stays untouched by
/// pool growth.
pub fn fire_particle_factory(seed: Option<u64>) -> impl FnMut() -> Particle + Send + 'static {
    let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let slots: Vec<u32> = (0..).take(FIRE_TEXTURE_NAMES.len()).collect();
    move || {
        let slot = pick(&mut rng, &slots).copied().unwrap_or(0);
        Particle::new(Texture::new(slot, FIRE_TEXTURE_EXTENT, FIRE_TEXTURE_EXTENT))
    }
}

/// Sprite name of a texture slot.
#[must_use]
pub fn fire_texture_name(texture: Texture) -> Option<&'static str> {
    FIRE_TEXTURE_NAMES.get(texture.id as usize).copied()
}

/// The fire emitter preset.
#[must_use]
pub fn fire_config() -> EmitterConfig {
    let spawn = SpawnOptions {
        lifespan: Some(ValueRange::between(0.35, 0.5)),
        position: Vector2Physics {
            velocity_x: Some(ValueRange::between(-150.0, 150.0)),
            velocity_y: Some(ValueRange::between(-750.0, -1000.0)),
            ..Vector2Physics::at([-10.0, 10.0], [-10.0, 10.0])
        },
        scale: Some(ScaleOption::Transition(StartEnd::new([0.25, 0.5], [2.0, 3.0]))),
        color: Some(ColorOption::Transition {
            start: Color::from_hex(0xff_ffff),
            end: Color::from_hex(0xff_0000),
        }),
        alpha: Some(AlphaOption::Transition(StartEnd::new(1.0, 0.0))),
        ..SpawnOptions::default()
    };
    let update = UpdateOptions {
        spawn_rate: Vector1Physics::value(25.0),
        interval: 32.0,
        ..UpdateOptions::default()
    };

    let mut config = EmitterConfig::new(spawn, update);
    config.initial_size = 1;
    config.max_particles = Some(10);
    config
}

/// Replaces the linear alpha fade with a quadratic one: flames stay bright
/// longer and drop off at the end of their life.
#[must_use]
pub fn with_eased_fade(spawn: SpawnOptions) -> SpawnOptions {
    spawn.with_alpha_fn(|particle, _| {
        if particle.lifespan.is_finite() {
            let life = particle.current_life.min(particle.lifespan);
            1.0 - Easing::Exponential.apply(life, particle.lifespan)
        } else {
            1.0
        }
    })
}
