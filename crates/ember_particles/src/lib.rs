//! # EMBER Particles
//!
//! Object-pooled 2D particle simulation.
//!
//! ## Architecture
//!
//! ```text
//! SpawnOptions ──► Particle::init ──► live set ──► Particle::update
//!                        ▲                              │
//!                        │                      Environment::apply
//!                   ObjectPool ◄── expired / out of bounds
//! ```
//!
//! - [`Particle`] integrates its own motion, scale, rotation, alpha and tint
//! - [`Environment`] adds gravity, drag and wind on top
//! - [`ParticleEmitter`] schedules spawning, throttles ticks, culls, and
//!   commits a [`ParticleInstance`] batch for the renderer
//!
//! ## Example
//!
//! ```rust
//! use ember_particles::{EmitterConfig, Particle, ParticleEmitter, Texture};
//!
//! let config = EmitterConfig::from_toml_str(
//!     r"
//!     [spawn]
//!     lifespan = 1
//!     [update]
//!     spawn_rate = { value = 10 }
//!     ",
//! )?;
//! let mut emitter = ParticleEmitter::new(|| Particle::new(Texture::new(0, 8.0, 8.0)), config)?;
//!
//! emitter.start(true);
//! emitter.tick(16.0);
//! assert_eq!(emitter.particles().len(), 1);
//! # Ok::<(), ember_particles::ParticleError>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod easing;
pub mod emitter;
pub mod environment;
pub mod error;
pub mod hook;
pub mod instance;
pub mod options;
pub mod particle;

pub use config::{EmitterConfig, DEFAULT_MAX_PARTICLES};
pub use easing::Easing;
pub use emitter::{EmitterState, EmitterStats, ParticleEmitter};
pub use environment::Environment;
pub use error::{ParticleError, ParticleResult};
pub use hook::Hook;
pub use instance::ParticleInstance;
pub use options::{
    AlphaOption, ColorOption, ScaleOption, SpawnOptions, StartEnd, UpdateOptions, Vector1Physics,
    Vector2Physics,
};
pub use particle::{AlphaMode, InitSnapshot, Particle, ScaleMode, TintMode, Texture};

pub use ember_core::{Color, Point, Rect, ValueRange};
