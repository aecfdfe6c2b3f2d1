//! # EMBER FX
//!
//! Ready-made particle effects built on `ember_particles`.
//!
//! ```rust
//! use ember_fx::fire::{fire_config, fire_particle_factory};
//! use ember_particles::ParticleEmitter;
//!
//! let mut fire = ParticleEmitter::new(fire_particle_factory(None), fire_config())?;
//! fire.start(true);
//! fire.tick(32.0);
//! assert!(!fire.particles().is_empty());
//! # Ok::<(), ember_particles::ParticleError>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod fire;

pub use fire::{fire_config, fire_particle_factory, FIRE_TEXTURE_NAMES};
