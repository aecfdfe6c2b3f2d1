//! # Emitter Configuration
//!
//! Everything an emitter needs except the particle constructor and hooks.
//! Loaded once at startup, from code or from TOML:
//!
//! ```toml
//! initial_size = 1
//! max_particles = 10
//!
//! [spawn]
//! lifespan = [0.35, 0.5]
//! position = { x = [-10, 10], y = [-10, 10], velocity_y = [-750, -1000] }
//! scale = { start = [0.25, 0.5], end = [2, 3] }
//! color = { start = 0xffffff, end = 0xff0000 }
//! alpha = { start = 1, end = 0 }
//!
//! [update]
//! spawn_rate = { value = 25 }
//! interval = 32
//! ```

use std::path::Path;

use ember_core::Rect;
use serde::Deserialize;

use crate::error::{ParticleError, ParticleResult};
use crate::options::{SpawnOptions, UpdateOptions};

/// Live particle cap when none is configured.
pub const DEFAULT_MAX_PARTICLES: usize = 100;

/// Emitter construction options.
#[derive(Clone, Debug, Deserialize)]
pub struct EmitterConfig {
    /// Particles constructed into the pool up front.
    #[serde(default)]
    pub initial_size: usize,
    /// Live particle cap, [`DEFAULT_MAX_PARTICLES`] when absent.
    #[serde(default)]
    pub max_particles: Option<usize>,
    /// Per-particle spawn descriptor.
    pub spawn: SpawnOptions,
    /// Emitter-wide update configuration.
    pub update: UpdateOptions,
    /// Culling frame in emitter-local coordinates.
    #[serde(default)]
    pub bounding_frame: Option<Rect>,
}

impl EmitterConfig {
    /// Creates a config with the default pool and particle cap.
    #[must_use]
    pub fn new(spawn: SpawnOptions, update: UpdateOptions) -> Self {
        Self {
            initial_size: 0,
            max_particles: None,
            spawn,
            update,
            bounding_frame: None,
        }
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ParticleError::Config`] if the document does not describe
    /// an emitter.
    pub fn from_toml_str(text: &str) -> ParticleResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ParticleError::Io`] if the file cannot be read and
    /// [`ParticleError::Config`] if it cannot be parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ParticleResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ParticleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Effective live particle cap.
    #[must_use]
    pub fn max_particles(&self) -> usize {
        self.max_particles.unwrap_or(DEFAULT_MAX_PARTICLES)
    }

    /// Checks that particles have a termination condition.
    ///
    /// # Errors
    ///
    /// Returns [`ParticleError::NoTerminationCondition`] when neither a
    /// lifespan nor a bounding frame is set. A lifespan that can only resolve
    /// to zero or less counts as unset.
    pub fn validate(&self) -> ParticleResult<()> {
        let has_lifespan = self
            .spawn
            .lifespan
            .as_ref()
            .is_some_and(|lifespan| lifespan.max() > 0.0);
        if !has_lifespan && self.bounding_frame.is_none() {
            return Err(ParticleError::NoTerminationCondition);
        }
        Ok(())
    }
}
