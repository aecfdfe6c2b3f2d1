//! # Particle Error Types
//!
//! All errors that can occur while building an emitter.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the particle system.
#[derive(Error, Debug)]
pub enum ParticleError {
    /// Neither a lifespan nor a bounding frame was configured, so particles
    /// would never terminate.
    #[error("no termination condition: define a lifespan or a bounding frame")]
    NoTerminationCondition,

    /// Emitter configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Emitter configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for particle operations.
pub type ParticleResult<T> = Result<T, ParticleError>;
