//! Caller-supplied callbacks attached to spawn descriptors.
//!
//! Hooks run after the built-in integration of a tick and may override
//! anything it computed.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use ember_core::{Color, Rect};

use crate::particle::Particle;

/// Custom alpha: `(particle, elapsed_ms) -> alpha`.
pub type AlphaFn = dyn Fn(&Particle, f32) -> f32 + Send + Sync;

/// Custom tint: `(particle, elapsed_ms) -> color`.
pub type ColorFn = dyn Fn(&Particle, f32) -> Color + Send + Sync;

/// Runs once at the end of `Particle::init`.
pub type InitFn = dyn Fn(&mut Particle, Option<&Rect>) + Send + Sync;

/// Runs at the end of every `Particle::update`.
pub type UpdateFn = dyn Fn(&mut Particle, f32, Option<&Rect>) + Send + Sync;

/// Shared, cloneable callback.
pub struct Hook<F: ?Sized>(Arc<F>);

impl Hook<AlphaFn> {
    /// Wraps a custom alpha function.
    pub fn alpha<F>(f: F) -> Self
    where
        F: Fn(&Particle, f32) -> f32 + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }
}

impl Hook<ColorFn> {
    /// Wraps a custom tint function.
    pub fn color<F>(f: F) -> Self
    where
        F: Fn(&Particle, f32) -> Color + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }
}

impl Hook<InitFn> {
    /// Wraps an init callback.
    pub fn on_init<F>(f: F) -> Self
    where
        F: Fn(&mut Particle, Option<&Rect>) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }
}

impl Hook<UpdateFn> {
    /// Wraps an update callback.
    pub fn on_update<F>(f: F) -> Self
    where
        F: Fn(&mut Particle, f32, Option<&Rect>) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }
}

impl<F: ?Sized> Clone for Hook<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> Deref for Hook<F> {
    type Target = F;

    fn deref(&self) -> &F {
        &self.0
    }
}

impl<F: ?Sized> fmt::Debug for Hook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook(..)")
    }
}
