//! Renderable output.
//!
//! After every evaluated tick the emitter commits one [`ParticleInstance`]
//! per live particle. The layout is plain old data so a renderer can upload
//! the batch as bytes.

use bytemuck::{Pod, Zeroable};

use crate::particle::Particle;
use ember_core::Point;

/// Per-particle draw data (48 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Position in the emitter's parent space (xy).
    pub position: [f32; 2],
    /// Scale (xy).
    pub scale: [f32; 2],
    /// Rotation in radians.
    pub rotation: f32,
    /// Opacity.
    pub alpha: f32,
    /// Texture slot.
    pub texture_id: u32,
    /// Padding to 16 bytes.
    pub _pad: u32,
    /// Tint (rgba).
    pub tint: [f32; 4],
}

impl ParticleInstance {
    /// Size of an instance in bytes
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Builds the draw data of `particle` offset by the emitter `origin`.
    #[must_use]
    pub fn from_particle(particle: &Particle, origin: Point) -> Self {
        Self {
            position: [origin.x + particle.x, origin.y + particle.y],
            scale: [particle.scale_x, particle.scale_y],
            rotation: particle.rotation,
            alpha: particle.alpha,
            texture_id: particle.texture().id,
            _pad: 0,
            tint: particle.tint.to_array(),
        }
    }
}
