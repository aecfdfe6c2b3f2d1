//! # Environment Forces
//!
//! Global forces applied to every live particle once per evaluated tick:
//! - Gravity accelerates Y velocity
//! - Air resistance drags each velocity axis toward zero, never past it
//! - Wind pushes along X and Y
//!
//! Drag and wind scale with the particle's projected surface only when
//! `affect_surface` is set and at least one of them is configured. Otherwise
//! a unit surface is used.

use serde::Deserialize;

use crate::particle::Particle;

/// Surface is measured in texture pixels and divided by this factor.
const SURFACE_DIVISOR: f32 = 1000.0;

/// Environment configuration and runtime state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Scale drag and wind by the particle surface.
    pub affect_surface: bool,
    /// Y acceleration (pixels per second squared).
    pub gravity: f32,
    /// Drag coefficient.
    pub air_resistance: f32,
    /// X wind force.
    pub wind_x: f32,
    /// Y wind force.
    pub wind_y: f32,
}

impl Environment {
    /// True when drag and wind use the real particle surface.
    #[must_use]
    pub fn is_surface_affected(&self) -> bool {
        self.affect_surface
            && (self.wind_x != 0.0 || self.wind_y != 0.0 || self.air_resistance != 0.0)
    }

    /// Projected surface of a particle: texture area times current scale.
    #[must_use]
    pub fn particle_surface(particle: &Particle) -> f32 {
        let texture = particle.texture();
        texture.height * texture.width * particle.scale_y * particle.scale_x
    }

    /// Applies gravity, drag and wind to one particle.
    pub fn apply(&self, particle: &mut Particle, elapsed_ms: f32) {
        let elapsed_sec = elapsed_ms / 1000.0;
        let surface = if self.is_surface_affected() {
            Self::particle_surface(particle) / SURFACE_DIVISOR
        } else {
            1.0
        };

        if self.gravity != 0.0 {
            particle.velocity_y += self.gravity * elapsed_sec;
        }

        if self.air_resistance != 0.0 {
            let factor = elapsed_sec * surface * self.air_resistance / particle.mass;
            particle.velocity_x = drag(particle.velocity_x, factor);
            particle.velocity_y = drag(particle.velocity_y, factor);
        }

        if self.wind_x != 0.0 {
            particle.velocity_x += self.wind_x * surface * elapsed_sec;
        }
        if self.wind_y != 0.0 {
            particle.velocity_y += self.wind_y * surface * elapsed_sec;
        }
    }
}

/// Reduces `|velocity|` by `factor * |velocity|`, clamping at zero.
///
/// Magnitudes that decay into the subnormal range snap to zero, where the
/// reduction would otherwise round away and stall the decay.
fn drag(velocity: f32, factor: f32) -> f32 {
    if velocity == 0.0 {
        return 0.0;
    }
    let magnitude = velocity.abs();
    let reduced = magnitude - factor * magnitude;
    if reduced >= f32::MIN_POSITIVE {
        velocity.signum() * reduced
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Texture;

    fn particle() -> Particle {
        Particle::new(Texture::new(0, 10.0, 10.0))
    }

    #[test]
    fn test_inert_environment_changes_nothing() {
        let mut p = particle();
        p.velocity_x = 5.0;
        p.velocity_y = -3.0;

        Environment::default().apply(&mut p, 16.0);
        assert_eq!(p.velocity_x, 5.0);
        assert_eq!(p.velocity_y, -3.0);
    }

    #[test]
    fn test_gravity() {
        let mut p = particle();
        let env = Environment {
            gravity: 100.0,
            ..Environment::default()
        };

        env.apply(&mut p, 500.0);
        assert!((p.velocity_y - 50.0).abs() < 1e-4);
        assert_eq!(p.velocity_x, 0.0);
    }

    #[test]
    fn test_drag_decays_without_reversing() {
        let mut p = particle();
        p.velocity_x = 10.0;
        p.velocity_y = -10.0;
        let env = Environment {
            air_resistance: 2.0,
            ..Environment::default()
        };

        let mut last = p.velocity_x;
        for _ in 0..100 {
            env.apply(&mut p, 16.0);
            assert!(p.velocity_x >= 0.0);
            assert!(p.velocity_y <= 0.0);
            assert!(p.velocity_x < last);
            last = p.velocity_x;
        }
    }

    #[test]
    fn test_drag_clamps_to_zero() {
        let mut p = particle();
        p.velocity_x = 10.0;
        let env = Environment {
            air_resistance: 100.0,
            ..Environment::default()
        };

        // factor = 0.016 * 100 = 1.6 > 1, so the reduction overshoots
        for _ in 0..5 {
            env.apply(&mut p, 16.0);
            assert_eq!(p.velocity_x, 0.0);
        }
    }

    #[test]
    fn test_light_drag_settles_at_zero() {
        let mut p = particle();
        p.velocity_x = 10.0;
        p.velocity_y = -10.0;
        let env = Environment {
            air_resistance: 0.1,
            ..Environment::default()
        };

        // factor = 0.016 * 0.1, about 56k ticks from 10 down to f32::MIN_POSITIVE
        let mut ticks = 0;
        while p.velocity_x != 0.0 || p.velocity_y != 0.0 {
            env.apply(&mut p, 16.0);
            ticks += 1;
            assert!(ticks < 100_000, "drag stalled at vx={}", p.velocity_x);
            assert!(p.velocity_x >= 0.0 && p.velocity_y <= 0.0);
        }

        for _ in 0..10 {
            env.apply(&mut p, 16.0);
            assert_eq!(p.velocity_x, 0.0);
            assert_eq!(p.velocity_y, 0.0);
        }
    }

    #[test]
    fn test_heavier_particles_drag_less() {
        let env = Environment {
            air_resistance: 1.0,
            ..Environment::default()
        };
        let mut light = particle();
        let mut heavy = particle();
        light.velocity_x = 10.0;
        heavy.velocity_x = 10.0;
        heavy.mass = 4.0;

        env.apply(&mut light, 100.0);
        env.apply(&mut heavy, 100.0);
        assert!(heavy.velocity_x > light.velocity_x);
    }

    #[test]
    fn test_surface_gating() {
        let mut env = Environment {
            wind_x: 10.0,
            ..Environment::default()
        };
        assert!(!env.is_surface_affected());

        env.affect_surface = true;
        assert!(env.is_surface_affected());

        // 10x10 texture at scale 1 -> surface 100 / 1000 = 0.1
        let mut p = particle();
        env.apply(&mut p, 1000.0);
        assert!((p.velocity_x - 1.0).abs() < 1e-5);

        env.wind_x = 0.0;
        assert!(!env.is_surface_affected());
    }

    #[test]
    fn test_unit_surface_wind() {
        let env = Environment {
            wind_x: 10.0,
            wind_y: -5.0,
            ..Environment::default()
        };
        let mut p = particle();
        env.apply(&mut p, 1000.0);
        assert!((p.velocity_x - 10.0).abs() < 1e-5);
        assert!((p.velocity_y + 5.0).abs() < 1e-5);
    }
}
