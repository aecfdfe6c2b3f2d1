//! Easing curves for custom alpha, tint and update hooks.
//!
//! Each curve maps a `point` travelled over a `distance` to a factor.

use std::f32::consts::PI;

/// Easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// `1 - (p/d - 1)^2`, fast start, slow end.
    Parabolic,
    /// `sin((p/d - 1) * PI / 2)`, from -1 at the start to 0 at the end.
    Sinusoidal,
    /// `(p/d)^2`, slow start, fast end.
    Exponential,
    /// `1 - sqrt(1 - (p/d - 1)^2)`, quarter circle.
    Circular,
}

impl Easing {
    /// Evaluates the curve at `point` of `distance`.
    #[must_use]
    pub fn apply(self, point: f32, distance: f32) -> f32 {
        let t = point / distance;
        match self {
            Self::Parabolic => 1.0 - (t - 1.0).powi(2),
            Self::Sinusoidal => ((t - 1.0) * PI / 2.0).sin(),
            Self::Exponential => t.powi(2),
            Self::Circular => 1.0 - (1.0 - (t - 1.0).powi(2)).sqrt(),
        }
    }
}
