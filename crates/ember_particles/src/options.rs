//! # Spawn and Update Configuration
//!
//! Declarative, possibly-randomized descriptors:
//! - [`SpawnOptions`] is consumed once per particle by `Particle::init`
//! - [`UpdateOptions`] is emitter-wide (spawn rate, tick interval, forces)
//!
//! Every shape that has a natural text form deserializes from TOML. Custom
//! functions cannot, and are attached in code with the `with_*` builders.

use ember_core::{Color, ValueRange};
use serde::Deserialize;

use crate::environment::Environment;
use crate::hook::{AlphaFn, ColorFn, Hook, InitFn, UpdateFn};

/// One-axis kinematic descriptor (rotation, spawn rate).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Vector1Physics {
    /// Initial value.
    #[serde(default)]
    pub value: ValueRange,
    /// Initial velocity (units per second).
    #[serde(default)]
    pub velocity: Option<ValueRange>,
    /// Acceleration (units per second squared).
    #[serde(default)]
    pub acceleration: Option<ValueRange>,
    /// Upper velocity cap, negative means uncapped.
    #[serde(default)]
    pub max_velocity: Option<f32>,
}

impl Vector1Physics {
    /// Descriptor with only an initial value.
    #[must_use]
    pub fn value(value: impl Into<ValueRange>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

/// Two-axis kinematic descriptor (position, physics scale).
///
/// The uniform `velocity`, `acceleration` and `max_velocity` fields draw one
/// value for both axes and take precedence over the per-axis fields whenever
/// they are set. A uniform value of zero still wins: `velocity = 0` pins both
/// axes at rest even when `velocity_x` is given. Leave the uniform field unset
/// to use the per-axis ones.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Vector2Physics {
    /// Initial X.
    #[serde(default)]
    pub x: ValueRange,
    /// Initial Y.
    #[serde(default)]
    pub y: ValueRange,
    /// Uniform initial velocity.
    #[serde(default)]
    pub velocity: Option<ValueRange>,
    /// Initial X velocity.
    #[serde(default)]
    pub velocity_x: Option<ValueRange>,
    /// Initial Y velocity.
    #[serde(default)]
    pub velocity_y: Option<ValueRange>,
    /// Uniform acceleration.
    #[serde(default)]
    pub acceleration: Option<ValueRange>,
    /// X acceleration.
    #[serde(default)]
    pub acceleration_x: Option<ValueRange>,
    /// Y acceleration.
    #[serde(default)]
    pub acceleration_y: Option<ValueRange>,
    /// Uniform velocity cap.
    #[serde(default)]
    pub max_velocity: Option<f32>,
    /// X velocity cap.
    #[serde(default)]
    pub max_velocity_x: Option<f32>,
    /// Y velocity cap.
    #[serde(default)]
    pub max_velocity_y: Option<f32>,
}

impl Vector2Physics {
    /// Descriptor with only initial coordinates.
    #[must_use]
    pub fn at(x: impl Into<ValueRange>, y: impl Into<ValueRange>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            ..Self::default()
        }
    }
}

/// Start and end values interpolated over a particle's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct StartEnd {
    /// Value at birth.
    pub start: ValueRange,
    /// Value at end of life.
    pub end: ValueRange,
}

impl StartEnd {
    /// Creates a start/end pair.
    #[must_use]
    pub fn new(start: impl Into<ValueRange>, end: impl Into<ValueRange>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Scale descriptor.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScaleOption {
    /// Same scale on both axes, constant for the whole life.
    Uniform(ValueRange),
    /// Interpolated from start to end over the lifetime.
    Transition(StartEnd),
    /// Per-axis scale with its own velocity and acceleration.
    Physics(Vector2Physics),
}

/// Alpha descriptor.
#[derive(Clone, Debug, Deserialize)]
#[serde(from = "StartEnd")]
pub enum AlphaOption {
    /// Interpolated from start to end over the lifetime.
    Transition(StartEnd),
    /// Computed every tick by a caller function.
    Custom(Hook<AlphaFn>),
}

impl From<StartEnd> for AlphaOption {
    fn from(range: StartEnd) -> Self {
        Self::Transition(range)
    }
}

/// Tint descriptor.
#[derive(Clone, Debug, Deserialize)]
#[serde(from = "ColorSpec")]
pub enum ColorOption {
    /// Constant tint.
    Fixed(Color),
    /// One tint drawn from the set at init.
    Pick(Vec<Color>),
    /// Blended per RGBA component from start to end over the lifetime.
    Transition {
        /// Tint at birth.
        start: Color,
        /// Tint at end of life.
        end: Color,
    },
    /// Computed every tick by a caller function.
    Custom(Hook<ColorFn>),
}

/// Text form of [`ColorOption`].
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Fixed(Color),
    Pick(Vec<Color>),
    Transition { start: Color, end: Color },
}

impl From<ColorSpec> for ColorOption {
    fn from(spec: ColorSpec) -> Self {
        match spec {
            ColorSpec::Fixed(color) => Self::Fixed(color),
            ColorSpec::Pick(colors) => Self::Pick(colors),
            ColorSpec::Transition { start, end } => Self::Transition { start, end },
        }
    }
}

/// Everything needed to initialize one particle.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SpawnOptions {
    /// Position and its kinematics.
    #[serde(default)]
    pub position: Vector2Physics,
    /// Scale animation.
    #[serde(default)]
    pub scale: Option<ScaleOption>,
    /// Rotation (radians) and its kinematics.
    #[serde(default)]
    pub rotation: Option<Vector1Physics>,
    /// Alpha animation.
    #[serde(default)]
    pub alpha: Option<AlphaOption>,
    /// Tint animation.
    #[serde(default)]
    pub color: Option<ColorOption>,
    /// Lifespan in seconds.
    #[serde(default)]
    pub lifespan: Option<ValueRange>,
    /// Runs last in `Particle::init`.
    #[serde(skip)]
    pub on_init: Option<Hook<InitFn>>,
    /// Runs last in every `Particle::update`.
    #[serde(skip)]
    pub on_update: Option<Hook<UpdateFn>>,
}

impl SpawnOptions {
    /// Replaces the alpha descriptor with a custom function.
    #[must_use]
    pub fn with_alpha_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&crate::Particle, f32) -> f32 + Send + Sync + 'static,
    {
        self.alpha = Some(AlphaOption::Custom(Hook::alpha(f)));
        self
    }

    /// Replaces the tint descriptor with a custom function.
    #[must_use]
    pub fn with_color_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&crate::Particle, f32) -> Color + Send + Sync + 'static,
    {
        self.color = Some(ColorOption::Custom(Hook::color(f)));
        self
    }

    /// Sets the init callback.
    #[must_use]
    pub fn with_on_init<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut crate::Particle, Option<&ember_core::Rect>) + Send + Sync + 'static,
    {
        self.on_init = Some(Hook::on_init(f));
        self
    }

    /// Sets the update callback.
    #[must_use]
    pub fn with_on_update<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut crate::Particle, f32, Option<&ember_core::Rect>) + Send + Sync + 'static,
    {
        self.on_update = Some(Hook::on_update(f));
        self
    }
}

/// Emitter-wide update configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UpdateOptions {
    /// Particles per second, itself a kinematic quantity so emission can ramp.
    pub spawn_rate: Vector1Physics,
    /// Minimum milliseconds between evaluated ticks.
    #[serde(default)]
    pub interval: f32,
    /// Global forces.
    #[serde(default)]
    pub environment: Environment,
    /// Milliseconds after which spawning switches itself off, if positive.
    #[serde(default)]
    pub spawn_duration: Option<f32>,
}
