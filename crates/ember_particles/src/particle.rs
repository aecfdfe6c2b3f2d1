//! # Particle
//!
//! A single poolable visual entity. It owns its kinematic and
//! visual-transition state, initializes itself from a [`SpawnOptions`] and
//! advances itself by one time delta. It knows nothing about pools or
//! emitters.
//!
//! ## Tick Order
//!
//! `update` integrates in a fixed order:
//! 1. Life, then position, scale and rotation (explicit Euler)
//! 2. Alpha and tint (callback or interpolation by life fraction)
//! 3. Velocity caps
//! 4. The `on_update` hook, which may override anything above

use ember_core::{pick, Color, Rect, Reusable, ValueRange};
use rand::Rng;

use crate::hook::{AlphaFn, ColorFn, Hook, UpdateFn};
use crate::options::{AlphaOption, ColorOption, ScaleOption, SpawnOptions, Vector2Physics};

/// Texture slot and pixel extent of a particle sprite.
///
/// Assigned by the particle constructor and kept across reuse.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Texture {
    /// Renderer-side texture slot.
    pub id: u32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Texture {
    /// Creates a texture descriptor.
    #[must_use]
    pub const fn new(id: u32, width: f32, height: f32) -> Self {
        Self { id, width, height }
    }
}

/// How scale evolves. Chosen at init, never switched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleMode {
    /// Euler integration of scale velocity and acceleration.
    Kinematic,
    /// Linear interpolation by life fraction.
    Transition {
        /// Scale at birth.
        start: f32,
        /// Scale at end of life.
        end: f32,
    },
}

/// How alpha evolves.
#[derive(Clone, Debug)]
pub enum AlphaMode {
    /// Alpha is left as is.
    Static,
    /// Linear interpolation by life fraction.
    Transition {
        /// Alpha at birth.
        start: f32,
        /// Alpha at end of life.
        end: f32,
    },
    /// Caller function.
    Custom(Hook<AlphaFn>),
}

/// How tint evolves.
#[derive(Clone, Debug)]
pub enum TintMode {
    /// Tint is left as is.
    Static,
    /// Component-wise RGBA interpolation by life fraction.
    Transition {
        /// Tint at birth.
        start: Color,
        /// Tint at end of life.
        end: Color,
    },
    /// Caller function.
    Custom(Hook<ColorFn>),
}

/// Resolved values captured at init, before `on_init` runs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InitSnapshot {
    /// Initial X.
    pub x: f32,
    /// Initial Y.
    pub y: f32,
    /// Initial X velocity.
    pub velocity_x: f32,
    /// Initial Y velocity.
    pub velocity_y: f32,
    /// Initial X scale.
    pub scale_x: f32,
    /// Initial Y scale.
    pub scale_y: f32,
    /// Initial rotation.
    pub rotation: f32,
    /// Initial rotation velocity.
    pub rotation_velocity: f32,
}

/// A live or idle particle.
#[derive(Clone, Debug)]
pub struct Particle {
    /// X position (emitter-local pixels).
    pub x: f32,
    /// Y position.
    pub y: f32,
    /// X velocity (pixels per second).
    pub velocity_x: f32,
    /// Y velocity.
    pub velocity_y: f32,
    /// X acceleration (pixels per second squared).
    pub acceleration_x: f32,
    /// Y acceleration.
    pub acceleration_y: f32,
    /// X velocity cap, `None` is uncapped.
    pub max_velocity_x: Option<f32>,
    /// Y velocity cap.
    pub max_velocity_y: Option<f32>,

    /// X scale factor.
    pub scale_x: f32,
    /// Y scale factor.
    pub scale_y: f32,
    /// X scale velocity (per second).
    pub scale_velocity_x: f32,
    /// Y scale velocity.
    pub scale_velocity_y: f32,
    /// X scale acceleration.
    pub scale_acceleration_x: f32,
    /// Y scale acceleration.
    pub scale_acceleration_y: f32,
    /// X scale velocity cap.
    pub max_scale_velocity_x: Option<f32>,
    /// Y scale velocity cap.
    pub max_scale_velocity_y: Option<f32>,

    /// Rotation in radians.
    pub rotation: f32,
    /// Rotation velocity (radians per second).
    pub rotation_velocity: f32,
    /// Rotation acceleration.
    pub rotation_acceleration: f32,
    /// Rotation velocity cap.
    pub max_rotation_velocity: Option<f32>,

    /// Opacity.
    pub alpha: f32,
    /// Tint.
    pub tint: Color,
    /// Mass, divides drag.
    pub mass: f32,

    /// Seconds this particle may live.
    pub lifespan: f32,
    /// Seconds lived so far.
    pub current_life: f32,

    texture: Texture,
    seed: f32,
    snapshot: InitSnapshot,
    scale_mode: ScaleMode,
    alpha_mode: AlphaMode,
    tint_mode: TintMode,
    on_update: Option<Hook<UpdateFn>>,
}

impl Particle {
    /// Creates a particle in its reset state.
    #[must_use]
    pub fn new(texture: Texture) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            velocity_x: 0.0,
            velocity_y: 0.0,
            acceleration_x: 0.0,
            acceleration_y: 0.0,
            max_velocity_x: None,
            max_velocity_y: None,
            scale_x: 1.0,
            scale_y: 1.0,
            scale_velocity_x: 0.0,
            scale_velocity_y: 0.0,
            scale_acceleration_x: 0.0,
            scale_acceleration_y: 0.0,
            max_scale_velocity_x: None,
            max_scale_velocity_y: None,
            rotation: 0.0,
            rotation_velocity: 0.0,
            rotation_acceleration: 0.0,
            max_rotation_velocity: None,
            alpha: 1.0,
            tint: Color::WHITE,
            mass: 1.0,
            lifespan: f32::INFINITY,
            current_life: 0.0,
            texture,
            seed: 0.0,
            snapshot: InitSnapshot::default(),
            scale_mode: ScaleMode::Kinematic,
            alpha_mode: AlphaMode::Static,
            tint_mode: TintMode::Static,
            on_update: None,
        }
    }

    /// Sprite this particle draws with.
    #[must_use]
    pub const fn texture(&self) -> Texture {
        self.texture
    }

    /// Per-particle random value in `[0, 1)`, redrawn at every init.
    #[must_use]
    pub const fn seed(&self) -> f32 {
        self.seed
    }

    /// Values resolved at the last init.
    #[must_use]
    pub const fn snapshot(&self) -> &InitSnapshot {
        &self.snapshot
    }

    /// Active scale mode.
    #[must_use]
    pub const fn scale_mode(&self) -> ScaleMode {
        self.scale_mode
    }

    /// Active alpha mode.
    #[must_use]
    pub const fn alpha_mode(&self) -> &AlphaMode {
        &self.alpha_mode
    }

    /// Active tint mode.
    #[must_use]
    pub const fn tint_mode(&self) -> &TintMode {
        &self.tint_mode
    }

    /// Fraction of the lifespan already lived, capped at 1.
    #[must_use]
    pub fn life_percent(&self) -> f32 {
        (self.current_life / self.lifespan).min(1.0)
    }

    /// True once the particle has lived its full lifespan.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.current_life >= self.lifespan
    }

    /// Resolves every randomized field of `options` into this particle.
    ///
    /// Expects a reset particle. `on_init` runs last and receives the
    /// bounding frame.
    pub fn init<R: Rng + ?Sized>(
        &mut self,
        options: &SpawnOptions,
        frame: Option<&Rect>,
        rng: &mut R,
    ) {
        self.seed = rng.gen::<f32>();

        // Position
        let position = &options.position;
        self.x = position.x.resolve(rng);
        self.y = position.y.resolve(rng);
        let (vx, vy) = resolve_axes(
            position.velocity,
            position.velocity_x,
            position.velocity_y,
            rng,
        );
        self.velocity_x = vx;
        self.velocity_y = vy;
        let (ax, ay) = resolve_axes(
            position.acceleration,
            position.acceleration_x,
            position.acceleration_y,
            rng,
        );
        self.acceleration_x = ax;
        self.acceleration_y = ay;
        (self.max_velocity_x, self.max_velocity_y) = resolve_caps(position);

        // Scale
        match &options.scale {
            None => {}
            Some(ScaleOption::Uniform(range)) => {
                let scale = range.resolve(rng);
                self.scale_x = scale;
                self.scale_y = scale;
            }
            Some(ScaleOption::Transition(range)) => {
                let start = range.start.resolve(rng);
                let end = range.end.resolve(rng);
                self.scale_mode = ScaleMode::Transition { start, end };
                self.scale_x = start;
                self.scale_y = start;
            }
            Some(ScaleOption::Physics(physics)) => {
                self.scale_x = physics.x.resolve(rng);
                self.scale_y = physics.y.resolve(rng);
                let (vx, vy) =
                    resolve_axes(physics.velocity, physics.velocity_x, physics.velocity_y, rng);
                self.scale_velocity_x = vx;
                self.scale_velocity_y = vy;
                let (ax, ay) = resolve_axes(
                    physics.acceleration,
                    physics.acceleration_x,
                    physics.acceleration_y,
                    rng,
                );
                self.scale_acceleration_x = ax;
                self.scale_acceleration_y = ay;
                (self.max_scale_velocity_x, self.max_scale_velocity_y) = resolve_caps(physics);
            }
        }

        // Rotation
        if let Some(rotation) = &options.rotation {
            self.rotation = rotation.value.resolve(rng);
            self.rotation_velocity = resolve_or_zero(rotation.velocity, rng);
            self.rotation_acceleration = resolve_or_zero(rotation.acceleration, rng);
            self.max_rotation_velocity = active_cap(rotation.max_velocity);
        }

        // Alpha
        self.alpha_mode = match &options.alpha {
            None => AlphaMode::Static,
            Some(AlphaOption::Transition(range)) => AlphaMode::Transition {
                start: range.start.resolve(rng),
                end: range.end.resolve(rng),
            },
            Some(AlphaOption::Custom(hook)) => AlphaMode::Custom(hook.clone()),
        };

        // Tint
        self.tint_mode = TintMode::Static;
        match &options.color {
            None => {}
            Some(ColorOption::Fixed(color)) => self.tint = *color,
            Some(ColorOption::Pick(colors)) => {
                if let Some(color) = pick(rng, colors) {
                    self.tint = *color;
                }
            }
            Some(ColorOption::Transition { start, end }) => {
                self.tint = *start;
                self.tint_mode = TintMode::Transition {
                    start: *start,
                    end: *end,
                };
            }
            Some(ColorOption::Custom(hook)) => self.tint_mode = TintMode::Custom(hook.clone()),
        }

        // Lifespan
        if let Some(lifespan) = options.lifespan {
            self.lifespan = lifespan.resolve(rng);
        }

        self.snapshot = InitSnapshot {
            x: self.x,
            y: self.y,
            velocity_x: self.velocity_x,
            velocity_y: self.velocity_y,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            rotation: self.rotation,
            rotation_velocity: self.rotation_velocity,
        };

        self.on_update.clone_from(&options.on_update);

        if let Some(hook) = &options.on_init {
            (**hook)(self, frame);
        }
    }

    /// Advances the particle by `elapsed_ms`.
    pub fn update(&mut self, elapsed_ms: f32, frame: Option<&Rect>) {
        let elapsed_sec = elapsed_ms / 1000.0;

        // Lifespan
        self.current_life += elapsed_sec;
        let life_percent = self.life_percent();

        // Position
        self.x += self.velocity_x * elapsed_sec;
        self.y += self.velocity_y * elapsed_sec;
        self.velocity_x += self.acceleration_x * elapsed_sec;
        self.velocity_y += self.acceleration_y * elapsed_sec;

        // Scale
        match self.scale_mode {
            ScaleMode::Transition { start, end } => {
                let scale = start + (end - start) * life_percent;
                self.scale_x = scale;
                self.scale_y = scale;
            }
            ScaleMode::Kinematic => {
                self.scale_x += self.scale_velocity_x * elapsed_sec;
                self.scale_y += self.scale_velocity_y * elapsed_sec;
                self.scale_velocity_x += self.scale_acceleration_x * elapsed_sec;
                self.scale_velocity_y += self.scale_acceleration_y * elapsed_sec;
            }
        }

        // Rotation
        self.rotation += self.rotation_velocity * elapsed_sec;
        self.rotation_velocity += self.rotation_acceleration * elapsed_sec;

        // Alpha
        match &self.alpha_mode {
            AlphaMode::Static => {}
            &AlphaMode::Transition { start, end } => {
                self.alpha = start + (end - start) * life_percent;
            }
            AlphaMode::Custom(getter) => {
                let getter = getter.clone();
                self.alpha = (*getter)(self, elapsed_ms);
            }
        }

        // Tint
        match &self.tint_mode {
            TintMode::Static => {}
            &TintMode::Transition { start, end } => {
                self.tint = start.lerp(end, life_percent);
            }
            TintMode::Custom(getter) => {
                let getter = getter.clone();
                self.tint = (*getter)(self, elapsed_ms);
            }
        }

        // Caps
        apply_cap(&mut self.velocity_x, self.max_velocity_x);
        apply_cap(&mut self.velocity_y, self.max_velocity_y);
        apply_cap(&mut self.scale_velocity_x, self.max_scale_velocity_x);
        apply_cap(&mut self.scale_velocity_y, self.max_scale_velocity_y);
        apply_cap(&mut self.rotation_velocity, self.max_rotation_velocity);

        if let Some(hook) = self.on_update.clone() {
            (*hook)(self, elapsed_ms, frame);
        }
    }
}

impl Reusable for Particle {
    fn reset(&mut self) {
        *self = Self::new(self.texture);
    }
}

/// Draws a value or zero when absent.
fn resolve_or_zero<R: Rng + ?Sized>(range: Option<ValueRange>, rng: &mut R) -> f32 {
    range.map_or(0.0, |range| range.resolve(rng))
}

/// A uniform draw shared by both axes wins over per-axis draws.
fn resolve_axes<R: Rng + ?Sized>(
    uniform: Option<ValueRange>,
    x: Option<ValueRange>,
    y: Option<ValueRange>,
    rng: &mut R,
) -> (f32, f32) {
    match uniform {
        Some(range) => {
            let value = range.resolve(rng);
            (value, value)
        }
        None => (resolve_or_zero(x, rng), resolve_or_zero(y, rng)),
    }
}

/// Negative caps mean uncapped.
fn active_cap(cap: Option<f32>) -> Option<f32> {
    cap.filter(|cap| *cap >= 0.0)
}

fn resolve_caps(physics: &Vector2Physics) -> (Option<f32>, Option<f32>) {
    match active_cap(physics.max_velocity) {
        Some(cap) => (Some(cap), Some(cap)),
        None => (
            active_cap(physics.max_velocity_x),
            active_cap(physics.max_velocity_y),
        ),
    }
}

fn apply_cap(value: &mut f32, cap: Option<f32>) {
    if let Some(cap) = cap {
        *value = value.min(cap);
    }
}
