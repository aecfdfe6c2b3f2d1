//! # Particle Emitter
//!
//! Owns a pool, a frame clock, the spawn/update configuration and the live
//! set. The host drives it once per rendered frame with [`ParticleEmitter::tick`].
//!
//! ## Tick
//!
//! ```text
//! tick(delta_ms)                       (ignored unless the clock runs)
//! ├─ update_emitter
//! │  ├─ accumulate; below `interval` -> done
//! │  ├─ spawn one particle per elapsed spawn interval (capped at max)
//! │  ├─ per live particle:
//! │  │  ├─ expired       -> retire
//! │  │  └─ otherwise     -> update, environment, retire if out of bounds
//! │  └─ clear accumulator, commit instance batch
//! └─ update_spawn_duration            (auto-stop spawning)
//! ```
//!
//! Particles move between the pool and the live set by value, so one
//! particle is never idle and live at the same time.

use ember_core::{ObjectPool, Point, Rect};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace, warn};

use crate::config::EmitterConfig;
use crate::environment::Environment;
use crate::error::ParticleResult;
use crate::instance::ParticleInstance;
use crate::options::{SpawnOptions, UpdateOptions};
use crate::particle::Particle;

/// Clock state of an emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitterState {
    /// Clock stopped, no live particles.
    #[default]
    Idle,
    /// Clock running. Spawning is governed by the spawn flag.
    Running,
    /// Clock frozen, live particles kept as they are.
    Paused,
}

/// Statistics from an emitter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitterStats {
    /// Particles in the live set
    pub live: usize,
    /// Idle particles in the pool
    pub idle: usize,
    /// Particles ever constructed by the pool
    pub created: usize,
    /// Particles spawned during the last evaluated tick
    pub spawned_last_tick: usize,
    /// Particles retired during the last evaluated tick
    pub retired_last_tick: usize,
    /// Particles spawned since construction
    pub total_spawned: u64,
    /// Particles retired since construction
    pub total_retired: u64,
}

/// Spawns, integrates and retires pooled particles.
pub struct ParticleEmitter {
    /// Idle particles.
    pool: ObjectPool<Particle>,
    /// Live particles.
    live: Vec<Particle>,
    /// Second buffer for the live set, swapped every tick.
    scratch: Vec<Particle>,
    /// Committed draw data.
    batch: Vec<ParticleInstance>,

    spawn_options: SpawnOptions,
    update_options: UpdateOptions,
    bounding_frame: Option<Rect>,
    max_particles: usize,
    position: Point,
    rng: StdRng,

    state: EmitterState,
    spawn: bool,

    /// Time accumulated toward the next evaluated tick (ms).
    update_elapsed: f32,
    /// Time accumulated toward the next spawn (ms).
    spawn_elapsed: f32,
    /// Time spent spawning, for the auto-stop (ms).
    spawn_duration_elapsed: f32,
    /// Last drawn spawn rate (particles per second).
    base_rate: f32,
    /// Ramp added to `base_rate` by spawn-rate kinematics.
    rate_offset: f32,
    rate_velocity: f32,
    rate_acceleration: f32,

    stats: EmitterStats,
}

impl ParticleEmitter {
    /// Creates an emitter.
    ///
    /// `factory` constructs a particle of the emitter's subtype; it is only
    /// called to pre-fill the pool and when the pool runs dry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParticleError::NoTerminationCondition`] when the
    /// config has neither a lifespan nor a bounding frame.
    pub fn new<F>(factory: F, config: EmitterConfig) -> ParticleResult<Self>
    where
        F: FnMut() -> Particle + Send + 'static,
    {
        config.validate()?;

        let max_particles = config.max_particles();
        let EmitterConfig {
            initial_size,
            spawn,
            update,
            bounding_frame,
            ..
        } = config;

        let mut emitter = Self {
            pool: ObjectPool::new(factory, initial_size),
            live: Vec::with_capacity(max_particles),
            scratch: Vec::with_capacity(max_particles),
            batch: Vec::with_capacity(max_particles),
            spawn_options: spawn,
            update_options: update,
            bounding_frame,
            max_particles,
            position: Point::ZERO,
            rng: StdRng::from_entropy(),
            state: EmitterState::Idle,
            spawn: false,
            update_elapsed: 0.0,
            spawn_elapsed: 0.0,
            spawn_duration_elapsed: 0.0,
            base_rate: 0.0,
            rate_offset: 0.0,
            rate_velocity: 0.0,
            rate_acceleration: 0.0,
            stats: EmitterStats::default(),
        };
        emitter.reset();

        debug!(
            initial_size,
            max_particles,
            interval_ms = emitter.update_options.interval,
            "particle emitter created"
        );
        Ok(emitter)
    }

    /// Replaces the emitter RNG with a seeded one, for replays and tests.
    ///
    /// Also redraws the spawn-rate state from the new RNG.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.reset();
        self
    }

    // ========== Lifecycle ==========

    /// Starts the clock.
    ///
    /// No-op while the clock is already running. Otherwise sets the spawn
    /// flag to `emit` and primes the spawn accumulator so the next tick may
    /// spawn immediately.
    pub fn start(&mut self, emit: bool) {
        if self.state == EmitterState::Running {
            return;
        }
        self.spawn = emit;
        let interval = self.spawn_interval();
        self.spawn_elapsed = if interval.is_finite() { interval } else { 0.0 };
        self.state = EmitterState::Running;
        debug!(emit, "particle emitter started");
    }

    /// Freezes the clock. Live particles and accumulators are kept.
    pub fn pause(&mut self) {
        if self.state == EmitterState::Running {
            self.state = EmitterState::Paused;
            debug!(live = self.live.len(), "particle emitter paused");
        }
    }

    /// Runs the clock from `Idle` or `Paused`.
    ///
    /// Unlike [`Self::start`], the spawn flag and accumulators are left
    /// alone, so resuming a stopped emitter ticks its clock without
    /// spawning until [`Self::set_spawning`] turns spawning on.
    pub fn resume(&mut self) {
        if self.state != EmitterState::Running {
            self.state = EmitterState::Running;
            debug!(live = self.live.len(), spawn = self.spawn, "particle emitter resumed");
        }
    }

    /// Resets the emitter and stops the clock.
    pub fn stop(&mut self) {
        self.reset();
        self.state = EmitterState::Idle;
        debug!("particle emitter stopped");
    }

    /// Clears the spawn flag and accumulators and returns every live
    /// particle to the pool. The clock state is left alone.
    pub fn reset(&mut self) {
        self.spawn = false;
        self.update_elapsed = 0.0;
        self.spawn_elapsed = 0.0;
        self.spawn_duration_elapsed = 0.0;

        let spawn_rate = &self.update_options.spawn_rate;
        self.base_rate = spawn_rate.value.resolve(&mut self.rng);
        self.rate_offset = 0.0;
        self.rate_velocity = spawn_rate
            .velocity
            .map_or(0.0, |v| v.resolve(&mut self.rng));
        self.rate_acceleration = spawn_rate
            .acceleration
            .map_or(0.0, |a| a.resolve(&mut self.rng));
        if self.base_rate <= 0.0 && self.rate_velocity <= 0.0 && self.rate_acceleration <= 0.0 {
            warn!(rate = self.base_rate, "spawn rate is not positive, emitter will not spawn");
        }

        let retired = self.live.len();
        self.pool.release_all(self.live.drain(..));
        self.batch.clear();
        self.stats.total_retired += retired as u64;
        self.refresh_counts();
    }

    // ========== Frame driver ==========

    /// Advances the emitter by `delta_ms`. Ignored unless the clock runs.
    pub fn tick(&mut self, delta_ms: f32) {
        if self.state != EmitterState::Running {
            return;
        }
        self.update_emitter(delta_ms);
        self.update_spawn_duration(delta_ms);
    }

    /// Spawning, integration and culling, throttled by `interval`.
    fn update_emitter(&mut self, delta_ms: f32) {
        self.update_elapsed += delta_ms;
        if self.update_elapsed < self.update_options.interval {
            return;
        }
        let elapsed = self.update_elapsed;

        let spawned = self.spawn_due(elapsed);

        // Swap buffers so survivors land in `live` without reallocating
        std::mem::swap(&mut self.live, &mut self.scratch);
        let frame = self.bounding_frame;
        let mut retired = 0;
        for mut particle in self.scratch.drain(..) {
            if particle.current_life < particle.lifespan {
                particle.update(elapsed, frame.as_ref());
                self.update_options.environment.apply(&mut particle, elapsed);

                if is_out_of_bounds(frame.as_ref(), &particle) {
                    self.pool.release(particle);
                    retired += 1;
                } else {
                    self.live.push(particle);
                }
            } else {
                self.pool.release(particle);
                retired += 1;
            }
        }

        self.update_elapsed = 0.0;
        self.commit_batch();

        self.stats.spawned_last_tick = spawned;
        self.stats.retired_last_tick = retired;
        self.stats.total_spawned += spawned as u64;
        self.stats.total_retired += retired as u64;
        self.refresh_counts();

        trace!(
            elapsed_ms = elapsed,
            spawned,
            retired,
            live = self.live.len(),
            "emitter tick"
        );
    }

    /// Switches spawning off once it has run for `spawn_duration` ms.
    fn update_spawn_duration(&mut self, delta_ms: f32) {
        let spawn_duration = self.update_options.spawn_duration.unwrap_or(0.0);
        if !self.spawn || spawn_duration <= 0.0 {
            return;
        }
        self.spawn_duration_elapsed += delta_ms;
        if self.spawn_duration_elapsed < spawn_duration {
            return;
        }
        self.spawn_duration_elapsed = 0.0;
        self.spawn = false;
        debug!(
            spawn_duration_ms = spawn_duration,
            "spawn duration elapsed, spawning disabled"
        );
    }

    /// Spawns every particle due in `elapsed_ms`, returns how many.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn spawn_due(&mut self, elapsed_ms: f32) -> usize {
        if !self.spawn {
            return 0;
        }
        self.integrate_spawn_rate(elapsed_ms);

        if self.live.len() >= self.max_particles {
            return 0;
        }

        self.spawn_elapsed += elapsed_ms;
        let interval = self.spawn_interval();
        if !interval.is_finite() || interval <= 0.0 || self.spawn_elapsed < interval {
            return 0;
        }

        let due = (self.spawn_elapsed / interval).floor() as usize;
        let count = due.min(self.max_particles - self.live.len());
        for _ in 0..count {
            self.spawn_particle();
        }

        self.spawn_elapsed = 0.0;
        self.base_rate = self.update_options.spawn_rate.value.resolve(&mut self.rng);
        count
    }

    /// Ramps the spawn rate by its velocity and acceleration.
    fn integrate_spawn_rate(&mut self, elapsed_ms: f32) {
        if self.rate_velocity == 0.0 && self.rate_acceleration == 0.0 {
            return;
        }
        let elapsed_sec = elapsed_ms / 1000.0;
        self.rate_offset += self.rate_velocity * elapsed_sec;
        self.rate_velocity += self.rate_acceleration * elapsed_sec;
        if let Some(cap) = self.update_options.spawn_rate.max_velocity {
            if cap >= 0.0 {
                self.rate_velocity = self.rate_velocity.min(cap);
            }
        }
    }

    /// Milliseconds between spawns at the current rate.
    fn spawn_interval(&self) -> f32 {
        let rate = self.base_rate + self.rate_offset;
        if rate > 0.0 {
            1000.0 / rate
        } else {
            f32::INFINITY
        }
    }

    fn spawn_particle(&mut self) {
        let options = &self.spawn_options;
        let frame = self.bounding_frame.as_ref();
        let rng = &mut self.rng;
        let particle = self.pool.get(|p| p.init(options, frame, rng));
        self.live.push(particle);
    }

    fn commit_batch(&mut self) {
        let origin = self.position;
        self.batch.clear();
        self.batch.extend(
            self.live
                .iter()
                .map(|particle| ParticleInstance::from_particle(particle, origin)),
        );
    }

    fn refresh_counts(&mut self) {
        self.stats.live = self.live.len();
        self.stats.idle = self.pool.idle_count();
        self.stats.created = self.pool.created_count();
    }

    // ========== Queries ==========

    /// True if `particle` left the bounding frame.
    ///
    /// Coarse test: out only when neither the origin nor the far texture
    /// corner lies inside the frame. Never out without a frame.
    #[must_use]
    pub fn is_out_of_bounds(&self, particle: &Particle) -> bool {
        is_out_of_bounds(self.bounding_frame.as_ref(), particle)
    }

    /// Clock state.
    #[must_use]
    pub const fn state(&self) -> EmitterState {
        self.state
    }

    /// True while new particles are being spawned.
    #[must_use]
    pub const fn is_spawning(&self) -> bool {
        self.spawn
    }

    /// Live particles, in spawn order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.live
    }

    /// Draw data committed by the last evaluated tick.
    #[must_use]
    pub fn instances(&self) -> &[ParticleInstance] {
        &self.batch
    }

    /// Draw data as bytes for GPU upload.
    #[must_use]
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.batch)
    }

    /// Current statistics.
    #[must_use]
    pub const fn stats(&self) -> EmitterStats {
        self.stats
    }

    /// Spawn rate currently in effect (particles per second).
    #[must_use]
    pub fn spawn_rate(&self) -> f32 {
        self.base_rate + self.rate_offset
    }

    /// Current environment.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.update_options.environment
    }

    /// Bounding frame, if any.
    #[must_use]
    pub const fn bounding_frame(&self) -> Option<&Rect> {
        self.bounding_frame.as_ref()
    }

    /// Emitter origin in its parent space.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Live particle cap.
    #[must_use]
    pub const fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// Spawn descriptor used for new particles.
    #[must_use]
    pub const fn spawn_options(&self) -> &SpawnOptions {
        &self.spawn_options
    }

    /// Update descriptor, including the environment runtime setters write.
    #[must_use]
    pub const fn update_options(&self) -> &UpdateOptions {
        &self.update_options
    }

    // ========== Runtime controls ==========

    /// Turns spawning on or off without touching the clock.
    pub fn set_spawning(&mut self, spawn: bool) {
        if !spawn {
            self.spawn_duration_elapsed = 0.0;
        }
        self.spawn = spawn;
    }

    /// Moves the emitter origin, e.g. to follow the pointer.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Sets the Y acceleration applied to every particle.
    pub fn set_gravity(&mut self, gravity: f32) {
        self.update_options.environment.gravity = gravity;
    }

    /// Sets the wind force.
    pub fn set_wind(&mut self, x: f32, y: f32) {
        self.update_options.environment.wind_x = x;
        self.update_options.environment.wind_y = y;
    }

    /// Sets the drag coefficient.
    pub fn set_air_resistance(&mut self, air_resistance: f32) {
        self.update_options.environment.air_resistance = air_resistance;
    }

    /// Enables surface-scaled drag and wind.
    pub fn set_affect_surface(&mut self, affect_surface: bool) {
        self.update_options.environment.affect_surface = affect_surface;
    }

    /// Replaces the bounding frame.
    pub fn set_bounding_frame(&mut self, frame: Rect) {
        self.bounding_frame = Some(frame);
    }

    /// Sets the auto-stop window in ms, zero disables it.
    pub fn set_spawn_duration(&mut self, spawn_duration_ms: f32) {
        self.update_options.spawn_duration = Some(spawn_duration_ms);
    }

    /// Mutable spawn descriptor, applies to particles spawned afterwards.
    pub fn spawn_options_mut(&mut self) -> &mut SpawnOptions {
        &mut self.spawn_options
    }
}

impl std::fmt::Debug for ParticleEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleEmitter")
            .field("state", &self.state)
            .field("spawn", &self.spawn)
            .field("live", &self.live.len())
            .field("pool", &self.pool)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

fn is_out_of_bounds(frame: Option<&Rect>, particle: &Particle) -> bool {
    let Some(frame) = frame else {
        return false;
    };
    let texture = particle.texture();
    !frame.contains(particle.x, particle.y)
        && !frame.contains(particle.x + texture.width, particle.y + texture.height)
}
