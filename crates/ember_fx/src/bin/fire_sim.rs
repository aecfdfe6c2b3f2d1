//! # Fire Simulator
//!
//! Drives a fire emitter headlessly with a fixed frame clock. The emitter
//! is relocated periodically as if the user pressed the screen, and
//! statistics are printed once per simulated second.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug fire_sim --frames 600 --fps 60 --seed 7 --move-every 120
//! fire_sim --config crates/ember_fx/assets/fire.toml --eased
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use ember_core::{Point, Rect};
use ember_fx::fire::{fire_config, fire_particle_factory, with_eased_fade};
use ember_particles::{Easing, EmitterConfig, ParticleEmitter, ParticleResult};
use tracing::{debug, error, info};

/// Parsed command line.
struct SimArgs {
    frames: u32,
    fps: u32,
    seed: Option<u64>,
    config: Option<PathBuf>,
    move_every: u32,
    eased: bool,
    scene: Rect,
}

impl Default for SimArgs {
    fn default() -> Self {
        Self {
            frames: 600,
            fps: 60,
            seed: None,
            config: None,
            move_every: 120,
            eased: false,
            scene: Rect::new(0.0, 0.0, 800.0, 600.0),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let Some(args) = parse_args() else {
        return ExitCode::SUCCESS;
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "fire simulation failed");
            ExitCode::FAILURE
        }
    }
}

/// Simple parsing, no external deps. `None` when only help was requested.
fn parse_args() -> Option<SimArgs> {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = SimArgs::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--frames" | "-f" => {
                if let Some(v) = value {
                    parsed.frames = v.parse().unwrap_or(parsed.frames);
                    i += 1;
                }
            }
            "--fps" => {
                if let Some(v) = value {
                    parsed.fps = v.parse().unwrap_or(parsed.fps).max(1);
                    i += 1;
                }
            }
            "--seed" | "-s" => {
                if let Some(v) = value {
                    parsed.seed = v.parse().ok();
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if let Some(v) = value {
                    parsed.config = Some(PathBuf::from(v));
                    i += 1;
                }
            }
            "--move-every" | "-m" => {
                if let Some(v) = value {
                    parsed.move_every = v.parse().unwrap_or(parsed.move_every);
                    i += 1;
                }
            }
            "--eased" => parsed.eased = true,
            "--help" | "-h" => {
                println!("Usage: fire_sim [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --frames <N>        Frames to simulate (default: 600)");
                println!("      --fps <RATE>        Frame clock in Hz (default: 60)");
                println!("  -s, --seed <SEED>       Seed for a reproducible run");
                println!("  -c, --config <PATH>     Emitter TOML (default: built-in fire)");
                println!("  -m, --move-every <N>    Relocate the fire every N frames, 0 never");
                println!("      --eased             Quadratic fade instead of linear");
                println!("  -h, --help              Show this help");
                return None;
            }
            other => debug!(arg = other, "ignoring unknown argument"),
        }
        i += 1;
    }
    Some(parsed)
}

fn load_config(args: &SimArgs) -> ParticleResult<EmitterConfig> {
    let mut config = match &args.config {
        Some(path) => EmitterConfig::from_toml_file(path)?,
        None => fire_config(),
    };
    if args.eased {
        config.spawn = with_eased_fade(config.spawn);
    }
    Ok(config)
}

/// Where the pointer "presses" for the `n`th relocation: sweeps left to
/// right along a parabola, fast at first and settling at the far edge.
#[allow(clippy::cast_precision_loss)]
fn pointer_position(scene: &Rect, n: u32, total: u32) -> Point {
    let t = Easing::Parabolic.apply(n as f32, total.max(1) as f32);
    Point::new(
        scene.x + scene.width * (0.1 + 0.8 * t),
        scene.y + scene.height * 2.0 / 3.0,
    )
}

#[allow(clippy::cast_precision_loss)]
fn run(args: &SimArgs) -> ParticleResult<()> {
    let config = load_config(args)?;
    let factory = fire_particle_factory(args.seed);
    let mut emitter = ParticleEmitter::new(factory, config)?;
    if let Some(seed) = args.seed {
        emitter = emitter.with_seed(seed);
    }

    println!("┌─ FIRE SIM ──────────────────────────────────────────────────────┐");
    println!("│ Frames:             {}", args.frames);
    println!("│ Frame Clock:        {} Hz", args.fps);
    println!("│ Max Particles:      {}", emitter.max_particles());
    match args.seed {
        Some(seed) => println!("│ Seed:               {seed}"),
        None => println!("│ Seed:               entropy"),
    }
    println!("└──────────────────────────────────────────────────────────────────┘");

    let delta_ms = 1000.0 / args.fps as f32;
    let relocations = if args.move_every == 0 {
        0
    } else {
        args.frames / args.move_every
    };

    emitter.set_position(args.scene.center());
    emitter.start(true);

    let start = Instant::now();
    let mut peak_live = 0;
    let mut bytes_uploaded = 0usize;
    let mut moves = 0;

    for frame in 1..=args.frames {
        emitter.tick(delta_ms);

        peak_live = peak_live.max(emitter.particles().len());
        bytes_uploaded += emitter.instance_bytes().len();

        if args.move_every > 0 && frame % args.move_every == 0 {
            moves += 1;
            let pointer = pointer_position(&args.scene, moves, relocations);
            emitter.set_position(pointer);
            debug!(frame, x = pointer.x, y = pointer.y, "fire relocated");
        }

        if frame % args.fps == 0 {
            let stats = emitter.stats();
            info!(
                second = frame / args.fps,
                live = stats.live,
                idle = stats.idle,
                created = stats.created,
                spawned = stats.total_spawned,
                retired = stats.total_retired,
                "fire status"
            );
        }
    }

    emitter.stop();
    let stats = emitter.stats();

    println!();
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                    SIMULATION COMPLETE                           ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║ Simulated:          {:>10.1} s", args.frames as f32 * delta_ms / 1000.0);
    println!("║ Wall Time:          {:>10.2} ms", start.elapsed().as_secs_f64() * 1000.0);
    println!("║ Total Spawned:      {:>10}", stats.total_spawned);
    println!("║ Peak Live:          {peak_live:>10}");
    println!("║ Pool Size:          {:>10}", stats.created);
    println!("║ Instance Bytes:     {bytes_uploaded:>10}");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    Ok(())
}
