//! # EMBER Core
//!
//! Leaf-level building blocks for the particle engine:
//! - Object pool of reusable instances (no per-frame allocation churn)
//! - 2D geometry used for culling
//! - RGBA color with component-wise blending
//! - Randomized value ranges for stochastic spawn parameters
//!
//! Nothing in here knows about particles or emitters.
//!
//! ## Example
//!
//! ```rust
//! use ember_core::{ObjectPool, Reusable};
//!
//! #[derive(Default)]
//! struct Spark { life: f32 }
//!
//! impl Reusable for Spark {
//!     fn reset(&mut self) { self.life = 0.0; }
//! }
//!
//! let mut pool = ObjectPool::new(Spark::default, 4);
//! let spark = pool.get(|s| s.life = 1.0);
//! pool.release(spark);
//! assert_eq!(pool.idle_count(), 4);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod color;
pub mod geometry;
pub mod memory;
pub mod random;

pub use color::Color;
pub use geometry::{Point, Rect};
pub use memory::{ObjectPool, PoolStats, Reusable};
pub use random::{pick, ValueRange};
