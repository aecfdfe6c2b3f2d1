//! # Memory Management
//!
//! Instances are constructed once and reused indefinitely. During a tick:
//! - No construction while idle instances remain
//! - No deallocation (returned instances stay pooled)

mod pool;

pub use pool::{Factory, ObjectPool, PoolStats, Reusable};
