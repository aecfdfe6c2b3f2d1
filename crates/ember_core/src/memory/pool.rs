//! # Object Pool
//!
//! Reusable-instance allocator for objects that are checked out and returned
//! every few frames.

use std::fmt;

/// An object that can be returned to an [`ObjectPool`] and handed out again.
pub trait Reusable {
    /// Restores every field to its default.
    ///
    /// Must be idempotent and valid on a freshly constructed instance.
    fn reset(&mut self);
}

/// Boxed constructor used by the pool when it runs out of idle instances.
pub type Factory<T> = Box<dyn FnMut() -> T + Send>;

/// Pool counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Instances currently idle in the pool.
    pub idle: usize,
    /// Instances currently checked out.
    pub outstanding: usize,
    /// Instances ever constructed by this pool.
    pub created: usize,
}

/// A pool of reusable instances keyed by a constructor.
///
/// Checking an instance out moves it out of the pool, so the same instance
/// can never be outstanding twice. The pool grows on demand and never
/// shrinks: returned instances are kept for the next checkout.
///
/// # Thread Safety
///
/// This pool is NOT shared. Each emitter owns its own pool.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool = ObjectPool::new(Particle::new, 16);
///
/// // Checkout - reuses an idle instance, constructs one otherwise
/// let particle = pool.get(|p| p.init(&options, None, &mut rng));
///
/// // Return - resets the instance and keeps it for reuse
/// pool.release(particle);
/// ```
pub struct ObjectPool<T: Reusable> {
    /// Idle instances, last returned on top.
    idle: Vec<T>,
    /// Constructor for new instances.
    factory: Factory<T>,
    /// Number of instances ever constructed.
    created: usize,
    /// Number of instances currently checked out.
    outstanding: usize,
}

impl<T: Reusable> ObjectPool<T> {
    /// Creates a pool and pre-fills it with `initial_size` instances.
    ///
    /// # Arguments
    ///
    /// * `factory` - Constructor invoked on pre-fill and on shortage
    /// * `initial_size` - Number of instances constructed up front
    #[must_use]
    pub fn new<F>(factory: F, initial_size: usize) -> Self
    where
        F: FnMut() -> T + Send + 'static,
    {
        let mut pool = Self {
            idle: Vec::with_capacity(initial_size),
            factory: Box::new(factory),
            created: 0,
            outstanding: 0,
        };
        pool.prefill(initial_size);
        pool
    }

    /// Constructs `count` more idle instances.
    pub fn prefill(&mut self, count: usize) {
        self.idle.reserve(count);
        for _ in 0..count {
            let instance = (self.factory)();
            self.created += 1;
            self.idle.push(instance);
        }
    }

    /// Checks out an instance and initializes it.
    ///
    /// Reuses an idle instance when one exists, otherwise constructs a new
    /// one. `init` always runs before the instance is handed out.
    pub fn get<I>(&mut self, init: I) -> T
    where
        I: FnOnce(&mut T),
    {
        let mut instance = match self.idle.pop() {
            Some(instance) => instance,
            None => {
                self.created += 1;
                (self.factory)()
            }
        };
        init(&mut instance);
        self.outstanding += 1;
        instance
    }

    /// Returns an instance to the pool.
    ///
    /// The instance is reset before it becomes idle.
    pub fn release(&mut self, mut instance: T) {
        instance.reset();
        self.outstanding = self.outstanding.saturating_sub(1);
        self.idle.push(instance);
    }

    /// Returns every instance yielded by `instances`.
    pub fn release_all<I>(&mut self, instances: I)
    where
        I: IntoIterator<Item = T>,
    {
        for instance in instances {
            self.release(instance);
        }
    }

    /// Returns the number of idle instances.
    #[inline]
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Returns the number of checked-out instances.
    #[inline]
    #[must_use]
    pub const fn outstanding_count(&self) -> usize {
        self.outstanding
    }

    /// Returns the number of instances ever constructed.
    #[inline]
    #[must_use]
    pub const fn created_count(&self) -> usize {
        self.created
    }

    /// Returns all counters at once.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            idle: self.idle.len(),
            outstanding: self.outstanding,
            created: self.created,
        }
    }
}

impl<T: Reusable> fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPool")
            .field("idle", &self.idle.len())
            .field("outstanding", &self.outstanding)
            .field("created", &self.created)
            .finish_non_exhaustive()
    }
}
