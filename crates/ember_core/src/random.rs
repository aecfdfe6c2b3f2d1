//! Randomized value ranges.
//!
//! Spawn parameters are either fixed or drawn uniformly from an inclusive
//! range. In config files a range is a bare number or a `[lo, hi]` pair.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A fixed value or a range to draw from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueRange {
    /// Always resolves to this value.
    Fixed(f32),
    /// Resolves to `lo + U(0,1) * (hi - lo)`.
    ///
    /// `lo > hi` is allowed and draws from `[hi, lo]`.
    Between(f32, f32),
}

impl ValueRange {
    /// Zero-width range at `value`.
    #[must_use]
    pub const fn fixed(value: f32) -> Self {
        Self::Fixed(value)
    }

    /// Range between `lo` and `hi`.
    #[must_use]
    pub const fn between(lo: f32, hi: f32) -> Self {
        Self::Between(lo, hi)
    }

    /// Draws a concrete value.
    ///
    /// A fixed value does not consume randomness.
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match *self {
            Self::Fixed(value) => value,
            Self::Between(lo, hi) => {
                // Rounding in the lerp may land one ulp past an endpoint.
                let value = lo + rng.gen::<f32>() * (hi - lo);
                let (min, max) = (lo.min(hi), lo.max(hi));
                // Both bounds NaN, clamp would panic
                if min.is_nan() {
                    value
                } else {
                    value.clamp(min, max)
                }
            }
        }
    }

    /// Smallest value the range can resolve to.
    #[must_use]
    pub fn min(&self) -> f32 {
        match *self {
            Self::Fixed(value) => value,
            Self::Between(lo, hi) => lo.min(hi),
        }
    }

    /// Largest value the range can resolve to.
    #[must_use]
    pub fn max(&self) -> f32 {
        match *self {
            Self::Fixed(value) => value,
            Self::Between(lo, hi) => lo.max(hi),
        }
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::Fixed(0.0)
    }
}

impl From<f32> for ValueRange {
    fn from(value: f32) -> Self {
        Self::Fixed(value)
    }
}

impl From<[f32; 2]> for ValueRange {
    fn from([lo, hi]: [f32; 2]) -> Self {
        Self::Between(lo, hi)
    }
}

/// Draws a uniform item from `items`, `None` when empty.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    Some(&items[rng.gen_range(0..items.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fixed_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let range = ValueRange::fixed(3.5);
        for _ in 0..10 {
            assert_eq!(range.resolve(&mut rng), 3.5);
        }
    }

    #[test]
    fn test_zero_width_range_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(2);
        let range = ValueRange::between(1.0, 1.0);
        for _ in 0..10 {
            assert_eq!(range.resolve(&mut rng), 1.0);
        }
    }

    #[test]
    fn test_pick() {
        let mut rng = StdRng::seed_from_u64(3);
        let items = [1, 2, 3];
        for _ in 0..20 {
            assert!(items.contains(pick(&mut rng, &items).unwrap()));
        }
        assert!(pick::<u8, _>(&mut rng, &[]).is_none());
    }

    #[test]
    fn test_min_max_reversed() {
        let range = ValueRange::between(-750.0, -1000.0);
        assert_eq!(range.min(), -1000.0);
        assert_eq!(range.max(), -750.0);
    }

    #[test]
    fn test_nan_bounds_do_not_panic() {
        let mut rng = StdRng::seed_from_u64(4);
        assert!(ValueRange::between(f32::NAN, f32::NAN).resolve(&mut rng).is_nan());

        // One NaN bound poisons the lerp, the clamp still holds
        let v = ValueRange::between(f32::NAN, 1.0).resolve(&mut rng);
        assert!(v.is_nan() || v == 1.0);
    }

    proptest! {
        #[test]
        fn resolved_value_stays_in_range(
            lo in -1.0e4f32..1.0e4,
            width in 0.0f32..1.0e4,
            seed in any::<u64>(),
        ) {
            let hi = lo + width;
            let mut rng = StdRng::seed_from_u64(seed);
            let v = ValueRange::between(lo, hi).resolve(&mut rng);
            prop_assert!(v >= lo && v <= hi, "{v} not in [{lo}, {hi}]");
        }
    }
}
