//! Geometric sampling of per-round recruitment counts.

use rand::{Rng, distributions::Open01};

/// Draws how many neighbours a burning vertex recruits in one direction.
///
/// The count follows a geometric distribution with success probability
/// `probability`: a uniform draw `u` from the open interval `(0, 1)` is mapped
/// to `round(ln(u) / ln(1 - probability))`. Lower probabilities therefore
/// recruit more neighbours.
///
/// Degenerate inputs never panic and recruit nobody: `probability >= 1.0`,
/// `probability <= 0.0`, NaN, and values so small that `1 - probability`
/// rounds to `1.0` all return 0.
///
/// # Examples
/// ```
/// use kindling_core::geometric_count;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// assert_eq!(geometric_count(&mut rng, 1.0), 0);
/// assert_eq!(geometric_count(&mut rng, 0.0), 0);
/// let _count = geometric_count(&mut rng, 0.5);
/// ```
pub fn geometric_count<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> usize {
    if probability.is_nan() || probability >= 1.0 || probability <= 0.0 {
        return 0;
    }
    let log_failure = (1.0 - probability).ln();
    if log_failure == 0.0 {
        return 0;
    }
    let draw: f64 = rng.sample(Open01);
    let count = (draw.ln() / log_failure).round();
    // Float-to-int casts saturate, so a huge ratio maps to `usize::MAX`.
    count as usize
}
