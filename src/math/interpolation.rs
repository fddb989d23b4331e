//! Linear interpolation for difficulty scaling
//!
//! Every tunable generator quantity is a blend between its value at rating 1
//! and its value at rating 10. Integer quantities are rounded half-to-even.

use num_traits::Float;

/// Lowest difficulty rating
pub const MIN_RATING: u8 = 1;
/// Highest difficulty rating
pub const MAX_RATING: u8 = 10;

/// Blend `a` towards `b` by `t`, with `t` clamped to `[0, 1]`
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    let t = t.max(T::zero()).min(T::one());
    a + (b - a) * t
}

/// Position of a rating on the 1..=10 scale, `(rating - 1) / 9`
pub fn difficulty_fraction(rating: u8) -> f64 {
    let rating = rating.clamp(MIN_RATING, MAX_RATING);
    f64::from(rating - MIN_RATING) / f64::from(MAX_RATING - MIN_RATING)
}

/// Round to the nearest integer, ties to even
pub fn round_to_int(value: f64) -> i64 {
    // Saturating float-to-int conversion
    value.round_ties_even() as i64
}

/// Interpolate and round, clamping negative results to zero
pub fn lerp_count(a: f64, b: f64, t: f64) -> usize {
    usize::try_from(round_to_int(lerp(a, b, t))).unwrap_or(0)
}
