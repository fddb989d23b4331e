//! Tests for configuration constants

#[cfg(test)]
mod tests {
    use pipeflow::io::configuration::{
        DEFAULT_DIFFICULTY, DEFAULT_HEIGHT, DEFAULT_LEVEL_COUNT, DEFAULT_WIDTH,
        ENDPOINT_PLACEMENT_ATTEMPTS, FILL_CAP_FACTOR, MAX_DIFFICULTY_ADJUSTMENTS,
        MAX_GENERATION_ATTEMPTS, MAX_GRID_DIMENSION, MIN_GRID_DIMENSION, WALK_CAP_FACTOR,
    };
    use pipeflow::math::interpolation::{MAX_RATING, MIN_RATING};

    // Tests that defaults lie inside the accepted ranges
    // Verified by setting the default width below the minimum
    #[test]
    fn test_defaults_within_bounds() {
        for dimension in [DEFAULT_WIDTH, DEFAULT_HEIGHT] {
            assert!((MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION).contains(&dimension));
        }
        assert!((MIN_RATING..=MAX_RATING).contains(&DEFAULT_DIFFICULTY));
        assert!(DEFAULT_LEVEL_COUNT >= 1);
    }

    // Tests the retry and iteration bounds used by planning and search
    // Verified by changing constant values
    #[test]
    fn test_retry_bounds() {
        assert_eq!(ENDPOINT_PLACEMENT_ATTEMPTS, 50);
        assert_eq!(MAX_DIFFICULTY_ADJUSTMENTS, 3);
        assert_eq!(WALK_CAP_FACTOR, 2);
        assert_eq!(FILL_CAP_FACTOR, 5);
        assert!(MAX_GENERATION_ATTEMPTS >= 1);
    }
}
