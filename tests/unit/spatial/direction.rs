//! Tests for direction codes and direction-set algebra

#[cfg(test)]
mod tests {
    use pipeflow::spatial::direction::{Direction, DirectionSet};

    // Tests opposite and rotation formulas over every direction
    // Verified by swapping the rotation offset in rotated
    #[test]
    fn test_opposite_and_rotation_formulas() {
        for direction in Direction::ALL {
            let code = direction.code();
            assert_eq!(direction.opposite().code(), ((code + 1) % 4) + 1);
            for steps in 0..8 {
                assert_eq!(direction.rotated(steps).code(), ((code - 1 + steps) % 4) + 1);
            }
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::North.rotated(1), Direction::East);
        assert_eq!(Direction::West.rotated(1), Direction::North);
    }

    // Tests integer code lookup including out-of-range codes
    // Verified by mapping code 0 to North
    #[test]
    fn test_from_code() {
        assert_eq!(Direction::from_code(1), Some(Direction::North));
        assert_eq!(Direction::from_code(4), Some(Direction::West));
        assert_eq!(Direction::from_code(0), None);
        assert_eq!(Direction::from_code(5), None);
    }

    // Tests that rotating a set rotates each member
    // Verified by rotating the bit pattern right instead of left
    #[test]
    fn test_set_rotation_matches_member_rotation() {
        let set = DirectionSet::from_directions(&[Direction::North, Direction::East, Direction::West]);
        for steps in 0..4 {
            let expected: DirectionSet = set.iter().map(|d| d.rotated(steps)).collect();
            assert_eq!(set.rotated(steps), expected);
        }
        assert_eq!(set.rotated(4), set);
    }

    // Tests that rotating back by the complementary step restores every set
    // Verified by dropping the wrap-around bits in DirectionSet::rotated
    #[test]
    fn test_set_rotation_closure() {
        for bits in 0..16u8 {
            let set = DirectionSet::from_bits(bits);
            for steps in 0..4u8 {
                assert_eq!(set.rotated(steps).rotated((4 - steps) % 4), set);
                assert_eq!(set.rotated(steps).len(), set.len());
            }
        }
    }

    // Tests straight and corner classification of two-opening sets
    // Verified by treating every two-opening set as straight
    #[test]
    fn test_straight_and_corner_classification() {
        let vertical = DirectionSet::from_codes(&[1, 3]);
        let corner = DirectionSet::from_codes(&[2, 3]);
        assert!(vertical.is_straight());
        assert!(!vertical.is_corner());
        assert!(corner.is_corner());
        assert!(!corner.is_straight());
        assert!(!DirectionSet::ALL.is_corner());
    }

    // Tests membership edits, set operations and code export
    // Verified by making without a no-op
    #[test]
    fn test_membership_and_codes() {
        let mut set = DirectionSet::EMPTY;
        assert!(set.is_empty());
        set.insert(Direction::South);
        set.insert(Direction::North);
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_codes(), vec![1, 3]);
        assert!(!set.without(Direction::North).contains(Direction::North));
        set.remove(Direction::South);
        assert_eq!(set, DirectionSet::EMPTY.with(Direction::North));

        let other = DirectionSet::from_codes(&[1, 2, 9]);
        assert_eq!(other.to_codes(), vec![1, 2]);
        assert_eq!(set.union(other), other);
        assert_eq!(set.intersection(other), set);
    }

    // Tests display labels for sets and directions
    // Verified by changing the empty-set placeholder
    #[test]
    fn test_display() {
        assert_eq!(DirectionSet::EMPTY.to_string(), "-");
        assert_eq!(DirectionSet::from_codes(&[4, 2]).to_string(), "E,W");
        assert_eq!(Direction::South.to_string(), "S");
    }
}
