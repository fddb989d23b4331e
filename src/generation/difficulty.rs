//! Difficulty tuning table
//!
//! Every quantity is derived once per generation run from a single rating in
//! `1..=10`. Most are linear blends between a rating-1 and a rating-10 bound;
//! a few pivot again at ratings 8, 9 and 10 for sharper scaling.

use crate::io::error::{Result, invalid_parameter};
use crate::math::interpolation::{MAX_RATING, MIN_RATING, difficulty_fraction, lerp, lerp_count};
use crate::spatial::grid::Grid;

/// Chances used when opening gaps at key tiles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyGapChances {
    /// Probability of emptying a key tile entirely
    pub empty: f64,
    /// Probability of reducing a key tile to two openings
    pub reduce: f64,
    /// Fraction of key tiles that may be emptied, rounded up
    pub empty_cap_fraction: f64,
}

impl KeyGapChances {
    /// Maximum number of key tiles that may be emptied out of `key_tiles`
    pub fn max_emptied(&self, key_tiles: usize) -> usize {
        let by_fraction = (key_tiles as f64 * self.empty_cap_fraction).ceil() as usize;
        by_fraction.min(key_tiles.saturating_sub(1))
    }
}

/// Shape proportions for cells not covered by any planned path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillWeights {
    /// Base probability of leaving a cell empty
    pub empty: f64,
    /// Share of straight pieces among non-empty cells
    pub straight: f64,
    /// Share of corner pieces among non-empty cells
    pub corner: f64,
    /// Share of T pieces among non-empty cells
    pub tee: f64,
    /// Share of cross pieces among non-empty cells
    pub cross: f64,
}

/// All difficulty-derived generator parameters
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyParameters {
    /// Rating the parameters were derived from
    pub rating: u8,
    /// Grid the parameters were derived for
    pub grid: Grid,
    /// Chance of planning dead-end stubs
    pub dead_end_probability: f64,
    /// Chance of sprouting sub-branches from a deceptive path
    pub misleading_path_probability: f64,
    /// Step cap for deceptive walks
    pub max_path_length: usize,
    /// Chance of a direct step while walking a deceptive branch
    pub path_straightness_bias: f64,
    /// Chance of a direct step while walking the critical path
    pub direct_path_bias: f64,
    /// Fewest approximate solution paths a level may have
    pub min_valid_paths: usize,
    /// Most approximate solution paths a level may have
    pub max_valid_paths: usize,
    /// Shortest acceptable critical path
    pub min_path_length: usize,
    /// Fewest acceptable turns along the critical path
    pub min_turns: usize,
    /// Start/end separation as a fraction of the grid diagonal
    pub separation_fraction: f64,
    /// Key tiles before the path-length cap
    pub base_key_tiles: usize,
    /// Deceptive branches before the path-length cap
    pub base_deceptive_paths: usize,
    /// Sub-branches per deceptive path, when they are grown at all
    pub sub_branch_count: usize,
    /// Deceptive walks may stop once longer than this
    pub deceptive_min_length: usize,
    /// Minimum distance of a random fake target from its branch start
    pub fake_target_min_distance: f64,
    /// Maximum per-axis offset of a random fake target
    pub fake_target_spread: i32,
    /// Noise added when ranking deceptive directions at high ratings
    pub winding_factor: f64,
    /// Chance of a deceptive walk stopping once near its target
    pub deceptive_stop_probability: f64,
    /// Dead-end stubs to plan
    pub planned_dead_ends: usize,
    /// Key-tile gap chances, `None` below rating 4
    pub key_gaps: Option<KeyGapChances>,
    /// Remaining-cell shape proportions
    pub fill: FillWeights,
    /// Chance of planning a T piece where four openings are required
    pub cross_to_tee_probability: f64,
}

impl DifficultyParameters {
    /// Derive every parameter from `rating` for a grid
    ///
    /// # Errors
    ///
    /// Returns an error if `rating` is outside `1..=10`
    pub fn from_rating(rating: u8, grid: Grid) -> Result<Self> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(invalid_parameter(
                "difficulty",
                &rating,
                &"must be between 1 and 10",
            ));
        }

        let t = difficulty_fraction(rating);
        let perimeter = (grid.width() + grid.height()) as f64;

        let path_straightness_bias = match rating {
            10 => 0.20,
            9 => 0.30,
            _ => lerp(0.95, 0.40, t),
        };

        // Integer division happens before the blend
        let spread_low = (grid.width() / 3) as f64;
        let spread_high = (grid.width() / 2) as f64;

        Ok(Self {
            rating,
            grid,
            dead_end_probability: lerp(0.05, 0.7, t),
            misleading_path_probability: lerp(0.1, 0.8, t),
            max_path_length: lerp_count(perimeter, perimeter * 2.5, t),
            path_straightness_bias,
            direct_path_bias: lerp(0.95, 0.75, t),
            min_valid_paths: 1,
            max_valid_paths: lerp_count(10.0, 1.0, t),
            min_path_length: lerp_count(perimeter, perimeter * 2.0, t),
            min_turns: lerp_count(3.0, 15.0, t),
            separation_fraction: lerp(0.5, 0.8, t),
            base_key_tiles: lerp_count(2.0, 8.0, t),
            base_deceptive_paths: lerp_count(2.0, 15.0, t),
            sub_branch_count: lerp_count(1.0, 4.0, t),
            deceptive_min_length: lerp_count(5.0, 15.0, t),
            fake_target_min_distance: lerp_count(3.0, 5.0, t) as f64,
            fake_target_spread: lerp_count(spread_low, spread_high, t) as i32,
            winding_factor: lerp(0.3, 0.95, t),
            deceptive_stop_probability: lerp(0.4, 0.8, t),
            planned_dead_ends: lerp_count(5.0, 30.0, t),
            key_gaps: Self::key_gap_chances(rating),
            fill: Self::fill_weights(rating),
            cross_to_tee_probability: if rating > 5 { 0.7 } else { 0.0 },
        })
    }

    const fn key_gap_chances(rating: u8) -> Option<KeyGapChances> {
        let (empty, reduce, empty_cap_fraction) = match rating {
            10 => (0.9, 1.0, 0.8),
            9 => (0.75, 0.9, 0.6),
            8 => (0.6, 0.8, 0.5),
            4..=7 => (0.4, 0.7, 0.3),
            _ => return None,
        };
        Some(KeyGapChances {
            empty,
            reduce,
            empty_cap_fraction,
        })
    }

    fn fill_weights(rating: u8) -> FillWeights {
        let empty = match rating {
            10 => 0.05,
            9 => 0.10,
            _ => lerp(0.6, 0.15, f64::from(rating - 1) / 8.0),
        };
        let (straight, corner, tee, cross) = match rating {
            9..=10 => (0.20, 0.25, 0.30, 0.25),
            7..=8 => (0.30, 0.30, 0.25, 0.15),
            _ => (0.45, 0.35, 0.15, 0.05),
        };
        FillWeights {
            empty,
            straight,
            corner,
            tee,
            cross,
        }
    }

    /// Number of key tiles for a critical path of `path_len` cells
    pub fn key_tile_count(&self, path_len: usize) -> usize {
        let mut count = self.base_key_tiles;
        if self.rating >= 9 && path_len > 15 {
            let boost = lerp_count(5.0, 10.0, f64::from(self.rating - 8) / 2.0);
            count = count.max(boost);
        }
        count.min(path_len.saturating_sub(2))
    }

    /// Number of deceptive branches for a critical path of `path_len` cells
    pub fn deceptive_path_count(&self, path_len: usize) -> usize {
        self.base_deceptive_paths.min(path_len.saturating_sub(2))
    }

    /// Whether deceptive branches may grow sub-branches
    pub const fn allows_sub_branches(&self) -> bool {
        self.rating > 6
    }

    /// Whether fake targets are placed near the real end
    pub const fn lures_toward_end(&self) -> bool {
        self.rating > 5
    }

    /// Whether deceptive walks rank directions by distance to the real end
    pub const fn mimics_critical_path(&self) -> bool {
        self.rating > 7
    }

    /// Whether dead ends and key-tile gaps are planned
    pub const fn plans_obstacles(&self) -> bool {
        self.rating > 3
    }

    /// Minimum required directions on a dead-end anchor
    pub const fn dead_end_anchor_degree(&self) -> usize {
        if self.rating <= 5 { 3 } else { 2 }
    }

    /// Whether new dead ends may become anchors themselves
    pub const fn chains_dead_ends(&self) -> bool {
        self.rating > 7
    }

    /// Minimum start/end Euclidean separation in cells
    pub fn min_separation(&self) -> f64 {
        self.separation_fraction * self.grid.diagonal()
    }
}
