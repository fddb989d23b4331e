//! Generator constants and runtime configuration defaults

// Grid bounds
/// Smallest supported grid dimension
pub const MIN_GRID_DIMENSION: usize = 3;
/// Largest supported grid dimension
pub const MAX_GRID_DIMENSION: usize = 64;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default grid width
pub const DEFAULT_WIDTH: usize = 10;
/// Default grid height
pub const DEFAULT_HEIGHT: usize = 10;
/// Default difficulty rating
pub const DEFAULT_DIFFICULTY: u8 = 5;
/// Default number of levels in a campaign
pub const DEFAULT_LEVEL_COUNT: u32 = 10;

// Retry bounds
/// Plan, realize and validate attempts before the fallback level is used
pub const MAX_GENERATION_ATTEMPTS: usize = 5;
/// Corrective passes after a failed difficulty validation
pub const MAX_DIFFICULTY_ADJUSTMENTS: usize = 3;
/// Tries at placing start and end in distinct quadrants
pub const ENDPOINT_PLACEMENT_ATTEMPTS: usize = 50;
/// Tries at placing a single planned dead end
pub const DEAD_END_PLACEMENT_ATTEMPTS: usize = 5;
/// Tries at finding a usable fake target for a deceptive branch
pub const FAKE_TARGET_ATTEMPTS: usize = 10;

// Iteration caps, as multiples of the cell count
/// Random walk step cap factor
pub const WALK_CAP_FACTOR: usize = 2;
/// Max-fill frontier expansion cap factor
pub const FILL_CAP_FACTOR: usize = 5;

// Search budgets
/// Default cap on states expanded by one solvability search
pub const DEFAULT_SEARCH_STEPS: usize = 2_000_000;
/// Default cap on solutions collected by the all-paths search
pub const DEFAULT_MAX_SOLUTIONS: usize = 256;

// Planner structure
/// Minimum path-index gap between key tiles
pub const KEY_TILE_SPACING: usize = 3;
/// Branch paths at or below this length are discarded
pub const MIN_DECEPTIVE_LENGTH: usize = 4;
/// Sub-branch paths at or below this length are discarded
pub const MIN_SUB_BRANCH_LENGTH: usize = 3;
/// Non-critical cells stripped when a level has too many solutions
pub const MAX_STRIPPED_CELLS: usize = 5;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Persistence
/// Store key holding the current level number
pub const LEVEL_KEY: &str = "level";
/// Default file name of the level store
pub const DEFAULT_STORE_FILE: &str = "progress.txt";
