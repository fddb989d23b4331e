//! Generation orchestrator: plan, realize, check and measure
//!
//! Runs a bounded number of attempts. Each attempt plans a level, realizes
//! it into a board, and keeps it only if a rotation assignment connects
//! Start to End. When every attempt fails the fallback level is used, so
//! generation always yields a playable level.

use log::{info, warn};

use crate::algorithm::fill::{calculate_max_fillable_tiles, explore_fill_from_path};
use crate::algorithm::solvability::{SearchBudget, SolutionPathInfo, find_solution_path};
use crate::generation::fallback::fallback_plan;
use crate::generation::plan::LevelPlan;
use crate::generation::planner::{LevelPlanner, check_dimension};
use crate::io::configuration::{
    DEFAULT_DIFFICULTY, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_GENERATION_ATTEMPTS,
};
use crate::io::error::{PipeflowError, Result, WithContext, invalid_parameter};
use crate::level::board::Board;
use crate::math::interpolation::{MAX_RATING, MIN_RATING};
use crate::math::probability::RandomSelector;
use crate::spatial::tiles::{ArchetypeRegistry, StandardRegistry};

/// Runtime generation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Grid width
    pub width: usize,
    /// Grid height
    pub height: usize,
    /// Difficulty rating (1..=10)
    pub difficulty: u8,
    /// Attempts before the fallback level is used
    pub max_attempts: usize,
    /// Budget for the solvability and all-paths searches
    pub search_budget: SearchBudget,
    /// Randomize every tile's rotation after measuring
    pub scramble: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            difficulty: DEFAULT_DIFFICULTY,
            max_attempts: MAX_GENERATION_ATTEMPTS,
            search_budget: SearchBudget::default(),
            scramble: false,
        }
    }
}

impl GeneratorConfig {
    /// Check every setting
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension, the difficulty or the attempt count is
    /// out of range
    pub fn validate(&self) -> Result<()> {
        check_dimension("width", self.width)?;
        check_dimension("height", self.height)?;
        if !(MIN_RATING..=MAX_RATING).contains(&self.difficulty) {
            return Err(invalid_parameter(
                "difficulty",
                &self.difficulty,
                &"must be between 1 and 10",
            ));
        }
        if self.max_attempts == 0 {
            return Err(invalid_parameter(
                "max_attempts",
                &self.max_attempts,
                &"at least one attempt is required",
            ));
        }
        Ok(())
    }
}

/// A playable level with its win-condition target
#[derive(Debug, Clone)]
pub struct GeneratedLevel {
    /// Plan the board was realized from
    pub plan: LevelPlan,
    /// Realized board
    pub board: Board,
    /// Fill the player must reach to win
    pub max_fillable_tiles: usize,
    /// Solution that reaches the maximum fill
    pub main_solution: Option<SolutionPathInfo>,
    /// Attempts spent, including the successful one
    pub attempts: usize,
    /// Whether the fallback level was used
    pub used_fallback: bool,
    /// Seed the level was generated from
    pub seed: u64,
}

/// Level generator over an archetype registry
#[derive(Debug, Clone)]
pub struct LevelGenerator<R = StandardRegistry> {
    config: GeneratorConfig,
    planner: LevelPlanner,
    registry: R,
}

impl LevelGenerator {
    /// Create a generator using the standard archetype shapes
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_registry(config, StandardRegistry)
    }
}

impl<R: ArchetypeRegistry> LevelGenerator<R> {
    /// Create a generator with a custom archetype registry
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn with_registry(config: GeneratorConfig, registry: R) -> Result<Self> {
        config.validate()?;
        let planner = LevelPlanner::new(config.width, config.height, config.difficulty)?;
        Ok(Self {
            config,
            planner,
            registry,
        })
    }

    /// Active configuration
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one level from a seed
    pub fn generate(&self, seed: u64) -> GeneratedLevel {
        let mut rng = RandomSelector::new(seed);

        for attempt in 1..=self.config.max_attempts {
            match self.attempt(attempt, &mut rng) {
                Ok((plan, board, solution)) => {
                    info!("Attempt {attempt} produced a solvable level");
                    return self.finish(plan, board, Some(solution), attempt, false, seed, &mut rng);
                }
                Err(error) => info!("Attempt {attempt} rejected: {error}"),
            }
        }

        warn!(
            "No solvable level after {} attempts",
            self.config.max_attempts
        );
        let plan = fallback_plan(self.planner.parameters());
        let board = Board::realize(&plan, &self.registry);
        let solution = find_solution_path(
            &board.base_openings(),
            board.start(),
            board.end(),
            self.config.search_budget,
        )
        .result;
        self.finish(
            plan,
            board,
            solution,
            self.config.max_attempts,
            true,
            seed,
            &mut rng,
        )
    }

    fn attempt(
        &self,
        attempt: usize,
        rng: &mut RandomSelector,
    ) -> Result<(LevelPlan, Board, SolutionPathInfo)> {
        let plan = self.planner.plan_level(rng)?;
        let board = Board::realize(&plan, &self.registry);
        let outcome = find_solution_path(
            &board.base_openings(),
            board.start(),
            board.end(),
            self.config.search_budget,
        );
        let solution = outcome
            .result
            .ok_or(PipeflowError::UnsolvableGrid { attempt: 0 })
            .with_attempt(attempt)?;
        Ok((plan, board, solution))
    }

    fn finish(
        &self,
        plan: LevelPlan,
        mut board: Board,
        solution: Option<SolutionPathInfo>,
        attempts: usize,
        used_fallback: bool,
        seed: u64,
        rng: &mut RandomSelector,
    ) -> GeneratedLevel {
        let snapshot = board.base_openings();
        let max_fill = calculate_max_fillable_tiles(
            &snapshot,
            board.start(),
            board.end(),
            self.config.search_budget,
        );

        let (max_fillable_tiles, main_solution) = match (max_fill.main_solution, solution) {
            (Some(best), _) => (max_fill.max_fillable_tiles, Some(best)),
            (None, Some(found)) => (explore_fill_from_path(&snapshot, &found).result, Some(found)),
            (None, None) => (0, None),
        };

        if self.config.scramble {
            board.scramble(rng);
        }

        GeneratedLevel {
            plan,
            board,
            max_fillable_tiles,
            main_solution,
            attempts,
            used_fallback,
            seed,
        }
    }
}
