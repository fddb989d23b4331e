//! Command-line interface for generating batches of puzzle levels

use crate::io::configuration::{
    DEFAULT_DIFFICULTY, DEFAULT_HEIGHT, DEFAULT_LEVEL_COUNT, DEFAULT_SEED, DEFAULT_STORE_FILE,
    DEFAULT_WIDTH,
};
use crate::io::error::{Result, file_system};
use crate::io::progress::ProgressManager;
use crate::io::text::render_level;
use crate::level::generator::{GeneratorConfig, LevelGenerator};
use crate::level::progress::{FileStore, LevelProgress, difficulty_for_level};
use clap::Parser;
use env_logger::Env;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "pipeflow")]
#[command(
    author,
    version,
    about = "Generate solvable pipe-rotation puzzle levels"
)]
/// Command-line arguments for the level generator
pub struct Cli {
    /// Grid width in tiles
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in tiles
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Difficulty rating 1-10 (derived from the stored level when omitted)
    #[arg(short, long)]
    pub difficulty: Option<u8>,

    /// Random seed for reproducible generation; level n uses seed + n
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of levels to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Write each level to <DIR>/level_<n>.txt instead of stdout
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Level progress file, advanced once per generated level
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = DEFAULT_STORE_FILE)]
    pub store: Option<PathBuf>,

    /// Levels in the campaign before the stored counter wraps to 1
    #[arg(long, default_value_t = DEFAULT_LEVEL_COUNT)]
    pub level_count: u32,

    /// Randomize tile rotations so the level has to be solved
    #[arg(long)]
    pub scramble: bool,

    /// Suppress progress output and warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Log generation details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet && self.count > 1
    }

    /// Default log filter for the chosen verbosity
    pub const fn log_filter(&self) -> &'static str {
        if self.verbose {
            "info"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Initialise `env_logger`; `RUST_LOG` overrides `default_filter`
pub fn init_logging(default_filter: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init()
        .ok();
}

/// Generates levels according to CLI arguments
pub struct LevelProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl LevelProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate and write every requested level
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the level store
    /// fails, or output cannot be written
    pub fn process(&mut self) -> Result<()> {
        if self.cli.count == 0 {
            return Ok(());
        }

        if let Some(ref dir) = self.cli.output {
            std::fs::create_dir_all(dir)
                .map_err(|error| file_system(dir, "create output directory", error))?;
        }

        let mut progress = self
            .cli
            .store
            .as_ref()
            .map(|path| LevelProgress::new(FileStore::new(path), self.cli.level_count));

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.count);
        }

        for index in 0..self.cli.count {
            let stored_level = match progress.as_mut() {
                Some(tracker) => Some(tracker.current()?),
                None => None,
            };
            self.process_level(index, stored_level)?;
            if let Some(tracker) = progress.as_mut() {
                tracker.advance()?;
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn process_level(&self, index: usize, stored_level: Option<u32>) -> Result<()> {
        let difficulty = self
            .cli
            .difficulty
            .or_else(|| stored_level.map(|level| difficulty_for_level(level, self.cli.level_count)))
            .unwrap_or(DEFAULT_DIFFICULTY);

        let config = GeneratorConfig {
            width: self.cli.width,
            height: self.cli.height,
            difficulty,
            scramble: self.cli.scramble,
            ..GeneratorConfig::default()
        };
        let generator = LevelGenerator::new(config)?;
        let seed = self.cli.seed.wrapping_add(index as u64);

        if let Some(ref pm) = self.progress_manager {
            pm.start_level(index, seed);
        }

        let level = generator.generate(seed);
        let text = render_level(&level);
        let number = stored_level.map_or(index + 1, |level| level as usize);

        match self.cli.output {
            Some(ref dir) => {
                let path = Self::get_output_path(dir, number);
                std::fs::write(&path, text)
                    .map_err(|error| file_system(&path, "write level", error))?;
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "== level {number} ==")?;
                writeln!(stdout, "{text}")?;
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.complete_level();
        }

        Ok(())
    }

    fn get_output_path(dir: &Path, number: usize) -> PathBuf {
        dir.join(format!("level_{number}.txt"))
    }
}
