//! CLI entry point for the pipe-rotation level generator

use clap::Parser;
use pipeflow::io::cli::{Cli, LevelProcessor, init_logging};

fn main() -> pipeflow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_filter());
    let mut processor = LevelProcessor::new(cli);
    processor.process()
}
