//! CLI entry point for treated versus control intensity decay analysis

use clap::Parser;
use uvfade::io::cli::{Cli, RunProcessor};
use uvfade::io::logging::init_logging;

fn main() -> uvfade::Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.quiet)?;
    let mut processor = RunProcessor::new(cli);
    processor.process()
}
