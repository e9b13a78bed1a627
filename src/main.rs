//! CLI entry point for progressive threshold pixelation

use clap::Parser;
use grain::io::cli::{Cli, FileProcessor};
use grain::io::logger;

fn main() -> grain::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.log_level());
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
