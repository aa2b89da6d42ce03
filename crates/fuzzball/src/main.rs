//! FuzzBall - fuzzy search from the command line
//!
//! Usage:
//!     fuzzball "hello" corpus.txt --lines
//!     fuzzball "main" src/*.rs --order descending --limit 3
//!
//! Environment variables:
//! - `RUST_LOG`: Logging filter (overrides --log-level)

use clap::Parser;
use fuzzball::Args;
use tracing::debug;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    fuzzball::tracing::init_with_filter(&args.log_level);
    debug!("Starting fuzzball v{}", env!("CARGO_PKG_VERSION"));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let count = fuzzball::run(&args, &mut out)?;

    debug!(results = count, "done");
    Ok(())
}
