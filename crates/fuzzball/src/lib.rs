//! # FuzzBall command line
//!
//! Thin shell around `fuzzball-core`:
//! - **cli**: argument parsing, corpus loading from files, result output
//! - **error**: CLI error type
//! - **tracing**: logging setup
//!
//! ## Usage
//!
//! ```bash
//! fuzzball --lines --order descending --limit 5 "serach" words.txt
//! fuzzball -i .rs -i src/ "libb" src/*.rs --json
//! ```

pub mod cli;
pub mod error;
pub mod tracing;

pub use cli::{load_corpus, run, Args};
pub use error::{Error, Result};
