//! Command-line arguments, corpus loading and result output

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use fuzzball_core::{Order, SearchOptions, SearchResult, Searcher, SearcherOptions};
use tracing::{debug, info};

use crate::error::{Error, Result};

#[derive(Parser, Debug)]
#[command(name = "fuzzball")]
#[command(about = "Fuzzy search over files using duple filtering and Smith-Waterman ranking")]
#[command(version)]
pub struct Args {
    /// Search term
    pub query: String,

    /// Corpus files (each file is one entry unless --lines is given)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Treat every non-empty line of every file as an entry
    #[arg(long)]
    pub lines: bool,

    /// Literal substring stripped before matching (repeatable)
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Sort direction on score (ascending, descending)
    #[arg(short, long, default_value = "ascending")]
    pub order: String,

    /// Maximum number of results; zero or negative means no limit
    #[arg(short, long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    pub fn search_options(&self) -> SearchOptions {
        let options = SearchOptions::new().order(Order::parse(&self.order));
        match self.limit {
            Some(limit) => options.with_limit(limit),
            None => options,
        }
    }

    pub fn searcher_options(&self) -> SearcherOptions {
        SearcherOptions::default().ignore(self.ignore.iter().cloned())
    }
}

/// Read corpus entries as raw bytes, one per file or one per non-empty line
pub fn load_corpus(files: &[PathBuf], lines: bool) -> Result<Vec<Vec<u8>>> {
    let mut corpus = Vec::new();

    for path in files {
        let bytes = fs::read(path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;

        if lines {
            let before = corpus.len();
            corpus.extend(
                bytes
                    .split(|&b| b == b'\n')
                    .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
                    .filter(|line| !line.is_empty())
                    .map(<[u8]>::to_vec),
            );
            debug!(path = %path.display(), entries = corpus.len() - before, "loaded lines");
        } else {
            corpus.push(bytes);
        }
    }

    Ok(corpus)
}

/// Load the corpus, run the query and write results to `out`
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<usize> {
    let corpus = load_corpus(&args.files, args.lines)?;
    let searcher = Searcher::from_bytes(corpus, args.searcher_options())?;

    info!(
        entries = searcher.len(),
        duples = searcher.index().len(),
        hash = searcher.index_hash(),
        "corpus indexed"
    );

    let results = searcher.search(&args.query, &args.search_options());
    write_results(&results, args.json, out)?;

    Ok(results.len())
}

fn write_results<W: Write>(results: &[SearchResult], json: bool, out: &mut W) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, results)?;
        writeln!(out)?;
    } else {
        for result in results {
            writeln!(out, "{}\t{}", result.score, result.document)?;
        }
    }
    Ok(())
}
