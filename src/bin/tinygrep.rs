// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `tinygrep -E <PATTERN> [FILE...]` — a small grep-like driver around the
//! `tinygrep` engine. With no file arguments (and no `-r`), the pattern is
//! matched against stdin.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser as ClapParser;
use log::{debug, error, trace};
use walkdir::WalkDir;

use tinygrep::error::DriverError;
use tinygrep::Regex;

/// Search for PATTERN in FILE(s), or standard input if none is given.
#[derive(ClapParser, Debug)]
#[command(name = "tinygrep", about, version)]
struct Args {
    /// The pattern to search for.
    #[arg(short = 'E', long = "regex")]
    regex: String,

    /// Files to search. If empty (and `-r` is not given), stdin is read.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Recursively search all regular files under DIR.
    #[arg(short = 'r', long = "recursive", value_name = "DIR")]
    recursive: Option<PathBuf>,

    /// Raise logging verbosity (equivalent to RUST_LOG=debug).
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(any_matched) => {
            if any_matched {
                ExitCode::from(0)
            } else {
                ExitCode::from(1)
            }
        }
        Err(err) => {
            error!("{err}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// Runs the driver to completion, returning whether any line matched.
fn run(args: &Args) -> Result<bool, DriverError> {
    let regex = Regex::new(&args.regex)?;
    trace!("compiled pattern {:?}", args.regex);

    let sources = gather_sources(args)?;
    let prefix_paths = sources.len() > 1 || args.recursive.is_some();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut any_matched = false;

    for source in sources {
        any_matched |= search_source(&regex, &source, prefix_paths, &mut out)?;
    }

    Ok(any_matched)
}

/// A single thing to search: either an explicit path or standard input.
enum Source {
    Path(PathBuf),
    Stdin,
}

/// Resolves the driver's file arguments into the concrete list of sources to
/// search, in the order they should be reported.
fn gather_sources(args: &Args) -> Result<Vec<Source>, DriverError> {
    let mut sources: Vec<Source> = args.files.iter().cloned().map(Source::Path).collect();

    if let Some(dir) = &args.recursive {
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(|e| DriverError::Io {
                path: dir.display().to_string(),
                source: io::Error::new(io::ErrorKind::Other, e),
            })?;
            if entry.file_type().is_file() {
                paths.push(entry.into_path());
            }
        }
        paths.sort();
        sources.extend(paths.into_iter().map(Source::Path));
    }

    if sources.is_empty() {
        sources.push(Source::Stdin);
    }

    Ok(sources)
}

/// Searches a single source line by line, writing matches (optionally
/// path-prefixed) to `out`. Returns whether any line in this source matched.
fn search_source(
    regex: &Regex,
    source: &Source,
    prefix_paths: bool,
    out: &mut impl Write,
) -> Result<bool, DriverError> {
    match source {
        Source::Stdin => {
            let stdin = io::stdin();
            search_lines(regex, stdin.lock().lines(), None, out)
        }
        Source::Path(path) => {
            let file = fs::File::open(path).map_err(|source| DriverError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let reader = io::BufReader::new(file);
            let label = prefix_paths.then(|| display_path(path));
            search_lines(regex, reader.lines(), label.as_deref(), out)
        }
    }
}

fn search_lines(
    regex: &Regex,
    lines: impl Iterator<Item = io::Result<String>>,
    prefix: Option<&str>,
    out: &mut impl Write,
) -> Result<bool, DriverError> {
    let mut any_matched = false;
    let mut count = 0usize;
    for line in lines {
        let line = line.map_err(|source| DriverError::Io {
            path: prefix.unwrap_or("<stdin>").to_string(),
            source,
        })?;
        count += 1;
        if regex.is_match(line.as_bytes())? {
            any_matched = true;
            match prefix {
                Some(p) => writeln!(out, "{p}:{line}"),
                None => writeln!(out, "{line}"),
            }
            .map_err(|source| DriverError::Io {
                path: prefix.unwrap_or("<stdout>").to_string(),
                source,
            })?;
        }
    }
    debug!("{}: {} line(s) scanned", prefix.unwrap_or("<stdin>"), count);
    Ok(any_matched)
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
