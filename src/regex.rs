// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The one-shot façade the driver (and any other embedder) actually talks
//! to: compile a pattern once, then ask it whether/where it matches a line.

use std::fmt;

use log::trace;

use crate::captures::{Captures, Match};
use crate::error::Error;
use crate::matcher;
use crate::parser::{self, Compiled};

/// A compiled regular expression.
///
/// Compilation happens once, in [`Regex::new`]; afterwards a `Regex` is
/// immutable and may be shared (`Send + Sync`) across threads that each
/// match it against their own input with an independently allocated
/// capture table.
pub struct Regex {
    original: String,
    compiled: Compiled,
}

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Regex({:?})", self.original)
    }
}

// SAFETY-relevant note for readers: `Compiled` owns no interior mutability
// and no thread-local state, so sharing an immutable `Regex` across threads
// is sound; every call allocates its own capture table.
unsafe impl Send for Regex {}
unsafe impl Sync for Regex {}

impl Regex {
    /// Compiles `pattern`. Fails with [`Error::MalformedPattern`] if the
    /// pattern does not conform to the grammar in `parser`.
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        let compiled = parser::parse(pattern)?;
        trace!(
            "compiled pattern {:?}: {} group(s), start_anchored={}, end_anchored={}",
            pattern,
            compiled.group_count,
            compiled.start_anchored,
            compiled.end_anchored,
        );
        Ok(Regex {
            original: pattern.to_owned(),
            compiled,
        })
    }

    /// Returns `true` if some contiguous substring of `line` matches this
    /// pattern.
    pub fn is_match(&self, line: &[u8]) -> Result<bool, Error> {
        matcher::is_match(&self.compiled, line)
    }

    /// Returns the leftmost match in `line`, if any.
    pub fn find<'l>(&self, line: &'l [u8]) -> Result<Option<Match<'l>>, Error> {
        Ok(matcher::find(&self.compiled, line)?
            .map(|m| Match::new(line, m.start, m.end)))
    }

    /// Returns the leftmost match in `line` along with its capture groups,
    /// if any.
    pub fn captures<'l>(&self, line: &'l [u8]) -> Result<Option<Captures<'l>>, Error> {
        Ok(matcher::find(&self.compiled, line)?
            .map(|m| Captures::new(line, (m.start, m.end), m.captures)))
    }
}
