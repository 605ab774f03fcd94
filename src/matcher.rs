// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The backtracking matching engine.
//!
//! Unlike an NFA/DFA simulation, this engine walks the AST directly with a
//! continuation passed down through the recursion: `cont` represents "the
//! rest of the pattern that must still match" from whatever position the
//! current node leaves off at. A node tries its preferred alternative first
//! (greedy repetition, left branch of an alternation, presence over
//! absence); if `cont` rejects every position that alternative offers, the
//! node's captures are rolled back to a snapshot and the next alternative is
//! tried. This is what gives capturing groups and back-references correct
//! semantics across alternation and quantifiers, at the cost of the
//! exponential worst case inherent to backtracking.

use crate::ast::Node;
use crate::error::Error;
use crate::parser::Compiled;

/// Generous enough for any hand-written pattern matched against inputs of a
/// few thousand bytes; exists purely to turn stack exhaustion on
/// pathological patterns into a clean error instead of a crash.
const MAX_RECURSION_DEPTH: usize = 10_000;

/// A single capture group's span, or `None` if the group never
/// participated in the winning match. Index 0 is unused by this type;
/// callers address group `i` via `captures[i]`.
pub type Captures = Vec<Option<(usize, usize)>>;

/// The outcome of a successful search: the overall match span plus the
/// capture table as it stood when the match was accepted.
#[derive(Debug)]
pub struct MatchResult {
    pub start: usize,
    pub end: usize,
    pub captures: Captures,
}

struct MatchState<'t> {
    input: &'t [u8],
    caps: Captures,
    depth: usize,
}

type Cont<'a> = dyn FnMut(&mut MatchState, usize) -> Result<bool, Error> + 'a;

/// Searches `input` for `compiled`, trying every legal start offset in
/// order (or only offset 0, if the pattern is start-anchored) and returning
/// the first one that matches.
pub fn find(compiled: &Compiled, input: &[u8]) -> Result<Option<MatchResult>, Error> {
    if compiled.start_anchored {
        return try_at(compiled, input, 0);
    }
    for start in 0..=input.len() {
        if let Some(result) = try_at(compiled, input, start)? {
            return Ok(Some(result));
        }
    }
    Ok(None)
}

/// Convenience wrapper for callers that only need a yes/no answer.
pub fn is_match(compiled: &Compiled, input: &[u8]) -> Result<bool, Error> {
    Ok(find(compiled, input)?.is_some())
}

fn try_at(compiled: &Compiled, input: &[u8], start: usize) -> Result<Option<MatchResult>, Error> {
    let mut state = MatchState {
        input,
        caps: vec![None; compiled.group_count + 1],
        depth: 0,
    };
    let end_anchored = compiled.end_anchored;
    let len = input.len();
    let mut end = None;
    let matched = match_node(&compiled.root, start, &mut state, &mut |_state, pos| {
        if end_anchored && pos != len {
            Ok(false)
        } else {
            end = Some(pos);
            Ok(true)
        }
    })?;
    Ok(matched.then(|| MatchResult {
        start,
        end: end.expect("a successful match always records an end position"),
        captures: state.caps,
    }))
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Matches `node` at `pos`, calling `cont` with every candidate end
/// position the node offers, in preference order, until `cont` accepts one.
/// Returns whether the overall match (as decided by the outermost `cont`)
/// succeeded from this node onward.
fn match_node(
    node: &Node,
    pos: usize,
    state: &mut MatchState,
    cont: &mut Cont,
) -> Result<bool, Error> {
    state.depth += 1;
    if state.depth > MAX_RECURSION_DEPTH {
        state.depth -= 1;
        return Err(Error::PatternTooComplex);
    }

    let result = match node {
        Node::Literal(b) => {
            if state.input.get(pos) == Some(b) {
                cont(state, pos + 1)
            } else {
                Ok(false)
            }
        }
        Node::AnyByte => {
            if pos < state.input.len() {
                cont(state, pos + 1)
            } else {
                Ok(false)
            }
        }
        Node::Digit => match state.input.get(pos) {
            Some(b) if b.is_ascii_digit() => cont(state, pos + 1),
            _ => Ok(false),
        },
        Node::Word => match state.input.get(pos) {
            Some(&b) if is_word_byte(b) => cont(state, pos + 1),
            _ => Ok(false),
        },
        Node::Class { positive, members } => match state.input.get(pos) {
            Some(&b) if members.contains(&b) == *positive => cont(state, pos + 1),
            _ => Ok(false),
        },
        Node::StartAnchor => {
            if pos == 0 {
                cont(state, pos)
            } else {
                Ok(false)
            }
        }
        Node::EndAnchor => {
            if pos == state.input.len() {
                cont(state, pos)
            } else {
                Ok(false)
            }
        }
        Node::Concat(children) => match_concat(children, 0, pos, state, cont),
        Node::Alternation(left, right) => {
            let snapshot = state.caps.clone();
            if match_node(left, pos, state, cont)? {
                Ok(true)
            } else {
                state.caps = snapshot;
                match_node(right, pos, state, cont)
            }
        }
        Node::OneOrMore(child) => match_one_or_more(child, pos, state, cont),
        Node::ZeroOrOne(child) => {
            let snapshot = state.caps.clone();
            if match_node(child, pos, state, cont)? {
                Ok(true)
            } else {
                state.caps = snapshot;
                cont(state, pos)
            }
        }
        Node::Group { index, child } => match_group(*index, child, pos, state, cont),
        Node::BackRef(index) => match_backref(*index, pos, state, cont),
    };
    state.depth -= 1;
    result
}

fn match_concat(
    children: &[Node],
    idx: usize,
    pos: usize,
    state: &mut MatchState,
    cont: &mut Cont,
) -> Result<bool, Error> {
    match children.get(idx) {
        None => cont(state, pos),
        Some(child) => match_node(child, pos, state, &mut |state, next_pos| {
            match_concat(children, idx + 1, next_pos, state, cont)
        }),
    }
}

/// One mandatory iteration of `child`, then as many further iterations as
/// `child` keeps advancing, greedily, backing off one at a time on
/// downstream failure.
fn match_one_or_more(
    child: &Node,
    pos: usize,
    state: &mut MatchState,
    cont: &mut Cont,
) -> Result<bool, Error> {
    match_node(child, pos, state, &mut |state, pos1| {
        if pos1 == pos {
            // The mandatory iteration matched the empty string; looping
            // again would never make progress, so stop here.
            cont(state, pos1)
        } else {
            match_more(child, pos1, state, cont)
        }
    })
}

/// Zero or more additional iterations of `child` from `pos`, preferring as
/// many as possible.
fn match_more(
    child: &Node,
    pos: usize,
    state: &mut MatchState,
    cont: &mut Cont,
) -> Result<bool, Error> {
    let snapshot = state.caps.clone();
    let extended = match_node(child, pos, state, &mut |state, next_pos| {
        if next_pos == pos {
            // An empty-width repetition does not count as progress.
            Ok(false)
        } else {
            match_more(child, next_pos, state, cont)
        }
    })?;
    if extended {
        Ok(true)
    } else {
        state.caps = snapshot;
        cont(state, pos)
    }
}

fn match_group(
    index: usize,
    child: &Node,
    pos: usize,
    state: &mut MatchState,
    cont: &mut Cont,
) -> Result<bool, Error> {
    let prior = state.caps[index];
    let matched = match_node(child, pos, state, &mut |state, end_pos| {
        let previous = state.caps[index];
        state.caps[index] = Some((pos, end_pos));
        let accepted = cont(state, end_pos)?;
        if !accepted {
            state.caps[index] = previous;
        }
        Ok(accepted)
    })?;
    if !matched {
        state.caps[index] = prior;
    }
    Ok(matched)
}

fn match_backref(
    index: usize,
    pos: usize,
    state: &mut MatchState,
    cont: &mut Cont,
) -> Result<bool, Error> {
    let captured = state.caps.get(index).copied().flatten();
    match captured {
        None => Ok(false),
        Some((s, e)) => {
            let len = e - s;
            if pos + len <= state.input.len() && state.input[pos..pos + len] == state.input[s..e] {
                cont(state, pos + len)
            } else {
                Ok(false)
            }
        }
    }
}
