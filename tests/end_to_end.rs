// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! End-to-end scenarios against the public `Regex` API, independent of the
//! CLI driver.

use tinygrep::{Error, Regex};

fn assert_match(pattern: &str, input: &str) {
    let re = Regex::new(pattern).unwrap();
    assert!(
        re.is_match(input.as_bytes()).unwrap(),
        "expected {:?} to match {:?}",
        pattern,
        input
    );
}

fn assert_no_match(pattern: &str, input: &str) {
    let re = Regex::new(pattern).unwrap();
    assert!(
        !re.is_match(input.as_bytes()).unwrap(),
        "expected {:?} not to match {:?}",
        pattern,
        input
    );
}

#[test]
fn dot_matches_any_byte() {
    assert_match("c.t", "cat");
}

#[test]
fn anchors_pin_start_and_end() {
    assert_match("^pear$", "pear");
    assert_no_match("^pear$", "pears");
}

#[test]
fn digit_shorthand() {
    assert_match(r"\d apple", "sally has 3 apples");
}

#[test]
fn capturing_group_and_backreference() {
    let re = Regex::new(r"(cat) and \1").unwrap();
    let caps = re.captures(b"cat and cat").unwrap().unwrap();
    assert_eq!(caps.get(1).unwrap().as_bytes(), b"cat");
}

#[test]
fn nested_groups_and_backreferences() {
    assert_match(
        r"('(cat) and \2') is the same as \1",
        "'cat and cat' is the same as 'cat and cat'",
    );
}

#[test]
fn three_groups_each_referenced_twice() {
    assert_match(
        r"((\w\w\w\w) (\d\d\d)) is doing \2 \3 times, and again \1 times",
        "grep 101 is doing grep 101 times, and again grep 101 times",
    );
}

#[test]
fn alternation_with_backreferences_on_both_sides() {
    let re = Regex::new(r"(c.t|d.g) and (f..h|b..d), \1 with \2").unwrap();
    let caps = re
        .captures(b"cat and fish, cat with fish")
        .unwrap()
        .unwrap();
    assert_eq!(caps.get(1).unwrap().as_bytes(), b"cat");
    assert_eq!(caps.get(2).unwrap().as_bytes(), b"fish");
}

#[test]
fn quantifiers_are_greedy_and_optional() {
    assert_match("(how+dy) (he?y) there", "howwdy hey there");
}

#[test]
fn character_classes() {
    assert_match(
        "([abc]+)-([def]+) is \\1-\\2, not [^xyz]+",
        "abc-def is abc-def, not efg",
    );
}

#[test]
fn end_anchor_can_land_mid_string() {
    let re = Regex::new("ana$").unwrap();
    let m = re.find(b"banana").unwrap().unwrap();
    assert_eq!((m.start(), m.end()), (3, 6));
}

#[test]
fn malformed_patterns_are_rejected() {
    assert!(matches!(
        Regex::new("(unclosed"),
        Err(Error::MalformedPattern { .. })
    ));
    assert!(matches!(
        Regex::new(r"\9"),
        Err(Error::MalformedPattern { .. })
    ));
    assert!(matches!(
        Regex::new("+abc"),
        Err(Error::MalformedPattern { .. })
    ));
}

#[test]
fn compiling_twice_matches_identically() {
    let pattern = r"(\w+)@\1\.com";
    let inputs = ["foo@foo.com", "foo@bar.com", ""];
    let first = Regex::new(pattern).unwrap();
    let second = Regex::new(pattern).unwrap();
    for input in inputs {
        assert_eq!(
            first.is_match(input.as_bytes()).unwrap(),
            second.is_match(input.as_bytes()).unwrap(),
        );
    }
}
