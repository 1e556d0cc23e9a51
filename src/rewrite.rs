// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Text substitutions on single lines.
//!
//! All functions work on the word spans of a parsed line, so anything that
//! is not touched (other words, comments, spacing) is kept verbatim.

use std::cmp::Reverse;
use std::ops::Range;

use crate::ast::{Param, ParsedLine};
use crate::eval::MotionMode;

/// Rewrites a G1 line as a G0 line.
///
/// The G1 word is replaced, or `G0` is inserted before the first axis word
/// if the line relies on a modal G1.  All F words are removed, since rapids
/// do not carry a feed rate.
pub fn to_rapid(line: &ParsedLine) -> String {
    let mut edits = vec![];
    match line.motion_word() {
        Some(word) => edits.push((word.span.clone(), "G0".to_string())),
        None => if let Some(word) = line.first_axis_word() {
            edits.push((word.span.start..word.span.start, "G0 ".to_string()));
        }
    }
    for word in line.param_words(Param::F) {
        edits.push((removal_span(&line.raw, &word.span), String::new()));
    }
    apply(&line.raw, edits)
}

/// Re-inserts modal words the line relies on.
///
/// `motion` is inserted before the first axis word, `feed` (a complete word
/// such as `F1000`) after the last word, ahead of any trailing comment.
pub fn restore_modal(line: &ParsedLine, motion: Option<MotionMode>, feed: Option<&str>) -> String {
    let mut edits = vec![];
    if let Some(mode) = motion {
        if let Some(word) = line.first_axis_word() {
            let at = word.span.start;
            edits.push((at..at, format!("{} ", mode.word())));
        }
    }
    if let Some(feed) = feed {
        if let Some(word) = line.words.last() {
            let at = word.span.end;
            edits.push((at..at, format!(" {}", feed)));
        }
    }
    apply(&line.raw, edits)
}

/// Extends a word span over the whitespace that separates it from its
/// neighbours, preferring the whitespace before the word.
fn removal_span(raw: &str, span: &Range<usize>) -> Range<usize> {
    let is_blank = |c: char| c == ' ' || c == '\t';
    let before = raw[..span.start].trim_end_matches(is_blank).len();
    if before < span.start {
        before..span.end
    } else {
        let after = raw.len() - raw[span.end..].trim_start_matches(is_blank).len();
        span.start..after
    }
}

fn apply(raw: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by_key(|(range, _)| Reverse(range.start));
    let mut out = raw.to_string();
    for (range, text) in edits {
        out.replace_range(range, &text);
    }
    out
}
