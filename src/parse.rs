// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::str::FromStr;
use itertools::Itertools;
use pest_derive::Parser;
use pest::{Parser, iterators::Pair};
use tracing::debug;

use crate::ast::*;
use crate::util::num_to_int;

#[derive(Parser)]
#[grammar = "gcode.pest"]
pub struct GcodeParser;

// G codes are kept in tenths, M codes as integers.
const MAX_GCODE: u16 = 1000;
const MAX_MCODE: u16 = 100;

fn make_word(pair: Pair<Rule>) -> Option<Word> {
    let span = pair.as_span();
    let (letter, value) = pair.into_inner().collect_tuple().expect("children");
    let letter = letter.as_str().to_ascii_uppercase();
    let value: f64 = match value.as_str().parse() {
        Ok(v) if f64::is_finite(v) => v,
        _ => {
            debug!("skipping malformed number in word {:?}", span.as_str());
            return None;
        }
    };
    let kind = match letter.as_str() {
        "N" | "O" => return None,
        "G" => WordKind::Code(Code::G(num_to_int(value, 1, MAX_GCODE).or_else(|| {
            debug!("skipping invalid G code {:?}", span.as_str());
            None
        })?)),
        "M" => WordKind::Code(Code::M(num_to_int(value, 0, MAX_MCODE).or_else(|| {
            debug!("skipping invalid M code {:?}", span.as_str());
            None
        })?)),
        other => WordKind::Param(Param::from_str(other).ok()?, value),
    };
    Some(Word { kind, span: span.start()..span.end() })
}

/// Parses a single line of G-code.
///
/// This never fails: malformed words are skipped, and a line that cannot be
/// tokenized at all is returned as a no-op line that keeps its raw text.
pub fn parse(raw: &str) -> ParsedLine {
    let mut line = ParsedLine::noop(raw);
    let pairs = match GcodeParser::parse(Rule::line, raw) {
        Ok(mut pairs) => pairs.next().expect("line rule").into_inner(),
        Err(e) => {
            debug!("unparseable line {:?}: {}", raw, e);
            line.malformed = true;
            return line;
        }
    };
    for pair in pairs {
        match pair.as_rule() {
            Rule::word => if let Some(word) = make_word(pair) {
                match word.kind {
                    WordKind::Code(code) => {
                        if line.command.is_none() {
                            line.command = Some(code);
                        }
                        line.codes.push(code);
                    }
                    WordKind::Param(p, v) => {
                        line.params.entry(p).or_insert(v);
                    }
                }
                line.words.push(word);
            }
            Rule::junk => debug!("skipping junk {:?}", pair.as_str()),
            _ => ()
        }
    }
    line
}
