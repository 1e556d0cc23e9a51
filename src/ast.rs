// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::collections::BTreeMap;
use std::fmt::{self, Formatter};
use std::ops::Range;
use strum_macros::{Display, EnumString};

/// One line of G-code, split into its words.
///
/// The raw text is kept unchanged so that a line can always be emitted
/// again exactly as it was read, or rewritten using the word spans.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedLine {
    pub raw: String,
    /// The first G or M code on the line.
    pub command: Option<Code>,
    /// All G and M codes, in source order.
    pub codes: Vec<Code>,
    /// Parameter words; the first occurrence of a letter wins.
    pub params: BTreeMap<Param, f64>,
    /// Every recognised word, in source order.
    pub words: Vec<Word>,
    /// Set when the line could not be tokenized at all.
    pub malformed: bool,
}

/// A G or M code.
///
/// G codes are stored in tenths, so that `G90.1` is `G(901)` and `G1` is
/// `G(10)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    G(u16),
    M(u16),
}

/// A recognised word together with its byte range in the raw line.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub kind: WordKind,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WordKind {
    Code(Code),
    Param(Param, f64),
}

/// Parameter letters: everything except G, M and the ignored N and O words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
pub enum Param {
    A, B, C, D, E, F, H, I, J, K, L,
    P, Q, R, S, T, U, V, W, X, Y, Z,
}

impl Param {
    /// Returns true for the X, Y and Z words that define a target position.
    pub fn is_linear_axis(&self) -> bool {
        matches!(self, Param::X | Param::Y | Param::Z)
    }

    pub fn is_axis(&self) -> bool {
        matches!(self, Param::A | Param::B | Param::C |
                       Param::U | Param::V | Param::W |
                       Param::X | Param::Y | Param::Z)
    }
}

impl ParsedLine {
    /// A line that carries no words at all.
    pub fn noop(raw: impl Into<String>) -> Self {
        ParsedLine { raw: raw.into(), ..Default::default() }
    }

    pub fn is_noop(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, param: Param) -> Option<f64> {
        self.params.get(&param).cloned()
    }

    pub fn has(&self, param: Param) -> bool {
        self.params.contains_key(&param)
    }

    pub fn has_code(&self, code: Code) -> bool {
        self.codes.contains(&code)
    }

    /// Whether any X, Y or Z word is present.
    pub fn has_position_words(&self) -> bool {
        self.params.keys().any(Param::is_linear_axis)
    }

    /// Whether the line names any axis, rotary axes included.
    pub fn has_axis_words(&self) -> bool {
        self.params.keys().any(Param::is_axis)
    }

    /// The motion word (G0 to G3) of the line, if any.
    pub fn motion_word(&self) -> Option<&Word> {
        self.words.iter().find(|w| matches!(w.kind, WordKind::Code(Code::G(0 | 10 | 20 | 30))))
    }

    pub fn param_words(&self, param: Param) -> impl Iterator<Item = &Word> {
        self.words.iter().filter(move |w| matches!(w.kind, WordKind::Param(p, _) if p == param))
    }

    /// The first word naming a movable axis.
    pub fn first_axis_word(&self) -> Option<&Word> {
        self.words.iter().find(|w| matches!(w.kind, WordKind::Param(p, _) if p.is_axis()))
    }
}

impl fmt::Display for ParsedLine {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", word.kind)?;
        }
        Ok(())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Code::G(n) => {
                let nf = (*n as f64) / 10.;
                write!(f, "G{}", nf)
            }
            Code::M(n) => write!(f, "M{}", n),
        }
    }
}

impl fmt::Display for WordKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            WordKind::Code(c) => write!(f, "{}", c),
            WordKind::Param(p, v) => write!(f, "{}{}", p, v),
        }
    }
}
