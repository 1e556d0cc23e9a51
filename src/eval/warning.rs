// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt;

use crate::ast::Code;

/// A problem found while simulating a line.
///
/// Warnings never stop the simulation; the offending part of the line is
/// ignored or given a zero duration.
#[derive(Clone, Debug, PartialEq)]
pub enum Warning {
    /// A move with nonzero length but no usable rate.
    DegenerateFeed { distance: f64, rate: f64 },
    /// Two codes of the same modal group on one line.
    ConflictingCodes(&'static str, Code, Code),
    /// A G code the simulator does not know how to time.
    UnsupportedCode(Code),
}

/// A warning together with the 1-based line it occurred on.
#[derive(Clone, Debug, PartialEq)]
pub struct LineWarning {
    pub lineno: usize,
    pub warning: Warning,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::DegenerateFeed { distance, rate } =>
                write!(f, "move of {:.3} mm at rate {} takes no time", distance, rate),
            Warning::ConflictingCodes(group, c1, c2) =>
                write!(f, "{} and {} of group {} cannot be used together, ignored", c1, c2, group),
            Warning::UnsupportedCode(c) =>
                write!(f, "{} is not simulated, ignored", c),
        }
    }
}

impl fmt::Display for LineWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Warning in line {}: {}", self.lineno, self.warning)
    }
}
