// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Deciding whether a feed move may run as a rapid.

use strum_macros::Display;

use crate::ast::ParsedLine;
use crate::config::Config;
use crate::eval::MotionMode;

/// Why a line was or was not converted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum Reason {
    /// Both ends of the move are at or above safe Z.
    #[strum(serialize = "clear of safe Z")]
    ClearOfSafeZ,
    /// Only one end is at or above safe Z, accepted in aggressive mode.
    #[strum(serialize = "aggressive override")]
    AggressiveOverride,
    /// Only one end is at or above safe Z, rejected in conservative mode.
    #[strum(serialize = "conservative reject")]
    ConservativeReject,
    /// Neither end is at or above safe Z.
    #[strum(serialize = "below safe Z")]
    BelowSafeZ,
    /// The line is not a G1 move.
    #[strum(serialize = "not a feed move")]
    NotFeedMove,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ConversionDecision {
    pub convert: bool,
    pub reason: Reason,
}

impl ConversionDecision {
    fn new(convert: bool, reason: Reason) -> Self {
        ConversionDecision { convert, reason }
    }
}

/// Decides whether `line` may be rewritten from G1 to G0.
///
/// `mode` is the motion mode in effect for the line, which may come from an
/// earlier line.  Only linear moves with at least one X, Y or Z word are
/// candidates.
pub fn evaluate(line: &ParsedLine, mode: MotionMode, prior_z: f64, target_z: f64,
                config: &Config) -> ConversionDecision {
    if mode != MotionMode::Linear || !line.has_position_words() {
        return ConversionDecision::new(false, Reason::NotFeedMove);
    }
    let prior_clear = prior_z >= config.z_safe;
    let target_clear = target_z >= config.z_safe;
    match (prior_clear, target_clear) {
        (true, true) => ConversionDecision::new(true, Reason::ClearOfSafeZ),
        (false, false) => ConversionDecision::new(false, Reason::BelowSafeZ),
        _ if config.aggressive => ConversionDecision::new(true, Reason::AggressiveOverride),
        _ => ConversionDecision::new(false, Reason::ConservativeReject),
    }
}
