// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Running whole programs through the simulator and the conversion policy.

use tracing::{debug, info, warn};

use crate::ast::{Param, ParsedLine};
use crate::config::Config;
use crate::error::ConfigError;
use crate::eval::{LineWarning, MachineState, MotionMode, Simulator, Step};
use crate::parse::parse;
use crate::policy::{evaluate, Reason};
use crate::rewrite;
use crate::util::format_number;

/// Counters collected over a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunStatistics {
    pub total_lines: usize,
    pub conversions: usize,
    /// Estimated run time, the sum of all line durations.
    pub total_seconds: f64,
    pub rapid_seconds: f64,
    /// Time spent in G1-G3 moves.
    pub feed_seconds: f64,
    pub dwell_seconds: f64,
    /// Moves that had a length but no usable feed rate.
    pub degenerate_moves: usize,
    /// Lines that could not be tokenized and were passed through as-is.
    pub malformed_lines: usize,
    pub restored_motion_words: usize,
    pub restored_feed_words: usize,
}

/// A line that was rewritten from G1 to G0.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionRecord {
    /// 1-based line number.
    pub lineno: usize,
    pub original: String,
    pub converted: String,
    /// Z height before the move.
    pub z: f64,
    pub reason: Reason,
}

/// Everything a run produces besides the output lines.
#[derive(Clone, Debug, Default)]
pub struct RunReport {
    pub stats: RunStatistics,
    pub conversions: Vec<ConversionRecord>,
    pub warnings: Vec<LineWarning>,
}

/// The Converter streams lines through the simulator and rewrites feed moves
/// that are safe to run as rapids.
///
/// The simulator follows the modal state of the *input* program.  Since a
/// conversion changes the modal motion mode (and drops the F word) in the
/// output, the converter also tracks what the output program's modal state
/// is, and puts back motion and feed words that later lines relied on.
pub struct Converter {
    config: Config,
    sim: Simulator,
    state: MachineState,
    // modal motion of the emitted program
    emitted_mode: MotionMode,
    // set when a converted line dropped an F word the input relied on
    feed_diverged: bool,
    report: RunReport,
}

impl Converter {
    /// Creates a converter, refusing invalid configurations.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Converter {
            sim: Simulator::new(config.rapid_rate),
            config,
            state: MachineState::default(),
            emitted_mode: MotionMode::Rapid,
            feed_diverged: false,
            report: RunReport::default(),
        })
    }

    /// The machine state after all lines processed so far.
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn stats(&self) -> &RunStatistics {
        &self.report.stats
    }

    /// Processes the next line and returns the text to emit for it.
    pub fn process(&mut self, raw: &str) -> String {
        self.report.stats.total_lines += 1;
        let lineno = self.report.stats.total_lines;

        let line = parse(raw);
        if line.malformed {
            self.report.stats.malformed_lines += 1;
        }

        let step = self.sim.advance(&self.state, &line);
        let decision = step.motion.map(|mode| {
            evaluate(&line, mode, self.state.position.z, step.state.position.z, &self.config)
        });

        let (output, step) = match decision {
            Some(decision) if decision.convert => {
                let converted = rewrite::to_rapid(&line);
                debug!("line {}: {:?} -> {:?} ({})", lineno, raw, converted, decision.reason);
                self.emitted_mode = MotionMode::Rapid;
                if line.has(Param::F) {
                    self.feed_diverged = true;
                }
                self.report.stats.conversions += 1;
                self.report.conversions.push(ConversionRecord {
                    lineno,
                    original: raw.trim().to_string(),
                    converted: converted.trim().to_string(),
                    z: self.state.position.z,
                    reason: decision.reason,
                });
                (converted, step.into_rapid(&self.sim))
            }
            _ => (self.restore(lineno, &line, &step), step),
        };

        self.account(lineno, &step);
        self.state = step.state;
        output
    }

    /// Finishes the run.
    pub fn finish(self) -> RunReport {
        let stats = &self.report.stats;
        info!("{} lines, {} conversions, {:.1} s estimated",
              stats.total_lines, stats.conversions, stats.total_seconds);
        self.report
    }

    // -- private API --

    fn restore(&mut self, lineno: usize, line: &ParsedLine, step: &Step) -> String {
        let mut motion = None;
        let mut feed = None;
        if let Some(mode) = step.motion {
            if line.motion_word().is_none() && mode != self.emitted_mode {
                motion = Some(mode);
                self.report.stats.restored_motion_words += 1;
            }
            self.emitted_mode = mode;
            if mode.is_feed() && self.feed_diverged && !line.has(Param::F) {
                let units = step.state.units;
                feed = Some(format!("F{}", format_number(step.state.feed / units.to_mm())));
                self.report.stats.restored_feed_words += 1;
                self.feed_diverged = false;
            }
        }
        if line.has(Param::F) {
            self.feed_diverged = false;
        }
        if motion.is_none() && feed.is_none() {
            return line.raw.clone();
        }
        debug!("line {}: restoring modal words {:?} {:?}", lineno, motion, feed);
        rewrite::restore_modal(line, motion, feed.as_deref())
    }

    fn account(&mut self, lineno: usize, step: &Step) {
        let stats = &mut self.report.stats;
        for warning in &step.warnings {
            warn!("line {}: {}", lineno, warning);
            self.report.warnings.push(LineWarning { lineno, warning: warning.clone() });
        }
        if step.degenerate {
            stats.degenerate_moves += 1;
        }
        match step.motion {
            Some(MotionMode::Rapid) => stats.rapid_seconds += step.move_time(),
            Some(_) => stats.feed_seconds += step.move_time(),
            None => ()
        }
        stats.dwell_seconds += step.dwell;
        stats.total_seconds += step.duration;
    }
}

/// Converts a whole program, returning the output lines and the report.
///
/// The configuration is validated before any line is looked at.  No line
/// is ever dropped: the output has exactly as many lines as the input.
pub fn run<I>(lines: I, config: &Config) -> Result<(Vec<String>, RunReport), ConfigError>
where I: IntoIterator,
      I::Item: AsRef<str>
{
    let mut converter = Converter::new(config.clone())?;
    let output = lines.into_iter().map(|line| converter.process(line.as_ref())).collect();
    Ok((output, converter.finish()))
}
