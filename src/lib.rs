// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! A G-code run time estimator that rewrites feed moves above a safe height
//! into rapid moves.
//!
//! CAM programs often emit every move as a G1 feed move, including long
//! travels high above the stock.  This crate simulates a program line by
//! line, tracking the modal machine state (position, feed rate, motion
//! mode, units, distance mode, ...), estimates how long each line takes, and
//! turns G1 moves that stay clear of a configured safe Z height into G0
//! rapids.
//!
//! ## Basic usage
//!
//! ```rust
//! use rapidgc::{run, Config};
//!
//! let program = ["G0 Z20", "G1 X10 Y0 Z20 F1000", "G1 Z-1", "G1 X0"];
//! let (output, report) = run(&program, &Config::default()).unwrap();
//!
//! assert_eq!(output[1], "G0 X10 Y0 Z20");
//! // the F word dropped from the rapid is put back on the next feed move
//! assert_eq!(output[2], "G1 Z-1 F1000");
//! assert_eq!(report.stats.conversions, 1);
//! ```
//!
//! The individual stages are available as well: `parse::parse` splits a
//! line into words, `eval::Simulator` advances a `MachineState` by one
//! line, `policy::evaluate` decides about a conversion and the `rewrite`
//! functions perform the text substitution.
//!
//! ## Limitations
//!
//! Arcs (G2/G3) are timed along their chord.  Acceleration is not modeled.
//! The result is an estimate and an advice; always simulate the converted
//! program before running it on a machine.

pub mod ast;
pub mod config;
pub mod convert;
pub mod error;
pub mod eval;
pub mod parse;
pub mod policy;
pub mod report;
pub mod rewrite;

// internal helpers
pub(crate) mod util;

pub use crate::config::Config;
pub use crate::convert::{run, Converter, RunReport, RunStatistics};
pub use crate::error::ConfigError;
