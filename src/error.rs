// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::io;
use thiserror::Error;

/// Errors that stop a run before any line is processed.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Safe Z must be a finite, non-negative height.
    #[error("invalid safe Z height: {0} mm")]
    InvalidSafeZ(f64),

    /// The rapid rate must be a finite, positive speed.
    #[error("invalid rapid rate: {0} mm/min")]
    InvalidRapidRate(f64),

    #[error("cannot read config file: {0}")]
    Io(#[from] io::Error),

    #[error("cannot decode config file: {0}")]
    Toml(#[from] toml::de::Error),
}
