// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Options for a conversion run.
///
/// A TOML config file may set any subset of the fields:
///
/// ```toml
/// z_safe = 16.5
/// aggressive = true
/// rapid_rate = 8000.0
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Height in mm at or above which the tool is clear of material.
    pub z_safe: f64,
    /// Also convert moves that only touch the safe plane at one end.
    pub aggressive: bool,
    /// Rapid traverse speed in mm/min, used for time estimates.
    pub rapid_rate: f64,
    /// Compute everything but do not write the output.  Only the caller
    /// looks at this.
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            z_safe: 17.0,
            aggressive: false,
            rapid_rate: 5000.0,
            dry_run: false,
        }
    }
}

impl Config {
    /// Loads a config from a TOML file.  The result is not validated yet.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.z_safe.is_finite() || self.z_safe < 0. {
            return Err(ConfigError::InvalidSafeZ(self.z_safe));
        }
        if !self.rapid_rate.is_finite() || self.rapid_rate < 0. {
            return Err(ConfigError::InvalidRapidRate(self.rapid_rate));
        }
        Ok(())
    }
}
