// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt;
use strum_macros::Display;

use crate::ast::*;

/// A linear axis tracked by the simulator.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum Axis {
    X, Y, Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub(super) fn param(&self) -> Param {
        match self {
            Axis::X => Param::X,
            Axis::Y => Param::Y,
            Axis::Z => Param::Z,
        }
    }
}

/// The modal motion mode, selected by G0-G3.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum MotionMode {
    #[strum(serialize = "rapid")]
    Rapid,
    #[strum(serialize = "linear")]
    Linear,
    #[strum(serialize = "arc cw")]
    ArcCw,
    #[strum(serialize = "arc ccw")]
    ArcCcw,
}

impl MotionMode {
    pub(super) fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            0 => MotionMode::Rapid,
            10 => MotionMode::Linear,
            20 => MotionMode::ArcCw,
            30 => MotionMode::ArcCcw,
            _ => return None
        })
    }

    /// The G word that selects this mode.
    pub fn word(&self) -> &'static str {
        match self {
            MotionMode::Rapid => "G0",
            MotionMode::Linear => "G1",
            MotionMode::ArcCw => "G2",
            MotionMode::ArcCcw => "G3",
        }
    }

    /// Whether moves in this mode run at the programmed feed rate.
    pub fn is_feed(&self) -> bool {
        !matches!(self, MotionMode::Rapid)
    }
}

impl Default for MotionMode {
    fn default() -> Self { MotionMode::Rapid }
}

/// A plane as selected by G17-G19.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum Plane {
    XY, XZ, YZ,
}

impl Default for Plane {
    fn default() -> Self { Plane::XY }
}

/// Length units as selected by G20/G21.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum Units {
    #[strum(serialize = "mm")]
    Millimeters,
    #[strum(serialize = "in")]
    Inches,
}

impl Units {
    /// Factor to convert a value in these units to millimeters.
    pub fn to_mm(&self) -> f64 {
        match self {
            Units::Millimeters => 1.0,
            Units::Inches => 25.4,
        }
    }
}

impl Default for Units {
    fn default() -> Self { Units::Millimeters }
}

/// Distance mode as selected by G90/G91.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum DistanceMode {
    Absolute,
    Incremental,
}

impl Default for DistanceMode {
    fn default() -> Self { DistanceMode::Absolute }
}

/// A spindle state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Spindle {
    Off, Cw, Ccw,
}

impl Default for Spindle {
    fn default() -> Self { Spindle::Off }
}

/// A tool position in millimeters.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "X={:.3}, Y={:.3}, Z={:.3}", self.x, self.y, self.z)
    }
}
