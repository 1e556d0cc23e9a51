// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

mod enums;
mod warning;

use fixedbitset::FixedBitSet as BitSet;

use crate::ast::*;

pub use self::enums::*;
pub use self::warning::*;

const MAX_GCODE: usize = 1000;
const MAX_MCODE: usize = 100;

const CANNED_CYCLES: &[u16] = &[730, 760, 810, 820, 830, 840, 850, 860, 870, 880, 890];

/// The complete machine state after executing some prefix of a program.
///
/// Positions and feed rates are always in millimeters (per minute),
/// regardless of the active units.
#[derive(Clone, Debug, PartialEq)]
pub struct MachineState {
    pub position: Position,
    /// Current feed rate in mm/min.
    pub feed: f64,
    pub motion_mode: MotionMode,
    /// Total run time so far.  Never decreases.
    pub elapsed_seconds: f64,
    pub plane: Plane,
    pub units: Units,
    pub distance_mode: DistanceMode,
    /// Active work coordinate system, 54 to 59.
    pub coord_system: u16,
    pub spindle: Spindle,
    pub spindle_speed: f64,
    /// Active canned cycle code (in tenths), until canceled by G80 or a
    /// G0 to G3 motion word.  Lines moving under a cycle are not timed.
    pub cycle: Option<u16>,
}

impl Default for MachineState {
    fn default() -> Self {
        MachineState {
            position: Position::default(),
            feed: 0.0,
            motion_mode: MotionMode::Rapid,
            elapsed_seconds: 0.0,
            plane: Plane::XY,
            units: Units::Millimeters,
            distance_mode: DistanceMode::Absolute,
            coord_system: 54,
            spindle: Spindle::Off,
            spindle_speed: 0.0,
            cycle: None,
        }
    }
}

/// The result of simulating one line.
#[derive(Clone, Debug)]
pub struct Step {
    /// State after the line.
    pub state: MachineState,
    /// Length of the move in mm; arcs are measured along their chord.
    pub distance: f64,
    /// Time taken by the line, including any dwell.
    pub duration: f64,
    /// Dwell time requested with G4.
    pub dwell: f64,
    /// The motion performed by the line, if any.
    pub motion: Option<MotionMode>,
    /// Set if the line moved but had no usable rate.
    pub degenerate: bool,
    pub warnings: Vec<Warning>,
    started_at: f64,
}

impl Step {
    /// Re-times the move as a rapid.
    pub fn into_rapid(mut self, sim: &Simulator) -> Step {
        let (time, degenerate) = sim.segment_time(MotionMode::Rapid, self.state.feed, self.distance);
        self.warnings.retain(|w| !matches!(w, Warning::DegenerateFeed { .. }));
        if degenerate {
            self.warnings.push(Warning::DegenerateFeed { distance: self.distance,
                                                         rate: sim.rapid_rate() });
        }
        self.degenerate = degenerate;
        self.motion = Some(MotionMode::Rapid);
        self.duration = time + self.dwell;
        self.state.elapsed_seconds = self.started_at + self.duration;
        self
    }

    /// Time spent moving, without dwell.
    pub fn move_time(&self) -> f64 {
        self.duration - self.dwell
    }
}

/// The Simulator executes parsed lines against a machine state, tracking
/// modal word state and estimating how long each line takes.
///
/// It never fails: problems are reported as warnings on the returned step.
#[derive(Clone, Debug)]
pub struct Simulator {
    rapid_rate: f64,
}

impl Simulator {
    /// Creates a simulator that times rapid moves at `rapid_rate` mm/min.
    pub fn new(rapid_rate: f64) -> Self {
        Simulator { rapid_rate }
    }

    pub fn rapid_rate(&self) -> f64 {
        self.rapid_rate
    }

    /// Time in seconds to travel `distance` mm in the given mode.
    ///
    /// The second value is true when the move has a length but no usable
    /// rate, in which case the time is zero.
    pub fn segment_time(&self, mode: MotionMode, feed: f64, distance: f64) -> (f64, bool) {
        let rate = if mode.is_feed() { feed } else { self.rapid_rate };
        if distance <= 0. {
            (0., false)
        } else if rate > 0. && rate.is_finite() {
            (distance / rate * 60., false)
        } else {
            (0., true)
        }
    }

    /// Simulates one line starting from `prior`, returning the new state
    /// and the time the line takes.  `prior` is left untouched.
    pub fn advance(&self, prior: &MachineState, line: &ParsedLine) -> Step {
        let mut state = prior.clone();
        let mut warnings = vec![];

        macro_rules! group {
            ($codes:expr, $name:expr, $list:expr) => {
                match $codes.modal_group($name, $list) {
                    Ok(found) => found,
                    Err(w) => { warnings.push(w); None }
                }
            }
        }

        let mut gcodes = Codes(BitSet::with_capacity(MAX_GCODE), Code::G);
        let mut mcodes = Codes(BitSet::with_capacity(MAX_MCODE), Code::M);
        for &code in &line.codes {
            let known = match code {
                Code::G(n) => gcodes.insert(n),
                Code::M(n) => mcodes.insert(n),
            };
            if !known {
                warnings.push(Warning::UnsupportedCode(code));
            }
        }

        // #1. Units come first, since all other words are given in them.
        match group!(gcodes, "length units", &[200, 210]) {
            Some(200) => state.units = Units::Inches,
            Some(210) => state.units = Units::Millimeters,
            _ => ()
        }
        let scale = state.units.to_mm();

        // #2. Feed rate and spindle speed.
        if let Some(feed) = line.get(Param::F) {
            state.feed = feed * scale;
        }
        if let Some(speed) = line.get(Param::S) {
            state.spindle_speed = speed;
        }

        // #3. Switch spindle.
        match group!(mcodes, "spindle control", &[3, 4, 5]) {
            Some(3) => state.spindle = Spindle::Cw,
            Some(4) => state.spindle = Spindle::Ccw,
            Some(5) => state.spindle = Spindle::Off,
            _ => ()
        }

        // #4. Dwell, P in seconds.
        let mut dwell = 0.;
        if group!(gcodes, "dwell", &[40]).is_some() {
            dwell = line.get(Param::P).filter(|p| *p > 0.).unwrap_or(0.);
        }

        // #5. Active plane.
        match group!(gcodes, "active plane", &[170, 180, 190]) {
            Some(170) => state.plane = Plane::XY,
            Some(180) => state.plane = Plane::XZ,
            Some(190) => state.plane = Plane::YZ,
            _ => ()
        }

        // #6. Coordinate system.
        if let Some(x) = group!(gcodes, "coordinate system", &[540, 550, 560, 570, 580, 590]) {
            state.coord_system = x / 10;
        }

        // #7. Distance mode.
        match group!(gcodes, "distance mode", &[900, 910]) {
            Some(900) => state.distance_mode = DistanceMode::Absolute,
            Some(910) => state.distance_mode = DistanceMode::Incremental,
            _ => ()
        }

        // #8. Codes that do not change timing.
        gcodes.discard(&[
            170, 180, 190, 400, 410, 420, 430, 490, 530, 610, 611, 640,
            901, 911, 940, 980, 990,
        ]);

        // #9. Non-modal codes that consume the axis words.  G10 and G92 set
        // the current position, homing and probing are not simulated.
        let set_position = group!(gcodes, "set position", &[100, 920]).is_some();
        let homing = group!(gcodes, "homing", &[280, 300]);
        let probing = group!(gcodes, "probing", &[382, 383, 384, 385]);
        for &x in homing.iter().chain(&probing) {
            warnings.push(Warning::UnsupportedCode(Code::G(x)));
        }

        // #10. Motion mode.  Canned cycles share the group, and stay active
        // until canceled.
        let motion_code = group!(gcodes, "motion", &[0, 10, 20, 30]);
        if let Some(mode) = motion_code.and_then(MotionMode::from_code) {
            state.motion_mode = mode;
            state.cycle = None;
        }
        if group!(gcodes, "cycle cancel", &[800]).is_some() {
            state.cycle = None;
        }
        if let Some(x) = group!(gcodes, "canned cycle", CANNED_CYCLES) {
            warnings.push(Warning::UnsupportedCode(Code::G(x)));
            state.cycle = Some(x);
        }

        // Anything left over is unknown to us.
        while let Some(code) = gcodes.take_first() {
            warnings.push(Warning::UnsupportedCode(code));
        }

        // #11. Perform motion or set position.
        let mut target = prior.position;
        for &axis in &Axis::ALL {
            if let Some(value) = line.get(axis.param()) {
                let value = value * scale;
                if !set_position && state.distance_mode == DistanceMode::Incremental {
                    target.set(axis, prior.position.get(axis) + value);
                } else {
                    target.set(axis, value);
                }
            }
        }

        let mut distance = 0.;
        let mut move_time = 0.;
        let mut degenerate = false;
        let mut motion = None;
        if set_position {
            state.position = target;
        } else if probing.is_some() || state.cycle.is_some() {
            // The end point is not known exactly; assume the commanded one.
            state.position = target;
        } else if homing.is_none() && (motion_code.is_some() || line.has_axis_words()) {
            distance = prior.position.distance_to(&target);
            let (time, no_rate) = self.segment_time(state.motion_mode, state.feed, distance);
            if no_rate {
                let rate = if state.motion_mode.is_feed() { state.feed } else { self.rapid_rate };
                warnings.push(Warning::DegenerateFeed { distance, rate });
            }
            move_time = time;
            degenerate = no_rate;
            motion = Some(state.motion_mode);
            state.position = target;
        }

        let duration = move_time + dwell;
        state.elapsed_seconds = prior.elapsed_seconds + duration;
        Step {
            state,
            distance,
            duration,
            dwell,
            motion,
            degenerate,
            warnings,
            started_at: prior.elapsed_seconds,
        }
    }
}


// ----- non-public helper APIs

/// Helper for flagging and retrieving G and M codes on a line.
struct Codes(BitSet, fn(u16) -> Code);

impl Codes {
    fn insert(&mut self, b: u16) -> bool {
        if (b as usize) < self.0.len() {
            self.0.insert(b as usize);
            true
        } else {
            false
        }
    }

    fn modal_group(&mut self, name: &'static str, codes: &[u16]) -> Result<Option<u16>, Warning> {
        let mut found = None;
        let mut conflict = None;
        for &code in codes {
            if self.0[code as usize] {
                if let Some(other) = found {
                    conflict = Some(Warning::ConflictingCodes(name, (self.1)(other), (self.1)(code)));
                }
                found = Some(code);
            }
        }
        self.discard(codes);
        match conflict {
            Some(w) => Err(w),
            None => Ok(found),
        }
    }

    fn discard(&mut self, codes: &[u16]) {
        for &code in codes {
            self.0.set(code as usize, false);
        }
    }

    fn take_first(&mut self) -> Option<Code> {
        let first = self.0.ones().next()?;
        self.0.set(first, false);
        Some((self.1)(first as u16))
    }
}
