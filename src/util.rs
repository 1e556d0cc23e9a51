// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


/// Helper for converting a code number to an integer with the given number
/// of decimal places, e.g. 90.1 with one figure gives 901.
///
/// Returns `None` for negative values, values with more decimals and values
/// that reach `max`.
pub fn num_to_int(inp: f64, figures: i32, max: u16) -> Option<u16> {
    let v = inp * 10f64.powi(figures);
    if v.round() >= max as f64 {
        None
    } else if (v.round() - v).abs() < 0.0001 && v >= 0. {
        Some(v.round() as u16)
    } else {
        None
    }
}

/// Formats a number for G-code output: at most three decimals, no trailing
/// zeros.
pub fn format_number(inp: f64) -> String {
    let rounded = (inp * 1000.).round() / 1000.;
    if rounded == 0. {
        "0".into()
    } else {
        format!("{}", rounded)
    }
}
