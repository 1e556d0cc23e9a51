// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rapidgc::{run, Config, Converter};

fn line() -> impl Strategy<Value = String> {
    let coord = -5i32..40;
    prop_oneof![
        (coord.clone(), coord.clone()).prop_map(|(x, z)| format!("G0 X{} Z{}", x, z)),
        (coord.clone(), coord.clone(), 0u32..3000)
            .prop_map(|(x, z, f)| format!("G1 X{} Z{} F{}", x, z, f)),
        (coord.clone(), coord.clone()).prop_map(|(y, z)| format!("G01 Y{} Z{} (move)", y, z)),
        (coord.clone(), coord.clone()).prop_map(|(x, y)| format!("X{} Y{}", x, y)),
        coord.clone().prop_map(|z| format!("Z{}", z)),
        (coord.clone(), 1u32..2000).prop_map(|(z, f)| format!("Z{} F{}", z, f)),
        (coord.clone(), coord).prop_map(|(x, y)| format!("G2 X{} Y{} I1 J0", x, y)),
        Just("G90".to_string()),
        Just("G91".to_string()),
        Just("G4 P0.5".to_string()),
        Just("(comment)".to_string()),
        Just("M3 S1000".to_string()),
    ]
}

fn program() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(line(), 0..40)
}

fn converted_lines(program: &[String], config: &Config) -> BTreeSet<usize> {
    let (_, report) = run(program, config).unwrap();
    report.conversions.iter().map(|c| c.lineno).collect()
}

proptest! {
    #[test]
    fn converting_twice_changes_nothing(program in program(), aggressive in any::<bool>()) {
        let config = Config { aggressive, ..Config::default() };
        let (first, _) = run(&program, &config).unwrap();
        let (second, report) = run(&first, &config).unwrap();
        prop_assert_eq!(report.stats.conversions, 0);
        prop_assert_eq!(second, first);
    }

    #[test]
    fn conservative_is_subset_of_aggressive(program in program(), z_safe in 0.0..30.0f64) {
        let conservative = Config { z_safe, ..Config::default() };
        let aggressive = Config { z_safe, aggressive: true, ..Config::default() };
        let conservative = converted_lines(&program, &conservative);
        let aggressive = converted_lines(&program, &aggressive);
        prop_assert!(conservative.is_subset(&aggressive));
    }

    #[test]
    fn elapsed_time_never_decreases(program in program()) {
        let mut converter = Converter::new(Config::default()).unwrap();
        let mut last = 0.;
        for raw in &program {
            converter.process(raw);
            let elapsed = converter.state().elapsed_seconds;
            prop_assert!(elapsed >= last);
            last = elapsed;
        }
        let report = converter.finish();
        prop_assert!((report.stats.total_seconds - last).abs() < 1e-6);
        prop_assert_eq!(report.stats.total_lines, program.len());
    }

    #[test]
    fn no_line_is_dropped(program in program()) {
        let (output, _) = run(&program, &Config::default()).unwrap();
        prop_assert_eq!(output.len(), program.len());
    }
}
