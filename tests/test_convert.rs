// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::io::Write;

use rapidgc::eval::Warning;
use rapidgc::policy::Reason;
use rapidgc::{run, Config, ConfigError, Converter};

const EPS: f64 = 1e-9;

fn aggressive() -> Config {
    Config { aggressive: true, ..Config::default() }
}

#[test]
fn test_clear_move_is_converted() {
    let (output, report) = run(&["G0 Z20", "G1 X10 Y0 Z20 F1000"], &Config::default()).unwrap();
    assert_eq!(output, vec!["G0 Z20", "G0 X10 Y0 Z20"]);
    assert_eq!(report.stats.conversions, 1);
    // 20 mm rapid up, then 10 mm at the rapid rate instead of the feed
    assert!((report.stats.total_seconds - 30. / 5000. * 60.).abs() < EPS);
    assert_eq!(report.conversions.len(), 1);
    let record = &report.conversions[0];
    assert_eq!(record.lineno, 2);
    assert_eq!(record.original, "G1 X10 Y0 Z20 F1000");
    assert_eq!(record.converted, "G0 X10 Y0 Z20");
    assert_eq!(record.z, 20.);
    assert_eq!(record.reason, Reason::ClearOfSafeZ);
}

#[test]
fn test_plunge_depends_on_mode() {
    let program = ["G0 Z20", "G1 Z16 F500"];
    let (output, report) = run(&program, &Config::default()).unwrap();
    assert_eq!(output[1], "G1 Z16 F500");
    assert_eq!(report.stats.conversions, 0);
    // 4 mm at 500 mm/min
    assert!((report.stats.feed_seconds - 0.48).abs() < EPS);

    let (output, report) = run(&program, &aggressive()).unwrap();
    assert_eq!(output[1], "G0 Z16");
    assert_eq!(report.stats.conversions, 1);
    assert_eq!(report.conversions[0].reason, Reason::AggressiveOverride);
    assert_eq!(report.stats.feed_seconds, 0.);
}

#[test]
fn test_rapids_are_kept() {
    let (output, report) = run(&["G0 X5 Y5"], &Config::default()).unwrap();
    assert_eq!(output, vec!["G0 X5 Y5"]);
    assert_eq!(report.stats.conversions, 0);
    let expected = (50f64).sqrt() / 5000. * 60.;
    assert!((report.stats.total_seconds - expected).abs() < EPS);
    assert!((report.stats.rapid_seconds - expected).abs() < EPS);
}

#[test]
fn test_empty_input() {
    let empty: [&str; 0] = [];
    let (output, report) = run(&empty, &Config::default()).unwrap();
    assert!(output.is_empty());
    assert_eq!(report.stats.total_lines, 0);
    assert_eq!(report.stats.conversions, 0);
    assert_eq!(report.stats.total_seconds, 0.);
    assert!(report.conversions.is_empty());
}

#[test]
fn test_lines_pass_through() {
    let program = [
        "%",
        "(header comment)",
        "G21 G90",
        "M3 S10000",
        "(unclosed comment",
        "G4 P1.5",
        "",
        "M30",
    ];
    let (output, report) = run(&program, &Config::default()).unwrap();
    assert_eq!(output, program);
    assert_eq!(report.stats.total_lines, program.len());
    assert_eq!(report.stats.malformed_lines, 1);
    assert!((report.stats.total_seconds - 1.5).abs() < EPS);
    assert!((report.stats.dwell_seconds - 1.5).abs() < EPS);
}

#[test]
fn test_modal_feed_moves() {
    // X/Y lines rely on the G1 from the line before
    let program = [
        "G0 Z25",
        "G1 Z20 F800",
        "X50 Y10",
        "X60",
        "G1 Z-2 F300",
        "X70",
    ];
    let (output, report) = run(&program, &Config::default()).unwrap();
    assert_eq!(output, vec![
        "G0 Z25",
        "G0 Z20",
        "G0 X50 Y10",
        "G0 X60",
        "G1 Z-2 F300",
        "X70",
    ]);
    assert_eq!(report.stats.conversions, 3);
    assert_eq!(report.stats.restored_motion_words, 0);
    assert_eq!(report.stats.restored_feed_words, 0);
}

#[test]
fn test_modal_words_are_restored() {
    let program = [
        "G0 Z30",
        "G1 X10 F1000",
        "Z10",
        "X20",
        "G1 X30",
    ];
    let (output, report) = run(&program, &Config::default()).unwrap();
    assert_eq!(output, vec![
        "G0 Z30",
        "G0 X10",
        // after the rapid the output would be in G0 mode, and would have
        // lost F1000
        "G1 Z10 F1000",
        "X20",
        "G1 X30",
    ]);
    assert_eq!(report.stats.conversions, 1);
    assert_eq!(report.stats.restored_motion_words, 1);
    assert_eq!(report.stats.restored_feed_words, 1);
}

#[test]
fn test_restored_feed_uses_current_units() {
    let program = ["G20", "G0 Z1", "G1 X1 F20", "G1 Z0.5"];
    let (output, _) = run(&program, &Config { z_safe: 20., ..Config::default() }).unwrap();
    assert_eq!(output[2], "G0 X1");
    assert_eq!(output[3], "G1 Z0.5 F20");
}

#[test]
fn test_degenerate_feed_is_counted() {
    let (output, report) = run(&["G1 X10 Y10", "G1 X20 F100"], &Config::default()).unwrap();
    assert_eq!(output, vec!["G1 X10 Y10", "G1 X20 F100"]);
    assert_eq!(report.stats.degenerate_moves, 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].lineno, 1);
    assert!((report.stats.total_seconds - 6.).abs() < EPS);
}

#[test]
fn test_invalid_config() {
    for config in &[
        Config { z_safe: -1., ..Config::default() },
        Config { z_safe: f64::NAN, ..Config::default() },
    ] {
        assert!(matches!(run(&["G0 X1"], config), Err(ConfigError::InvalidSafeZ(_))));
    }
    for config in &[
        Config { rapid_rate: -5000., ..Config::default() },
        Config { rapid_rate: f64::INFINITY, ..Config::default() },
    ] {
        assert!(matches!(Converter::new(config.clone()), Err(ConfigError::InvalidRapidRate(_))));
    }
}

#[test]
fn test_zero_rapid_rate_is_degenerate() {
    let config = Config { rapid_rate: 0., ..Config::default() };
    let (output, report) = run(&["G0 X5"], &config).unwrap();
    assert_eq!(output, vec!["G0 X5"]);
    assert_eq!(report.stats.degenerate_moves, 1);
    assert_eq!(report.stats.total_seconds, 0.);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].warning, Warning::DegenerateFeed { distance: 5., rate: 0. });
}

#[test]
fn test_probing_passes_through() {
    let program = ["G0 Z20", "G1 X0 F100", "G38.2 Z-10 F50", "G1 Z-5"];
    let (output, report) = run(&program, &aggressive()).unwrap();
    assert_eq!(output, vec!["G0 Z20", "G0 X0", "G38.2 Z-10 F50", "G1 Z-5"]);
    assert_eq!(report.stats.conversions, 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].lineno, 3);
}

#[test]
fn test_canned_cycle_passes_through() {
    let program = [
        "G0 Z30",
        "G1 X0 F100",
        "G81 X10 Y10 Z18 R25 F100",
        "X20",
        "G80",
        "G0 Z30",
    ];
    for config in &[Config::default(), aggressive()] {
        let (output, report) = run(&program, config).unwrap();
        assert_eq!(output, vec![
            "G0 Z30",
            "G0 X0",
            "G81 X10 Y10 Z18 R25 F100",
            "X20",
            "G80",
            "G0 Z30",
        ]);
        assert_eq!(report.stats.conversions, 1);
        assert_eq!(report.stats.restored_motion_words, 0);
    }
}

#[test]
fn test_rotary_move_gets_motion_word() {
    let program = ["G0 Z30", "G1 X10 F1000", "A90"];
    let (output, report) = run(&program, &Config::default()).unwrap();
    assert_eq!(output, vec!["G0 Z30", "G0 X10", "G1 A90 F1000"]);
    assert_eq!(report.stats.restored_motion_words, 1);
    assert_eq!(report.stats.restored_feed_words, 1);
}

#[test]
fn test_dry_run_does_not_change_output() {
    let program = ["G0 Z20", "G1 X10 F500"];
    let (wet, _) = run(&program, &Config::default()).unwrap();
    let (dry, _) = run(&program, &Config { dry_run: true, ..Config::default() }).unwrap();
    assert_eq!(wet, dry);
}

#[test]
fn test_streaming() {
    let mut converter = Converter::new(Config::default()).unwrap();
    assert_eq!(converter.process("G0 Z20"), "G0 Z20");
    assert_eq!(converter.state().position.z, 20.);
    assert_eq!(converter.process("G1 X10 F500"), "G0 X10");
    assert_eq!(converter.stats().conversions, 1);
    let report = converter.finish();
    assert_eq!(report.stats.total_lines, 2);
}

#[test]
fn test_load_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "z_safe = 16.5").unwrap();
    writeln!(file, "aggressive = true").unwrap();
    let config = Config::load(file.path()).unwrap();
    assert_eq!(config, Config { z_safe: 16.5, aggressive: true, ..Config::default() });

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "z_safe = \"high\"").unwrap();
    assert!(matches!(Config::load(file.path()), Err(ConfigError::Toml(_))));

    assert!(matches!(Config::load("/nonexistent/rapidgc.toml"), Err(ConfigError::Io(_))));
}
