// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Human readable run summaries.

use std::fmt::{self, Display, Formatter};

use crate::convert::{RunReport, RunStatistics};

/// How many conversions are listed in detail.
pub const MAX_LISTED: usize = 10;

/// Formats a duration as `00h 00m 00s`, truncating fractional seconds.
pub fn format_hms(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0. { seconds as u64 } else { 0 };
    format!("{:02}h {:02}m {:02}s", total / 3600, (total % 3600) / 60, total % 60)
}

impl Display for RunStatistics {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "Total lines: {}", self.total_lines)?;
        writeln!(f, "Conversions: {}", self.conversions)?;
        writeln!(f, "Estimated run time: {}", format_hms(self.total_seconds))?;
        write!(f, "  rapid {}, feed {}, dwell {}",
               format_hms(self.rapid_seconds), format_hms(self.feed_seconds),
               format_hms(self.dwell_seconds))?;
        if self.restored_motion_words + self.restored_feed_words > 0 {
            write!(f, "\nRestored modal words: {} motion, {} feed",
                   self.restored_motion_words, self.restored_feed_words)?;
        }
        if self.degenerate_moves > 0 {
            write!(f, "\nMoves without feed rate: {}", self.degenerate_moves)?;
        }
        if self.malformed_lines > 0 {
            write!(f, "\nUnparseable lines passed through: {}", self.malformed_lines)?;
        }
        Ok(())
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.stats)?;
        if self.conversions.is_empty() {
            return Ok(());
        }
        write!(f, "\n\nConversions made (G1 -> G0):")?;
        for conv in self.conversions.iter().take(MAX_LISTED) {
            write!(f, "\nLine {} (Z={:.2}, {}):", conv.lineno, conv.z, conv.reason)?;
            write!(f, "\n  Before: {}", conv.original)?;
            write!(f, "\n  After:  {}", conv.converted)?;
        }
        if self.conversions.len() > MAX_LISTED {
            write!(f, "\n... and {} more conversions", self.conversions.len() - MAX_LISTED)?;
        }
        Ok(())
    }
}
