// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::Parser;
use rapidgc::{run, Config};

/// Convert G1 travel moves above a safe height to G0 rapids, and estimate
/// the run time of a G-code program.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// G-code program to convert
    input: PathBuf,

    /// Output file [default: <input>_rapid.<ext>]
    output: Option<PathBuf>,

    /// Z height in mm for safe rapid moves [default: 17.0]
    #[arg(long)]
    z_safe: Option<f64>,

    /// Also convert moves that only touch the safe height at one end
    #[arg(long)]
    aggressive: bool,

    /// Rapid speed in mm/min for the time estimate [default: 5000.0]
    #[arg(long)]
    rapid_rate: Option<f64>,

    /// Preview the conversions without writing a file
    #[arg(long)]
    dry_run: bool,

    /// TOML file with default options
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn init_logging() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(z_safe) = args.z_safe {
        config.z_safe = z_safe;
    }
    if let Some(rate) = args.rapid_rate {
        config.rapid_rate = rate;
    }
    config.aggressive |= args.aggressive;
    config.dry_run |= args.dry_run;
    config.validate()?;
    Ok(config)
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}_rapid.{}", stem, ext.to_string_lossy()),
        None => format!("{}_rapid", stem),
    };
    input.with_file_name(name)
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = load_config(&args)?;
    let output_file = args.output.clone().unwrap_or_else(|| default_output(&args.input));

    println!("{}Converting G-code", if config.dry_run { "DRY RUN - " } else { "" });
    println!("{}", "=".repeat(60));
    println!("Input:  {}", args.input.display());
    if !config.dry_run {
        println!("Output: {}", output_file.display());
    }
    println!("Safe Z: {} mm", config.z_safe);
    println!("Mode:   {}", if config.aggressive { "Aggressive" } else { "Conservative" });
    println!("Rapid rate: {} mm/min (for time estimate)", config.rapid_rate);
    println!();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let (lines, report) = run(text.lines(), &config)?;

    println!("{}", report);

    if config.dry_run {
        println!("\n*** DRY RUN MODE - No files were modified ***");
        println!("Review the conversions above, then run without --dry-run to apply changes");
        return Ok(());
    }

    let mut out = lines.join(newline);
    if text.ends_with('\n') && !lines.is_empty() {
        out.push_str(newline);
    }
    fs::write(&output_file, out)
        .with_context(|| format!("writing {}", output_file.display()))?;
    println!("\nOutput saved to: {}", output_file.display());
    println!("IMPORTANT: Simulate this G-code before running it on your machine!");
    Ok(())
}
