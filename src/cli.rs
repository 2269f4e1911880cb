//! Command-line interface for competence.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analyzer::Analyzer;
use crate::config::{self, Config, FORMATS};
use crate::report;
use crate::samples::{self, Sample, SAMPLES};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Student code competence analyzer.
///
/// Scores a Python snippet on syntax, structure, concepts and quality,
/// infers the author's skill level and suggests open-ended feedback
/// questions suited to that level.
#[derive(Parser)]
#[command(name = "competence")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assess a snippet from a file or stdin
    #[command(visible_alias = "check")]
    Assess(AssessArgs),
    /// Assess the built-in sample submissions
    Demo(DemoArgs),
}

/// Arguments for the assess command.
#[derive(Parser)]
pub struct AssessArgs {
    /// Snippet file to assess, or "-" for stdin
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long)]
    pub format: Option<String>,

    /// Minimum acceptable total score (exit non-zero if not reached)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Leave construct counts out of the pretty report
    #[arg(long)]
    pub hide_counts: bool,
}

/// Arguments for the demo command.
#[derive(Parser)]
pub struct DemoArgs {
    /// Run a single sample by name
    #[arg(short, long)]
    pub sample: Option<String>,

    /// List available samples
    #[arg(short, long)]
    pub list: bool,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Settings after merging config file and flags.
struct Settings {
    format: String,
    threshold: f64,
    show_counts: bool,
}

impl Settings {
    fn resolve(config: &Config, args: &AssessArgs) -> anyhow::Result<Self> {
        let format = args
            .format
            .clone()
            .unwrap_or_else(|| config.get_format().to_string());
        if !FORMATS.contains(&format.as_str()) {
            anyhow::bail!(
                "invalid format {:?}, must be one of {}",
                format,
                FORMATS.join(", ")
            );
        }

        let threshold = args.threshold.unwrap_or_else(|| config.get_pass_threshold());
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!("invalid threshold {}, must be between 0.0 and 1.0", threshold);
        }

        Ok(Self {
            format,
            threshold,
            show_counts: config.should_show_counts() && !args.hide_counts,
        })
    }
}

/// Read a snippet from a file, or stdin for "-". Invalid UTF-8 is replaced.
fn read_snippet(path: &Path) -> anyhow::Result<String> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read snippet from stdin")?;
        buf
    } else {
        std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Run the assess command.
pub fn run_assess(args: &AssessArgs) -> anyhow::Result<i32> {
    let (config, config_path) = match config::load(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Some(ref path) = config_path {
        info!(path = %path.display(), "loaded config");
    }

    let settings = match Settings::resolve(&config, args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let snippet = match read_snippet(&args.path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let analyzer = Analyzer::new()?;
    let assessment = analyzer.assess(&snippet);

    let source = if args.path == Path::new("-") {
        "<stdin>".to_string()
    } else {
        args.path.to_string_lossy().to_string()
    };

    match settings.format.as_str() {
        "json" => report::write_json(&source, &assessment, settings.threshold)?,
        _ => report::write_pretty(&source, &assessment, settings.threshold, settings.show_counts),
    }

    if assessment.metrics.passes(settings.threshold) {
        Ok(EXIT_SUCCESS)
    } else {
        warn!(
            total = assessment.metrics.total_score,
            threshold = settings.threshold,
            "submission below threshold"
        );
        Ok(EXIT_FAILED)
    }
}

/// Run the demo command.
pub fn run_demo(args: &DemoArgs) -> anyhow::Result<i32> {
    if args.list {
        return list_samples();
    }

    if !FORMATS.contains(&args.format.as_str()) {
        eprintln!(
            "Error: invalid format {:?}, must be one of {}",
            args.format,
            FORMATS.join(", ")
        );
        return Ok(EXIT_ERROR);
    }

    let selected: Vec<&Sample> = match &args.sample {
        Some(name) => match samples::find(name) {
            Some(s) => vec![s],
            None => {
                eprintln!("Error: unknown sample {:?}", name);
                eprintln!("Run 'competence demo --list' to see available samples");
                return Ok(EXIT_ERROR);
            }
        },
        None => SAMPLES.iter().collect(),
    };

    let analyzer = Analyzer::new()?;
    let threshold = crate::score::DEFAULT_PASS_THRESHOLD;

    if args.format == "json" {
        let reports: Vec<_> = selected
            .iter()
            .map(|s| report::build_json_report(s.name, &analyzer.assess(s.source), threshold))
            .collect();
        report::write_json_batch(&reports)?;
        return Ok(EXIT_SUCCESS);
    }

    for (idx, sample) in selected.iter().enumerate() {
        println!();
        println!("--- Student Submission {}: {} ---", idx + 1, sample.description);
        let assessment = analyzer.assess(sample.source);
        report::write_pretty(sample.name, &assessment, threshold, true);
    }

    Ok(EXIT_SUCCESS)
}

/// List available samples.
fn list_samples() -> anyhow::Result<i32> {
    println!("Available samples:");
    println!();

    for sample in SAMPLES {
        println!("  {:<32} {}", sample.name, sample.description);
    }

    println!();
    println!("Usage:");
    println!("  competence demo --sample <name>");

    Ok(EXIT_SUCCESS)
}
