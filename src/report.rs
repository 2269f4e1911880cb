//! Output formatting for assessments.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for students and instructors
//! - JSON: structured output for graders and other tools

use colored::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{thresholds::HEURISTICS_VERSION, ConstructCounts, SkillLevel};
use crate::analyzer::Assessment;
use crate::parser::Diagnostic;
use crate::score::Metrics;

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report for one assessed snippet.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub heuristics_version: u32,
    pub source: String,
    pub level: SkillLevel,
    pub metrics: Metrics,
    /// Null when the snippet failed to parse.
    pub counts: Option<ConstructCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Diagnostic>,
    pub prompts: Vec<String>,
    pub threshold: f64,
    pub passed: bool,
}

/// Build the JSON report for an assessment.
pub fn build_json_report(source: &str, assessment: &Assessment, threshold: f64) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        heuristics_version: HEURISTICS_VERSION,
        source: source.to_string(),
        level: assessment.level,
        metrics: assessment.metrics,
        counts: assessment.counts,
        diagnostic: assessment.diagnostic.clone(),
        prompts: assessment.prompts.iter().map(|p| p.to_string()).collect(),
        threshold,
        passed: assessment.metrics.passes(threshold),
    }
}

/// Write one assessment as JSON.
pub fn write_json(source: &str, assessment: &Assessment, threshold: f64) -> anyhow::Result<()> {
    let report = build_json_report(source, assessment, threshold);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

/// Write several assessments as one JSON array.
pub fn write_json_batch(reports: &[JsonReport]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(reports)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write an assessment in pretty (human-readable) format.
pub fn write_pretty(source: &str, assessment: &Assessment, threshold: f64, show_counts: bool) {
    // Header
    println!();
    print!("  ");
    print!("{}", "competence".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Snippet: ".dimmed());
    println!("{}", source);
    println!();

    write_result_summary(assessment, threshold);
    println!();

    if let Some(ref diagnostic) = assessment.diagnostic {
        write_diagnostic(diagnostic);
        println!();
    }

    write_scores(&assessment.metrics);
    println!();

    if show_counts {
        if let Some(ref counts) = assessment.counts {
            write_counts(counts);
            println!();
        }
    }

    write_prompts(assessment.prompts);
    println!();

    write_final_status(&assessment.metrics, threshold);
    println!();
}

fn write_result_summary(assessment: &Assessment, threshold: f64) {
    if assessment.metrics.passes(threshold) {
        print!("  {}", "✓ PASS".green());
    } else {
        print!("  {}", "✗ FAIL".red());
    }

    print!("  Level: ");
    write_colored_level(assessment.level);
    print!("  Overall: ");
    write_colored_score(assessment.metrics.total_score);
    println!();

    println!(
        "  {}",
        format!("Typical concepts: {}", assessment.level.indicators().join(", ")).dimmed()
    );
}

fn write_colored_score(s: f64) {
    let text = format!("{:.2}", s);
    match s {
        s if s >= 0.75 => print!("{}", text.green().bold()),
        s if s >= 0.5 => print!("{}", text.green()),
        s if s >= 0.25 => print!("{}", text.yellow()),
        _ => print!("{}", text.red()),
    }
}

fn write_colored_level(level: SkillLevel) {
    let label = level.label();
    match level {
        SkillLevel::Advanced => print!("{}", label.green().bold()),
        SkillLevel::Proficient => print!("{}", label.green()),
        SkillLevel::Developing => print!("{}", label.yellow()),
        SkillLevel::Novice => print!("{}", label.red()),
    }
}

fn write_diagnostic(diagnostic: &Diagnostic) {
    print!("    {} ", "SYNTAX".red());
    print!("{}", diagnostic.message);
    println!(
        "{}",
        format!(" (line {}, column {})", diagnostic.line, diagnostic.column).dimmed()
    );
}

fn write_scores(metrics: &Metrics) {
    println!("  {}", "Assessment Results:".bold());
    for (name, value) in metrics.components() {
        print!("    {:<12} ", name);
        write_colored_score(value);
        println!();
    }
    print!("    {:<12} ", "Overall");
    write_colored_score(metrics.total_score);
    println!();
}

fn write_counts(counts: &ConstructCounts) {
    println!("  {} ({} total):", "Constructs".bold(), counts.total());
    for (construct, count) in counts.iter() {
        let line = format!("    {:<16} {:>3}", construct.as_str(), count);
        if count == 0 {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
}

fn write_prompts(prompts: &[&str]) {
    println!("  {}", "Feedback Questions:".bold());
    for (i, prompt) in prompts.iter().enumerate() {
        println!("    {}. {}", i + 1, prompt);
    }
}

fn write_final_status(metrics: &Metrics, threshold: f64) {
    print!("  {}", format!("Threshold: {:.2}", threshold).dimmed());
    print!("  Score: ");
    write_colored_score(metrics.total_score);
    print!("  ");

    if metrics.passes(threshold) {
        print!("{}", "PASSED".green());
    } else {
        print!("{}", "FAILED".red());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;

    #[test]
    fn test_json_report_for_valid_snippet() {
        let a = Analyzer::new()
            .unwrap()
            .assess("def f(xs):\n    return [x for x in xs]\n");
        let report = build_json_report("inline", &a, 0.5);

        assert_eq!(report.source, "inline");
        assert_eq!(report.level, SkillLevel::Proficient);
        assert_eq!(report.counts.unwrap().functions, 1);
        assert!(report.diagnostic.is_none());
        assert_eq!(report.prompts.len(), a.prompts.len());
        assert_eq!(report.passed, a.metrics.passes(0.5));
    }

    #[test]
    fn test_json_serialization_shape() {
        let a = Analyzer::new().unwrap().assess("def broken(");
        let report = build_json_report("-", &a, 0.5);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["level"], "novice");
        assert!(value["counts"].is_null());
        assert!(value["diagnostic"]["message"].is_string());
        assert_eq!(value["metrics"]["syntax_score"], 0.0);
        assert_eq!(value["passed"], false);
    }

    #[test]
    fn test_pretty_does_not_panic() {
        let analyzer = Analyzer::new().unwrap();
        for source in ["", "def broken(", "for i in x:\n    pass\n"] {
            let a = analyzer.assess(source);
            write_pretty("test", &a, 0.5, true);
            write_pretty("test", &a, 0.5, false);
        }
    }
}
