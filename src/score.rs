//! Scoring for assessed snippets.
//!
//! Derives four sub-scores and a combined score, all in `[0.0, 1.0]`, from the
//! parse outcome, the construct counts and the skill level.

use serde::{Deserialize, Serialize};

use crate::analysis::{ConstructCounts, SkillLevel};
use crate::parser::ParseOutcome;

/// Score weights.
pub mod weights {
    /// Construct total at which a snippet counts as structurally "rich".
    pub const RICH_SNIPPET_CONSTRUCTS: f64 = 8.0;

    pub const NOVICE: f64 = 0.25;
    pub const DEVELOPING: f64 = 0.5;
    pub const PROFICIENT: f64 = 0.75;
    pub const ADVANCED: f64 = 1.0;
}

/// Default minimum total score for a passing submission.
pub const DEFAULT_PASS_THRESHOLD: f64 = 0.5;

/// Assessment scores for one snippet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// 1.0 if the snippet parsed, else 0.0
    pub syntax_score: f64,
    /// Construct richness, saturating at `RICH_SNIPPET_CONSTRUCTS`
    pub structure_score: f64,
    /// Fixed value per skill level
    pub concept_score: f64,
    /// structure * concept
    pub quality_score: f64,
    /// Mean of the four scores above
    pub total_score: f64,
}

impl Metrics {
    /// Whether the total meets a pass threshold.
    pub fn passes(&self, threshold: f64) -> bool {
        self.total_score >= threshold
    }

    /// Sub-scores with their display names, in report order.
    pub fn components(&self) -> [(&'static str, f64); 4] {
        [
            ("Syntax", self.syntax_score),
            ("Structure", self.structure_score),
            ("Concepts", self.concept_score),
            ("Quality", self.quality_score),
        ]
    }
}

/// Concept score for a skill level.
pub fn concept_score(level: SkillLevel) -> f64 {
    match level {
        SkillLevel::Novice => weights::NOVICE,
        SkillLevel::Developing => weights::DEVELOPING,
        SkillLevel::Proficient => weights::PROFICIENT,
        SkillLevel::Advanced => weights::ADVANCED,
    }
}

/// Calculate the metrics for a snippet.
///
/// A structural failure zeroes syntax, structure and quality; the concept
/// score still reflects the (Novice) level.
pub fn score(outcome: &ParseOutcome, counts: &ConstructCounts, level: SkillLevel) -> Metrics {
    let (syntax_score, structure_score) = if outcome.is_failure() {
        (0.0, 0.0)
    } else {
        let richness = counts.total() as f64 / weights::RICH_SNIPPET_CONSTRUCTS;
        (1.0, richness.min(1.0))
    };

    let concept_score = concept_score(level);
    let quality_score = structure_score * concept_score;
    let total_score = (syntax_score + structure_score + concept_score + quality_score) / 4.0;

    Metrics {
        syntax_score,
        structure_score,
        concept_score,
        quality_score,
        total_score,
    }
}
