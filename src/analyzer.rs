//! Analysis facade: one snippet in, one assessment out.

use serde::Serialize;
use tracing::debug;

use crate::analysis::{classify, extract, ConstructCounts, SkillLevel};
use crate::error::Result;
use crate::feedback;
use crate::parser::{Diagnostic, SnippetParser};
use crate::score::{self, Metrics};

/// The full result of assessing one snippet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub level: SkillLevel,
    pub metrics: Metrics,
    /// Construct counts; `None` when the snippet failed to parse.
    pub counts: Option<ConstructCounts>,
    /// Parse diagnostic; `Some` exactly when the snippet failed to parse.
    pub diagnostic: Option<Diagnostic>,
    pub prompts: &'static [&'static str],
}

impl Assessment {
    pub fn has_syntax_error(&self) -> bool {
        self.diagnostic.is_some()
    }

    /// Split into the metrics and feedback prompts.
    pub fn into_parts(self) -> (Metrics, &'static [&'static str]) {
        (self.metrics, self.prompts)
    }
}

/// Assesses student snippets.
///
/// Holds no per-call state, so a single analyzer can be shared across
/// threads and every call is independent.
pub struct Analyzer {
    parser: SnippetParser,
}

impl Analyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: SnippetParser::new()?,
        })
    }

    /// Assess a snippet.
    ///
    /// Never fails: a snippet that does not parse is reported through
    /// [`Assessment::diagnostic`] and scored as Novice.
    pub fn assess(&self, snippet: &str) -> Assessment {
        let outcome = self.parser.parse(snippet);
        let counts = outcome.tree().map(extract);

        let tally = counts.unwrap_or_default();
        let level = classify(&outcome, &tally);
        let metrics = score::score(&outcome, &tally, level);
        let prompts = feedback::generate(&outcome, level, &tally);

        match outcome.diagnostic() {
            Some(diagnostic) => debug!(%diagnostic, "snippet failed to parse"),
            None => debug!(?tally, nodes = outcome.tree().map(|t| t.len()), "extracted constructs"),
        }
        debug!(%level, total = metrics.total_score, "assessed snippet");

        Assessment {
            level,
            metrics,
            counts,
            diagnostic: outcome.diagnostic().cloned(),
            prompts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess(source: &str) -> Assessment {
        Analyzer::new().unwrap().assess(source)
    }

    #[test]
    fn test_syntax_error_handling() {
        let a = assess(
            r#"
def broken_function()
    return "missing colon"
        "#,
        );
        assert!(a.has_syntax_error());
        assert!(a.counts.is_none());
        assert_eq!(a.level, SkillLevel::Novice);
        assert_eq!(a.metrics.syntax_score, 0.0);
        assert_eq!(a.metrics.structure_score, 0.0);
        assert!(a.prompts.iter().any(|p| p.to_lowercase().contains("syntax")));
    }

    #[test]
    fn test_valid_simple_code() {
        let a = assess(
            r#"
def add(a, b):
    return a + b

result = add(5, 3)
print(result)
        "#,
        );
        assert!(!a.has_syntax_error());
        assert_eq!(a.metrics.syntax_score, 1.0);
        assert!(a.metrics.structure_score > 0.0);
        assert_eq!(a.level, SkillLevel::Developing);
        assert!(!a.prompts.is_empty());
    }

    #[test]
    fn test_empty_code_handling() {
        for source in ["", "   ", "\n\n", "# just a comment"] {
            let a = assess(source);
            assert!(!a.has_syntax_error(), "{:?}", source);
            assert_eq!(a.counts, Some(ConstructCounts::default()));
            assert_eq!(a.metrics.structure_score, 0.0);
            assert_eq!(a.level, SkillLevel::Novice);
        }
    }

    #[test]
    fn test_into_parts() {
        let a = assess("for i in range(3):\n    print(i)\n");
        let expected = a.metrics;
        let (metrics, prompts) = a.into_parts();
        assert_eq!(metrics, expected);
        assert_eq!(prompts, feedback::DEVELOPING);
    }

    #[test]
    fn test_assess_is_idempotent() {
        let analyzer = Analyzer::new().unwrap();
        let source = "class A:\n    def f(self):\n        return [x for x in self]\n";
        let first = analyzer.assess(source);
        let second = analyzer.assess(source);
        assert_eq!(first, second);
        assert_eq!(
            first.metrics.total_score.to_bits(),
            second.metrics.total_score.to_bits()
        );
    }
}
