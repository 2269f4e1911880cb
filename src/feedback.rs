//! Feedback prompts for students.
//!
//! Prompts are open-ended questions drawn from a static catalogue, keyed by
//! skill level and, for Novice, by whether the snippet failed to parse.

use crate::analysis::{ConstructCounts, SkillLevel};
use crate::parser::ParseOutcome;

/// Novice, snippet did not parse: point toward finding the defect.
pub static NOVICE_SYNTAX_ERROR: &[&str] = &[
    "Check your code line by line - which line looks different from Python examples?",
    "Are all your parentheses, brackets, and colons in the right places?",
    "Look for syntax errors - missing colons, incorrect indentation, or typos in keywords.",
];

/// Novice, valid but minimal code: point toward clarity.
pub static NOVICE: &[&str] = &[
    "Try using more descriptive names for your variables.",
    "Walk through your code with a sample input - does it do what you expect?",
];

pub static DEVELOPING: &[&str] = &[
    "Would breaking this into smaller functions make it easier to understand?",
    "What happens if someone gives your program unexpected input?",
    "How would you explain what this code does to another student?",
];

pub static PROFICIENT: &[&str] = &[
    "Are there any programming patterns that could make this code cleaner?",
    "How would this code perform with much larger inputs?",
    "What parts of this code might be hard for someone else to modify?",
];

pub static ADVANCED: &[&str] = &[
    "Could you restructure this to follow any well-known design patterns?",
    "How does your solution handle edge cases and potential failures?",
    "What would you change if this code needed to handle 1000x more data?",
];

/// Select the prompts for an assessed snippet.
///
/// The selection depends only on the level and on whether parsing failed;
/// counts do not change the wording.
pub fn generate(
    outcome: &ParseOutcome,
    level: SkillLevel,
    _counts: &ConstructCounts,
) -> &'static [&'static str] {
    match level {
        SkillLevel::Novice if outcome.is_failure() => NOVICE_SYNTAX_ERROR,
        SkillLevel::Novice => NOVICE,
        SkillLevel::Developing => DEVELOPING,
        SkillLevel::Proficient => PROFICIENT,
        SkillLevel::Advanced => ADVANCED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Diagnostic, SnippetParser};

    fn parsed() -> ParseOutcome {
        SnippetParser::new().unwrap().parse("x = 1")
    }

    fn failed() -> ParseOutcome {
        ParseOutcome::Failed(Diagnostic::new("invalid syntax", 1, 1))
    }

    fn catalogues() -> [&'static [&'static str]; 5] {
        [NOVICE_SYNTAX_ERROR, NOVICE, DEVELOPING, PROFICIENT, ADVANCED]
    }

    #[test]
    fn test_failure_prompts_mention_syntax() {
        let prompts = generate(&failed(), SkillLevel::Novice, &ConstructCounts::default());
        assert_eq!(prompts.len(), 3);
        assert!(prompts.iter().any(|p| p.to_lowercase().contains("syntax")));
    }

    #[test]
    fn test_novice_branches_on_failure() {
        let counts = ConstructCounts::default();
        let valid = generate(&parsed(), SkillLevel::Novice, &counts);
        let broken = generate(&failed(), SkillLevel::Novice, &counts);
        assert_eq!(valid.len(), 2);
        assert_ne!(valid, broken);
    }

    #[test]
    fn test_each_level_has_its_own_catalogue() {
        let counts = ConstructCounts::default();
        let outcome = parsed();
        let sets: Vec<_> = SkillLevel::ALL
            .iter()
            .map(|l| generate(&outcome, *l, &counts))
            .collect();
        for (i, a) in sets.iter().enumerate() {
            for b in &sets[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_counts_do_not_change_prompts() {
        let rich = ConstructCounts {
            functions: 9,
            loops: 4,
            ..Default::default()
        };
        let outcome = parsed();
        assert_eq!(
            generate(&outcome, SkillLevel::Proficient, &rich),
            generate(&outcome, SkillLevel::Proficient, &ConstructCounts::default())
        );
    }

    #[test]
    fn test_catalogue_sizes_and_text() {
        for catalogue in catalogues() {
            assert!((2..=3).contains(&catalogue.len()));
            for prompt in catalogue {
                assert!(!prompt.trim().is_empty());
                assert!(prompt.len() > 10);
                assert!(prompt.ends_with('?') || prompt.ends_with('.'));
            }
        }
    }
}
