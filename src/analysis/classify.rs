//! Skill level classification.
//!
//! A fixed decision tree over construct counts. The thresholds are
//! heuristics, not a fitted model; they are versioned together through
//! [`thresholds::HEURISTICS_VERSION`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ConstructCounts;
use crate::parser::ParseOutcome;

/// Decision tree constants.
pub mod thresholds {
    /// Bumped whenever any threshold below (or a score weight) changes.
    pub const HEURISTICS_VERSION: u32 = 1;

    /// `classes + try_blocks` needed for Advanced.
    pub const ADVANCED_MIN: usize = 2;
    /// Comprehensions alone that also qualify for Advanced.
    pub const COMPREHENSIONS_MIN: usize = 2;
    /// `functions + comprehensions` needed for Proficient on their own.
    pub const PROFICIENT_INTERMEDIATE_MIN: usize = 2;
    /// `loops + conditionals` that, with one intermediate construct, give Proficient.
    pub const PROFICIENT_BASIC_MIN: usize = 3;
    /// Any basic or intermediate construct gives Developing.
    pub const DEVELOPING_MIN: usize = 1;
}

/// Inferred skill level of a snippet's author, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Novice,
    Developing,
    Proficient,
    Advanced,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Novice,
        SkillLevel::Developing,
        SkillLevel::Proficient,
        SkillLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Novice => "novice",
            SkillLevel::Developing => "developing",
            SkillLevel::Proficient => "proficient",
            SkillLevel::Advanced => "advanced",
        }
    }

    /// Capitalized name for display.
    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Novice => "Novice",
            SkillLevel::Developing => "Developing",
            SkillLevel::Proficient => "Proficient",
            SkillLevel::Advanced => "Advanced",
        }
    }

    /// Concepts a student at this level typically works with.
    pub fn indicators(&self) -> &'static [&'static str] {
        match self {
            SkillLevel::Novice => &["variables", "print", "input", "basic operators"],
            SkillLevel::Developing => &["functions", "conditionals", "loops", "lists"],
            SkillLevel::Proficient => &["classes", "exceptions", "file operations", "dictionaries"],
            SkillLevel::Advanced => &["decorators", "generators", "context managers", "metaclasses"],
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived tallies the decision tree looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tallies {
    /// classes + try_blocks
    pub advanced: usize,
    /// functions + comprehensions
    pub intermediate: usize,
    /// loops + conditionals
    pub basic: usize,
}

impl Tallies {
    pub fn from_counts(counts: &ConstructCounts) -> Self {
        Self {
            advanced: counts.classes + counts.try_blocks,
            intermediate: counts.functions + counts.comprehensions,
            basic: counts.loops + counts.conditionals,
        }
    }
}

/// Classify a snippet. Rules are checked in order; the first match wins.
///
/// A structural failure is Novice no matter what the counts say.
pub fn classify(outcome: &ParseOutcome, counts: &ConstructCounts) -> SkillLevel {
    use thresholds::*;

    if outcome.is_failure() {
        return SkillLevel::Novice;
    }

    let t = Tallies::from_counts(counts);

    if t.advanced >= ADVANCED_MIN || counts.comprehensions >= COMPREHENSIONS_MIN {
        SkillLevel::Advanced
    } else if t.intermediate >= PROFICIENT_INTERMEDIATE_MIN
        || (t.intermediate >= DEVELOPING_MIN && t.basic >= PROFICIENT_BASIC_MIN)
    {
        SkillLevel::Proficient
    } else if t.basic >= DEVELOPING_MIN || t.intermediate >= DEVELOPING_MIN {
        SkillLevel::Developing
    } else {
        SkillLevel::Novice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Diagnostic, SnippetParser};

    fn parsed() -> ParseOutcome {
        SnippetParser::new().unwrap().parse("")
    }

    fn failed() -> ParseOutcome {
        ParseOutcome::Failed(Diagnostic::new("invalid syntax", 1, 1))
    }

    fn counts(f: impl FnOnce(&mut ConstructCounts)) -> ConstructCounts {
        let mut c = ConstructCounts::default();
        f(&mut c);
        c
    }

    #[test]
    fn test_failure_is_always_novice() {
        let rich = counts(|c| {
            c.classes = 5;
            c.try_blocks = 5;
            c.comprehensions = 5;
        });
        assert_eq!(classify(&failed(), &rich), SkillLevel::Novice);
        assert_eq!(classify(&failed(), &ConstructCounts::default()), SkillLevel::Novice);
    }

    #[test]
    fn test_no_constructs_is_novice() {
        assert_eq!(classify(&parsed(), &ConstructCounts::default()), SkillLevel::Novice);
    }

    #[test]
    fn test_imports_alone_are_novice() {
        let c = counts(|c| c.imports = 10);
        assert_eq!(classify(&parsed(), &c), SkillLevel::Novice);
    }

    #[test]
    fn test_advanced_rules() {
        let two_classes_one_try = counts(|c| {
            c.classes = 2;
            c.try_blocks = 1;
        });
        assert_eq!(classify(&parsed(), &two_classes_one_try), SkillLevel::Advanced);

        let class_and_try = counts(|c| {
            c.classes = 1;
            c.try_blocks = 1;
        });
        assert_eq!(classify(&parsed(), &class_and_try), SkillLevel::Advanced);

        let two_comprehensions = counts(|c| c.comprehensions = 2);
        assert_eq!(classify(&parsed(), &two_comprehensions), SkillLevel::Advanced);
    }

    #[test]
    fn test_proficient_rules() {
        let two_functions = counts(|c| {
            c.functions = 2;
            c.loops = 1;
        });
        assert_eq!(classify(&parsed(), &two_functions), SkillLevel::Proficient);

        // intermediate = 1, basic = 3
        let mixed = counts(|c| {
            c.functions = 1;
            c.loops = 1;
            c.conditionals = 2;
        });
        assert_eq!(Tallies::from_counts(&mixed).intermediate, 1);
        assert_eq!(Tallies::from_counts(&mixed).basic, 3);
        assert_eq!(classify(&parsed(), &mixed), SkillLevel::Proficient);

        // one class only counts towards advanced, which stays below 2
        let one_class_two_methods = counts(|c| {
            c.classes = 1;
            c.functions = 2;
        });
        assert_eq!(classify(&parsed(), &one_class_two_methods), SkillLevel::Proficient);
    }

    #[test]
    fn test_developing_rules() {
        let function_and_loop = counts(|c| {
            c.functions = 1;
            c.loops = 1;
        });
        assert_eq!(classify(&parsed(), &function_and_loop), SkillLevel::Developing);

        let one_loop = counts(|c| c.loops = 1);
        assert_eq!(classify(&parsed(), &one_loop), SkillLevel::Developing);

        let one_comprehension = counts(|c| c.comprehensions = 1);
        assert_eq!(classify(&parsed(), &one_comprehension), SkillLevel::Developing);

        let many_basics = counts(|c| {
            c.loops = 4;
            c.conditionals = 4;
        });
        assert_eq!(classify(&parsed(), &many_basics), SkillLevel::Developing);
    }

    #[test]
    fn test_single_class_is_novice() {
        // classes feed only the advanced tally
        let c = counts(|c| c.classes = 1);
        assert_eq!(classify(&parsed(), &c), SkillLevel::Novice);
    }

    #[test]
    fn test_level_ordering() {
        assert!(SkillLevel::Novice < SkillLevel::Developing);
        assert!(SkillLevel::Developing < SkillLevel::Proficient);
        assert!(SkillLevel::Proficient < SkillLevel::Advanced);
        let mut sorted = SkillLevel::ALL;
        sorted.sort();
        assert_eq!(sorted, SkillLevel::ALL);
    }

    #[test]
    fn test_indicators_present_for_every_level() {
        for level in SkillLevel::ALL {
            assert!(!level.indicators().is_empty());
        }
        assert!(SkillLevel::Advanced.indicators().contains(&"decorators"));
    }
}
