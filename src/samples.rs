//! Embedded sample submissions.
//!
//! Inert fixtures used by the `demo` command and the tests to exercise the
//! analyzer across skill levels. The sources live in `samples/` at the crate
//! root.

use crate::analysis::SkillLevel;

/// A sample student submission.
pub struct Sample {
    pub name: &'static str,
    pub description: &'static str,
    pub source: &'static str,
    /// Level the analyzer assigns.
    pub expected: SkillLevel,
}

/// All samples, in demo order.
pub static SAMPLES: &[Sample] = &[
    Sample {
        name: "missing-colon",
        description: "Function definition missing its colon",
        source: include_str!("../samples/missing_colon.py"),
        expected: SkillLevel::Novice,
    },
    Sample {
        name: "simple-calculator",
        description: "Small class with a few methods and f-strings",
        source: include_str!("../samples/simple_calculator.py"),
        expected: SkillLevel::Proficient,
    },
    Sample {
        name: "retry-decorator",
        description: "Parameterized retry decorator with exception handling",
        source: include_str!("../samples/retry_decorator.py"),
        expected: SkillLevel::Advanced,
    },
    Sample {
        name: "intermediate-class-loops",
        description: "Grade book class with loops and elif chains",
        source: include_str!("../samples/intermediate_class_loops.py"),
        expected: SkillLevel::Proficient,
    },
    Sample {
        name: "common-misconceptions",
        description: "Mutable defaults, late binding, mixed tabs and spaces",
        source: include_str!("../samples/common_misconceptions.py"),
        // line 17 indents with a tab where its block uses spaces
        expected: SkillLevel::Novice,
    },
    Sample {
        name: "advanced-decorators-exceptions",
        description: "Decorators, context managers, comprehensions and generators",
        source: include_str!("../samples/advanced_decorators_exceptions.py"),
        expected: SkillLevel::Advanced,
    },
];

/// Look up a sample by name.
pub fn find(name: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|s| s.name == name)
}
