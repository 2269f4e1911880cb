//! Competence - student code competence analyzer.
//!
//! Competence assesses a single Python snippet and produces a competence
//! score broken into sub-scores, together with open-ended feedback prompts
//! calibrated to the inferred skill level of the author.
//!
//! # Architecture
//!
//! The analyzer uses tree-sitter for parsing:
//!
//! - `parser`: Snippet parsing into an owned syntax tree or a diagnostic
//! - `analysis`: Construct extraction and skill classification
//! - `score`: Sub-score and total score calculation
//! - `feedback`: Static catalogue of level-appropriate prompts
//! - `analyzer`: The `Analyzer` facade tying the stages together
//! - `samples`: Embedded sample submissions
//! - `config`, `report`, `cli`: The command-line surface
//!
//! # Example
//!
//! ```no_run
//! use competence::{Analyzer, SkillLevel};
//!
//! let analyzer = Analyzer::new()?;
//! let assessment = analyzer.assess("for i in range(3):\n    print(i)\n");
//! assert_eq!(assessment.level, SkillLevel::Developing);
//! # Ok::<(), competence::Error>(())
//! ```

pub mod analysis;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod feedback;
pub mod parser;
pub mod report;
pub mod samples;
pub mod score;

pub use analysis::{classify, extract, Construct, ConstructCounts, SkillLevel};
pub use analyzer::{Analyzer, Assessment};
pub use config::Config;
pub use error::{Error, Result};
pub use parser::{Diagnostic, ParseOutcome, SnippetParser, SyntaxTree};
pub use score::Metrics;
