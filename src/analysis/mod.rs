//! Construct extraction and skill classification.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌─────────────────┐
//! │ Snippet text    │────▶│ SnippetParser│────▶│ ParseOutcome    │
//! └─────────────────┘     └──────────────┘     │ (tree | failure)│
//!                                              └─────────────────┘
//!                                                      │
//!                                                      ▼
//!                         ┌──────────────┐     ┌─────────────────┐
//!                         │ classify     │◀────│ extract         │
//!                         │ (SkillLevel) │     │(ConstructCounts)│
//!                         └──────────────┘     └─────────────────┘
//!                                 │
//!                                 ▼
//!                    score (Metrics) + feedback (prompts)
//! ```
//!
//! Extraction is an exhaustive match over [`NodeKind`](crate::parser::NodeKind);
//! classification is a fixed decision tree over the resulting counts.

mod classify;
mod constructs;

pub use classify::{classify, thresholds, SkillLevel, Tallies};
pub use constructs::{extract, Construct, ConstructCounts};
