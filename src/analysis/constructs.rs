//! Construct tally extracted from a syntax tree.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::{NodeKind, SyntaxTree};

/// Syntactic categories counted by the structure extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    Functions,
    Classes,
    Loops,
    Conditionals,
    TryBlocks,
    Comprehensions,
    Imports,
}

impl Construct {
    pub const ALL: [Construct; 7] = [
        Construct::Functions,
        Construct::Classes,
        Construct::Loops,
        Construct::Conditionals,
        Construct::TryBlocks,
        Construct::Comprehensions,
        Construct::Imports,
    ];

    /// Bucket a node kind falls into, if any. A node lands in at most one.
    pub fn of(kind: NodeKind) -> Option<Construct> {
        match kind {
            NodeKind::FunctionDef => Some(Construct::Functions),
            NodeKind::ClassDef => Some(Construct::Classes),
            NodeKind::For | NodeKind::While => Some(Construct::Loops),
            NodeKind::If => Some(Construct::Conditionals),
            NodeKind::Try | NodeKind::ExceptHandler => Some(Construct::TryBlocks),
            NodeKind::ListComp | NodeKind::SetComp | NodeKind::DictComp | NodeKind::GeneratorExp => {
                Some(Construct::Comprehensions)
            }
            NodeKind::Import | NodeKind::ImportFrom => Some(Construct::Imports),
            NodeKind::Other => None,
        }
    }

    /// Key used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Construct::Functions => "functions",
            Construct::Classes => "classes",
            Construct::Loops => "loops",
            Construct::Conditionals => "conditionals",
            Construct::TryBlocks => "try_blocks",
            Construct::Comprehensions => "comprehensions",
            Construct::Imports => "imports",
        }
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Occurrence count per construct. Every key is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructCounts {
    pub functions: usize,
    pub classes: usize,
    pub loops: usize,
    pub conditionals: usize,
    pub try_blocks: usize,
    pub comprehensions: usize,
    pub imports: usize,
}

impl ConstructCounts {
    pub fn get(&self, construct: Construct) -> usize {
        match construct {
            Construct::Functions => self.functions,
            Construct::Classes => self.classes,
            Construct::Loops => self.loops,
            Construct::Conditionals => self.conditionals,
            Construct::TryBlocks => self.try_blocks,
            Construct::Comprehensions => self.comprehensions,
            Construct::Imports => self.imports,
        }
    }

    pub fn increment(&mut self, construct: Construct) {
        let slot = match construct {
            Construct::Functions => &mut self.functions,
            Construct::Classes => &mut self.classes,
            Construct::Loops => &mut self.loops,
            Construct::Conditionals => &mut self.conditionals,
            Construct::TryBlocks => &mut self.try_blocks,
            Construct::Comprehensions => &mut self.comprehensions,
            Construct::Imports => &mut self.imports,
        };
        *slot += 1;
    }

    /// Sum over all buckets.
    pub fn total(&self) -> usize {
        Construct::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Buckets in their fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (Construct, usize)> + '_ {
        Construct::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}

/// Tally every node of the tree into its construct bucket.
///
/// A pure count, so traversal order does not matter.
pub fn extract(tree: &SyntaxTree) -> ConstructCounts {
    let mut counts = ConstructCounts::default();
    for kind in tree.iter() {
        if let Some(construct) = Construct::of(kind) {
            counts.increment(construct);
        }
    }
    counts
}
