//! Python snippet parsing.
//!
//! This module provides:
//! - `SnippetParser`: turns snippet text into a [`ParseOutcome`]
//! - `ParseOutcome`: either a [`SyntaxTree`] or a structural-failure [`Diagnostic`]
//! - `tree`: the owned syntax tree model the rest of the analyzer consumes
//!
//! tree-sitter never rejects input outright; it recovers and marks the damage
//! with `ERROR` and `MISSING` nodes. Any such node turns the parse into a
//! failure, and the first one in document order becomes the diagnostic.
//! A clean parse is then held to Python 3 rules the grammar does not enforce
//! (see `checks`).

use std::fmt;

use serde::{Deserialize, Serialize};
use tree_sitter::{Language, LanguageError, Node, Parser, Point};

use crate::error::Result;

mod checks;
pub mod tree;

pub use tree::{NodeKind, SyntaxTree};

/// Longest excerpt of offending source quoted in a diagnostic.
const EXCERPT_MAX_CHARS: usize = 40;

/// Human-readable description of a structural parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    /// Line of the first defect (1-indexed), relative to the submitted snippet.
    pub line: usize,
    /// Column of the first defect (1-indexed).
    pub column: usize,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {}, column {})", self.message, self.line, self.column)
    }
}

/// Result of parsing one snippet. Exactly one of the two states holds.
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Parsed(SyntaxTree),
    Failed(Diagnostic),
}

impl ParseOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ParseOutcome::Failed(_))
    }

    pub fn tree(&self) -> Option<&SyntaxTree> {
        match self {
            ParseOutcome::Parsed(tree) => Some(tree),
            ParseOutcome::Failed(_) => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            ParseOutcome::Parsed(_) => None,
            ParseOutcome::Failed(diagnostic) => Some(diagnostic),
        }
    }
}

/// Parser for Python snippets.
///
/// Holds only the grammar handle; a fresh `tree_sitter::Parser` is created
/// per call because it is not `Sync`. One `SnippetParser` can therefore be
/// shared across threads.
pub struct SnippetParser {
    language: Language,
}

impl SnippetParser {
    /// Load the Python grammar.
    ///
    /// Fails only if the grammar's ABI is incompatible with the linked
    /// tree-sitter runtime.
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_python::LANGUAGE.into();
        Parser::new().set_language(&language)?;
        Ok(Self { language })
    }

    fn create_parser(&self) -> std::result::Result<Parser, LanguageError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Parse a snippet.
    ///
    /// Surrounding whitespace is trimmed first so an indented paste does not
    /// read as an indentation error. Empty and comment-only snippets are
    /// valid, empty programs.
    pub fn parse(&self, snippet: &str) -> ParseOutcome {
        let source = snippet.trim();
        let offset = LeadingOffset::of(snippet);

        // Grammar compatibility was checked in `new`.
        let mut parser = match self.create_parser() {
            Ok(p) => p,
            Err(e) => {
                return ParseOutcome::Failed(Diagnostic::new(
                    format!("python grammar unavailable: {}", e),
                    1,
                    1,
                ))
            }
        };

        let tree = match parser.parse(source.as_bytes(), None) {
            Some(t) => t,
            None => {
                return ParseOutcome::Failed(Diagnostic::new(
                    "parser produced no syntax tree",
                    1,
                    1,
                ))
            }
        };

        let root = tree.root_node();
        if root.has_error() {
            let diagnostic = match first_defect(root) {
                Some(node) => describe_defect(node, source, &offset),
                None => Diagnostic::new("invalid syntax", 1, 1),
            };
            return ParseOutcome::Failed(diagnostic);
        }

        if let Some(rejection) = checks::find_rejection(root, source) {
            let (line, column) = offset.locate(rejection.at);
            return ParseOutcome::Failed(Diagnostic::new(rejection.message, line, column));
        }

        ParseOutcome::Parsed(SyntaxTree::from_tree_sitter(&tree))
    }
}

/// Position shift between the submitted snippet and the trimmed source.
struct LeadingOffset {
    lines: usize,
    columns: usize,
}

impl LeadingOffset {
    fn of(snippet: &str) -> Self {
        let leading = &snippet[..snippet.len() - snippet.trim_start().len()];
        let last_line_start = leading.rfind('\n').map(|i| i + 1).unwrap_or(0);
        Self {
            lines: leading.matches('\n').count(),
            columns: leading.len() - last_line_start,
        }
    }

    /// 1-indexed line and column in the submitted snippet.
    fn locate(&self, point: Point) -> (usize, usize) {
        let column = if point.row == 0 {
            point.column + self.columns
        } else {
            point.column
        };
        (point.row + 1 + self.lines, column + 1)
    }
}

/// Find the first `ERROR` or `MISSING` node in document order.
///
/// Only descends into subtrees that report an error.
fn first_defect(root: Node) -> Option<Node> {
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }

        if node.has_error() && cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn describe_defect(node: Node, source: &str, offset: &LeadingOffset) -> Diagnostic {
    let message = if node.is_missing() {
        format!("expected '{}'", node.kind())
    } else {
        match excerpt(node, source) {
            Some(text) => format!("invalid syntax near '{}'", text),
            None => "invalid syntax".to_string(),
        }
    };

    let (line, column) = offset.locate(node.start_position());
    Diagnostic::new(message, line, column)
}

/// First line of a node's text, shortened for display.
fn excerpt(node: Node, source: &str) -> Option<String> {
    let bytes = source.as_bytes().get(node.start_byte()..node.end_byte())?;
    let text = String::from_utf8_lossy(bytes);
    let line = text.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        return None;
    }

    let mut chars = line.chars();
    let mut short: String = chars.by_ref().take(EXCERPT_MAX_CHARS).collect();
    if chars.next().is_some() {
        short.push_str("...");
    }
    Some(short)
}
