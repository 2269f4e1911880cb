//! Rejections for input tree-sitter accepts but Python 3 does not.
//!
//! The grammar still understands Python 2 statements and is lenient about
//! several constructs that CPython refuses at parse time. A clean parse is
//! re-checked here so those snippets count as structural failures too.
//!
//! Indentation is checked the way CPython's tokenizer does it: every
//! logical line is measured twice, once with tabs to the next multiple of
//! eight and once with tabs as a single column, and the two measurements
//! must order the indentation stack the same way.

use std::collections::BTreeSet;

use tree_sitter::{Node, Point};

const TAB_SIZE: usize = 8;
const ALT_TAB_SIZE: usize = 1;

/// Clauses that start their own logical line without being a block child.
const CLAUSE_KINDS: &[&str] = &[
    "elif_clause",
    "else_clause",
    "except_clause",
    "except_group_clause",
    "finally_clause",
];

const STATEMENT_PARENTS: &[&str] = &["module", "block", "decorated_definition"];

/// Contexts where an unparenthesized `:=` is a syntax error.
const BARE_WALRUS_PARENTS: &[&str] = &[
    "expression_statement",
    "assignment",
    "augmented_assignment",
    "return_statement",
    "keyword_argument",
    "default_parameter",
    "typed_default_parameter",
    "lambda",
];

const LITERAL_KINDS: &[&str] = &[
    "integer",
    "float",
    "string",
    "concatenated_string",
    "true",
    "false",
    "none",
    "ellipsis",
];

/// Why a cleanly parsed snippet is still invalid, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rejection {
    pub message: String,
    /// 0-indexed row and column in the parsed source.
    pub at: Point,
}

impl Rejection {
    fn new(message: impl Into<String>, at: Point) -> Self {
        Self {
            message: message.into(),
            at,
        }
    }
}

/// Find the first construct in `source` that Python 3 refuses.
///
/// `root` must come from a parse of `source` without errors.
pub(crate) fn find_rejection(root: Node, source: &str) -> Option<Rejection> {
    let mut statement_rows = BTreeSet::new();
    let mut first: Option<Rejection> = None;
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();

        if first.is_none() {
            first = reject_node(node, source);
        }
        if node.is_named() && starts_logical_line(node) {
            statement_rows.insert(node.start_position().row);
        }

        if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                let indentation = check_indentation(source, &statement_rows);
                return earliest(first, indentation);
            }
        }
    }
}

fn earliest(a: Option<Rejection>, b: Option<Rejection>) -> Option<Rejection> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b.at < a.at { b } else { a }),
        (a, b) => a.or(b),
    }
}

fn starts_logical_line(node: Node) -> bool {
    if matches!(node.kind(), "comment" | "line_continuation") {
        return false;
    }
    if CLAUSE_KINDS.contains(&node.kind()) {
        return true;
    }
    node.parent()
        .is_some_and(|p| STATEMENT_PARENTS.contains(&p.kind()))
}

fn reject_node(node: Node, source: &str) -> Option<Rejection> {
    let at = node.start_position();
    match node.kind() {
        "print_statement" if !is_parenthesized_print(node) => Some(Rejection::new(
            "Missing parentheses in call to 'print'. Did you mean print(...)?",
            at,
        )),
        "exec_statement" => Some(Rejection::new(
            "Missing parentheses in call to 'exec'. Did you mean exec(...)?",
            at,
        )),
        "<>" if !node.is_named() => Some(Rejection::new("invalid syntax near '<>'", at)),
        "integer" => check_integer(text(node, source), at),
        "named_expression" => {
            let parent = node.parent()?;
            BARE_WALRUS_PARENTS
                .contains(&parent.kind())
                .then(|| Rejection::new("invalid syntax near ':='", at))
        }
        "argument_list" => check_argument_order(node),
        "delete_statement" => check_delete_targets(node),
        _ => None,
    }
}

/// `print (x)` is a call in Python 3 even if the grammar reads a statement.
fn is_parenthesized_print(node: Node) -> bool {
    node.named_child_count() == 1
        && node
            .named_child(0)
            .is_some_and(|arg| arg.kind() == "parenthesized_expression")
}

fn text<'a>(node: Node, source: &'a str) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

fn check_integer(literal: &str, at: Point) -> Option<Rejection> {
    if literal.ends_with(['l', 'L']) {
        return Some(Rejection::new(
            format!("invalid integer literal '{}'", literal),
            at,
        ));
    }

    let digits: Vec<char> = literal.chars().filter(|c| *c != '_').collect();
    let is_decimal = digits.iter().all(|c| c.is_ascii_digit());
    if is_decimal && digits.len() > 1 && digits[0] == '0' && digits.iter().any(|c| *c != '0') {
        return Some(Rejection::new(
            "leading zeros in decimal integer literals are not permitted; \
             use an 0o prefix for octal integers",
            at,
        ));
    }
    None
}

fn check_argument_order(node: Node) -> Option<Rejection> {
    let mut seen_keyword = false;
    let mut seen_mapping_unpack = false;

    for i in 0..node.named_child_count() {
        let Some(arg) = node.named_child(i) else {
            continue;
        };
        let at = arg.start_position();
        match arg.kind() {
            "comment" => {}
            "keyword_argument" => seen_keyword = true,
            "dictionary_splat" => seen_mapping_unpack = true,
            "list_splat" if seen_mapping_unpack => {
                return Some(Rejection::new(
                    "iterable argument unpacking follows keyword argument unpacking",
                    at,
                ))
            }
            "list_splat" => {}
            _ if seen_mapping_unpack => {
                return Some(Rejection::new(
                    "positional argument follows keyword argument unpacking",
                    at,
                ))
            }
            _ if seen_keyword => {
                return Some(Rejection::new(
                    "positional argument follows keyword argument",
                    at,
                ))
            }
            _ => {}
        }
    }
    None
}

fn check_delete_targets(node: Node) -> Option<Rejection> {
    let mut pending: Vec<Node> = (0..node.named_child_count())
        .filter_map(|i| node.named_child(i))
        .collect();

    while let Some(target) = pending.pop() {
        let kind = target.kind();
        let what = match kind {
            "expression_list" | "tuple" | "list" | "parenthesized_expression" => {
                pending.extend(
                    (0..target.named_child_count()).filter_map(|i| target.named_child(i)),
                );
                continue;
            }
            k if LITERAL_KINDS.contains(&k) => "literal",
            "call" => "function call",
            "named_expression" => "named expression",
            "lambda" => "lambda",
            "conditional_expression" => "conditional expression",
            "comparison_operator" => "comparison",
            "binary_operator" | "unary_operator" | "boolean_operator" | "not_operator"
            | "await" => "expression",
            _ => continue,
        };
        return Some(Rejection::new(
            format!("cannot delete {}", what),
            target.start_position(),
        ));
    }
    None
}

/// Replay CPython's indentation stack over the rows that start statements.
fn check_indentation(source: &str, rows: &BTreeSet<usize>) -> Option<Rejection> {
    let lines: Vec<&str> = source.split('\n').collect();
    let mut stack: Vec<(usize, usize)> = vec![(0, 0)];

    for &row in rows {
        let Some(line) = lines.get(row) else {
            continue;
        };
        let (col, alt_col) = measure_indent(line);
        let at = Point { row, column: 0 };
        let &(top, alt_top) = stack.last()?;

        if col == top {
            if alt_col != alt_top {
                return Some(tab_error(at));
            }
        } else if col > top {
            if alt_col <= alt_top {
                return Some(tab_error(at));
            }
            stack.push((col, alt_col));
        } else {
            while stack.len() > 1 && stack.last().is_some_and(|&(c, _)| col < c) {
                stack.pop();
            }
            let &(top, alt_top) = stack.last()?;
            if col != top {
                return Some(Rejection::new(
                    "unindent does not match any outer indentation level",
                    at,
                ));
            }
            if alt_col != alt_top {
                return Some(tab_error(at));
            }
        }
    }
    None
}

fn measure_indent(line: &str) -> (usize, usize) {
    let mut col = 0;
    let mut alt_col = 0;
    for c in line.chars() {
        match c {
            ' ' => {
                col += 1;
                alt_col += 1;
            }
            '\t' => {
                col = (col / TAB_SIZE + 1) * TAB_SIZE;
                alt_col = (alt_col / ALT_TAB_SIZE + 1) * ALT_TAB_SIZE;
            }
            '\x0c' => {
                col = 0;
                alt_col = 0;
            }
            _ => break,
        }
    }
    (col, alt_col)
}

fn tab_error(at: Point) -> Rejection {
    Rejection::new("inconsistent use of tabs and spaces in indentation", at)
}
