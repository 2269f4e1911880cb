//! Owned syntax tree built from a successful tree-sitter parse.
//!
//! tree-sitter nodes borrow from their `Tree` and are identified by grammar
//! strings. The analyzer works on a closed set of node kinds instead, so the
//! parse is lowered once into a flat, pre-order list of [`NodeKind`]s.
//! Only named nodes are kept; punctuation and keyword tokens are dropped.

use tree_sitter::Node;

/// The node kinds the analyzer distinguishes.
///
/// Everything the construct tally does not care about collapses into
/// [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    FunctionDef,
    ClassDef,
    For,
    While,
    If,
    Try,
    ExceptHandler,
    ListComp,
    SetComp,
    DictComp,
    GeneratorExp,
    Import,
    ImportFrom,
    Other,
}

impl NodeKind {
    /// Classify a tree-sitter-python node.
    ///
    /// `async def` and `async for` share their grammar node with the
    /// synchronous forms but are distinct statements, so they land in
    /// `Other`. So does a `try` whose handlers are `except*` clauses; the
    /// handlers themselves still count. An `elif` is a nested conditional.
    pub fn of(node: Node) -> Self {
        match node.kind() {
            "function_definition" if is_async(node) => NodeKind::Other,
            "function_definition" => NodeKind::FunctionDef,
            "class_definition" => NodeKind::ClassDef,
            "for_statement" if is_async(node) => NodeKind::Other,
            "for_statement" => NodeKind::For,
            "while_statement" => NodeKind::While,
            "if_statement" | "elif_clause" => NodeKind::If,
            "try_statement" if has_group_handlers(node) => NodeKind::Other,
            "try_statement" => NodeKind::Try,
            "except_clause" | "except_group_clause" => NodeKind::ExceptHandler,
            "list_comprehension" => NodeKind::ListComp,
            "set_comprehension" => NodeKind::SetComp,
            "dictionary_comprehension" => NodeKind::DictComp,
            "generator_expression" => NodeKind::GeneratorExp,
            "import_statement" => NodeKind::Import,
            "import_from_statement" | "future_import_statement" => NodeKind::ImportFrom,
            _ => NodeKind::Other,
        }
    }
}

fn is_async(node: Node) -> bool {
    node.child(0).is_some_and(|first| first.kind() == "async")
}

fn has_group_handlers(node: Node) -> bool {
    (0..node.named_child_count())
        .filter_map(|i| node.named_child(i))
        .any(|child| child.kind() == "except_group_clause")
}

/// A parsed snippet, stored as the pre-order kinds of its named nodes.
///
/// The first entry is always the module root.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    kinds: Vec<NodeKind>,
}

impl SyntaxTree {
    /// Lower a tree-sitter tree.
    ///
    /// Walks with a `TreeCursor` rather than recursion so deeply nested
    /// input cannot exhaust the stack.
    pub(crate) fn from_tree_sitter(tree: &tree_sitter::Tree) -> Self {
        let mut kinds = Vec::new();
        let mut cursor = tree.walk();

        loop {
            let node = cursor.node();
            if node.is_named() {
                kinds.push(NodeKind::of(node));
            }

            if cursor.goto_first_child() {
                continue;
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return Self { kinds };
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeKind> + '_ {
        self.kinds.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower(source: &str) -> SyntaxTree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse(source, None).unwrap();
        SyntaxTree::from_tree_sitter(&tree)
    }

    fn kinds(source: &str) -> Vec<NodeKind> {
        lower(source)
            .iter()
            .filter(|k| *k != NodeKind::Other)
            .collect()
    }

    #[test]
    fn test_node_kind_mapping() {
        assert_eq!(kinds("def f():\n    pass\n"), vec![NodeKind::FunctionDef]);
        assert_eq!(
            kinds("if a:\n    pass\nelif b:\n    pass\n"),
            vec![NodeKind::If, NodeKind::If]
        );
        assert_eq!(
            kinds("from __future__ import annotations\n"),
            vec![NodeKind::ImportFrom]
        );
        assert!(kinds("with open(p) as f:\n    pass\nx = a if b else c\n").is_empty());
    }

    #[test]
    fn test_async_forms_are_other() {
        assert!(kinds("async def f():\n    async for x in y:\n        pass\n").is_empty());
        assert_eq!(
            kinds("async def f():\n    for x in y:\n        pass\n"),
            vec![NodeKind::For]
        );
    }

    #[test]
    fn test_try_star_counts_handlers_only() {
        assert_eq!(
            kinds("try:\n    pass\nexcept* ValueError:\n    pass\n"),
            vec![NodeKind::ExceptHandler]
        );
        assert_eq!(
            kinds("try:\n    pass\nexcept ValueError:\n    pass\n"),
            vec![NodeKind::Try, NodeKind::ExceptHandler]
        );
    }

    #[test]
    fn test_root_comes_first() {
        let tree = lower("import os\n");
        let all: Vec<NodeKind> = tree.iter().collect();
        assert_eq!(&all[..2], &[NodeKind::Other, NodeKind::Import]);
    }

    #[test]
    fn test_only_named_nodes_kept() {
        let tree = lower("pass\n");
        // module + pass_statement; the `pass` keyword token is anonymous
        assert_eq!(tree.len(), 2);
        assert!(!tree.is_empty());
    }
}
