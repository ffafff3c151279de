//! Tree-sitter based CST parser for Python source code.
//!
//! Provides precise byte-range information for safe code rewriting.

use thiserror::Error;
use tree_sitter::{Node, Parser, TreeCursor};

/// A point in source code (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// Zero-indexed row number
    pub row: usize,
    /// Zero-indexed column (byte offset within line)
    pub column: usize,
}

impl From<tree_sitter::Point> for Point {
    fn from(p: tree_sitter::Point) -> Self {
        Self {
            row: p.row,
            column: p.column,
        }
    }
}

/// A CST node with exact source location
#[derive(Debug, Clone)]
pub struct CstNode {
    /// Node kind (e.g., "assignment", "binary_operator", "identifier")
    pub kind: String,
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Start point (row, column)
    pub start_point: Point,
    /// End point (row, column)
    pub end_point: Point,
    /// Whether this is a named node (vs anonymous like punctuation)
    pub is_named: bool,
    /// Grammar field name under the parent (e.g., "left", "operator")
    pub field_name: Option<&'static str>,
    /// Child nodes
    pub children: Vec<CstNode>,
}

impl CstNode {
    /// Create a `CstNode` subtree from a tree-sitter `Node`, recording the
    /// grammar field name of every child.
    fn from_ts_node(node: Node<'_>, field_name: Option<&'static str>) -> Self {
        let mut children = Vec::with_capacity(node.child_count());
        let mut cursor: TreeCursor<'_> = node.walk();
        if cursor.goto_first_child() {
            loop {
                let child_field = cursor.field_name();
                children.push(Self::from_ts_node(cursor.node(), child_field));
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }

        Self {
            kind: node.kind().to_owned(),
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_point: node.start_position().into(),
            end_point: node.end_position().into(),
            is_named: node.is_named(),
            field_name,
            children,
        }
    }

    /// Get the child filling the given grammar field, if any
    #[must_use]
    pub fn child_by_field(&self, name: &str) -> Option<&CstNode> {
        self.children.iter().find(|c| c.field_name == Some(name))
    }

    /// Get the first anonymous child with the given token text kind
    /// (punctuation children like `=` carry their spelling as the kind)
    #[must_use]
    pub fn token_child(&self, token: &str) -> Option<&CstNode> {
        self.children
            .iter()
            .find(|c| !c.is_named && c.kind == token)
    }

    /// Check if this node's range contains the given byte offset
    #[must_use]
    pub fn contains_byte(&self, byte: usize) -> bool {
        byte >= self.start_byte && byte < self.end_byte
    }

    /// Check if this node's range overlaps with the given range
    #[must_use]
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start_byte < end && self.end_byte > start
    }

    /// Find the smallest node containing the given byte range
    #[must_use]
    pub fn find_smallest_covering(&self, start: usize, end: usize) -> Option<&CstNode> {
        if !self.overlaps(start, end) {
            return None;
        }

        for child in &self.children {
            if child.start_byte <= start && child.end_byte >= end {
                if let Some(smaller) = child.find_smallest_covering(start, end) {
                    return Some(smaller);
                }
                return Some(child);
            }
        }

        Some(self)
    }

    /// Find all nodes of a specific kind, in document order
    #[must_use]
    pub fn find_by_kind(&self, kind: &str) -> Vec<&CstNode> {
        let mut result = Vec::new();
        self.find_by_kind_recursive(kind, &mut result);
        result
    }

    fn find_by_kind_recursive<'a>(&'a self, kind: &str, result: &mut Vec<&'a CstNode>) {
        if self.kind == kind {
            result.push(self);
        }
        for child in &self.children {
            child.find_by_kind_recursive(kind, result);
        }
    }
}

/// A parsed CST tree
#[derive(Debug)]
pub struct CstTree {
    /// Root node of the CST
    pub root: CstNode,
    /// Original source code
    pub source: String,
    /// Whether tree-sitter reported any syntax error in the parse
    has_error: bool,
}

impl CstTree {
    /// Extract a slice of source code by byte range
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.source[start..end]
    }

    /// Extract the source text covered by a node
    #[must_use]
    pub fn node_text(&self, node: &CstNode) -> &str {
        &self.source[node.start_byte..node.end_byte]
    }

    /// Whether the parse produced error or missing nodes anywhere
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// Find all plain assignment statements (`x = ...`), in document order
    #[must_use]
    pub fn find_assignments(&self) -> Vec<&CstNode> {
        self.root.find_by_kind("assignment")
    }
}

/// Error during CST parsing
#[derive(Debug, Error)]
pub enum CstError {
    /// Failed to create parser
    #[error("Failed to create CST parser: {0}")]
    ParserCreation(String),
    /// Failed to parse source
    #[error("Failed to parse source as Python")]
    ParseFailed,
}

/// Tree-sitter based CST parser
pub struct CstParser {
    parser: Parser,
}

impl CstParser {
    /// Create a new CST parser for Python
    ///
    /// # Errors
    /// Returns error if parser creation fails
    pub fn new() -> Result<Self, CstError> {
        let mut parser = Parser::new();

        // Use the LANGUAGE constant exported by tree-sitter-python crate
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| CstError::ParserCreation(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parse source code into a CST
    ///
    /// # Errors
    /// Returns error if parsing fails
    pub fn parse(&mut self, source: &str) -> Result<CstTree, CstError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(CstError::ParseFailed)?;

        let ts_root = tree.root_node();
        let has_error = ts_root.has_error();
        let root = CstNode::from_ts_node(ts_root, None);

        Ok(CstTree {
            root,
            source: source.to_owned(),
            has_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> CstTree {
        let mut parser = CstParser::new().unwrap();
        parser.parse(source).unwrap()
    }

    #[test]
    fn test_parse_module_root() {
        let tree = parse("x = 1\n");
        assert_eq!(tree.root.kind, "module");
        assert_eq!(tree.root.start_byte, 0);
        assert_eq!(tree.root.end_byte, 6);
        assert!(!tree.has_error());
    }

    #[test]
    fn test_assignment_fields() {
        let tree = parse("x = x + 1\n");
        let assignments = tree.find_assignments();
        assert_eq!(assignments.len(), 1);

        let assign = assignments[0];
        let left = assign.child_by_field("left").unwrap();
        let right = assign.child_by_field("right").unwrap();
        assert_eq!(left.kind, "identifier");
        assert_eq!(tree.node_text(left), "x");
        assert_eq!(right.kind, "binary_operator");

        let eq = assign.token_child("=").unwrap();
        assert_eq!(tree.node_text(eq), "=");
        assert!(!eq.is_named);
    }

    #[test]
    fn test_binary_operator_fields() {
        let tree = parse("x = x + 1\n");
        let binary = &tree.root.find_by_kind("binary_operator")[0];
        let op = binary.child_by_field("operator").unwrap();
        assert_eq!(tree.node_text(op), "+");
        assert_eq!(
            tree.node_text(binary.child_by_field("left").unwrap()),
            "x"
        );
        assert_eq!(
            tree.node_text(binary.child_by_field("right").unwrap()),
            "1"
        );
    }

    #[test]
    fn test_augmented_assignment_is_distinct_kind() {
        let tree = parse("x += 1\n");
        assert!(tree.find_assignments().is_empty());
        assert_eq!(tree.root.find_by_kind("augmented_assignment").len(), 1);
    }

    #[test]
    fn test_find_smallest_covering() {
        let source = "a = 1\nb = b + 2\n";
        let tree = parse(source);
        let start = source.find("b = b + 2").unwrap();
        let node = tree
            .root
            .find_smallest_covering(start, start + "b = b + 2".len())
            .unwrap();
        assert_eq!(node.kind, "assignment");
    }

    #[test]
    fn test_syntax_error_detected() {
        let tree = parse("def broken(((\n");
        assert!(tree.has_error());
    }
}
