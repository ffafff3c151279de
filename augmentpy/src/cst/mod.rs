//! Concrete syntax tree substrate.
//!
//! Wraps tree-sitter's Python grammar in an owned tree with byte-precise
//! node ranges and grammar field names. The rewrite engine never mutates
//! this tree; edits are expressed as byte-range replacements against the
//! source it was parsed from.

mod compare;
mod parser;

pub use compare::nodes_equal;
pub use parser::{CstError, CstNode, CstParser, CstTree, Point};
