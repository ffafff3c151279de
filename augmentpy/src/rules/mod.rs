//! Rule infrastructure: the finding data model and the CST-based rule trait.

use crate::config::Config;
use crate::cst::{CstNode, CstTree};
use crate::utils::LineIndex;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
/// Context passed to rules during analysis.
pub struct Context {
    /// Path to the file being analyzed.
    pub filename: PathBuf,
    /// Line index for accurate line/column mapping.
    pub line_index: LineIndex,
    /// Configuration settings.
    pub config: Config,
}

#[derive(Debug, Clone, Serialize)]
/// A single issue found by a rule.
///
/// Carries everything the fixer needs to resolve the flagged assignment
/// later: `start_byte..end_byte` is the assignment node's span in the
/// analyzed snapshot.
pub struct Finding {
    /// ID of the rule that triggered the finding.
    pub rule_id: String,
    /// Category of the rule.
    pub category: String,
    /// Severity level (e.g., "warning").
    pub severity: String,
    /// Description of the issue.
    pub message: String,
    /// File where the issue was found.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
    /// Start byte of the flagged assignment node.
    pub start_byte: usize,
    /// End byte of the flagged assignment node.
    pub end_byte: usize,
}

#[derive(Debug, Clone, Copy, Serialize)]
/// Metadata associated with a rule.
pub struct RuleMetadata {
    /// Unique code/ID of the rule.
    pub id: &'static str,
    /// Category of the rule.
    pub category: &'static str,
}

/// Trait defining a linting rule over the CST.
pub trait Rule: Send + Sync {
    /// Returns the descriptive name of the rule.
    fn name(&self) -> &'static str;
    /// Returns the unique code/ID of the rule.
    fn code(&self) -> &'static str {
        self.metadata().id
    }
    /// Returns the category/functional group of the rule.
    fn category(&self) -> &'static str {
        self.metadata().category
    }
    /// Returns the full metadata for the rule.
    fn metadata(&self) -> RuleMetadata;
    /// Called for every node during the pre-order walk of a parsed file.
    fn check_node(
        &mut self,
        tree: &CstTree,
        node: &CstNode,
        context: &Context,
    ) -> Option<Vec<Finding>>;
}

/// Create a Finding anchored on a CST node, with line/column mapping.
pub(crate) fn create_finding(
    msg: &str,
    metadata: RuleMetadata,
    context: &Context,
    node: &CstNode,
    severity: &str,
) -> Finding {
    Finding {
        message: msg.to_owned(),
        rule_id: metadata.id.to_owned(),
        category: metadata.category.to_owned(),
        file: context.filename.clone(),
        line: context.line_index.line_index(node.start_byte),
        col: context.line_index.column_index(node.start_byte),
        severity: severity.to_owned(),
        start_byte: node.start_byte,
        end_byte: node.end_byte,
    }
}

/// Module containing the non-augmented assignment rule.
pub mod augmented;
/// Module containing rule ID constants.
pub mod ids;
