//! Linter driver: parses a file, walks its CST, and applies the rule set.

use crate::config::Config;
use crate::cst::{CstError, CstNode, CstParser, CstTree};
use crate::rules::augmented::NonAugmentedAssignment;
use crate::rules::{Context, Finding, Rule};
use crate::utils::{get_ignored_lines, LineIndex};
use std::path::Path;

/// The default rule set.
#[must_use]
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(NonAugmentedAssignment::new())]
}

/// Walks a parsed tree in pre-order and applies rules to every node.
pub struct LinterVisitor {
    rules: Vec<Box<dyn Rule>>,
    context: Context,
    /// List of findings collected during the traversal.
    pub findings: Vec<Finding>,
}

impl LinterVisitor {
    /// Creates a new `LinterVisitor` with the given rules and context.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule>>, context: Context) -> Self {
        Self {
            rules,
            context,
            findings: Vec::new(),
        }
    }

    /// Visits every node of the tree in document order.
    pub fn visit_tree(&mut self, tree: &CstTree) {
        self.visit_node(tree, &tree.root);
    }

    fn visit_node(&mut self, tree: &CstTree, node: &CstNode) {
        for rule in &mut self.rules {
            if let Some(mut findings) = rule.check_node(tree, node, &self.context) {
                self.findings.append(&mut findings);
            }
        }
        for child in &node.children {
            self.visit_node(tree, child);
        }
    }
}

/// Lints a single source file already loaded into memory.
///
/// Findings on suppressed lines (`# noqa: APY`) and for rule codes listed
/// in the configuration's `ignore` list are dropped; the rest are sorted
/// by position.
///
/// # Errors
///
/// Returns an error if the source cannot be parsed at all. A tree with
/// localized syntax errors still lints: rules only match well-formed
/// assignment nodes.
pub fn lint_source(path: &Path, source: &str, config: &Config) -> Result<Vec<Finding>, CstError> {
    let mut parser = CstParser::new()?;
    let tree = parser.parse(source)?;

    let context = Context {
        filename: path.to_path_buf(),
        line_index: LineIndex::new(source),
        config: config.clone(),
    };

    let mut visitor = LinterVisitor::new(default_rules(), context);
    visitor.visit_tree(&tree);

    let ignored_lines = get_ignored_lines(source);
    let mut findings = visitor.findings;
    findings.retain(|f| !ignored_lines.contains(&f.line) && !config.is_rule_ignored(&f.rule_id));
    findings.sort_by_key(|f| (f.line, f.col));

    Ok(findings)
}
