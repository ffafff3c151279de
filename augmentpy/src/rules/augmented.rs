//! Detection of assignments that restate their own target.
//!
//! Flags `x = x + 1` (and, for commutative operators, `x = 1 + x`) when the
//! target is cheap to re-evaluate and the operator has an augmented form.
//! The rewrite itself lives in `crate::fix`; this rule only decides which
//! assignments qualify and records their exact node spans.

use crate::cst::{nodes_equal, CstNode, CstTree};
use crate::ops::BinaryOp;
use crate::rules::ids::RULE_ID_NON_AUGMENTED;
use crate::rules::{create_finding, Context, Finding, Rule, RuleMetadata};

const METADATA: RuleMetadata = RuleMetadata {
    id: RULE_ID_NON_AUGMENTED,
    category: "quality",
};

/// Rule implementation for non-augmented self-referential assignments.
#[derive(Debug, Default)]
pub struct NonAugmentedAssignment;

impl NonAugmentedAssignment {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Whether re-evaluating this expression as the left side of an augmented
/// assignment cannot run arbitrary code: identifiers, attribute chains of
/// such values, and subscripts with simple indices. Calls, slices, and
/// unpacking targets disqualify the assignment.
pub(crate) fn is_side_effect_free(node: &CstNode) -> bool {
    match node.kind.as_str() {
        "identifier" => true,
        "attribute" => node
            .child_by_field("object")
            .is_some_and(is_side_effect_free),
        "subscript" => {
            node.child_by_field("value").is_some_and(is_side_effect_free)
                && node.child_by_field("subscript").is_some_and(is_simple_index)
        }
        _ => false,
    }
}

fn is_simple_index(node: &CstNode) -> bool {
    matches!(
        node.kind.as_str(),
        "identifier" | "integer" | "float" | "string" | "true" | "false" | "none"
    )
}

/// Literals for which operand order is known not to matter under a
/// commutative operator. Strings are excluded: `x = "pre" + x` is not
/// equivalent to `x += "pre"`.
pub(crate) fn is_primitive_literal(node: &CstNode) -> bool {
    matches!(node.kind.as_str(), "integer" | "float" | "true" | "false")
}

impl Rule for NonAugmentedAssignment {
    fn name(&self) -> &'static str {
        "non-augmented-assignment"
    }

    fn metadata(&self) -> RuleMetadata {
        METADATA
    }

    fn check_node(
        &mut self,
        tree: &CstTree,
        node: &CstNode,
        context: &Context,
    ) -> Option<Vec<Finding>> {
        if node.kind != "assignment" {
            return None;
        }
        // Augmented assignments cannot carry a type annotation.
        if node.child_by_field("type").is_some() {
            return None;
        }

        let target = node.child_by_field("left")?;
        let value = node.child_by_field("right")?;
        if value.kind != "binary_operator" {
            return None;
        }

        // Operator whitelist: only operators with an augmented form.
        let op_node = value.child_by_field("operator")?;
        let op = BinaryOp::from_token(tree.node_text(op_node))?;

        if !is_side_effect_free(target) {
            return None;
        }

        let bin_left = value.child_by_field("left")?;
        let bin_right = value.child_by_field("right")?;

        let matches_canonical = nodes_equal(tree, target, bin_left);
        let matches_commutative = !matches_canonical
            && context.config.commutative_enabled()
            && op.is_commutative()
            && is_primitive_literal(bin_left)
            && nodes_equal(tree, target, bin_right);

        if !matches_canonical && !matches_commutative {
            return None;
        }

        let msg = format!(
            "Use `{}` to update `{}` in place",
            op.augmented(),
            tree.node_text(target)
        );
        Some(vec![create_finding(&msg, METADATA, context, node, "warning")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::CstParser;

    fn parse(source: &str) -> crate::cst::CstTree {
        let mut parser = CstParser::new().unwrap();
        parser.parse(source).unwrap()
    }

    fn target_of(tree: &crate::cst::CstTree) -> &CstNode {
        tree.find_assignments()[0].child_by_field("left").unwrap()
    }

    #[test]
    fn test_identifier_is_side_effect_free() {
        let tree = parse("x = 1\n");
        assert!(is_side_effect_free(target_of(&tree)));
    }

    #[test]
    fn test_attribute_chain_is_side_effect_free() {
        let tree = parse("a.b.c = 1\n");
        assert!(is_side_effect_free(target_of(&tree)));
    }

    #[test]
    fn test_subscript_with_simple_index_is_side_effect_free() {
        let tree = parse("d[key] = 1\n");
        assert!(is_side_effect_free(target_of(&tree)));
    }

    #[test]
    fn test_call_bearing_targets_are_rejected() {
        let tree = parse("f().x = 1\n");
        assert!(!is_side_effect_free(target_of(&tree)));

        let tree = parse("d[f()] = 1\n");
        assert!(!is_side_effect_free(target_of(&tree)));
    }

    #[test]
    fn test_primitive_literals() {
        let tree = parse("x = 1 + x\n");
        let bin = tree.find_assignments()[0].child_by_field("right").unwrap();
        assert!(is_primitive_literal(bin.child_by_field("left").unwrap()));

        let tree = parse("x = \"s\" + x\n");
        let bin = tree.find_assignments()[0].child_by_field("right").unwrap();
        assert!(!is_primitive_literal(bin.child_by_field("left").unwrap()));
    }
}
