//! Structural equality over CST nodes.

use super::parser::{CstNode, CstTree};

/// Compares two subtrees structurally: same kinds, same shape, identical
/// leaf spellings. Spans and interleaved `comment` nodes are ignored, so
/// `foo.bar` and `foo . bar` compare equal while `foo.bar` and `foo.baz`
/// do not.
#[must_use]
pub fn nodes_equal(tree: &CstTree, a: &CstNode, b: &CstNode) -> bool {
    if a.kind != b.kind {
        return false;
    }

    let a_children: Vec<&CstNode> = a.children.iter().filter(|c| c.kind != "comment").collect();
    let b_children: Vec<&CstNode> = b.children.iter().filter(|c| c.kind != "comment").collect();

    if a_children.is_empty() && b_children.is_empty() {
        return tree.node_text(a) == tree.node_text(b);
    }

    a_children.len() == b_children.len()
        && a_children
            .iter()
            .zip(&b_children)
            .all(|(ca, cb)| nodes_equal(tree, ca, cb))
}
