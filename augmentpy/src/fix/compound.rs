//! Core transform: rewrite `target = target OP value` into `target OP= value`.
//!
//! The transform is pure. It decomposes the flagged assignment node, maps
//! the inner operator through the tables in [`crate::ops`], and produces a
//! single byte-range [`Edit`] whose replacement keeps the formatting that
//! surrounded the `=` separator. Batched fixes queue all edits against one
//! parsed snapshot and apply them in a single pass, so the order findings
//! are submitted in never matters.

use crate::cst::{nodes_equal, CstError, CstNode, CstParser, CstTree};
use crate::ops::BinaryOp;
use crate::rules::Finding;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

use super::rewriter::{Edit, RewriteError, SourceRewriter};

/// Error during fixing
#[derive(Debug, Error)]
pub enum FixError {
    /// The document could not be parsed
    #[error(transparent)]
    Parse(#[from] CstError),
    /// Queued edits failed validation
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
    /// The rewritten document no longer parses; the original is kept
    #[error("rewritten source no longer parses; refusing to replace the document")]
    InvalidRewrite,
}

/// Cooperative cancellation signal, checked between findings and before
/// the batch is applied. A cancelled fix returns the document unchanged.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a flag in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of a fix operation
#[derive(Debug)]
pub struct FixOutcome {
    /// The resulting document (unchanged if nothing applied or cancelled)
    pub source: String,
    /// Number of findings rewritten
    pub applied: usize,
    /// Number of findings that no longer resolved to a rewritable node
    pub skipped: usize,
    /// Whether the operation was cancelled before applying
    pub cancelled: bool,
}

/// The three logical parts of a plain assignment: `target = value`.
struct AssignmentParts<'t> {
    target: &'t CstNode,
    separator: &'t CstNode,
    value: &'t CstNode,
}

fn assignment_parts(node: &CstNode) -> Option<AssignmentParts<'_>> {
    if node.kind != "assignment" {
        return None;
    }
    // An annotated assignment has no augmented form.
    if node.child_by_field("type").is_some() {
        return None;
    }
    Some(AssignmentParts {
        target: node.child_by_field("left")?,
        separator: node.token_child("=")?,
        value: node.child_by_field("right")?,
    })
}

/// The three logical parts of a binary expression: `left OP right`.
struct BinaryParts<'t> {
    left: &'t CstNode,
    operator: &'t CstNode,
    right: &'t CstNode,
}

fn binary_parts(node: &CstNode) -> Option<BinaryParts<'_>> {
    if node.kind != "binary_operator" {
        return None;
    }
    Some(BinaryParts {
        left: node.child_by_field("left")?,
        operator: node.child_by_field("operator")?,
        right: node.child_by_field("right")?,
    })
}

/// Builds the augmented-assignment edit for one flagged assignment node.
///
/// Returns `None` when the node does not have the guaranteed
/// `target = target OP value` shape (an upstream contract violation): the
/// document is then left unchanged rather than rewritten wrongly.
#[must_use]
pub fn try_compound(tree: &CstTree, assignment: &CstNode) -> Option<Edit> {
    let parts = assignment_parts(assignment)?;
    let bin = binary_parts(parts.value)?;

    let op = BinaryOp::from_token(tree.node_text(bin.operator));
    debug_assert!(op.is_some(), "operator outside the compoundable set");
    let token = op?.augmented().token();

    // Formatting that followed the `=` separator carries over to the new
    // operator, so the rewrite is invisible except for the spelling.
    let lead = tree.slice(parts.separator.end_byte, parts.value.start_byte);

    if nodes_equal(tree, parts.target, bin.left) {
        // target = target OP rest  ->  target OP= rest
        Some(Edit::with_label(
            parts.separator.start_byte,
            bin.right.start_byte,
            format!("{token}{lead}"),
            token,
        ))
    } else if op?.is_commutative() && nodes_equal(tree, parts.target, bin.right) {
        // target = operand OP target  ->  target OP= operand
        Some(Edit::with_label(
            parts.separator.start_byte,
            parts.value.end_byte,
            format!("{token}{lead}{}", tree.node_text(bin.left)),
            token,
        ))
    } else {
        debug_assert!(false, "assignment does not restate its target");
        None
    }
}

/// Resolves a finding's recorded span back to exactly one assignment node
/// in the current tree. Fails if the document drifted since analysis.
fn resolve_assignment<'t>(tree: &'t CstTree, finding: &Finding) -> Option<&'t CstNode> {
    let node = tree
        .root
        .find_smallest_covering(finding.start_byte, finding.end_byte)?;
    (node.kind == "assignment"
        && node.start_byte == finding.start_byte
        && node.end_byte == finding.end_byte)
        .then_some(node)
}

/// Applies every finding's rewrite to one document in a single pass.
///
/// The document is parsed once; every replacement is expressed against
/// that snapshot's byte coordinates, so no edit can observe a stale node
/// from a partially-rewritten tree. Findings that fail to resolve are
/// counted as skipped and the rest still apply.
///
/// # Errors
///
/// Returns an error if the document cannot be parsed, if two findings
/// produce overlapping edits (an analyzer contract violation), or if the
/// rewritten document would no longer parse.
pub fn fix_all(
    source: &str,
    findings: &[Finding],
    cancel: Option<&CancelFlag>,
) -> Result<FixOutcome, FixError> {
    let unchanged = |skipped: usize, cancelled: bool| FixOutcome {
        source: source.to_owned(),
        applied: 0,
        skipped,
        cancelled,
    };

    let mut parser = CstParser::new()?;
    let tree = parser.parse(source)?;

    let mut rewriter = SourceRewriter::new(source);
    let mut skipped = 0;

    for finding in findings {
        if cancel.is_some_and(CancelFlag::is_cancelled) {
            return Ok(unchanged(0, true));
        }
        match resolve_assignment(&tree, finding).and_then(|node| try_compound(&tree, node)) {
            Some(edit) => rewriter.add_edit(edit),
            None => skipped += 1,
        }
    }

    if cancel.is_some_and(CancelFlag::is_cancelled) {
        return Ok(unchanged(0, true));
    }
    if !rewriter.has_edits() {
        return Ok(unchanged(skipped, false));
    }

    let applied = rewriter.edit_count();
    let fixed = rewriter.apply()?;

    // Never hand back a document that stopped parsing.
    let check = parser.parse(&fixed)?;
    if check.has_error() && !tree.has_error() {
        return Err(FixError::InvalidRewrite);
    }

    Ok(FixOutcome {
        source: fixed,
        applied,
        skipped,
        cancelled: false,
    })
}

/// Applies a single finding's rewrite. Equivalent to a one-element batch.
///
/// # Errors
///
/// Same conditions as [`fix_all`].
pub fn fix_one(source: &str, finding: &Finding) -> Result<FixOutcome, FixError> {
    fix_all(source, std::slice::from_ref(finding), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::linter::lint_source;
    use std::path::PathBuf;

    fn lint(source: &str) -> Vec<Finding> {
        lint_source(&PathBuf::from("test.py"), source, &Config::default()).unwrap()
    }

    fn fix(source: &str) -> String {
        let findings = lint(source);
        fix_all(source, &findings, None).unwrap().source
    }

    #[test]
    fn test_basic_rewrite() {
        assert_eq!(fix("x = x + 1\n"), "x += 1\n");
    }

    #[test]
    fn test_rewrite_preserves_spacing_around_operator() {
        assert_eq!(fix("x   =   x + y\n"), "x   +=   y\n");
        assert_eq!(fix("x =x + y\n"), "x +=y\n");
    }

    #[test]
    fn test_rewrite_preserves_trailing_comment() {
        assert_eq!(
            fix("total = total + tax  # adjust\n"),
            "total += tax  # adjust\n"
        );
    }

    #[test]
    fn test_rewrite_keeps_rest_of_document_untouched() {
        let source = "import math\n\n\ndef area(r):\n    a = r * r\n    a = a * math.pi\n    return a\n";
        let fixed = fix(source);
        assert_eq!(
            fixed,
            "import math\n\n\ndef area(r):\n    a = r * r\n    a *= math.pi\n    return a\n"
        );
    }

    #[test]
    fn test_commutative_rewrite() {
        assert_eq!(fix("x = 1 + x\n"), "x += 1\n");
        assert_eq!(fix("flags = 4 | flags\n"), "flags |= 4\n");
    }

    #[test]
    fn test_every_operator_rewrites() {
        let cases = [
            ("x = x + y\n", "x += y\n"),
            ("x = x - y\n", "x -= y\n"),
            ("x = x * y\n", "x *= y\n"),
            ("x = x / y\n", "x /= y\n"),
            ("x = x // y\n", "x //= y\n"),
            ("x = x % y\n", "x %= y\n"),
            ("x = x ** y\n", "x **= y\n"),
            ("x = x @ y\n", "x @= y\n"),
            ("x = x & y\n", "x &= y\n"),
            ("x = x | y\n", "x |= y\n"),
            ("x = x ^ y\n", "x ^= y\n"),
            ("x = x << y\n", "x <<= y\n"),
            ("x = x >> y\n", "x >>= y\n"),
        ];
        for (source, expected) in cases {
            assert_eq!(fix(source), expected, "source: {source}");
        }
    }

    #[test]
    fn test_batch_independence() {
        let source = "a = a + 1\nb = b * 2\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 2);

        let forward = fix_all(source, &findings, None).unwrap();
        let mut reversed_findings = findings.clone();
        reversed_findings.reverse();
        let backward = fix_all(source, &reversed_findings, None).unwrap();

        assert_eq!(forward.source, "a += 1\nb *= 2\n");
        assert_eq!(forward.source, backward.source);
        assert_eq!(forward.applied, 2);
        assert_eq!(backward.applied, 2);
    }

    #[test]
    fn test_fix_is_idempotent() {
        let fixed = fix("x = x + 1\ny = y * 2\n");
        assert_eq!(fixed, "x += 1\ny *= 2\n");
        assert!(lint(&fixed).is_empty());
    }

    #[test]
    fn test_fix_one_only_touches_its_finding() {
        let source = "a = a + 1\nb = b * 2\n";
        let findings = lint(source);
        let outcome = fix_one(source, &findings[1]).unwrap();
        assert_eq!(outcome.source, "a = a + 1\nb *= 2\n");
        assert_eq!(outcome.applied, 1);
    }

    #[test]
    fn test_stale_finding_is_skipped_and_document_unchanged() {
        let source = "x = x + 1\n";
        let findings = lint(source);

        // The document changed after analysis; the recorded span no longer
        // resolves to an assignment node.
        let drifted = "value = value + 1  # renamed\n";
        let outcome = fix_all(drifted, &findings, None).unwrap();
        assert_eq!(outcome.source, drifted);
        assert_eq!(outcome.applied, 0);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_cancellation_returns_document_unchanged() {
        let source = "a = a + 1\nb = b * 2\n";
        let findings = lint(source);

        let cancel = CancelFlag::new();
        cancel.cancel();
        let outcome = fix_all(source, &findings, Some(&cancel)).unwrap();
        assert!(outcome.cancelled);
        assert_eq!(outcome.source, source);
        assert_eq!(outcome.applied, 0);
    }

    #[test]
    fn test_empty_findings_is_a_no_op() {
        let source = "x = y + z\n";
        let outcome = fix_all(source, &[], None).unwrap();
        assert_eq!(outcome.source, source);
        assert_eq!(outcome.applied, 0);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_try_compound_directly() {
        let mut parser = CstParser::new().unwrap();
        let tree = parser.parse("count = count + 1\n").unwrap();
        let assignment = tree.find_assignments()[0];

        let edit = try_compound(&tree, assignment).unwrap();
        assert_eq!(edit.label.as_deref(), Some("+="));

        let mut rewriter = SourceRewriter::new(tree.source.clone());
        rewriter.add_edit(edit);
        assert_eq!(rewriter.apply().unwrap(), "count += 1\n");
    }
}
