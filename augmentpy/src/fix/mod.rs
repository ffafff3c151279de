//! Rewrite engine: trivia-preserving replacement of redundant
//! self-referential assignments with their augmented form.
//!
//! `rewriter` is the editing substrate: it composes a batch of byte-range
//! edits against one source snapshot. `compound` holds the core transform
//! and the fix-one / fix-all entry points built on top of it.

mod compound;
mod rewriter;

pub use compound::{
    fix_all, fix_one, try_compound, CancelFlag, FixError, FixOutcome,
};
pub use rewriter::{Edit, RewriteError, SourceRewriter};
