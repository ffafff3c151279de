//! Byte-range safe source rewriter.
//!
//! Applies a batch of edits expressed against one source snapshot. Edits
//! carry absolute byte coordinates, so they stay valid regardless of the
//! order other edits in the same batch are applied in; `apply` sorts by
//! start position descending so earlier offsets are never shifted. Two
//! edits that overlap reference the same region of the snapshot twice,
//! which the upstream analyzer guarantees never happens, so overlap is
//! rejected as an error rather than resolved.

use thiserror::Error;

/// A single edit operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Replacement content
    pub replacement: String,
    /// Optional description for dry-run display
    pub label: Option<String>,
}

impl Edit {
    /// Create a new replacement edit
    #[must_use]
    pub fn new(start_byte: usize, end_byte: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
            label: None,
        }
    }

    /// Create an edit with a display label
    #[must_use]
    pub fn with_label(
        start_byte: usize,
        end_byte: usize,
        replacement: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
            label: Some(label.into()),
        }
    }

    /// Check if this edit overlaps with another
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }
}

/// Error during rewriting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// Two or more edits have overlapping ranges
    #[error("Overlapping edits at indices {edit_a} and {edit_b}")]
    OverlappingEdits {
        /// Index of first overlapping edit
        edit_a: usize,
        /// Index of second overlapping edit
        edit_b: usize,
    },
    /// Edit range is out of bounds
    #[error("Edit {edit_index} out of bounds: end_byte {end_byte} > source length {source_len}")]
    OutOfBounds {
        /// Index of the bad edit
        edit_index: usize,
        /// End byte of the edit
        end_byte: usize,
        /// Length of the source
        source_len: usize,
    },
}

/// Safe source rewriter using byte ranges
///
/// Validates that edits are in bounds and non-overlapping, then applies
/// them in reverse order to preserve byte positions.
#[derive(Debug, Clone)]
pub struct SourceRewriter {
    /// Original source snapshot
    source: String,
    /// Pending edits
    edits: Vec<Edit>,
}

impl SourceRewriter {
    /// Create a new rewriter for the given source snapshot
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            edits: Vec::new(),
        }
    }

    /// Add an edit to the pending list
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Add multiple edits
    pub fn add_edits(&mut self, edits: impl IntoIterator<Item = Edit>) {
        self.edits.extend(edits);
    }

    /// Get the number of pending edits
    #[must_use]
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }

    /// Check if there are any pending edits
    #[must_use]
    pub fn has_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Validate edits without applying them
    ///
    /// # Errors
    /// Returns error if edits overlap or are out of bounds
    pub fn validate(&self) -> Result<(), RewriteError> {
        for (i, edit) in self.edits.iter().enumerate() {
            if edit.end_byte > self.source.len() {
                return Err(RewriteError::OutOfBounds {
                    edit_index: i,
                    end_byte: edit.end_byte,
                    source_len: self.source.len(),
                });
            }
        }

        for i in 0..self.edits.len() {
            for j in (i + 1)..self.edits.len() {
                if self.edits[i].overlaps(&self.edits[j]) {
                    return Err(RewriteError::OverlappingEdits {
                        edit_a: i,
                        edit_b: j,
                    });
                }
            }
        }

        Ok(())
    }

    /// Apply all edits and return the modified source
    ///
    /// Edits are applied in reverse order (by start position) to preserve
    /// byte offsets as the string shrinks or grows.
    ///
    /// # Errors
    /// Returns error if edits overlap or are out of bounds
    pub fn apply(self) -> Result<String, RewriteError> {
        self.validate()?;

        let mut result = self.source;
        let mut sorted_edits = self.edits;

        sorted_edits.sort_by(|a, b| b.start_byte.cmp(&a.start_byte));

        for edit in sorted_edits {
            result.replace_range(edit.start_byte..edit.end_byte, &edit.replacement);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_replacement() {
        let source = "count = count + 1";
        let mut rewriter = SourceRewriter::new(source);
        rewriter.add_edit(Edit::new(6, 16, "+= "));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "count += 1");
    }

    #[test]
    fn test_multiple_non_overlapping_edits_any_order() {
        let source = "a = a + 1\nb = b * 2\n";
        let forward = {
            let mut rewriter = SourceRewriter::new(source);
            rewriter.add_edit(Edit::new(2, 8, "+= "));
            rewriter.add_edit(Edit::new(12, 18, "*= "));
            rewriter.apply().expect("should apply")
        };
        let backward = {
            let mut rewriter = SourceRewriter::new(source);
            rewriter.add_edit(Edit::new(12, 18, "*= "));
            rewriter.add_edit(Edit::new(2, 8, "+= "));
            rewriter.apply().expect("should apply")
        };

        assert_eq!(forward, "a += 1\nb *= 2\n");
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_overlapping_edits_error() {
        let source = "x = x + y + z";
        let mut rewriter = SourceRewriter::new(source);
        rewriter.add_edit(Edit::new(2, 8, "+="));
        rewriter.add_edit(Edit::new(6, 12, "*="));

        let result = rewriter.apply();
        assert!(matches!(
            result,
            Err(RewriteError::OverlappingEdits { edit_a: 0, edit_b: 1 })
        ));
    }

    #[test]
    fn test_out_of_bounds_error() {
        let source = "short";
        let mut rewriter = SourceRewriter::new(source);
        rewriter.add_edit(Edit::new(0, 100, "long"));

        let result = rewriter.apply();
        assert!(matches!(result, Err(RewriteError::OutOfBounds { .. })));
    }

    #[test]
    fn test_adjacent_edits_are_not_overlapping() {
        let source = "abcdef";
        let mut rewriter = SourceRewriter::new(source);
        rewriter.add_edit(Edit::new(0, 3, "XXX"));
        rewriter.add_edit(Edit::new(3, 6, "YYY"));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "XXXYYY");
    }

    #[test]
    fn test_empty_edits_returns_source_unchanged() {
        let source = "x = x + 1";
        let rewriter = SourceRewriter::new(source);
        assert!(!rewriter.has_edits());
        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, source);
    }

    #[test]
    fn test_label_is_carried() {
        let edit = Edit::with_label(0, 1, "y", "x -> y");
        assert_eq!(edit.label.as_deref(), Some("x -> y"));
    }
}
