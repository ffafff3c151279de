//! Centralized Rule IDs for AugmentPy.

/// Quality: assignment restates its own target and can use an augmented
/// operator (`x = x + 1` -> `x += 1`)
pub const RULE_ID_NON_AUGMENTED: &str = "APY-Q001";
