//! Operator tables for the augmented-assignment rewrite.
//!
//! Two total mappings over closed sets: binary operator to its augmented
//! form, and augmented form to the token spelling spliced into the source.
//! Both are exhaustive `const` matches, so the composition
//! `BinaryOp -> AugmentedOp -> token` cannot fail for any supported operator.

use std::fmt;

/// A Python binary operator that can be folded into an augmented assignment.
///
/// Comparison, boolean, and membership operators are deliberately absent:
/// `from_token` returning `None` is the operator whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+` (also string/list concatenation)
    Add,
    /// `-`
    Sub,
    /// `*`
    Mult,
    /// `/`
    Div,
    /// `//`
    FloorDiv,
    /// `%`
    Mod,
    /// `**`
    Pow,
    /// `@`
    MatMult,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `<<`
    LShift,
    /// `>>`
    RShift,
}

/// The augmented-assignment form of a [`BinaryOp`], in 1:1 correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum AugmentedOp {
    AddAssign,
    SubAssign,
    MultAssign,
    DivAssign,
    FloorDivAssign,
    ModAssign,
    PowAssign,
    MatMultAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    LShiftAssign,
    RShiftAssign,
}

/// All supported binary operators, for totality checks and tests.
pub const ALL_BINARY_OPS: [BinaryOp; 13] = [
    BinaryOp::Add,
    BinaryOp::Sub,
    BinaryOp::Mult,
    BinaryOp::Div,
    BinaryOp::FloorDiv,
    BinaryOp::Mod,
    BinaryOp::Pow,
    BinaryOp::MatMult,
    BinaryOp::BitAnd,
    BinaryOp::BitOr,
    BinaryOp::BitXor,
    BinaryOp::LShift,
    BinaryOp::RShift,
];

impl BinaryOp {
    /// Parses an operator token as it appears in source. Returns `None` for
    /// any token outside the compoundable set.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mult),
            "/" => Some(Self::Div),
            "//" => Some(Self::FloorDiv),
            "%" => Some(Self::Mod),
            "**" => Some(Self::Pow),
            "@" => Some(Self::MatMult),
            "&" => Some(Self::BitAnd),
            "|" => Some(Self::BitOr),
            "^" => Some(Self::BitXor),
            "<<" => Some(Self::LShift),
            ">>" => Some(Self::RShift),
            _ => None,
        }
    }

    /// The token spelling of the operator itself.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mult => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::MatMult => "@",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::LShift => "<<",
            Self::RShift => ">>",
        }
    }

    /// Maps the binary operator to its augmented-assignment form.
    #[must_use]
    pub const fn augmented(self) -> AugmentedOp {
        match self {
            Self::Add => AugmentedOp::AddAssign,
            Self::Sub => AugmentedOp::SubAssign,
            Self::Mult => AugmentedOp::MultAssign,
            Self::Div => AugmentedOp::DivAssign,
            Self::FloorDiv => AugmentedOp::FloorDivAssign,
            Self::Mod => AugmentedOp::ModAssign,
            Self::Pow => AugmentedOp::PowAssign,
            Self::MatMult => AugmentedOp::MatMultAssign,
            Self::BitAnd => AugmentedOp::BitAndAssign,
            Self::BitOr => AugmentedOp::BitOrAssign,
            Self::BitXor => AugmentedOp::BitXorAssign,
            Self::LShift => AugmentedOp::LShiftAssign,
            Self::RShift => AugmentedOp::RShiftAssign,
        }
    }

    /// Whether swapping the operands preserves meaning for primitive
    /// operands. Used to also rewrite `x = 1 + x` as `x += 1`.
    #[must_use]
    pub const fn is_commutative(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Mult | Self::BitAnd | Self::BitOr | Self::BitXor
        )
    }
}

impl AugmentedOp {
    /// The token spelling to splice into the rewritten assignment.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MultAssign => "*=",
            Self::DivAssign => "/=",
            Self::FloorDivAssign => "//=",
            Self::ModAssign => "%=",
            Self::PowAssign => "**=",
            Self::MatMultAssign => "@=",
            Self::BitAndAssign => "&=",
            Self::BitOrAssign => "|=",
            Self::BitXorAssign => "^=",
            Self::LShiftAssign => "<<=",
            Self::RShiftAssign => ">>=",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl fmt::Display for AugmentedOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
