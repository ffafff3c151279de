//! Core library for the AugmentPy linter and auto-fixer.
//!
//! AugmentPy finds Python assignments that restate their own target
//! (`x = x + 1`) and rewrites them to the augmented form (`x += 1`),
//! preserving the formatting around the rewritten operator. The pipeline:
//! the linter walks a tree-sitter CST and emits findings; the rewrite
//! engine resolves each finding back to its assignment node and composes
//! all rewrites for one document as a single batch of byte-range edits.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;

/// Module for loading configuration.
pub mod config;

/// Module containing shared constants.
pub mod constants;

/// Module wrapping the tree-sitter CST substrate.
pub mod cst;

/// Module defining the entry point logic shared by the binaries.
pub mod entry_point;

/// Module containing the rewrite engine: core transform, fix-one/fix-all,
/// and the byte-range edit rewriter.
pub mod fix;

/// Module containing the linter driver.
pub mod linter;

/// Module containing the operator tables.
pub mod ops;

/// Module for CLI output formatting.
pub mod output;

/// Module containing the rule infrastructure and rule implementations.
pub mod rules;

/// Module containing utility functions.
pub mod utils;
