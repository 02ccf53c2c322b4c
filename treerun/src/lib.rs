//! Run one shell command across a leveled directory tree.
//!
//! A YAML file declares the tree as ordered levels of sibling directory names,
//! plus named modes (command templates). `trn` asks which branch of each level
//! and which mode to use, derives the Cartesian product of run paths, checks
//! them on disk, submits the command in each and reports the outcome.
//!
//! - **[`core`]**: Pure, deterministic logic (placeholders, path generation and
//!   grafting, answer validation, mode normalization). No I/O.
//! - **[`io`]**: Side-effecting operations (config loading, prompts, console
//!   output, existence checks, shell execution, the run log).
//!
//! Orchestration modules ([`select`], [`climb`]) coordinate core logic with I/O
//! to implement the CLI.

pub mod climb;
pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod select;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
