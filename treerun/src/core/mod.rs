//! Deterministic, pure logic for path derivation and selection.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod choice;
pub mod paths;
pub mod placeholder;
pub mod types;
pub mod value;
