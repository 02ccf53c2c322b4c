//! I/O helpers: config, prompts, console output, filesystem and processes.

pub mod config;
pub mod console;
pub mod existence;
pub mod plant;
pub mod prompt;
pub mod run_log;
pub mod shell;
