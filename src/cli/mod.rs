//! Command-line interface
//!
//! Argument definitions and command handlers for the `taskgate` binary.

pub mod args;
pub mod commands;
