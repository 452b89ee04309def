//! `taskgate` - configuration layer for an HTTP-triggered task-control service
//!
//! This library turns a JSON configuration file into a validated, immutable
//! [`config::Config`] that the HTTP and command-execution layers share.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
