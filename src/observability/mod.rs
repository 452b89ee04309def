//! Observability module
//!
//! Logging setup for the `taskgate` binary.

pub mod logging;

pub use logging::{LogFormat, init_logging};
