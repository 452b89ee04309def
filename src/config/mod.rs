//! Configuration module
//!
//! Handles loading and validation of `taskgate` configuration files: the
//! listen address, server addresses, URL prefix and the task table.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{LoadResult, LoadWarning, load, load_from_str, normalize_url_prefix};
pub use schema::{Config, IpFamily, SERVER_IP_PLACEHOLDER, Switch, Task};
pub use validation::Validator;
