//! Shared integration-test harness for running the `taskgate` binary and
//! locating fixtures.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Helpers for invoking the built `taskgate` binary.
pub struct TaskGateProcess;

impl TaskGateProcess {
    /// Runs `taskgate` with the given arguments and waits for it to exit.
    ///
    /// `TASKGATE_LOG_LEVEL` and `TASKGATE_CONFIG` are cleared so the host
    /// environment cannot change the outcome.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Self::spawn_command_with_env(args, &[])
    }

    /// Runs `taskgate` with extra environment variables.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
        let bin = env!("CARGO_BIN_EXE_taskgate");
        let mut cmd = Command::new(bin);
        cmd.args(args)
            .env_remove("TASKGATE_LOG_LEVEL")
            .env_remove("TASKGATE_CONFIG")
            .env("NO_COLOR", "1");
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.output().expect("failed to spawn taskgate")
    }

    /// Returns the path to a test fixture.
    #[must_use]
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }
}
