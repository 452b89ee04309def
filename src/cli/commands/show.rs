//! `show` command
//!
//! Prints the normalized configuration, or a single task from it.

use std::fmt::Write as _;

use crate::cli::args::{OutputFormat, ShowArgs};
use crate::config::{self, Config, IpFamily, Switch, Task};
use crate::error::TaskGateError;

/// Load a configuration file and print it.
///
/// # Errors
///
/// Returns a config error if the file does not load, or
/// [`TaskGateError::UnknownTask`] if `--task` names no configured task.
pub fn run(args: &ShowArgs) -> Result<(), TaskGateError> {
    tracing::info!(config = %args.config.display(), "loading configuration");
    let result = config::load(&args.config)?;
    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }
    let config = result.config;

    if let Some(name) = &args.task {
        let task = config
            .task(name)
            .ok_or_else(|| TaskGateError::UnknownTask {
                name: name.clone(),
                suggestion: config.suggest_task(name).map(str::to_string),
            })?;
        match args.format {
            OutputFormat::Human => print!("{}", render_task(task)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(task)?),
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Human => print!("{}", render_config(&config)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&*config)?),
    }
    Ok(())
}

fn or_none(value: Option<String>) -> String {
    value.unwrap_or_else(|| "(none)".to_string())
}

/// Renders the whole configuration as an aligned key/value listing.
#[must_use]
pub fn render_config(config: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "listen:             {}", config.listen());
    let _ = writeln!(
        out,
        "real_ip_header:     {}",
        or_none(config.real_ip_header().map(str::to_string))
    );
    let _ = writeln!(
        out,
        "external_ip:        {}",
        or_none(config.external_ip().map(|ip| ip.to_string()))
    );
    let _ = writeln!(
        out,
        "external_ipv6:      {}",
        or_none(config.external_ipv6().map(|ip| ip.to_string()))
    );
    let _ = writeln!(out, "url_prefix:         {}", config.url_prefix());
    let _ = writeln!(out, "allow_explicit_ips: {}", config.allow_explicit_ips());
    let _ = writeln!(out, "tasks ({}):", config.tasks().len());
    for (key, task) in config.tasks() {
        let _ = writeln!(out, "  {key} ({})", task.name());
        for line in render_commands(task) {
            let _ = writeln!(out, "    {line}");
        }
    }
    out
}

/// Renders a single task with all configured templates.
#[must_use]
pub fn render_task(task: &Task) -> String {
    let mut out = format!("{}\n", task.name());
    for line in render_commands(task) {
        let _ = writeln!(out, "  {line}");
    }
    out
}

fn render_commands(task: &Task) -> Vec<String> {
    let mut lines = Vec::new();
    for family in IpFamily::ALL {
        for switch in Switch::ALL {
            if let Some(command) = task.command(family, switch) {
                lines.push(format!("{family} {switch:<3} {command}"));
            }
        }
    }
    if lines.is_empty() {
        lines.push("(no commands)".to_string());
    }
    lines
}
