//! Configuration schema types
//!
//! Two layers live here:
//! - the raw shape ([`RawConfig`], [`RawTask`]) deserialized straight from
//!   the JSON file, where every field is optional;
//! - the validated shape ([`Config`], [`Task`]) handed to the rest of the
//!   service, which is immutable once built.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Placeholder substituted with the server's own address at execution time.
pub const SERVER_IP_PLACEHOLDER: &str = "{serverIP}";

// ============================================================================
// Raw Configuration
// ============================================================================

/// Configuration document as it appears on disk.
///
/// Absent and `null` fields both deserialize to `None`; unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RawConfig {
    /// Address (`host:port` or `:port`) the HTTP layer binds to
    #[serde(default)]
    pub listen: Option<String>,

    /// Request header carrying the client's real IP behind a proxy
    #[serde(default)]
    pub real_ip_header: Option<String>,

    /// The server's own IPv4 address
    #[serde(default, deserialize_with = "optional_ip")]
    pub external_ip: Option<Ipv4Addr>,

    /// The server's own IPv6 address
    #[serde(default, deserialize_with = "optional_ip")]
    pub external_ipv6: Option<Ipv6Addr>,

    /// Task definitions in file order
    #[serde(default)]
    pub tasks: Option<Vec<RawTask>>,

    /// URL path prefix for task endpoints
    #[serde(default)]
    pub url_prefix: Option<String>,

    /// Whether clients may pass an explicit IP instead of their own
    #[serde(default)]
    pub allow_explicit_ips: Option<bool>,
}

impl RawConfig {
    /// Returns the configured server address for `family`, if any.
    #[must_use]
    pub fn server_ip(&self, family: IpFamily) -> Option<IpAddr> {
        match family {
            IpFamily::V4 => self.external_ip.map(IpAddr::V4),
            IpFamily::V6 => self.external_ipv6.map(IpAddr::V6),
        }
    }
}

/// A single task record as it appears on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RawTask {
    /// Task name (required, must not contain `/`)
    #[serde(default)]
    pub name: Option<String>,

    /// IPv4 turn-on command template
    #[serde(default)]
    pub turn_on: Option<String>,

    /// IPv4 turn-off command template
    #[serde(default)]
    pub turn_off: Option<String>,

    /// IPv6 turn-on command template
    #[serde(default)]
    pub turn_on_ipv6: Option<String>,

    /// IPv6 turn-off command template
    #[serde(default)]
    pub turn_off_ipv6: Option<String>,
}

impl RawTask {
    /// Converts the record into a validated [`Task`].
    #[must_use]
    pub fn into_task(self) -> Task {
        Task {
            name: self.name.unwrap_or_default(),
            turn_on: self.turn_on.unwrap_or_default(),
            turn_off: self.turn_off.unwrap_or_default(),
            turn_on_ipv6: self.turn_on_ipv6.unwrap_or_default(),
            turn_off_ipv6: self.turn_off_ipv6.unwrap_or_default(),
        }
    }
}

/// Deserializes an optional IP literal of type `T`.
///
/// `null` and the empty string both mean "unset".
fn optional_ip<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(literal) => literal.parse::<T>().map(Some).map_err(|e| {
            serde::de::Error::custom(format!("invalid IP address '{literal}': {e}"))
        }),
    }
}

// ============================================================================
// Address Family / Switch
// ============================================================================

/// IP address family a command template applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IpFamily {
    /// IPv4 templates, paired with `external_ip`
    V4,
    /// IPv6 templates, paired with `external_ipv6`
    V6,
}

impl IpFamily {
    /// Both families, IPv4 first.
    pub const ALL: [Self; 2] = [Self::V4, Self::V6];

    /// Name of the configuration field holding the server address for
    /// this family.
    #[must_use]
    pub const fn config_field(self) -> &'static str {
        match self {
            Self::V4 => "external_ip",
            Self::V6 => "external_ipv6",
        }
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => f.pad("IPv4"),
            Self::V6 => f.pad("IPv6"),
        }
    }
}

/// Which of a task's two actions a template performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Switch {
    /// Turn the task on
    On,
    /// Turn the task off
    Off,
}

impl Switch {
    /// Both actions, on first.
    pub const ALL: [Self; 2] = [Self::On, Self::Off];
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.pad("on"),
            Self::Off => f.pad("off"),
        }
    }
}

// ============================================================================
// Validated Task
// ============================================================================

/// A named unit with up to four command templates.
///
/// Empty templates are treated as not configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    turn_on: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    turn_off: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    turn_on_ipv6: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    turn_off_ipv6: String,
}

impl Task {
    /// Display name, in the casing used in the configuration file.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the command template for the given slot, or `None` when the
    /// slot is empty.
    #[must_use]
    pub fn command(&self, family: IpFamily, switch: Switch) -> Option<&str> {
        let template = match (family, switch) {
            (IpFamily::V4, Switch::On) => &self.turn_on,
            (IpFamily::V4, Switch::Off) => &self.turn_off,
            (IpFamily::V6, Switch::On) => &self.turn_on_ipv6,
            (IpFamily::V6, Switch::Off) => &self.turn_off_ipv6,
        };
        (!template.is_empty()).then_some(template.as_str())
    }

    /// Returns `true` if either template of `family` contains
    /// [`SERVER_IP_PLACEHOLDER`].
    #[must_use]
    pub fn uses_server_ip(&self, family: IpFamily) -> bool {
        Switch::ALL.iter().any(|&switch| {
            self.command(family, switch)
                .is_some_and(|t| t.contains(SERVER_IP_PLACEHOLDER))
        })
    }

    /// Returns `true` if at least one template is configured.
    #[must_use]
    pub fn has_commands(&self) -> bool {
        IpFamily::ALL.iter().any(|&family| {
            Switch::ALL
                .iter()
                .any(|&switch| self.command(family, switch).is_some())
        })
    }
}

// ============================================================================
// Validated Configuration
// ============================================================================

/// The immutable, validated result of loading a configuration file.
///
/// Built only by the loader; every accessor is read-only, so a shared
/// `Arc<Config>` can be read from any number of threads without locking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub(crate) listen: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) real_ip_header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) external_ip: Option<Ipv4Addr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) external_ipv6: Option<Ipv6Addr>,
    pub(crate) url_prefix: String,
    pub(crate) allow_explicit_ips: bool,
    pub(crate) tasks: IndexMap<String, Task>,
}

impl Config {
    /// Address the HTTP layer binds to.
    #[must_use]
    pub fn listen(&self) -> &str {
        &self.listen
    }

    /// Header carrying the client's real IP, if configured.
    #[must_use]
    pub fn real_ip_header(&self) -> Option<&str> {
        self.real_ip_header.as_deref()
    }

    /// The server's own IPv4 address.
    #[must_use]
    pub const fn external_ip(&self) -> Option<Ipv4Addr> {
        self.external_ip
    }

    /// The server's own IPv6 address.
    #[must_use]
    pub const fn external_ipv6(&self) -> Option<Ipv6Addr> {
        self.external_ipv6
    }

    /// The server's own address for `family`.
    #[must_use]
    pub fn server_ip(&self, family: IpFamily) -> Option<IpAddr> {
        match family {
            IpFamily::V4 => self.external_ip.map(IpAddr::V4),
            IpFamily::V6 => self.external_ipv6.map(IpAddr::V6),
        }
    }

    /// URL prefix, empty or starting with `/`.
    #[must_use]
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Whether clients may name an explicit IP instead of their own.
    #[must_use]
    pub const fn allow_explicit_ips(&self) -> bool {
        self.allow_explicit_ips
    }

    /// All tasks keyed by lowercased name.
    #[must_use]
    pub const fn tasks(&self) -> &IndexMap<String, Task> {
        &self.tasks
    }

    /// Looks up a task by name, ignoring case.
    #[must_use]
    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.get(&task_key(name))
    }

    /// Returns the task key closest to `name`, for "did you mean" hints.
    ///
    /// Only keys within a Damerau-Levenshtein distance of 3 are suggested.
    #[must_use]
    pub fn suggest_task(&self, name: &str) -> Option<&str> {
        let needle = task_key(name);
        self.tasks
            .keys()
            .map(|key| (key.as_str(), strsim::damerau_levenshtein(&needle, key)))
            .filter(|(_, distance)| *distance <= 3)
            .min_by_key(|(_, distance)| *distance)
            .map(|(key, _)| key)
    }
}

/// Normalized lookup key for a task name.
#[must_use]
pub fn task_key(name: &str) -> String {
    name.to_lowercase()
}

// ============================================================================
// Tests
// ============================================================================
