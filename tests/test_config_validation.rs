mod common;

use common::TaskGateProcess;
use taskgate::config::{self, IpFamily, Switch};
use taskgate::error::ConfigError;

/// A fully populated file loads with every field normalized.
#[test]
fn valid_config_loads() {
    let result = config::load(&TaskGateProcess::fixture_path("valid.json")).unwrap();
    let config = &result.config;

    assert_eq!(config.listen(), ":8080");
    assert_eq!(config.real_ip_header(), Some("X-Real-IP"));
    assert_eq!(config.external_ip(), Some("203.0.113.7".parse().unwrap()));
    assert_eq!(config.external_ipv6(), Some("2001:db8::7".parse().unwrap()));
    assert_eq!(config.url_prefix(), "/ctl");
    assert!(config.allow_explicit_ips());
    assert_eq!(config.tasks().len(), 2);
    assert!(result.warnings.is_empty());

    let wifi = config.task("wifi").expect("wifi task");
    assert_eq!(wifi.name(), "WiFi");
    assert_eq!(
        wifi.command(IpFamily::V6, Switch::Off),
        Some("ipset del wifi6 {serverIP}")
    );
    assert!(wifi.uses_server_ip(IpFamily::V4));
    assert!(wifi.uses_server_ip(IpFamily::V6));

    let printer = config.task("Printer").expect("printer task");
    assert_eq!(printer.command(IpFamily::V6, Switch::On), None);
}

/// Unreadable paths surface the I/O failure.
#[test]
fn missing_file_is_file_read_error() {
    let err = config::load(&TaskGateProcess::fixture_path("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, ConfigError::FileRead { .. }), "{err:?}");
}

#[test]
fn directory_is_file_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = config::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::FileRead { .. }), "{err:?}");
}

#[test]
fn empty_tasks_rejected() {
    let err = config::load(&TaskGateProcess::fixture_path("no_tasks.json")).unwrap_err();
    assert!(matches!(err, ConfigError::NoTasks), "{err:?}");
}

#[test]
fn empty_task_name_rejected() {
    let err = config::load(&TaskGateProcess::fixture_path("missing_name.json")).unwrap_err();
    assert!(
        matches!(err, ConfigError::MissingTaskName { index: 1 }),
        "{err:?}"
    );
}

#[test]
fn slash_in_task_name_rejected() {
    let err = config::load(&TaskGateProcess::fixture_path("slash_name.json")).unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidTaskName { ref name, .. } if name == "a/b"),
        "{err:?}"
    );
}

#[test]
fn placeholder_without_external_ip_rejected() {
    let err = config::load(&TaskGateProcess::fixture_path("missing_server_ip.json")).unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::MissingServerIp {
                family: IpFamily::V4,
                ..
            }
        ),
        "{err:?}"
    );
}

#[test]
fn placeholder_without_external_ipv6_rejected() {
    let err =
        config::load(&TaskGateProcess::fixture_path("missing_server_ipv6.json")).unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::MissingServerIp {
                family: IpFamily::V6,
                ..
            }
        ),
        "{err:?}"
    );
}

#[test]
fn malformed_json_rejected_with_line() {
    let err = config::load(&TaskGateProcess::fixture_path("bad_json.json")).unwrap_err();
    match err {
        ConfigError::ParseError { line, .. } => assert_eq!(line, Some(4)),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn unparsable_ip_rejected() {
    let err = config::load(&TaskGateProcess::fixture_path("bad_ip.json")).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }), "{err:?}");
    assert!(err.to_string().contains("300.1.1.1"));
}

/// Tasks differing only in case collapse to the later one.
#[test]
fn duplicate_task_names_collapse() {
    let result = config::load(&TaskGateProcess::fixture_path("duplicate_tasks.json")).unwrap();
    assert_eq!(result.config.tasks().len(), 1);
    let foo = &result.config.tasks()["foo"];
    assert_eq!(foo.command(IpFamily::V4, Switch::On), Some("second"));
    assert_eq!(result.warnings.len(), 1);
}

/// The loaded configuration can be shared across threads.
#[test]
fn config_shared_across_threads() {
    let config = config::load(&TaskGateProcess::fixture_path("valid.json"))
        .unwrap()
        .config;
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = std::sync::Arc::clone(&config);
            std::thread::spawn(move || config.task("WIFI").map(|t| t.name().to_string()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("WiFi"));
    }
}

#[test]
fn suggestion_for_misspelled_task() {
    let config = config::load(&TaskGateProcess::fixture_path("valid.json"))
        .unwrap()
        .config;
    assert_eq!(config.suggest_task("wfi"), Some("wifi"));
    assert_eq!(config.suggest_task("completely-unrelated"), None);
}
