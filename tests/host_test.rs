//! Host environment selection integration tests.

use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use veranda::config::EnvironmentSettings;
use veranda::events::EnvEvent;
use veranda::host::{Environment, Host, HostLevel, Machine};
use veranda::VerandaError;

fn production_like() -> Environment {
    let mut env = Environment::new(EnvironmentSettings {
        bootstrap_dir: None,
        strict_bootstrap: true,
    });
    env.add_host("dev", Host::new(HostLevel::Dev).with_pattern("dev*"));
    env.add_host(
        "prod",
        Host::new(HostLevel::Prod).with_patterns(["web*", "app*"]),
    );
    env.add_host("qa", Host::new(HostLevel::Qa).with_pattern("qa*"));
    env
}

#[test]
fn wildcard_pattern_selects_matching_host() {
    let mut env = production_like();
    env.initialize(&Machine::new("web-01")).unwrap();

    assert_eq!(env.current().unwrap().key(), "prod");
    assert!(env.is("prod"));
    assert!(env.is_production());
    assert!(!env.is_development());
}

#[test]
fn non_matching_hostname_falls_back() {
    let mut env = production_like();
    env.initialize(&Machine::new("db-01")).unwrap();

    // dev registered first, so it is the fallback
    assert_eq!(env.current().unwrap().key(), "dev");
    assert!(env.is_development());
}

#[test]
fn fallback_selected_exactly_once_with_events() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let mut env = production_like();
    env.set_fallback("qa").unwrap();

    let sink = Arc::clone(&events);
    env.events_mut()
        .subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    env.initialize(&Machine::new("db-01")).unwrap();

    let events = events.lock().unwrap();
    assert_eq!(
        *events,
        vec![
            EnvEvent::FallbackSelected { host: "qa".into() },
            EnvEvent::Initialized { host: "qa".into() },
        ]
    );
    assert!(env.is_qa());
}

#[test]
fn bootstrap_files_load_per_host_overrides() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("prod.json"),
        r#"{"db_host": "db.internal", "debug": false}"#,
    )
    .unwrap();

    let mut env = Environment::new(EnvironmentSettings {
        bootstrap_dir: Some(temp.path().to_path_buf()),
        strict_bootstrap: true,
    });
    env.add_host("prod", Host::new(HostLevel::Prod).with_pattern("web*"));

    env.initialize(&Machine::new("web-01")).unwrap();

    assert_eq!(
        env.overrides().get("db_host"),
        Some(&serde_json::json!("db.internal"))
    );
}

#[test]
fn strict_mode_fails_on_missing_bootstrap() {
    let temp = TempDir::new().unwrap();
    let mut env = Environment::new(EnvironmentSettings {
        bootstrap_dir: Some(temp.path().to_path_buf()),
        strict_bootstrap: true,
    });
    env.add_host("prod", Host::new(HostLevel::Prod).with_pattern("web*"));

    let err = env.initialize(&Machine::new("web-01")).unwrap_err();
    match err {
        VerandaError::MissingBootstrap { key, path } => {
            assert_eq!(key, "prod");
            assert!(path.ends_with("prod.json"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn lenient_mode_initializes_without_bootstrap() {
    let temp = TempDir::new().unwrap();
    let mut env = Environment::new(EnvironmentSettings {
        bootstrap_dir: Some(temp.path().to_path_buf()),
        strict_bootstrap: false,
    });
    env.add_host("prod", Host::new(HostLevel::Prod).with_pattern("web*"));

    env.initialize(&Machine::new("web-01")).unwrap();
    assert!(env.is_production());
    assert!(env.overrides().is_empty());
}

#[test]
fn localhost_detection_uses_request_fields() {
    let local = Machine::new("web-01").with_remote_addr("127.0.0.1");
    let remote = Machine::new("web-01")
        .with_remote_addr("203.0.113.9")
        .with_host_header("example.com");

    assert!(local.is_localhost());
    assert!(!remote.is_localhost());
}
