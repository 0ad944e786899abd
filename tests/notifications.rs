//! Integration tests for change notification: Observable events and hooks.

use observable_config::notify::{SETTING_CHANGED, SETTING_REMOVED};
use observable_config::prelude::*;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn open_config(dir: &TempDir, content: &str) -> Config {
    let path = dir.path().join("app.ini");
    fs::write(&path, content).unwrap();
    Config::open(&path).unwrap()
}

fn recorder(
    config: &Config,
    event_name: &'static str,
) -> Arc<Mutex<Vec<SettingEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = Arc::clone(&events);
    config.observable().subscribe(event_name, move |event| {
        events_clone.lock().unwrap().push(event.clone());
    });
    events
}

#[test]
fn test_set_fires_changed_event_with_exact_payload() {
    let dir = TempDir::new().unwrap();
    let mut config = open_config(&dir, "");
    let events = recorder(&config, SETTING_CHANGED);

    config.set("oracle", "user", "admin");

    assert_eq!(
        *events.lock().unwrap(),
        vec![SettingEvent::changed("oracle", "user", "admin")]
    );
}

#[test]
fn test_one_event_per_set_call() {
    let dir = TempDir::new().unwrap();
    let mut config = open_config(&dir, "");
    let events = recorder(&config, SETTING_CHANGED);

    config.set("s", "k", "1").set("s", "k", "2").set("t", "x", "3");

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[1], SettingEvent::changed("s", "k", "2"));
}

#[test]
fn test_handlers_fire_in_subscription_order() {
    let dir = TempDir::new().unwrap();
    let mut config = open_config(&dir, "");
    let order = Arc::new(Mutex::new(Vec::new()));

    for tag in ["first", "second"] {
        let order_clone = Arc::clone(&order);
        config.observable().subscribe(SETTING_CHANGED, move |_| {
            order_clone.lock().unwrap().push(tag);
        });
    }

    config.set("s", "k", "v");
    assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn test_remove_section_fires_removed_event() {
    let dir = TempDir::new().unwrap();
    let mut config = open_config(&dir, "[s]\na = 1\n");
    let events = recorder(&config, SETTING_REMOVED);

    assert!(config.remove("s", None));
    assert_eq!(
        *events.lock().unwrap(),
        vec![SettingEvent::removed("s", None)]
    );
}

#[test]
fn test_remove_key_fires_removed_event() {
    let dir = TempDir::new().unwrap();
    let mut config = open_config(&dir, "[s]\na = 1\n");
    let events = recorder(&config, SETTING_REMOVED);

    assert!(config.remove("s", Some("a")));
    assert_eq!(
        *events.lock().unwrap(),
        vec![SettingEvent::removed("s", Some("a"))]
    );
}

#[test]
fn test_failed_remove_fires_nothing() {
    let dir = TempDir::new().unwrap();
    let mut config = open_config(&dir, "[s]\na = 1\n");
    let events = recorder(&config, SETTING_REMOVED);

    assert!(!config.remove("missing_section", None));
    assert!(!config.remove("s", Some("missing")));
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn test_changed_and_removed_are_separate_events() {
    let dir = TempDir::new().unwrap();
    let mut config = open_config(&dir, "[s]\na = 1\n");
    let changed = recorder(&config, SETTING_CHANGED);
    let removed = recorder(&config, SETTING_REMOVED);

    config.set("s", "b", "2");
    config.remove("s", Some("a"));

    assert_eq!(changed.lock().unwrap().len(), 1);
    assert_eq!(removed.lock().unwrap().len(), 1);
}

#[test]
fn test_load_fires_no_events() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.ini");
    fs::write(&path, "[s]\na = 1\n").unwrap();

    // Subscribe before construction through a shared hub.
    let observable = Observable::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = Arc::clone(&events);
    observable.subscribe(SETTING_CHANGED, move |event| {
        events_clone.lock().unwrap().push(event.clone());
    });

    let mut config = Config::open_with(&path, observable).unwrap();
    assert!(events.lock().unwrap().is_empty());

    config.load().unwrap();
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn test_supplied_observable_is_the_one_used() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.ini");
    fs::write(&path, "").unwrap();

    let observable = Observable::new();
    let mut config = Config::open_with(&path, observable.clone()).unwrap();

    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = Arc::clone(&events);
    observable.subscribe(SETTING_CHANGED, move |event| {
        events_clone.lock().unwrap().push(event.clone());
    });

    config.set("s", "k", "v");
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[test]
fn test_change_hook_runs_alongside_event() {
    let dir = TempDir::new().unwrap();
    let mut config = open_config(&dir, "");
    let events = recorder(&config, SETTING_CHANGED);

    let hook_calls = Arc::new(Mutex::new(Vec::new()));
    let hook_clone = Arc::clone(&hook_calls);
    config.on_change(move |section, key, value| {
        hook_clone
            .lock()
            .unwrap()
            .push((section.to_string(), key.to_string(), value.to_string()));
    });

    config.set("oracle", "user", "admin");

    assert_eq!(events.lock().unwrap().len(), 1);
    assert_eq!(
        *hook_calls.lock().unwrap(),
        vec![("oracle".to_string(), "user".to_string(), "admin".to_string())]
    );
}

#[test]
fn test_remove_hook_sees_section_and_key_removals() {
    let dir = TempDir::new().unwrap();
    let mut config = open_config(&dir, "[s]\na = 1\n[t]\nb = 2\n");

    let hook_calls = Arc::new(Mutex::new(Vec::new()));
    let hook_clone = Arc::clone(&hook_calls);
    config.on_remove(move |section, key| {
        hook_clone
            .lock()
            .unwrap()
            .push((section.to_string(), key.map(str::to_string)));
    });

    config.remove("s", Some("a"));
    config.remove("t", None);
    config.remove("t", None); // second removal misses, hook stays quiet

    assert_eq!(
        *hook_calls.lock().unwrap(),
        vec![
            ("s".to_string(), Some("a".to_string())),
            ("t".to_string(), None),
        ]
    );
}
