// tests/persona_store_test.rs
// Loading personalities from a directory of JSON records

use std::fs;
use std::path::Path;

use serde_json::json;
use shaimind::persona::PersonalityStore;
use shaimind::{PersonaError, Session};
use tempfile::TempDir;

fn write_record(dir: &Path, id: &str, value: serde_json::Value) {
    fs::write(dir.join(format!("{}.json", id)), value.to_string()).unwrap();
}

fn valid(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "traits": "Curious",
        "emotional_state": "calm",
        "emotional_intensity": 5,
        "reasoning_style": "Methodical",
        "anchors": ["an anchor"],
        "system_prompt": format!("You are {}.", name),
        "writing_style": { "tone": "dry" },
        "historical_context": { "born": 1900 }
    })
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_record(dir.path(), "tesla", valid("Nikola Tesla"));
    write_record(dir.path(), "curie", valid("Marie Curie"));
    write_record(dir.path(), "broken", json!({ "name": "No Traits" }));
    fs::write(dir.path().join("garbled.json"), "{ not json").unwrap();
    fs::write(dir.path().join("notes.txt"), "not a personality").unwrap();
    dir
}

#[test]
fn test_lists_only_loadable_records_in_order() {
    let dir = fixture();
    let store = PersonalityStore::open(dir.path()).unwrap();

    assert_eq!(store.list_available(), vec!["curie", "tesla"]);
    assert_eq!(store.default_identifier().as_deref(), Some("curie"));
    assert_eq!(store.root(), Some(dir.path()));
}

#[test]
fn test_load_returns_parsed_record() {
    let dir = fixture();
    let store = PersonalityStore::open(dir.path()).unwrap();

    let tesla = store.load("tesla").unwrap();
    assert_eq!(tesla.name, "Nikola Tesla");
    assert_eq!(tesla.writing_style["tone"], "dry");
    assert_eq!(tesla.historical_context["born"], 1900);
    assert!(tesla.preferred_topics.is_empty());
}

#[test]
fn test_malformed_and_missing_identifiers() {
    let dir = fixture();
    let store = PersonalityStore::open(dir.path()).unwrap();

    match store.load("broken") {
        Err(PersonaError::Malformed { id, reason }) => {
            assert_eq!(id, "broken");
            assert!(reason.contains("traits"), "unexpected reason: {}", reason);
        }
        other => panic!("expected Malformed, got {:?}", other),
    }
    assert!(matches!(store.load("garbled"), Err(PersonaError::Malformed { .. })));
    assert!(matches!(store.load("notes"), Err(PersonaError::NotFound(_))));
    assert!(matches!(store.load("einstein"), Err(PersonaError::NotFound(_))));
}

#[test]
fn test_missing_directory_is_not_found() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nowhere");
    assert!(matches!(
        PersonalityStore::open(&missing),
        Err(PersonaError::NotFound(_))
    ));
}

#[test]
fn test_session_defaults_to_first_discovered() {
    let dir = fixture();
    let store = PersonalityStore::open(dir.path()).unwrap();

    let session = Session::open(&store, None).unwrap();
    assert_eq!(session.identifier(), "curie");
    assert_eq!(session.history().system_prompt(), "You are Marie Curie.");
    assert_eq!(session.emotion().emotion, "calm");
    assert_eq!(session.emotion().intensity(), 5);
}

#[test]
fn test_empty_store_cannot_open_session() {
    let dir = TempDir::new().unwrap();
    let store = PersonalityStore::open(dir.path()).unwrap();
    assert!(store.is_empty());
    assert!(matches!(Session::open(&store, None), Err(PersonaError::NotFound(_))));
}

#[test]
fn test_bundled_identities_load() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("identities");
    let store = PersonalityStore::open(&dir).unwrap();

    assert_eq!(store.list_available(), vec!["edgar_allan_poe", "nikola_tesla"]);
    let poe = store.load("edgar_allan_poe").unwrap();
    assert_eq!(poe.name, "Edgar Allan Poe");
    assert!(!poe.anchors.is_empty());
}
