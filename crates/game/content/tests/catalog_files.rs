//! File-based catalog loading.

use std::fs;

use condition_content::{CatalogLoader, ConfigLoader, standard_catalog};
use condition_core::{ActiveConditionSet, DurationType, Severity};

#[test]
fn json_export_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conditions.json");
    let catalog = standard_catalog().unwrap();

    CatalogLoader::save_json(&catalog, &path).unwrap();
    let loaded = CatalogLoader::load(&path).unwrap();

    assert_eq!(loaded, catalog);
}

#[test]
fn loads_the_editor_export_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.json");
    fs::write(
        &path,
        r#"{
          "conditions": {
            "Frightened": {
              "name": "Frightened",
              "severity": "minor",
              "description": "Amedrontado",
              "effects": {
                "attribute_modifiers": {},
                "movement_modifier": 0.5,
                "ac_modifier": 0,
                "attack_modifier": 0,
                "save_modifiers": {},
                "damage_over_time": 0,
                "heal_over_time": 0,
                "prevents_actions": [],
                "grants_advantage": [],
                "grants_disadvantage": ["attack", "ability_check"]
              },
              "duration_type": "rounds",
              "default_duration": 1,
              "can_stack": false,
              "max_stacks": 1,
              "removable_by": [],
              "incompatible_with": [],
              "icon": "fear.png"
            }
          }
        }"#,
    )
    .unwrap();

    let catalog = CatalogLoader::load(&path).unwrap();
    let frightened = catalog.lookup("Frightened").unwrap();

    assert_eq!(frightened.severity, Severity::Minor);
    assert_eq!(frightened.icon, "fear.png");
    assert_eq!(frightened.effects.movement_modifier, 0.5);
    assert!(!frightened.can_stack());
}

#[test]
fn merge_overrides_standard_entries_and_references_them() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("homebrew.ron");
    fs::write(
        &path,
        r#"(
            conditions: {
                "Poisoned": (
                    severity: severe,
                    effects: (damage_over_time: 2),
                    duration_type: minutes,
                    default_duration: 10,
                    can_stack: true,
                    max_stacks: 3,
                ),
                "Purified": (
                    severity: minor,
                    effects: (heal_over_time: 1),
                    default_duration: 2,
                    incompatible_with: ["Poisoned", "Bleeding"],
                ),
            },
        )"#,
    )
    .unwrap();

    let catalog = CatalogLoader::merge(standard_catalog().unwrap(), &path).unwrap();

    assert_eq!(catalog.len(), 10);
    let poisoned = catalog.lookup("Poisoned").unwrap();
    assert_eq!(poisoned.max_stacks(), 3);
    assert_eq!(poisoned.duration_type, DurationType::Minutes);

    let mut set = ActiveConditionSet::new();
    set.apply_condition(&catalog, "Poisoned", None, "spider").unwrap();
    set.apply_condition(&catalog, "Bleeding", None, "blade").unwrap();
    let report = set.apply_condition(&catalog, "Purified", None, "cleric").unwrap();

    assert_eq!(report.displaced, ["Poisoned", "Bleeding"]);
    assert_eq!(set.names().collect::<Vec<_>>(), ["Purified"]);
}

#[test]
fn unknown_incompatibility_fails_the_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(
        &path,
        r#"
        [conditions.Hasted]
        severity = "minor"
        incompatible_with = ["Slowd"]
        "#,
    )
    .unwrap();

    let err = CatalogLoader::load(&path).unwrap_err();
    assert!(err.to_string().contains("unknown condition 'Slowd'"));
}

#[test]
fn unsupported_extension_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conditions.yaml");
    fs::write(&path, "conditions: {}").unwrap();

    let err = CatalogLoader::load(&path).unwrap_err();
    assert!(err.to_string().contains("Unsupported catalog file"));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    assert!(CatalogLoader::load(&dir.path().join("nope.json")).is_err());
    assert!(ConfigLoader::load(&dir.path().join("nope.toml")).is_err());
}

#[test]
fn encounter_config_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("encounter.toml");
    fs::write(&path, "max_rounds = 6\ndrain_until_clear = false\n").unwrap();

    let config = ConfigLoader::load(&path).unwrap();
    assert_eq!(config.max_rounds, 6);
    assert!(!config.drain_until_clear);
}
