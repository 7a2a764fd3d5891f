//! Basic CLI E2E tests.
//!
//! Each test runs the binary against its own temporary data directory.

mod common;

use common::{assert_contains, parse_json, run_cli_failure, run_cli_success};

#[test]
fn test_routine_show_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let json = parse_json(&run_cli_success(dir.path(), &["routine", "show"]));
    assert_eq!(json["routine"]["morning"].as_array().unwrap().len(), 4);
    assert_eq!(json["routine"]["evening"].as_array().unwrap().len(), 4);
    assert_eq!(json["streak"], 0);
}

#[test]
fn test_routine_toggle_persists() {
    let dir = tempfile::tempdir().unwrap();
    let json = parse_json(&run_cli_success(dir.path(), &["routine", "toggle", "morning", "m1"]));
    assert_eq!(json["completions"]["morning"]["m1"], true);

    let status = parse_json(&run_cli_success(dir.path(), &["routine", "status"]));
    assert_eq!(status["morning"]["label"], "1/4 steps");
    assert_eq!(status["day"], "in_progress");
}

#[test]
fn test_routine_toggle_unknown_step_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, _) = run_cli_failure(dir.path(), &["routine", "toggle", "evening", "e99"]);
    assert_contains(&stderr, "e99");
}

#[test]
fn test_routine_add_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let json = parse_json(&run_cli_success(
        dir.path(),
        &["routine", "add", "evening", "Retinol", "serum"],
    ));
    let evening = json["routine"]["evening"].as_array().unwrap();
    assert_eq!(evening.len(), 5);
    assert_eq!(evening[4]["text"], "Retinol serum");
    assert!(evening[4]["id"].as_str().unwrap().starts_with('e'));

    let json = parse_json(&run_cli_success(dir.path(), &["routine", "delete", "morning", "m1"]));
    let morning = json["routine"]["morning"].as_array().unwrap();
    assert_eq!(morning.len(), 3);
    assert!(morning.iter().all(|s| s["id"] != "m1"));
}

#[test]
fn test_routine_add_blank_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let json = parse_json(&run_cli_success(dir.path(), &["routine", "add", "morning", "  "]));
    assert_eq!(json["routine"]["morning"].as_array().unwrap().len(), 4);
}

#[test]
fn test_profile_set_merges() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["profile", "set", "name", "Ana"]);
    let json = parse_json(&run_cli_success(dir.path(), &["profile", "set", "skinType", "dry"]));
    assert_eq!(json["name"], "Ana");
    assert_eq!(json["skinType"], "dry");

    let (_, stderr, _) = run_cli_failure(dir.path(), &["profile", "set", "email", "x"]);
    assert_contains(&stderr, "Unknown profile field");
}

#[test]
fn test_reports_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let json = parse_json(&run_cli_success(dir.path(), &["reports", "list"]));
    assert_eq!(json.as_array().unwrap().len(), 0);
    run_cli_failure(dir.path(), &["reports", "latest"]);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["config", "get", "routine.credit_empty_routine"]);
    assert_eq!(out.trim(), "false");

    run_cli_success(dir.path(), &["config", "set", "routine.seed_default_routine", "false"]);
    let json = parse_json(&run_cli_success(dir.path(), &["routine", "show"]));
    assert_eq!(json["routine"]["morning"].as_array().unwrap().len(), 0);

    run_cli_failure(dir.path(), &["config", "get", "routine.nope"]);
}

#[test]
fn test_config_list_shows_effective_policy() {
    let dir = tempfile::tempdir().unwrap();
    let json = parse_json(&run_cli_success(dir.path(), &["config", "list"]));
    assert_eq!(json["storage"]["database_file"], "glowtrack.db");
    assert_eq!(json["effective_policy"]["credit_empty_routine"], false);
    assert_eq!(json["effective_policy"]["seed_default_routine"], true);

    run_cli_success(dir.path(), &["config", "set", "routine.credit_empty_routine", "true"]);
    let json = parse_json(&run_cli_success(dir.path(), &["config", "list"]));
    assert_eq!(json["routine"]["credit_empty_routine"], true);
    assert_eq!(json["effective_policy"]["credit_empty_routine"], true);
}
