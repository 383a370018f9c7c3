//! Integration tests for the `layout` command.

mod common;

use common::{TestEnv, parse_json};
use predicates::prelude::*;

#[test]
fn test_layout_json() {
    let env = TestEnv::new();
    let output = env
        .cmd()
        .arg("layout")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json = parse_json(&output);

    let steps = json["steps"].as_array().unwrap();
    let arrows = json["arrows"].as_array().unwrap();
    assert_eq!(steps.len(), 18);
    assert_eq!(arrows.len(), 17);

    for (i, step) in steps.iter().enumerate() {
        assert_eq!(step["index"], i);
        assert_eq!(step["column"], i % 6);
        assert_eq!(step["row"], 2 - i / 6);
        assert_eq!(step["palette_index"], i / 6);
    }

    let vertical: Vec<u64> = arrows
        .iter()
        .filter(|a| a["kind"] == "vertical")
        .map(|a| a["from"].as_u64().unwrap())
        .collect();
    assert_eq!(vertical, vec![5, 11]);
}

#[test]
fn test_layout_does_not_write_files() {
    let env = TestEnv::new();
    env.cmd().arg("layout").assert().success();
    assert!(!env.out_dir().exists());
}

#[test]
fn test_layout_human() {
    let env = TestEnv::new();
    env.cmd()
        .args(["layout", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Modern VLSI Chip Design Flow"))
        .stdout(predicate::str::contains("18 steps:"))
        .stdout(predicate::str::contains("Wafer Probe & Packaging"))
        .stdout(predicate::str::contains("5 v 6"));
}
