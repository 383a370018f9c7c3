//! Integration tests for rendering: `render`, `show`, and the default command.

mod common;

use common::{TestEnv, parse_json};
use predicates::prelude::*;

#[test]
fn test_render_stdout_is_svg() {
    let env = TestEnv::new();
    let output = env
        .cmd()
        .args(["render", "--stdout"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let svg = String::from_utf8(output).unwrap();

    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("<title>Modern VLSI Chip Design Flow</title>"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches(" rx=").count(), 18);
    assert_eq!(svg.matches("<polygon").count(), 17);
    assert!(svg.contains("Concept"));
    assert!(svg.contains("Best Practices &amp; Pitfalls"));
}

#[test]
fn test_render_to_explicit_path() {
    let env = TestEnv::new();
    let path = env.path().join("diagrams").join("flow.svg");

    let output = env
        .cmd()
        .args(["render", "-o"])
        .arg(&path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = parse_json(&output);
    assert_eq!(json["boxes"], 18);
    assert_eq!(json["arrows"], 17);
    assert_eq!(json["opened"], false);
    assert_eq!(json["path"], path.to_string_lossy().as_ref());

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert_eq!(json["bytes"], svg.len());
}

#[test]
fn test_render_defaults_to_output_dir() {
    let env = TestEnv::new();
    env.cmd().arg("render").assert().success();
    assert!(env.out_dir().join("vlsi-chip-design-flow.svg").exists());
}

#[test]
fn test_render_human() {
    let env = TestEnv::new();
    env.cmd()
        .args(["render", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 18 boxes and 17 arrows"))
        .stdout(predicate::str::contains("2000x900"));
}

#[test]
fn test_show_without_viewer() {
    let env = TestEnv::new();
    let output = env
        .cmd()
        .arg("show")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = parse_json(&output);
    assert_eq!(json["opened"], false);
    assert!(env.out_dir().join("vlsi-chip-design-flow.svg").exists());
}

#[test]
fn test_no_subcommand_shows() {
    let env = TestEnv::new();
    env.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("\"boxes\":18"));
    assert!(env.out_dir().join("vlsi-chip-design-flow.svg").exists());
}

#[test]
fn test_output_dir_flag_overrides_config() {
    let env = TestEnv::new();
    let other = env.path().join("elsewhere");
    env.cmd()
        .arg("show")
        .arg("--output-dir")
        .arg(&other)
        .assert()
        .success();

    assert!(other.join("vlsi-chip-design-flow.svg").exists());
    assert!(!env.out_dir().exists());
}

#[test]
fn test_render_output_conflicts_with_stdout() {
    let env = TestEnv::new();
    env.cmd()
        .args(["render", "-o", "a.svg", "--stdout"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_unwritable_output_fails_with_json_error() {
    let env = TestEnv::new();
    // A file where a directory is expected
    let blocker = env.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    env.cmd()
        .args(["render", "-o"])
        .arg(blocker.join("flow.svg"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("\"error\""));
}
