use predicates::prelude::*;
use serde_json::Value;

use crate::common::TestProject;

#[test]
fn test_missing_manifest_root_fails_build() {
    let project = TestProject::new().unwrap();
    project.write_config("").unwrap();
    std::fs::remove_dir_all(project.tree.root()).unwrap();

    project
        .command()
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source unavailable"));
    assert!(!project.index_path().exists());
}

#[test]
fn test_query_without_index_reports_no_catalog() {
    let project = TestProject::new().unwrap();
    project.write_config("").unwrap();

    project
        .command()
        .args(["search", "steam"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No catalog loaded"))
        .stderr(predicate::str::contains("wincat build"));
}

#[test]
fn test_status_without_index_is_not_ready() {
    let project = TestProject::new().unwrap();
    project.write_config("").unwrap();

    let output = project.command().args(["status", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let status: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["ready"], false);
    assert_eq!(status["total"], 0);
    assert!(status["generatedAt"].is_null());
    assert!(status["reason"].as_str().unwrap().contains("Source unavailable"));
}

#[test]
fn test_status_reports_damaged_index() {
    let project = TestProject::new().unwrap();
    project.write_config("").unwrap();
    std::fs::write(project.index_path(), "{ truncated").unwrap();

    project
        .command()
        .args(["--quiet", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ready:"))
        .stdout(predicate::str::contains("Malformed catalog"));
}

#[test]
fn test_damaged_index() {
    let project = TestProject::new().unwrap();
    project.write_config("").unwrap();
    std::fs::write(project.index_path(), "{ truncated").unwrap();

    project
        .command()
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed catalog"));
}

#[test]
fn test_legacy_bare_array_index_loads() {
    let project = TestProject::new().unwrap();
    project.write_config("").unwrap();
    std::fs::write(
        project.index_path(),
        r#"[{"Id": "Old.Format", "name": "Old Format", "version": "1.0"}]"#,
    )
    .unwrap();

    project
        .command()
        .args(["show", "old.format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Old Format"));
}

#[test]
fn test_invalid_config_is_reported() {
    let project = TestProject::new().unwrap();
    std::fs::write(project.config_path(), "page_size = \"five\"\n").unwrap();

    project
        .command()
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}
