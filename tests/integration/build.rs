use predicates::prelude::*;
use serde_json::Value;

use crate::common::TestProject;

fn read_index(project: &TestProject) -> Value {
    let raw = std::fs::read_to_string(project.index_path()).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_build_writes_sorted_deduplicated_index() {
    let project = TestProject::with_sample_packages().unwrap();

    project
        .command()
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexed 5 packages from 16 files"));

    let index = read_index(&project);
    assert_eq!(index["total"], 5);
    assert!(index["generatedAt"].is_string());

    let ids: Vec<_> = index["items"].as_array().unwrap().iter().map(|i| i["PackageIdentifier"].as_str().unwrap()).collect();
    assert_eq!(
        ids,
        vec![
            "Microsoft.VisualStudioCode",
            "Microsoft.VisualStudioCode.Insiders",
            "Mozilla.Firefox",
            "Valve.Steam",
            "Valve.SteamLink",
        ]
    );

    let steam = &index["items"][3];
    assert_eq!(steam["Version"], "2.10.91.91");
    assert_eq!(steam["Name"], "Steam");
    assert_eq!(steam["Tags"], serde_json::json!(["games", "launcher"]));
}

#[test]
fn test_newer_version_wins_over_traversal_order() {
    let project = TestProject::new().unwrap();
    project.write_config("").unwrap();
    // Lexically "1.10" sorts before "1.9"; numerically it is newer
    project.tree.add_package("Acme.Tool", "1.9", "Tool Nine").unwrap();
    project.tree.add_package("Acme.Tool", "1.10", "Tool Ten").unwrap();
    project.build();

    let index = read_index(&project);
    assert_eq!(index["total"], 1);
    assert_eq!(index["items"][0]["Version"], "1.10");
    assert_eq!(index["items"][0]["Name"], "Tool Ten");
}

#[test]
fn test_foreign_locales_and_installers_are_not_catalogued() {
    let project = TestProject::new().unwrap();
    project.write_config("").unwrap();
    let tree = &project.tree;
    tree.add_package("Acme.Editor", "3.0", "Editor").unwrap();
    tree.add_to_version(
        "Acme.Editor",
        "3.0",
        "Acme.Editor.locale.de-DE.yaml",
        &crate::common::ManifestFixture::locale("Acme.Editor", "3.0", "de-DE", "Bearbeiter"),
    )
    .unwrap();
    project.build();

    let index = read_index(&project);
    assert_eq!(index["total"], 1);
    assert_eq!(index["items"][0]["Name"], "Editor");
}

#[test]
fn test_build_flags_override_config() {
    let project = TestProject::with_sample_packages().unwrap();
    let output = project.tree.dir().join("out/custom.json");

    project
        .command()
        .args(["build", "--limit", "2", "--pretty", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Stopped early"));

    let raw = std::fs::read_to_string(&output).unwrap();
    assert!(raw.contains("\n  \"total\": 2"));
    assert!(!project.index_path().exists());
}

#[test]
fn test_malformed_files_do_not_abort() {
    let project = TestProject::new().unwrap();
    project.write_config("").unwrap();
    project.tree.add_package("Good.One", "1.0", "Good").unwrap();
    project.tree.add_file("n/NoId/1.0/NoId.yaml", "PackageName: Nameless\nManifestType: singleton\n").unwrap();
    let broken = project.tree.root().join("b/Broken/1.0");
    std::fs::create_dir_all(&broken).unwrap();
    std::fs::write(broken.join("Broken.yaml"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

    project
        .command()
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 malformed, 1 without identifier"));

    let index = read_index(&project);
    assert_eq!(index["total"], 1);
    assert_eq!(index["items"][0]["PackageIdentifier"], "Good.One");
}

#[test]
fn test_quiet_build_prints_nothing() {
    let project = TestProject::with_sample_packages().unwrap();
    project.command().args(["--quiet", "build"]).assert().success().stdout(predicate::str::is_empty());
    assert!(project.index_path().exists());
}
