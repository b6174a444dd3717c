use predicates::prelude::*;
use serde_json::Value;

use crate::common::TestProject;

fn built() -> TestProject {
    let project = TestProject::with_sample_packages().unwrap();
    project.build();
    project
}

fn json_ids(stdout: &[u8]) -> (u64, Vec<String>) {
    let page: Value = serde_json::from_slice(stdout).unwrap();
    let ids = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["PackageIdentifier"].as_str().unwrap().to_string())
        .collect();
    (page["total"].as_u64().unwrap(), ids)
}

#[test]
fn test_exact_name_ranks_first() {
    let project = built();
    let output = project.command().args(["search", "steam", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let (total, ids) = json_ids(&output.stdout);
    assert_eq!(total, 2);
    assert_eq!(ids, vec!["Valve.Steam", "Valve.SteamLink"]);
}

#[test]
fn test_multi_word_query() {
    let project = built();
    let output = project.command().args(["search", "visual", "code", "-f", "json"]).output().unwrap();

    let (_, ids) = json_ids(&output.stdout);
    assert_eq!(ids, vec!["Microsoft.VisualStudioCode", "Microsoft.VisualStudioCode.Insiders"]);
}

#[test]
fn test_search_by_tag_and_moniker() {
    let project = built();

    let output = project.command().args(["search", "editor", "-f", "json"]).output().unwrap();
    assert_eq!(json_ids(&output.stdout).1, vec!["Microsoft.VisualStudioCode"]);

    let output = project.command().args(["search", "FIREFOX", "-f", "json"]).output().unwrap();
    assert_eq!(json_ids(&output.stdout).1[0], "Mozilla.Firefox");
}

#[test]
fn test_search_offset_and_limit() {
    let project = built();
    let output = project
        .command()
        .args(["search", "steam", "--limit", "1", "--offset", "1", "-f", "json"])
        .output()
        .unwrap();

    let (total, ids) = json_ids(&output.stdout);
    assert_eq!(total, 2);
    assert_eq!(ids, vec!["Valve.SteamLink"]);
}

#[test]
fn test_no_matches_is_success() {
    let project = built();
    project
        .command()
        .args(["search", "zzzz-nothing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No packages found."));
}

#[test]
fn test_list_pages() {
    let project = built();

    let output = project.command().args(["list", "--limit", "2", "-f", "json"]).output().unwrap();
    let (total, first) = json_ids(&output.stdout);
    assert_eq!(total, 5);
    assert_eq!(first, vec!["Microsoft.VisualStudioCode", "Microsoft.VisualStudioCode.Insiders"]);

    let output = project.command().args(["list", "--limit", "2", "--offset", "2", "-f", "json"]).output().unwrap();
    let (_, second) = json_ids(&output.stdout);
    assert_eq!(second, vec!["Mozilla.Firefox", "Valve.Steam"]);
}

#[test]
fn test_list_table() {
    let project = built();
    project
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Identifier"))
        .stdout(predicate::str::contains("Valve.SteamLink"))
        .stdout(predicate::str::contains("Showing 1-5 of 5"));
}

#[test]
fn test_max_limit_from_config() {
    let project = TestProject::with_sample_packages().unwrap();
    project.write_config("max_limit = 3\ndefault_limit = 3\n").unwrap();
    project.build();

    let output = project.command().args(["list", "--limit", "100", "-f", "json"]).output().unwrap();
    let (total, ids) = json_ids(&output.stdout);
    assert_eq!(total, 5);
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_show_is_case_insensitive() {
    let project = built();
    project
        .command()
        .args(["show", "valve.steam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Steam"))
        .stdout(predicate::str::contains("2.10.91.91"))
        .stdout(predicate::str::contains("games, launcher"));
}

#[test]
fn test_show_unknown_package_fails() {
    let project = built();
    project
        .command()
        .args(["show", "Nobody.Nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in the index"));
}

#[test]
fn test_status_ready() {
    let project = built();
    let output = project.command().args(["status", "-f", "json"]).output().unwrap();
    assert!(output.status.success());

    let status: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["ready"], true);
    assert_eq!(status["total"], 5);
    assert!(status["generatedAt"].is_string());
    assert!(status.get("reason").is_none());
}

#[test]
fn test_browse_pages_and_searches() {
    let project = built();
    let output = project
        .command()
        .args(["browse", "--page-size", "2"])
        .write_stdin("\n/steam\nq\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("5 packages"));
    assert!(stdout.contains("Mozilla.Firefox"));
    assert!(stdout.contains("Valve.Steam"));
    assert!(stdout.contains("2 matches for 'steam'"));
}

#[test]
fn test_index_flag_overrides_config() {
    let project = built();
    let moved = project.tree.dir().join("moved.json");
    std::fs::rename(project.index_path(), &moved).unwrap();

    project.command().args(["search", "steam"]).assert().failure();
    project
        .command()
        .arg("--index")
        .arg(&moved)
        .args(["search", "steam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valve.Steam"));
}
