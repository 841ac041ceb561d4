//! Direct dependency and used-by lookup through the CLI

mod common;

use common::{TestProject, assetgraph_cmd, run_json, run_ok};
use predicates::prelude::*;

#[test]
fn test_show_leaf_dependency() {
    let project = TestProject::new();
    project.app_bundle("AppAsset", &["'yii\\web\\JqueryAsset'"]);
    project.app_bundle("SiteAsset", &["'AppAsset'"]);

    let report = run_json(&project, &["show", "AppAsset"]);
    assert_eq!(report["name"], "AppAsset");
    assert_eq!(
        report["dependencies"],
        serde_json::json!(["yii\\web\\JqueryAsset"])
    );
    assert_eq!(
        report["unresolved"],
        serde_json::json!(["yii\\web\\JqueryAsset"])
    );
    assert_eq!(
        report["external"],
        serde_json::json!(["yii\\web\\JqueryAsset"])
    );
    assert_eq!(report["usedBy"], serde_json::json!(["SiteAsset"]));
}

#[test]
fn test_show_marks_missing_local_dependency() {
    let project = TestProject::new();
    project.app_bundle("AppAsset", &[]);
    project.app_bundle("SiteAsset", &["'AppAset'", "'yii\\web\\YiiAsset'"]);

    let stdout = run_ok(&project, &["show", "SiteAsset"]);
    assert!(stdout.contains("AppAset (unresolved)"));
    assert!(stdout.contains("yii\\web\\YiiAsset (external)"));

    let report = run_json(&project, &["show", "SiteAsset"]);
    assert_eq!(report["external"], serde_json::json!(["yii\\web\\YiiAsset"]));
}

#[test]
fn test_show_no_dependencies() {
    let project = TestProject::new();
    project.app_bundle("AppAsset", &[]);
    project.app_bundle("SiteAsset", &["'AppAsset'"]);

    let stdout = run_ok(&project, &["show", "AppAsset"]);
    assert!(stdout.contains("Depends on:\n    (none)"));
    assert!(stdout.contains("Used by:\n    SiteAsset"));
}

#[test]
fn test_show_by_qualified_name() {
    let project = TestProject::new();
    project.app_bundle("AppAsset", &[]);

    let report = run_json(&project, &["show", "app\\assets\\AppAsset"]);
    assert_eq!(report["name"], "AppAsset");
}

#[test]
fn test_show_not_found() {
    let project = TestProject::new();
    project.app_bundle("AppAsset", &[]);

    assetgraph_cmd()
        .arg("--project")
        .arg(&project.path)
        .args(["show", "MissingAsset"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Asset descriptor 'MissingAsset' not found",
        ))
        .stderr(predicate::str::contains("assetgraph list"));
}
