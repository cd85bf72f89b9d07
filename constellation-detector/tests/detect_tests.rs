//! Discovery and workspace-upgrade tests for `constellation-detector`.
//!
//! Each test gets an isolated `TempDir`; no shared state.

use std::fs;
use std::path::{Path, PathBuf};

use constellation_detector::{
    find_projects, find_upgradeable_workspaces, upgrade_workspace, DetectError,
};
use rstest::rstest;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn make_dir() -> TempDir {
    TempDir::new().expect("tempdir")
}

fn touch(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(&path, content).expect("write fixture");
    path
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read")).expect("json")
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

#[test]
fn finds_projects_sorted() {
    let dir = make_dir();
    let b = touch(dir.path(), "b/b.sublime-project", "{}");
    let a = touch(dir.path(), "a/deep/a.sublime-project", "{}");
    touch(dir.path(), "a/readme.md", "");
    touch(dir.path(), "a/a.sublime-workspace", "{}");

    assert_eq!(find_projects(dir.path()).expect("find"), [a, b]);
}

#[rstest]
#[case("one.sublime-project", true)]
#[case("1/2/3/4/five.sublime-project", true)]
#[case("1/2/3/4/5/six.sublime-project", false)]
fn respects_max_depth(#[case] rel: &str, #[case] found: bool) {
    let dir = make_dir();
    touch(dir.path(), rel, "{}");
    let projects = find_projects(dir.path()).expect("find");
    assert_eq!(!projects.is_empty(), found, "{rel}");
}

#[test]
fn directories_named_like_projects_are_ignored() {
    let dir = make_dir();
    fs::create_dir_all(dir.path().join("odd.sublime-project")).expect("mkdir");
    assert!(find_projects(dir.path()).expect("find").is_empty());
}

#[test]
fn missing_search_path_is_an_error() {
    let dir = make_dir();
    let err = find_projects(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, DetectError::SearchPathMissing { .. }), "got: {err}");
}

#[test]
fn only_workspaces_without_projects_are_upgradeable() {
    let dir = make_dir();
    touch(dir.path(), "paired/app.sublime-workspace", "{}");
    touch(dir.path(), "paired/app.sublime-project", "{}");
    let lonely = touch(dir.path(), "lonely/app.sublime-workspace", "{}");

    assert_eq!(
        find_upgradeable_workspaces(dir.path()).expect("find"),
        [lonely]
    );
}

// ---------------------------------------------------------------------------
// Upgrade
// ---------------------------------------------------------------------------

#[test]
fn upgrade_links_referenced_project() {
    let dir = make_dir();
    let real = touch(dir.path(), "shared/real.sublime-project", r#"{"folders": []}"#);
    let ws = touch(
        dir.path(),
        "work/app.sublime-workspace",
        r#"{"project": "../shared/real.sublime-project", "buffers": []}"#,
    );

    let sibling = upgrade_workspace(&ws).expect("upgrade");

    assert_eq!(
        sibling,
        dir.path().canonicalize().expect("canonicalize").join("work/app.sublime-project")
    );
    assert_eq!(
        fs::read_to_string(&sibling).expect("read link"),
        fs::read_to_string(&real).expect("read real")
    );
    let doc = read_json(&ws);
    assert_eq!(doc["project"].as_str(), sibling.to_str());
    assert!(doc.get("buffers").is_some(), "other workspace keys must survive");

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        let a = fs::metadata(&real).expect("meta").ino();
        let b = fs::metadata(&sibling).expect("meta").ino();
        assert_eq!(a, b, "sibling must be a hard link");
    }
}

#[rstest]
#[case(r#"{"project": ""}"#)]
#[case(r#"{"project": "gone.sublime-project"}"#)]
#[case(r#"{}"#)]
fn upgrade_writes_empty_project_when_nothing_to_link(#[case] workspace: &str) {
    let dir = make_dir();
    let ws = touch(dir.path(), "app.sublime-workspace", workspace);

    let sibling = upgrade_workspace(&ws).expect("upgrade");

    assert_eq!(read_json(&sibling), serde_json::json!({}));
    assert_eq!(read_json(&ws)["project"].as_str(), sibling.to_str());
}

#[test]
fn upgrade_points_workspace_at_absolute_sibling() {
    let dir = make_dir();
    touch(dir.path(), "shared/real.sublime-project", "{}");
    touch(
        dir.path(),
        "work/app.sublime-workspace",
        r#"{"project": "../shared/real.sublime-project"}"#,
    );
    let roundabout = dir.path().join("shared/../work/./app.sublime-workspace");

    let sibling = upgrade_workspace(&roundabout).expect("upgrade");

    assert!(sibling.is_absolute());
    assert!(!sibling.components().any(|c| matches!(
        c,
        std::path::Component::ParentDir | std::path::Component::CurDir
    )));
    let ws = dir.path().join("work/app.sublime-workspace");
    let project = read_json(&ws)["project"].as_str().expect("project key").to_owned();
    assert_eq!(Path::new(&project), sibling);
    assert!(Path::new(&project).exists());
}

#[test]
fn upgrade_reports_missing_workspace() {
    let dir = make_dir();
    let err = upgrade_workspace(&dir.path().join("gone.sublime-workspace")).unwrap_err();
    assert!(matches!(err, DetectError::Io { .. }), "got: {err}");
}

#[test]
fn upgrade_keeps_existing_sibling() {
    let dir = make_dir();
    let ws = touch(dir.path(), "app.sublime-workspace", r#"{"project": ""}"#);
    touch(dir.path(), "app.sublime-project", r#"{"folders": [{"path": "."}]}"#);

    let sibling = upgrade_workspace(&ws).expect("upgrade");
    assert!(read_json(&sibling).get("folders").is_some());
}

#[test]
fn upgrade_rejects_non_workspace() {
    let dir = make_dir();
    let file = touch(dir.path(), "app.sublime-project", "{}");
    let err = upgrade_workspace(&file).unwrap_err();
    assert!(matches!(err, DetectError::NotAWorkspace { .. }));
}

#[test]
fn upgrade_reports_corrupt_workspace() {
    let dir = make_dir();
    let ws = touch(dir.path(), "app.sublime-workspace", "not json");
    let err = upgrade_workspace(&ws).unwrap_err();
    assert!(matches!(err, DetectError::Parse { .. }));
    assert!(err.to_string().contains("app.sublime-workspace"));
}
