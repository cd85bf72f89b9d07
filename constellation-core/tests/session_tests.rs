//! Opening and closing constellations together with their editor windows.

use std::path::{Path, PathBuf};

use constellation_core::{session, HostError, ProjectHost, Store, StoreError};
use tempfile::TempDir;

/// In-memory editor: records every call and tracks which projects are showing.
#[derive(Debug, Default)]
struct RecordingHost {
    showing: Vec<PathBuf>,
    opened: Vec<PathBuf>,
    closed: Vec<PathBuf>,
    fail_on: Option<PathBuf>,
}

impl ProjectHost for RecordingHost {
    fn open_project(&mut self, path: &Path) -> Result<(), HostError> {
        if self.fail_on.as_deref() == Some(path) {
            return Err("editor refused".into());
        }
        self.opened.push(path.to_path_buf());
        if !self.showing.iter().any(|p| p == path) {
            self.showing.push(path.to_path_buf());
        }
        Ok(())
    }

    fn close_project(&mut self, path: &Path) -> Result<(), HostError> {
        self.closed.push(path.to_path_buf());
        self.showing.retain(|p| p != path);
        Ok(())
    }

    fn open_projects(&self) -> Vec<PathBuf> {
        self.showing.clone()
    }
}

fn store_with_projects(home: &TempDir, name: &str, projects: &[&str]) -> Store {
    let mut store = Store::load_at(home.path()).expect("load");
    store.create(name).expect("create");
    for p in projects {
        store.add_project(name, p).expect("add");
    }
    store
}

#[test]
fn open_opens_every_project_in_order() {
    let home = TempDir::new().unwrap();
    let mut store = store_with_projects(&home, "work", &["/one.project", "/two.project"]);
    let mut host = RecordingHost::default();

    session::open(&mut store, &mut host, "work").expect("open");

    assert!(store.is_open("work"));
    assert_eq!(
        host.opened,
        [PathBuf::from("/one.project"), PathBuf::from("/two.project")]
    );
}

#[test]
fn open_of_open_constellation_leaves_editor_alone() {
    let home = TempDir::new().unwrap();
    let mut store = store_with_projects(&home, "work", &["/one.project", "/two.project"]);
    let mut host = RecordingHost::default();
    session::open(&mut store, &mut host, "work").expect("first open");
    host.opened.clear();

    session::open(&mut store, &mut host, "work").expect("second open");

    assert!(store.is_open("work"));
    assert!(host.opened.is_empty(), "reopened: {:?}", host.opened);
}

#[test]
fn hosts_close_windows_unless_they_say_otherwise() {
    assert!(RecordingHost::default().can_close());
}

#[test]
fn close_only_closes_projects_that_are_showing() {
    let home = TempDir::new().unwrap();
    let mut store = store_with_projects(&home, "work", &["/one.project", "/two.project"]);
    let mut host = RecordingHost::default();
    session::open(&mut store, &mut host, "work").unwrap();
    host.showing.retain(|p| p != Path::new("/two.project"));

    session::close(&mut store, &mut host, "work").expect("close");

    assert!(!store.is_open("work"));
    assert_eq!(host.closed, [PathBuf::from("/one.project")]);
}

#[test]
fn close_of_closed_constellation_leaves_editor_alone() {
    let home = TempDir::new().unwrap();
    let mut store = store_with_projects(&home, "work", &["/one.project"]);
    let mut host = RecordingHost {
        showing: vec![PathBuf::from("/one.project")],
        ..Default::default()
    };

    let err = session::close(&mut store, &mut host, "work").unwrap_err();
    assert!(matches!(err, StoreError::NotOpen { .. }));
    assert!(host.closed.is_empty());
}

#[test]
fn host_failure_is_reported_with_path() {
    let home = TempDir::new().unwrap();
    let mut store = store_with_projects(&home, "work", &["/bad.project"]);
    let mut host = RecordingHost {
        fail_on: Some(PathBuf::from("/bad.project")),
        ..Default::default()
    };

    let err = session::open(&mut store, &mut host, "work").unwrap_err();
    assert!(matches!(err, StoreError::Host { .. }), "got: {err}");
    assert!(err.to_string().contains("/bad.project"));
}

#[test]
fn added_project_follows_open_constellation() {
    let home = TempDir::new().unwrap();
    let mut store = store_with_projects(&home, "work", &[]);
    let mut host = RecordingHost::default();

    session::add_and_follow(&mut store, &mut host, "work", Path::new("/a.project")).unwrap();
    assert!(host.opened.is_empty(), "closed constellation must not open windows");

    session::open(&mut store, &mut host, "work").unwrap();
    session::add_and_follow(&mut store, &mut host, "work", Path::new("/b.project")).unwrap();
    assert_eq!(
        host.opened,
        [PathBuf::from("/a.project"), PathBuf::from("/b.project")]
    );
    assert_eq!(store.projects_for("work").unwrap().len(), 2);
}

#[test]
fn open_projects_outside_excludes_members() {
    let home = TempDir::new().unwrap();
    let store = store_with_projects(&home, "work", &["/in.project"]);
    let host = RecordingHost {
        showing: vec![
            PathBuf::from("/z.project"),
            PathBuf::from("/in.project"),
            PathBuf::from("/a.project"),
        ],
        ..Default::default()
    };

    let outside = session::open_projects_outside(&store, &host, "work").unwrap();
    assert_eq!(
        outside,
        [PathBuf::from("/a.project"), PathBuf::from("/z.project")]
    );
}

#[test]
fn summary_counts_open_over_active() {
    let home = TempDir::new().unwrap();
    let mut store = store_with_projects(&home, "a", &[]);
    store.create("b").unwrap();
    store.create("c").unwrap();
    store.archive("c").unwrap();
    store.open_constellation("a").unwrap();

    let summary = session::summary(&store);
    assert_eq!(summary.open, 1);
    assert_eq!(summary.active, 2);
    assert_eq!(summary.archived, 1);
    assert_eq!(summary.to_string(), "Open Constellations: 1/2");
}
