use academy_codelab_lib::db::open_database;
use academy_codelab_lib::diagnostics::{Diagnostics, Level};
use academy_codelab_lib::error::{ErrorKind, PlaygroundError, Result};
use academy_codelab_lib::playground::{Playground, RestoreSource};
use academy_codelab_lib::preview::CapturedPreview;
use academy_codelab_lib::projects::{ProjectSlot, PROJECT_STORAGE_KEY};
use academy_codelab_lib::store::{KeyValueStore, MemoryStore, SqliteStore};
use academy_codelab_lib::types::{Project, DEFAULT_CSS, DEFAULT_HTML, DEFAULT_JS};
use academy_codelab_lib::workspace::{FormField, Pane, Workspace};

/// A store where every call fails, like storage disabled by the browser.
struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(PlaygroundError::Storage("storage is disabled".into()))
    }
    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(PlaygroundError::Storage("QuotaExceededError".into()))
    }
}

fn sqlite_playground(dir: &tempfile::TempDir) -> Playground<SqliteStore, CapturedPreview> {
    let conn = open_database(&dir.path().join("codelab.db")).unwrap();
    Playground::new(SqliteStore::new(conn), CapturedPreview::default(), Diagnostics::default())
}

#[test]
fn cleared_store_starts_with_exact_default_content() {
    let dir = tempfile::tempdir().unwrap();
    let mut pg = sqlite_playground(&dir);
    assert_eq!(pg.restore_or_default(), RestoreSource::Default);

    let project = pg.project();
    assert_eq!(project.html, DEFAULT_HTML);
    assert_eq!(project.css, DEFAULT_CSS);
    assert_eq!(project.js, DEFAULT_JS);
    assert!(DEFAULT_HTML.starts_with("<!-- Welcome card -->"));
    assert!(DEFAULT_JS.starts_with("document.getElementById('btn').addEventListener('click'"));
}

#[test]
fn saved_project_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut pg = sqlite_playground(&dir);
        pg.restore_or_default();
        pg.edit(Pane::Html, "<h1>mine</h1>");
        pg.set_field(FormField::Test, "console.log('t')");
        assert!(pg.save().is_some());
    }

    let mut reopened = sqlite_playground(&dir);
    assert_eq!(reopened.restore_or_default(), RestoreSource::Cached);
    assert_eq!(reopened.project().html, "<h1>mine</h1>");
    assert_eq!(reopened.project().test, "console.log('t')");
    assert_eq!(reopened.project().css, DEFAULT_CSS);
}

#[test]
fn save_with_a_failing_store_reports_and_returns_nothing() {
    let pg = Playground::new(UnavailableStore, CapturedPreview::default(), Diagnostics::default());
    assert!(pg.save().is_none());

    let entries = pg.diagnostics().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level, Level::Error);
    assert_eq!(entries[0].kind, Some(ErrorKind::StorageUnavailable));
    assert!(entries[0].message.contains("QuotaExceededError"));
}

#[test]
fn unavailable_store_at_startup_still_yields_default_content() {
    let mut pg = Playground::new(UnavailableStore, CapturedPreview::default(), Diagnostics::default());
    assert_eq!(pg.restore_or_default(), RestoreSource::Default);
    assert_eq!(pg.project().js, DEFAULT_JS);
    assert_eq!(pg.sink().renders, 1);
    assert!(pg
        .diagnostics()
        .entries()
        .iter()
        .any(|d| d.kind == Some(ErrorKind::StorageUnavailable)));
}

#[test]
fn legacy_cache_is_normalized_on_restore() {
    let store = MemoryStore::new();
    store
        .set(
            PROJECT_STORAGE_KEY,
            r#"{"version":0,"kind":"legacy","task":"Old task","tests":"check()","web":{"html":"<p>old</p>","css":"p{}","js":"run()"}}"#,
        )
        .unwrap();
    let mut pg = Playground::new(store, CapturedPreview::default(), Diagnostics::default());
    assert_eq!(pg.restore_or_default(), RestoreSource::Cached);

    let expected = Project {
        assignment: "Old task".into(),
        test: "check()".into(),
        ..Project::with_sources("<p>old</p>", "p{}", "run()")
    };
    assert_eq!(pg.project(), expected);

    // Saving writes the canonical shape back.
    pg.save().unwrap();
    let raw = ProjectSlot::default().load(pg.store(), pg.diagnostics()).unwrap();
    assert_eq!(raw["version"], 1);
    assert_eq!(raw["kind"], "web-only");
    assert!(raw.get("web").is_none());
}

#[test]
fn missing_form_field_does_not_block_the_rest_of_a_load() {
    let workspace = Workspace::new().without_field(FormField::Test);
    let mut pg = Playground::new(MemoryStore::new(), CapturedPreview::default(), Diagnostics::default())
        .with_workspace(workspace);

    let project = pg
        .load_text(r#"{"assignment":"A","test":"T","html":"<i>x</i>","css":"i{}","js":"go()"}"#)
        .unwrap();
    assert_eq!(project.test, "T");

    let live = pg.project();
    assert_eq!(live.assignment, "A");
    assert_eq!(live.test, "");
    assert_eq!(live.js, "go()");
    assert!(pg
        .diagnostics()
        .entries()
        .iter()
        .any(|d| d.level == Level::Warn
            && d.kind == Some(ErrorKind::MissingElement)
            && d.message == "Warning: #testArea not found; skipped setting value"));
}

#[test]
fn preview_reflects_every_edit() {
    let mut pg = Playground::new(MemoryStore::new(), CapturedPreview::default(), Diagnostics::default());
    pg.edit(Pane::Css, "body{color:red}");
    pg.edit(Pane::Html, "<p>hi</p>");
    let doc = pg.sink().last.clone().unwrap();
    assert!(doc.contains("<style>body{color:red}\n</style>"));
    assert!(doc.contains("<body><p>hi</p>"));
    assert_eq!(pg.sink().renders, 2);
}
