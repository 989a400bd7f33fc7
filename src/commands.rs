// src/commands.rs
// Tauri commands. Thin wrappers: lock the playground, call it, map errors to String.

use crate::debounce::DebouncedTrigger;
use crate::diagnostics::Diagnostic;
use crate::playground::{Playground, RestoreSource};
use crate::preview::RenderSink;
use crate::projects::ExportFile;
use crate::store::SqliteStore;
use crate::theme::Theme;
use crate::types::Project;
use crate::workspace::{CursorPlacement, EditorWidget, FormField, Pane, TextBuffer, Workspace};
use serde::Serialize;
use std::fs;
use std::sync::Mutex;
use std::time::Duration;
use tauri::{command, AppHandle, Emitter, Manager, State};
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_opener::OpenerExt;
use tracing::{error, info};

pub const MAIN_WINDOW: &str = "main";
pub const PREVIEW_EVENT: &str = "preview-updated";
pub const LOG_EVENT: &str = "playground-log";
pub const EDITOR_RESIZE_EVENT: &str = "editor-resize";
pub const EDITOR_FOCUS_EVENT: &str = "editor-focus";

/// Forwards assembled documents to the frontend, which sets them as the
/// sandboxed iframe's srcdoc.
pub struct WebviewSink {
    app_handle: AppHandle,
}

impl WebviewSink {
    pub fn new(app_handle: AppHandle) -> Self {
        WebviewSink { app_handle }
    }
}

impl RenderSink for WebviewSink {
    fn render(&mut self, document: &str) {
        if let Err(e) = self.app_handle.emit_to(MAIN_WINDOW, PREVIEW_EVENT, document) {
            error!("[PREVIEW] Failed to emit {}: {}", PREVIEW_EVENT, e);
        }
    }
}

/// Backend mirror of one Ace editor. Layout calls are forwarded to the
/// webview as events carrying the pane name.
pub struct WebviewEditor {
    pane: Pane,
    buffer: TextBuffer,
    app_handle: AppHandle,
}

impl WebviewEditor {
    pub fn new(pane: Pane, app_handle: AppHandle) -> Self {
        WebviewEditor {
            pane,
            buffer: TextBuffer::default(),
            app_handle,
        }
    }

    fn emit(&self, event: &str) {
        if let Err(e) = self.app_handle.emit_to(MAIN_WINDOW, event, self.pane) {
            error!("[EDITOR] Failed to emit {} for #{}: {}", event, self.pane.element_id(), e);
        }
    }
}

impl EditorWidget for WebviewEditor {
    fn value(&self) -> String {
        self.buffer.value()
    }

    fn set_value(&mut self, text: &str, cursor: CursorPlacement) {
        self.buffer.set_value(text, cursor);
    }

    fn resize(&mut self) {
        self.emit(EDITOR_RESIZE_EVENT);
    }

    fn focus(&mut self) {
        self.emit(EDITOR_FOCUS_EVENT);
    }
}

/// The desktop surface: one webview-backed editor per pane plus both form fields.
pub fn desktop_workspace(app_handle: &AppHandle) -> Workspace {
    Pane::ALL.into_iter().fold(Workspace::new(), |workspace, pane| {
        workspace.with_editor(pane, Some(Box::new(WebviewEditor::new(pane, app_handle.clone()))))
    })
}

pub type DesktopPlayground = Playground<SqliteStore, WebviewSink>;

pub struct PlaygroundState {
    pub playground: Mutex<DesktopPlayground>,
    pub resize: DebouncedTrigger,
    pub theme_resize_delay: Duration,
}

#[derive(Debug, Serialize)]
pub struct ThemeView {
    pub theme: Theme,
    pub css_class: Option<&'static str>,
    pub label: &'static str,
}

impl From<Theme> for ThemeView {
    fn from(theme: Theme) -> Self {
        ThemeView {
            theme,
            css_class: theme.css_class(),
            label: theme.toggle_label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RestoredProject {
    pub source: RestoreSource,
    pub project: Project,
}

fn with_playground<T>(
    state: &State<'_, PlaygroundState>,
    f: impl FnOnce(&mut DesktopPlayground) -> T,
) -> Result<T, String> {
    let mut guard = state
        .playground
        .lock()
        .map_err(|e| format!("Playground lock failed: {}", e))?;
    Ok(f(&mut guard))
}

// --- Exposed Tauri Commands ---

#[command]
pub fn restore_project_cmd(state: State<PlaygroundState>) -> Result<RestoredProject, String> {
    with_playground(&state, |pg| {
        let source = pg.restore_or_default();
        RestoredProject {
            source,
            project: pg.project(),
        }
    })
}

#[command]
pub fn edit_pane_cmd(state: State<PlaygroundState>, pane: Pane, text: String) -> Result<(), String> {
    with_playground(&state, |pg| {
        pg.edit(pane, &text);
    })
}

#[command]
pub fn set_field_cmd(state: State<PlaygroundState>, field: FormField, text: String) -> Result<(), String> {
    with_playground(&state, |pg| pg.set_field(field, &text))
}

#[command]
pub fn show_pane_cmd(state: State<PlaygroundState>, pane: Pane) -> Result<(), String> {
    with_playground(&state, |pg| pg.show_pane(pane))
}

#[command]
pub fn run_preview_cmd(state: State<PlaygroundState>, with_tests: bool) -> Result<(), String> {
    with_playground(&state, |pg| {
        pg.run(with_tests);
    })
}

#[command]
pub fn save_project_cmd(state: State<PlaygroundState>) -> Result<Option<ExportFile>, String> {
    with_playground(&state, |pg| pg.save())
}

#[command]
pub fn load_project_text_cmd(state: State<PlaygroundState>, text: String) -> Result<Option<Project>, String> {
    with_playground(&state, |pg| pg.load_text(&text))
}

#[command(async)]
pub async fn import_project_cmd(
    app_handle: AppHandle,
    state: State<'_, PlaygroundState>,
) -> Result<Option<Project>, String> {
    let picked = app_handle
        .dialog()
        .file()
        .add_filter("Project", &["json"])
        .blocking_pick_file();
    let Some(picked) = picked else {
        return Ok(None);
    };
    let path = picked.into_path().map_err(|e| format!("Unsupported file location: {}", e))?;
    info!("[CMD] Importing project from {}", path.display());
    with_playground(&state, |pg| pg.load_path(&path))
}

#[command(async)]
pub async fn export_project_cmd(
    app_handle: AppHandle,
    state: State<'_, PlaygroundState>,
) -> Result<Option<String>, String> {
    let file_name = with_playground(&state, |pg| pg.export_file_name().to_string())?;
    let picked = app_handle
        .dialog()
        .file()
        .set_file_name(&file_name)
        .add_filter("Project", &["json"])
        .blocking_save_file();
    // Cancelled: nothing written, nothing logged.
    let Some(picked) = picked else {
        return Ok(None);
    };
    let path = picked.into_path().map_err(|e| format!("Unsupported file location: {}", e))?;
    info!("[CMD] Exporting project to {}", path.display());
    let written = with_playground(&state, |pg| pg.export_to(&path))?;
    Ok(written.map(|path| path.display().to_string()))
}

#[command]
pub fn open_preview_cmd(app_handle: AppHandle, state: State<PlaygroundState>) -> Result<(), String> {
    let document = with_playground(&state, |pg| pg.standalone_preview())?;
    let cache_dir = app_handle
        .path()
        .app_cache_dir()
        .map_err(|e| format!("Failed to resolve cache dir: {}", e))?;
    fs::create_dir_all(&cache_dir)
        .map_err(|e| format!("Failed to create '{}': {}", cache_dir.display(), e))?;
    let preview_path = cache_dir.join("preview.html");
    fs::write(&preview_path, document)
        .map_err(|e| format!("Failed to write '{}': {}", preview_path.display(), e))?;
    app_handle
        .opener()
        .open_path(preview_path.to_string_lossy(), None::<&str>)
        .map_err(|e| format!("Failed to open preview: {}", e))
}

#[command]
pub fn get_theme_cmd(state: State<PlaygroundState>, prefers_light: Option<bool>) -> Result<ThemeView, String> {
    with_playground(&state, |pg| pg.init_theme(prefers_light).into())
}

#[command]
pub fn toggle_theme_cmd(state: State<PlaygroundState>) -> Result<ThemeView, String> {
    let theme = with_playground(&state, |pg| pg.toggle_theme())?;
    // Editors re-measure once the new theme's CSS has applied.
    state.resize.trigger_after(state.theme_resize_delay);
    Ok(theme.into())
}

#[command]
pub fn list_diagnostics_cmd(state: State<PlaygroundState>) -> Result<Vec<Diagnostic>, String> {
    with_playground(&state, |pg| pg.diagnostics().entries())
}

#[command]
pub fn clear_diagnostics_cmd(state: State<PlaygroundState>) -> Result<(), String> {
    with_playground(&state, |pg| pg.diagnostics().clear())
}

/// Resizes every editor; runs on the debounce worker. Commands never hold
/// the playground lock while triggering, so this cannot deadlock.
pub fn resize_editors(app_handle: &AppHandle) {
    let Some(state) = app_handle.try_state::<PlaygroundState>() else {
        return;
    };
    match state.playground.lock() {
        Ok(mut pg) => pg.resize_editors(),
        Err(e) => error!("[RESIZE] Playground lock failed: {}", e),
    };
}

pub fn emit_diagnostic(app_handle: &AppHandle, diagnostic: &Diagnostic) {
    if let Err(e) = app_handle.emit_to(MAIN_WINDOW, LOG_EVENT, diagnostic) {
        eprintln!("[CONSOLE] Failed to emit {}: {}", LOG_EVENT, e);
    }
}
