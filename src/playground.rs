// src/playground.rs
// Owns the single live project (the workspace) and drives the
// change -> assemble -> render and save/load flows.

use crate::config::PlaygroundConfig;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::normalize::{normalize, normalize_text};
use crate::preview::{assemble_project, RenderSink};
use crate::projects::{read_project_file, ExportFile, ProjectSlot};
use crate::store::KeyValueStore;
use crate::theme::{Theme, ThemeSlot};
use crate::types::{Project, DEFAULT_PROJECT};
use crate::workspace::{self, FormField, Pane, Surface, Workspace};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const READY_BANNER: &str = "Ready: web-only editor (HTML/CSS/JS)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RestoreSource {
    Cached,
    Default,
}

pub struct Playground<S: KeyValueStore, R: RenderSink> {
    store: S,
    sink: R,
    workspace: Workspace,
    diagnostics: Diagnostics,
    slot: ProjectSlot,
    theme_slot: ThemeSlot,
    theme: Theme,
}

impl<S: KeyValueStore, R: RenderSink> Playground<S, R> {
    pub fn new(store: S, sink: R, diagnostics: Diagnostics) -> Self {
        Playground {
            store,
            sink,
            workspace: Workspace::new(),
            diagnostics,
            slot: ProjectSlot::default(),
            theme_slot: ThemeSlot::default(),
            theme: Theme::default(),
        }
    }

    pub fn from_config(store: S, sink: R, config: &PlaygroundConfig) -> Self {
        let mut playground = Playground::new(store, sink, Diagnostics::new(config.diagnostic_capacity));
        playground.slot = ProjectSlot::new(&config.storage_key, &config.export_file_name);
        playground.theme_slot = ThemeSlot::new(&config.theme_key);
        playground
    }

    pub fn with_workspace(mut self, workspace: Workspace) -> Self {
        self.workspace = workspace;
        self
    }

    // --- Startup ---

    /// Cached project if there is a usable one, the welcome example otherwise.
    /// Always ends with something rendered.
    pub fn restore_or_default(&mut self) -> RestoreSource {
        let restored = self.slot.load(&self.store, &self.diagnostics).and_then(|raw| match normalize(&raw) {
            Ok(project) => Some(project),
            Err(e) => {
                self.diagnostics
                    .warn_kind(e.kind(), format!("Skipping auto-restore: {}", e));
                None
            }
        });

        let source = match restored {
            Some(project) => {
                self.apply(&project);
                self.diagnostics.info("Project loaded.");
                RestoreSource::Cached
            }
            None => {
                self.apply(&DEFAULT_PROJECT);
                RestoreSource::Default
            }
        };
        info!("[RESTORE] Started from {:?} content.", source);

        self.run(false);
        self.diagnostics.info(READY_BANNER);
        source
    }

    // --- Editing ---

    /// Change notification from an editor; re-renders without tests.
    pub fn edit(&mut self, pane: Pane, text: &str) -> String {
        workspace::set_editor(&mut self.workspace, pane, text, &self.diagnostics);
        self.run(false)
    }

    pub fn set_field(&mut self, field: FormField, text: &str) {
        workspace::set_field(&mut self.workspace, field, text, &self.diagnostics);
    }

    /// Tab switch: the newly visible editor re-measures and takes focus.
    pub fn show_pane(&mut self, pane: Pane) {
        if let Some(editor) = self.workspace.editor_mut(pane) {
            editor.resize();
            editor.focus();
        }
    }

    pub fn resize_editors(&mut self) {
        workspace::resize_editors(&mut self.workspace);
    }

    // --- Preview ---

    pub fn run(&mut self, include_tests: bool) -> String {
        let document = assemble_project(&self.project(), include_tests);
        self.sink.render(&document);
        self.diagnostics.info(if include_tests { "Run with tests." } else { "Web preview updated." });
        document
    }

    /// The document for a separate window; never includes tests.
    pub fn standalone_preview(&self) -> String {
        assemble_project(&self.project(), false)
    }

    // --- Save / load ---

    pub fn save(&self) -> Option<ExportFile> {
        self.slot.save(&self.store, &self.project(), &self.diagnostics)
    }

    /// Writes the live project to a picked file. Only a written file is logged.
    pub fn export_to(&self, target: &Path) -> Option<PathBuf> {
        self.slot.export_to(target, &self.project(), &self.diagnostics)
    }

    pub fn export_file_name(&self) -> &str {
        &self.slot.export_file_name
    }

    pub fn load_value(&mut self, raw: &Value) -> Option<Project> {
        self.load_normalized(normalize(raw))
    }

    pub fn load_text(&mut self, text: &str) -> Option<Project> {
        self.load_normalized(normalize_text(text))
    }

    pub fn load_path(&mut self, path: &Path) -> Option<Project> {
        let text = self
            .diagnostics
            .guard("Unable to read project file", read_project_file(path))?;
        self.load_text(&text)
    }

    fn load_normalized(&mut self, normalized: Result<Project>) -> Option<Project> {
        let project = self.diagnostics.guard("Invalid project file", normalized)?;
        self.apply(&project);
        self.diagnostics.info("Project loaded.");
        self.run(false);
        Some(project)
    }

    fn apply(&mut self, project: &Project) {
        debug!("[LOAD] Applying project ({} bytes of js)", project.js.len());
        workspace::apply_project(&mut self.workspace, project, &self.diagnostics);
    }

    // --- Theme ---

    pub fn init_theme(&mut self, prefers_light: Option<bool>) -> Theme {
        self.theme = self.theme_slot.resolve(&self.store, prefers_light, &self.diagnostics);
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme_slot.set(&self.store, self.theme.toggled(), &self.diagnostics);
        self.theme
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    // --- Accessors ---

    /// Snapshot of the live project, built from the workspace.
    pub fn project(&self) -> Project {
        workspace::capture_project(&self.workspace)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
