// src/projects.rs
// Save/load of the current project: the store slot plus the exportable file.

use crate::diagnostics::Diagnostics;
use crate::error::{PlaygroundError, Result};
use crate::store::KeyValueStore;
use crate::types::Project;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PROJECT_STORAGE_KEY: &str = "academy-codelab-web";
pub const EXPORT_FILE_NAME: &str = "academy-web.json";
pub const EXPORT_MIME_TYPE: &str = "application/json";

/// The bytes offered for download after a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: String,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSlot {
    pub key: String,
    pub export_file_name: String,
}

impl Default for ProjectSlot {
    fn default() -> Self {
        ProjectSlot::new(PROJECT_STORAGE_KEY, EXPORT_FILE_NAME)
    }
}

impl ProjectSlot {
    pub fn new(key: impl Into<String>, export_file_name: impl Into<String>) -> Self {
        ProjectSlot {
            key: key.into(),
            export_file_name: export_file_name.into(),
        }
    }

    /// The export bytes for `project`, without touching the store.
    pub fn export(&self, project: &Project) -> Result<ExportFile> {
        Ok(ExportFile {
            file_name: self.export_file_name.clone(),
            mime_type: EXPORT_MIME_TYPE.to_string(),
            contents: project.to_pretty_json()?,
        })
    }

    fn try_save(&self, store: &dyn KeyValueStore, project: &Project) -> Result<ExportFile> {
        let export = self.export(project)?;
        store.set(&self.key, &export.contents)?;
        debug!("[SAVE] Wrote {} bytes under '{}'", export.contents.len(), self.key);
        Ok(export)
    }

    /// Writes the project under the slot key and hands back the same bytes
    /// as a download. Failures are reported, never returned.
    pub fn save(&self, store: &dyn KeyValueStore, project: &Project, diagnostics: &Diagnostics) -> Option<ExportFile> {
        let export = diagnostics.guard("Unable to save", self.try_save(store, project))?;
        diagnostics.info("Saved locally and downloaded JSON file.");
        Some(export)
    }

    fn try_load(&self, store: &dyn KeyValueStore) -> Result<Option<Value>> {
        match store.get(&self.key)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Writes the export to `target` only; the store slot is left alone.
    pub fn export_to(&self, target: &Path, project: &Project, diagnostics: &Diagnostics) -> Option<PathBuf> {
        let written = diagnostics.guard(
            "Unable to export",
            self.export(project).and_then(|export| write_export(target, &export)),
        )?;
        diagnostics.info(format!("Exported project to {}.", written.display()));
        Some(written)
    }

    /// Raw cached JSON, or `None` when the slot is empty or unreadable.
    pub fn load(&self, store: &dyn KeyValueStore, diagnostics: &Diagnostics) -> Option<Value> {
        diagnostics.guard("Unable to read saved project", self.try_load(store)).flatten()
    }
}

// --- File system bridge ---

pub fn read_project_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| PlaygroundError::io(path, e))
}

/// Writes the export. A directory target gets the export's own file name.
pub fn write_export(target: &Path, export: &ExportFile) -> Result<PathBuf> {
    let path = if target.is_dir() {
        target.join(&export.file_name)
    } else {
        target.to_path_buf()
    };
    fs::write(&path, export.contents.as_bytes()).map_err(|e| PlaygroundError::io(&path, e))?;
    Ok(path)
}
