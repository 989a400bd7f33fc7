// src/workspace.rs
// The editor surface: three source editors and two form fields. `Workspace`
// is the in-memory mirror the playground keeps as its single live project.

use crate::diagnostics::Diagnostics;
use crate::error::PlaygroundError;
use crate::types::Project;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pane {
    Html,
    Css,
    Js,
}

impl Pane {
    pub const ALL: [Pane; 3] = [Pane::Html, Pane::Css, Pane::Js];

    pub fn element_id(self) -> &'static str {
        match self {
            Pane::Html => "ed_html",
            Pane::Css => "ed_css",
            Pane::Js => "ed_js",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Assignment,
    Test,
}

impl FormField {
    pub fn element_id(self) -> &'static str {
        match self {
            FormField::Assignment => "assignment",
            FormField::Test => "testArea",
        }
    }
}

/// Where the cursor goes after a programmatic `set_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorPlacement {
    #[default]
    Start,
    End,
}

pub trait EditorWidget: Send {
    fn value(&self) -> String;
    fn set_value(&mut self, text: &str, cursor: CursorPlacement);
    fn resize(&mut self);
    fn focus(&mut self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    pub text: String,
    pub cursor: usize,
    pub revision: u64,
}

impl EditorWidget for TextBuffer {
    fn value(&self) -> String {
        self.text.clone()
    }

    fn set_value(&mut self, text: &str, cursor: CursorPlacement) {
        self.text = text.to_string();
        self.cursor = match cursor {
            CursorPlacement::Start => 0,
            CursorPlacement::End => self.text.len(),
        };
        self.revision += 1;
    }

    // A bare buffer has no layout and no focus to move.
    fn resize(&mut self) {}

    fn focus(&mut self) {}
}

pub trait Surface {
    fn editor(&self, pane: Pane) -> Option<&dyn EditorWidget>;
    fn editor_mut(&mut self, pane: Pane) -> Option<&mut dyn EditorWidget>;
    fn field(&self, field: FormField) -> Option<&str>;
    fn field_mut(&mut self, field: FormField) -> Option<&mut String>;
}

/// Any element may be missing; `Workspace::default()` has all of them.
pub struct Workspace {
    html: Option<Box<dyn EditorWidget>>,
    css: Option<Box<dyn EditorWidget>>,
    js: Option<Box<dyn EditorWidget>>,
    assignment: Option<String>,
    test: Option<String>,
}

impl Default for Workspace {
    fn default() -> Self {
        Workspace {
            html: Some(Box::new(TextBuffer::default())),
            css: Some(Box::new(TextBuffer::default())),
            js: Some(Box::new(TextBuffer::default())),
            assignment: Some(String::new()),
            test: Some(String::new()),
        }
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("html", &self.html.as_ref().map(|e| e.value()))
            .field("css", &self.css.as_ref().map(|e| e.value()))
            .field("js", &self.js.as_ref().map(|e| e.value()))
            .field("assignment", &self.assignment)
            .field("test", &self.test)
            .finish()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Workspace::default()
    }

    pub fn with_editor(mut self, pane: Pane, editor: Option<Box<dyn EditorWidget>>) -> Self {
        *self.editor_slot(pane) = editor;
        self
    }

    pub fn without_editor(self, pane: Pane) -> Self {
        self.with_editor(pane, None)
    }

    pub fn without_field(mut self, field: FormField) -> Self {
        match field {
            FormField::Assignment => self.assignment = None,
            FormField::Test => self.test = None,
        }
        self
    }

    fn editor_slot(&mut self, pane: Pane) -> &mut Option<Box<dyn EditorWidget>> {
        match pane {
            Pane::Html => &mut self.html,
            Pane::Css => &mut self.css,
            Pane::Js => &mut self.js,
        }
    }
}

impl Surface for Workspace {
    fn editor(&self, pane: Pane) -> Option<&dyn EditorWidget> {
        let slot = match pane {
            Pane::Html => &self.html,
            Pane::Css => &self.css,
            Pane::Js => &self.js,
        };
        slot.as_deref()
    }

    fn editor_mut(&mut self, pane: Pane) -> Option<&mut dyn EditorWidget> {
        match self.editor_slot(pane) {
            Some(editor) => Some(editor.as_mut()),
            None => None,
        }
    }

    fn field(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Assignment => self.assignment.as_deref(),
            FormField::Test => self.test.as_deref(),
        }
    }

    fn field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Assignment => self.assignment.as_mut(),
            FormField::Test => self.test.as_mut(),
        }
    }
}

fn skipped(diagnostics: &Diagnostics, id: &str) {
    let missing = PlaygroundError::MissingElement(id.to_string());
    diagnostics.warn_kind(missing.kind(), format!("Warning: {}; skipped setting value", missing));
}

pub fn set_field(surface: &mut dyn Surface, field: FormField, text: &str, diagnostics: &Diagnostics) {
    match surface.field_mut(field) {
        Some(slot) => *slot = text.to_string(),
        None => skipped(diagnostics, field.element_id()),
    }
}

pub fn set_editor(surface: &mut dyn Surface, pane: Pane, text: &str, diagnostics: &Diagnostics) {
    match surface.editor_mut(pane) {
        Some(editor) => editor.set_value(text, CursorPlacement::Start),
        None => skipped(diagnostics, pane.element_id()),
    }
}

/// Pushes every field of `project` into the surface. A missing element is
/// skipped with a warning; the rest are still set.
pub fn apply_project(surface: &mut dyn Surface, project: &Project, diagnostics: &Diagnostics) {
    set_field(surface, FormField::Assignment, &project.assignment, diagnostics);
    set_field(surface, FormField::Test, &project.test, diagnostics);
    set_editor(surface, Pane::Html, &project.html, diagnostics);
    set_editor(surface, Pane::Css, &project.css, diagnostics);
    set_editor(surface, Pane::Js, &project.js, diagnostics);
}

pub fn capture_project(surface: &dyn Surface) -> Project {
    let editor = |pane| surface.editor(pane).map(|e| e.value()).unwrap_or_default();
    let field = |f| surface.field(f).unwrap_or_default().to_string();
    Project {
        assignment: field(FormField::Assignment),
        test: field(FormField::Test),
        html: editor(Pane::Html),
        css: editor(Pane::Css),
        js: editor(Pane::Js),
        ..Project::default()
    }
}

pub fn resize_editors(surface: &mut dyn Surface) {
    for pane in Pane::ALL {
        if let Some(editor) = surface.editor_mut(pane) {
            editor.resize();
        }
    }
}
