// src/normalize.rs
// Turns whatever JSON was loaded (cache, file, older exports) into a canonical Project.

use crate::error::{PlaygroundError, Result};
use crate::types::{Project, FORMAT_KIND, FORMAT_VERSION};
use serde_json::{Map, Value};

/// Input as seen at the boundary: either an object we can read fields from,
/// or something rejected outright.
#[derive(Debug)]
pub enum RawProject<'a> {
    Object(&'a Map<String, Value>),
    Rejected(&'static str),
}

impl<'a> RawProject<'a> {
    pub fn classify(raw: &'a Value) -> Self {
        match raw {
            Value::Object(map) => RawProject::Object(map),
            Value::Null => RawProject::Rejected("null"),
            Value::Array(_) => RawProject::Rejected("array"),
            Value::String(_) => RawProject::Rejected("string"),
            Value::Number(_) => RawProject::Rejected("number"),
            Value::Bool(_) => RawProject::Rejected("boolean"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Assignment,
    Test,
    Html,
    Css,
    Js,
}

impl ProjectField {
    fn slot(self, project: &mut Project) -> &mut String {
        match self {
            ProjectField::Assignment => &mut project.assignment,
            ProjectField::Test => &mut project.test,
            ProjectField::Html => &mut project.html,
            ProjectField::Css => &mut project.css,
            ProjectField::Js => &mut project.js,
        }
    }
}

/// Where to look when the direct field is missing or not a string.
#[derive(Debug, Clone, Copy)]
pub enum Fallback {
    /// `raw.web.<key>`
    Nested(&'static str),
    /// `raw.<alias>`
    Alias(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: ProjectField,
    pub key: &'static str,
    pub fallback: Fallback,
}

pub const FIELD_RULES: [FieldRule; 5] = [
    FieldRule { field: ProjectField::Assignment, key: "assignment", fallback: Fallback::Alias("task") },
    FieldRule { field: ProjectField::Test, key: "test", fallback: Fallback::Alias("tests") },
    FieldRule { field: ProjectField::Html, key: "html", fallback: Fallback::Nested("html") },
    FieldRule { field: ProjectField::Css, key: "css", fallback: Fallback::Nested("css") },
    FieldRule { field: ProjectField::Js, key: "js", fallback: Fallback::Nested("js") },
];

fn string_at<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

fn resolve<'a>(map: &'a Map<String, Value>, rule: &FieldRule) -> &'a str {
    if let Some(direct) = string_at(map, rule.key) {
        return direct;
    }
    let fallback = match rule.fallback {
        Fallback::Alias(alias) => string_at(map, alias),
        Fallback::Nested(key) => match map.get("web") {
            Some(Value::Object(web)) => string_at(web, key),
            _ => None,
        },
    };
    fallback.unwrap_or_default()
}

/// Normalizes raw JSON into a Project. `version` and `kind` are always
/// stamped with the current format, whatever the input says.
pub fn normalize(raw: &Value) -> Result<Project> {
    let map = match RawProject::classify(raw) {
        RawProject::Object(map) => map,
        RawProject::Rejected(what) => return Err(PlaygroundError::NotAnObject(what)),
    };

    let mut project = Project {
        version: FORMAT_VERSION,
        kind: FORMAT_KIND.to_string(),
        ..Project::default()
    };
    for rule in FIELD_RULES.iter() {
        *rule.field.slot(&mut project) = resolve(map, rule).to_string();
    }
    Ok(project)
}

pub fn normalize_text(text: &str) -> Result<Project> {
    let raw: Value = serde_json::from_str(text)?;
    normalize(&raw)
}
