// src/types.rs
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const FORMAT_VERSION: u32 = 1;
pub const FORMAT_KIND: &str = "web-only";

// Shared Project struct, the only thing that is ever persisted.
// Field order here is the field order of the saved JSON.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Project {
    pub version: u32,
    pub kind: String,
    #[serde(default)]
    pub assignment: String,
    #[serde(default)]
    pub test: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
}

impl Default for Project {
    fn default() -> Self {
        Project {
            version: FORMAT_VERSION,
            kind: FORMAT_KIND.to_string(),
            assignment: String::new(),
            test: String::new(),
            html: String::new(),
            css: String::new(),
            js: String::new(),
        }
    }
}

impl Project {
    pub fn with_sources(html: impl Into<String>, css: impl Into<String>, js: impl Into<String>) -> Self {
        Project {
            html: html.into(),
            css: css.into(),
            js: js.into(),
            ..Project::default()
        }
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// --- Default content (the welcome example) ---

pub const DEFAULT_HTML: &str = r#"<!-- Welcome card -->
<section class="card" style="max-width:520px;margin:24px auto;padding:18px;text-align:center">
  <h1>Welcome to the Academy</h1>
  <p>This example runs locally in the browser.</p>
  <button id="btn">Try me</button>
</section>"#;

pub const DEFAULT_CSS: &str = r#"body{font-family:system-ui;background:#f7fafc;margin:0}
h1{color:#0f172a}
#btn{padding:.75rem 1rem;border:0;border-radius:10px;background:#60a5fa;color:#08111f;font-weight:700}"#;

pub const DEFAULT_JS: &str = r#"document.getElementById('btn').addEventListener('click',()=>alert('Well done!'));
console.log('Hello from JavaScript!');"#;

pub static DEFAULT_PROJECT: Lazy<Project> =
    Lazy::new(|| Project::with_sources(DEFAULT_HTML, DEFAULT_CSS, DEFAULT_JS));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_json_keeps_canonical_field_order() {
        let json = Project::with_sources("<p>", "p{}", "1").to_pretty_json().unwrap();
        let order: Vec<usize> = ["\"version\"", "\"kind\"", "\"assignment\"", "\"test\"", "\"html\"", "\"css\"", "\"js\""]
            .iter()
            .map(|key| json.find(key).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{json}");
        assert!(json.contains("\n  \"version\": 1,"));
    }

    #[test]
    fn default_project_is_the_welcome_card() {
        assert_eq!(DEFAULT_PROJECT.version, FORMAT_VERSION);
        assert_eq!(DEFAULT_PROJECT.kind, FORMAT_KIND);
        assert!(DEFAULT_PROJECT.html.contains("<button id=\"btn\">Try me</button>"));
        assert!(DEFAULT_PROJECT.js.contains("alert('Well done!')"));
        assert!(DEFAULT_PROJECT.assignment.is_empty());
        assert!(DEFAULT_PROJECT.test.is_empty());
    }
}
