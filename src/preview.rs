// src/preview.rs
use crate::types::Project;

const DOCUMENT_HEAD: &str = "<!doctype html>\n<html lang=\"en\" dir=\"ltr\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n";
const TESTS_MARKER: &str = "/* tests */";

/// Builds the srcdoc for the preview frame. Fragments are inserted verbatim;
/// isolation is the frame sandbox's job, not ours.
pub fn assemble(html: &str, css: &str, js: &str, tests: &str, include_tests: bool) -> String {
    let tests = tests.trim();
    let with_tests = include_tests && !tests.is_empty();

    let mut doc = String::with_capacity(DOCUMENT_HEAD.len() + html.len() + css.len() + js.len() + tests.len() + 128);
    doc.push_str(DOCUMENT_HEAD);
    doc.push_str("<style>");
    doc.push_str(css);
    doc.push_str("\n</style></head>\n<body>");
    doc.push_str(html);
    // One try block for user code and tests, so tests can see the user's names.
    doc.push_str("\n<script>\ntry{\n");
    doc.push_str(js);
    doc.push('\n');
    if with_tests {
        doc.push('\n');
        doc.push_str(TESTS_MARKER);
        doc.push('\n');
        doc.push_str(tests);
    }
    doc.push_str("\n}catch(e){console.error(e)}</script>\n</body>\n</html>");
    doc
}

pub fn assemble_project(project: &Project, include_tests: bool) -> String {
    assemble(&project.html, &project.css, &project.js, &project.test, include_tests)
}

/// Where assembled documents go. The desktop forwards them to a sandboxed iframe.
pub trait RenderSink {
    fn render(&mut self, document: &str);
}

/// Keeps the last rendered document around. Used headless and in tests.
#[derive(Debug, Default, Clone)]
pub struct CapturedPreview {
    pub last: Option<String>,
    pub renders: usize,
}

impl RenderSink for CapturedPreview {
    fn render(&mut self, document: &str) {
        self.last = Some(document.to_string());
        self.renders += 1;
    }
}
