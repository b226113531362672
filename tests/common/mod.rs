// Test utility module for riskmap integration tests
#![allow(dead_code)]

use riskmap::{AnalysisResult, BatchAnalyzer, FileReport};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Analyze one in-memory file and return its report.
pub fn analyze_snippet(path: &str, code: &str) -> FileReport {
    BatchAnalyzer::new().analyze_source(path, code.as_bytes())
}

/// Analyze several in-memory files, keyed by path in the given order.
pub fn analyze_snippets(files: &[(&str, &str)]) -> AnalysisResult {
    let sources: Vec<(String, &str)> = files
        .iter()
        .map(|(path, code)| (path.to_string(), *code))
        .collect();
    BatchAnalyzer::new().analyze_sources(&sources)
}

/// Create a project directory with the given relative files.
pub fn create_project(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for (relative, content) in files {
        write_file(temp_dir.path(), relative, content);
    }
    temp_dir
}

pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directory");
    }
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// `depth` nested `if` statements inside a function.
pub fn nested_ifs(depth: usize) -> String {
    let mut code = String::from("def f(x):\n");
    for level in 1..=depth {
        code.push_str(&"    ".repeat(level));
        code.push_str("if x:\n");
    }
    code.push_str(&"    ".repeat(depth + 1));
    code.push_str("return x\n");
    code
}
