use crate::config::DiscoveryConfig;
use crate::errors::{AnalysisError, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Finds the Python files under a root directory.
///
/// `.gitignore` files are not consulted; only the hidden and test filters apply.
pub struct FileWalker {
    root: PathBuf,
    exclude_tests: bool,
    exclude_hidden: bool,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            exclude_tests: true,
            exclude_hidden: true,
        }
    }

    pub fn with_discovery(mut self, discovery: &DiscoveryConfig) -> Self {
        self.exclude_tests = discovery.exclude_tests;
        self.exclude_hidden = discovery.exclude_hidden;
        self
    }

    pub fn exclude_tests(mut self, exclude: bool) -> Self {
        self.exclude_tests = exclude;
        self
    }

    pub fn exclude_hidden(mut self, exclude: bool) -> Self {
        self.exclude_hidden = exclude;
        self
    }

    /// Absolute, `/`-separated paths of every matching file, sorted.
    pub fn walk(&self) -> Result<Vec<String>> {
        let root = std::path::absolute(&self.root).map_err(|e| AnalysisError::io(&self.root, e))?;
        let walker = WalkBuilder::new(&root)
            .standard_filters(false)
            .hidden(self.exclude_hidden)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && self.should_process(path) {
                files.push(normalize_path(path));
            }
        }

        files.sort();
        log::debug!("Found {} Python files under {}", files.len(), root.display());
        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
            return false;
        };

        if !name.ends_with(".py") {
            return false;
        }
        !(self.exclude_tests && name.to_lowercase().contains("test"))
    }
}

/// Render a path with forward slashes.
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

pub fn find_python_files(root: &Path, discovery: &DiscoveryConfig) -> Result<Vec<String>> {
    FileWalker::new(root.to_path_buf())
        .with_discovery(discovery)
        .walk()
}
