use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::analyzer::parser::Language;
use crate::constants::scan::{DEFAULT_MAX_FILE_SIZE, DEFAULT_SKIP_DIRS};
use crate::types::{LensError, Result};

/// Walks a directory tree for Python and Java sources.
///
/// Directories are skipped by name (not by path), so `build/` is pruned at
/// every depth. Glob exclusions are matched against the path relative to
/// the root.
pub struct FileScanner {
    root: PathBuf,
    skip_dirs: HashSet<String>,
    exclude: Vec<glob::Pattern>,
    max_file_size: u64,
    respect_gitignore: bool,
}

impl FileScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect(),
            exclude: vec![],
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            respect_gitignore: false,
        }
    }

    /// Additional directory names to prune
    pub fn with_skip_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Glob patterns, relative to the root, for files to leave out
    pub fn with_exclude(mut self, patterns: &[String]) -> Result<Self> {
        for pattern in patterns {
            let compiled = glob::Pattern::new(pattern).map_err(|e| {
                LensError::Config(format!("Invalid exclude pattern '{}': {}", pattern, e))
            })?;
            self.exclude.push(compiled);
        }
        Ok(self)
    }

    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Matching files sorted by path.
    ///
    /// A root that is itself a supported file yields just that file.
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        if !self.root.exists() {
            return Err(LensError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Path not found: {}", self.root.display()),
            )));
        }

        let mut files: Vec<ScannedFile> = self.walk().collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        debug!(
            "Scanned {}: {} candidate files",
            self.root.display(),
            files.len()
        );
        Ok(files)
    }

    fn walk(&self) -> impl Iterator<Item = ScannedFile> + '_ {
        let skip_dirs = self.skip_dirs.clone();

        WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .parents(self.respect_gitignore)
            .follow_links(false) // Security: prevent symlink traversal attacks
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry.depth() > 0
                    && skip_dirs.contains(entry.file_name().to_string_lossy().as_ref()))
            })
            .build()
            .filter_map(|e| e.ok())
            .filter_map(move |entry| self.accept(entry.path()))
    }

    fn accept(&self, path: &Path) -> Option<ScannedFile> {
        if !path.is_file() || self.should_exclude(path) {
            return None;
        }

        let language = Language::from_path(path)?;
        let metadata = path.metadata().ok()?;
        if metadata.len() > self.max_file_size {
            debug!(
                "Skipping {} ({} bytes exceeds limit)",
                path.display(),
                metadata.len()
            );
            return None;
        }

        Some(ScannedFile {
            path: path.to_path_buf(),
            size: metadata.len(),
            language,
        })
    }

    fn should_exclude(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let path_str = relative.to_string_lossy();

        self.exclude.iter().any(|p| p.matches(&path_str))
    }
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub size: u64,
    pub language: Language,
}

impl ScannedFile {
    /// Path relative to `root`, or the full path for a single-file root
    pub fn relative_path(&self, root: &Path) -> String {
        match self.path.strip_prefix(root) {
            Ok(p) if !p.as_os_str().is_empty() => p.to_string_lossy().to_string(),
            _ => self.path.to_string_lossy().to_string(),
        }
    }
}
