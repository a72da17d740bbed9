//! Builder pattern API for constcond analysis.
//!
//! Provides a fluent interface for configuring and running a check:
//!
//! ```rust,ignore
//! use constcond_core::prelude::*;
//!
//! let analysis = Constcond::new("/path/to/crate")
//!     .exclude_dirs(["fixtures"])
//!     .ignore_patterns(["generated"])
//!     .analyze()?;
//!
//! for finding in &analysis.findings {
//!     println!("{}:{} {}", finding.file, finding.line, finding.message);
//! }
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::check::{check_files, Analysis};
use crate::rules::default_rules;
use crate::scan::gather_rs_files_with_excludes;

/// Builder for configuring a constant-conditional-test check.
#[derive(Debug, Clone)]
pub struct Constcond {
    /// Root path to analyze
    root: PathBuf,

    /// Custom excluded directories
    excluded_dirs: Vec<String>,

    /// File path patterns whose findings are suppressed
    ignored_patterns: Vec<String>,
}

impl Constcond {
    /// Create a new analysis builder for the given path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excluded_dirs: Vec::new(),
            ignored_patterns: Vec::new(),
        }
    }

    /// Add directories to exclude from scanning.
    pub fn exclude_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Add patterns for file paths to ignore.
    pub fn ignore_patterns(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ignored_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Run the check and return the aggregated findings.
    pub fn analyze(&self) -> Result<Analysis> {
        let excludes: Vec<&str> = self.excluded_dirs.iter().map(String::as_str).collect();
        let files = gather_rs_files_with_excludes(&self.root, &excludes)
            .context("Failed to gather .rs files")?;

        let rules = default_rules();
        let mut analysis = check_files(&files, &rules);

        analysis.findings.retain(|f| !self.is_ignored(&f.file));
        analysis.stats.finding_count = analysis.findings.len();

        Ok(analysis)
    }

    /// Check if a file path matches any ignored pattern.
    fn is_ignored(&self, file: &str) -> bool {
        for pattern in &self.ignored_patterns {
            if pattern.ends_with('*') {
                let prefix = &pattern[..pattern.len() - 1];
                if file.starts_with(prefix) {
                    return true;
                }
            } else if let Some(suffix) = pattern.strip_prefix('*') {
                if file.ends_with(suffix) {
                    return true;
                }
            } else if file == pattern || file.contains(pattern) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_test_crate() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir()
            .join(format!("constcond_builder_test_{}_{}", std::process::id(), id));

        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(dir.join("src")).expect("Failed to create test directory");

        fs::write(
            dir.join("Cargo.toml"),
            "[package]\nname = \"test\"\nversion = \"0.1.0\"",
        )
        .expect("Failed to write Cargo.toml");

        fs::write(
            dir.join("src/main.rs"),
            "fn main() { if true { println!(\"always\"); } }",
        )
        .expect("Failed to write main.rs");

        fs::write(
            dir.join("src/clean.rs"),
            "pub fn run(x: bool) { if x { helper(); } }\nfn helper() {}",
        )
        .expect("Failed to write clean.rs");

        dir
    }

    #[test]
    fn test_builder_basic() {
        let dir = create_test_crate();

        let analysis = Constcond::new(&dir).analyze().unwrap();

        assert_eq!(analysis.stats.finding_count, 1);
        assert!(analysis.findings[0].file.ends_with("main.rs"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_builder_ignore_patterns() {
        let dir = create_test_crate();

        let analysis = Constcond::new(&dir)
            .ignore_patterns(["main.rs"])
            .analyze()
            .unwrap();

        assert!(analysis.findings.is_empty());
        assert_eq!(analysis.stats.finding_count, 0);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_is_ignored_patterns() {
        let builder = Constcond::new("/tmp").ignore_patterns(["*_gen.rs", "fixtures"]);
        assert!(builder.is_ignored("src/schema_gen.rs"));
        assert!(builder.is_ignored("tests/fixtures/case.rs"));
        assert!(!builder.is_ignored("src/main.rs"));
    }
}
