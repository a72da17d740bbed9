//! Conditional test checking - the driver around the classifier.
//!
//! Walks every `if` expression in a parsed file, applies the registered
//! rules to its condition, and records one finding per matching condition,
//! anchored at the condition's source span. `else if` arms are separate
//! `if` nodes in the AST and are checked independently; `if let` conditions
//! never match (a `let` condition is not a constant-foldable expression).
//!
//! Parse failures are resilient: the file yields an empty result and a
//! warning, never an aborted analysis.

use proc_macro2::LineColumn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use syn::spanned::Spanned;
use syn::{visit::Visit, Expr};
use tracing::warn;

use crate::rules::Rule;

/// A single reported condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Identifier of the rule that matched.
    pub rule: String,
    /// Fixed message of the matching rule.
    pub message: String,
    /// Source file path.
    pub file: String,
    /// Line of the condition (1-indexed).
    pub line: usize,
    /// Column of the condition (1-indexed).
    pub column: usize,
    /// The condition text as written in the source.
    pub condition: String,
}

/// Result of checking a single file.
#[derive(Debug, Clone, Default)]
pub struct FileCheckResult {
    /// Findings in source order.
    pub findings: Vec<Finding>,
    /// Number of `if` conditions inspected.
    pub if_count: usize,
    /// Whether the file was skipped because it failed to parse.
    pub parse_failed: bool,
}

/// Aggregate counters across a whole run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckStats {
    /// Files handed to the checker.
    pub files_scanned: usize,
    /// Files skipped (unreadable or unparseable).
    pub files_skipped: usize,
    /// `if` conditions inspected.
    pub ifs_checked: usize,
    /// Conditions that matched a rule.
    pub finding_count: usize,
}

/// Result of checking a set of files.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// All findings, ordered by file, then line, then column.
    pub findings: Vec<Finding>,
    /// Aggregate counters.
    pub stats: CheckStats,
}

/// AST visitor that applies the rules to every `if` condition.
struct CheckVisitor<'r> {
    file_path: String,
    rules: &'r [Box<dyn Rule>],
    result: FileCheckResult,
}

impl<'r> CheckVisitor<'r> {
    fn new(file_path: String, rules: &'r [Box<dyn Rule>]) -> Self {
        Self {
            file_path,
            rules,
            result: FileCheckResult::default(),
        }
    }

    /// Applies each rule to one condition; at most one finding per rule.
    fn check_condition(&mut self, cond: &Expr) {
        for rule in self.rules {
            if rule.check_test_expr(cond) {
                // LineColumn lines are 1-indexed, columns 0-indexed.
                let LineColumn { line, column } = cond.span().start();
                self.result.findings.push(Finding {
                    rule: rule.id().to_string(),
                    message: rule.message().to_string(),
                    file: self.file_path.clone(),
                    line,
                    column: column + 1,
                    condition: condition_text(cond),
                });
            }
        }
    }
}

impl<'ast, 'r> Visit<'ast> for CheckVisitor<'r> {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        if let Expr::If(expr_if) = expr {
            self.result.if_count += 1;
            self.check_condition(&expr_if.cond);
        }

        syn::visit::visit_expr(self, expr);
    }
}

/// Renders the condition as written in the source.
///
/// Span source text is available for trees parsed from strings; the
/// placeholder covers synthesized trees with no backing source.
fn condition_text(cond: &Expr) -> String {
    cond.span()
        .source_text()
        .unwrap_or_else(|| "<condition>".to_string())
}

/// Checks one file's content against the rule set.
///
/// On parse error, returns an empty result with `parse_failed` set
/// (resilient behavior).
pub fn check_file(path: &Path, content: &str, rules: &[Box<dyn Rule>]) -> FileCheckResult {
    let ast: syn::File = match syn::parse_file(content) {
        Ok(ast) => ast,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "skipping file that failed to parse");
            return FileCheckResult {
                parse_failed: true,
                ..FileCheckResult::default()
            };
        }
    };

    let mut visitor = CheckVisitor::new(path.display().to_string(), rules);
    visitor.visit_file(&ast);
    visitor.result
}

/// Checks a set of files in parallel and aggregates the results.
///
/// Unreadable files are skipped with a warning. Findings are sorted by
/// file, line, and column so output is deterministic regardless of worker
/// scheduling.
pub fn check_files(files: &[PathBuf], rules: &[Box<dyn Rule>]) -> Analysis {
    let results: Vec<FileCheckResult> = files
        .par_iter()
        .map(|path| match fs::read_to_string(path) {
            Ok(content) => check_file(path, &content, rules),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping unreadable file");
                FileCheckResult {
                    parse_failed: true,
                    ..FileCheckResult::default()
                }
            }
        })
        .collect();

    let mut analysis = Analysis::default();
    analysis.stats.files_scanned = files.len();
    for result in results {
        if result.parse_failed {
            analysis.stats.files_skipped += 1;
        }
        analysis.stats.ifs_checked += result.if_count;
        analysis.findings.extend(result.findings);
    }

    analysis
        .findings
        .sort_by(|a, b| (&a.file, a.line, a.column).cmp(&(&b.file, b.line, b.column)));
    analysis.stats.finding_count = analysis.findings.len();
    analysis
}
