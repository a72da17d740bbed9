//! constcond-core: constant conditional test detection library for Rust.
//!
//! This library scans Rust source, inspects every `if` condition, and flags
//! conditions whose truth value is fixed at parse time: built entirely from
//! literal constants combined with arithmetic, comparison, unary, and
//! short-circuit boolean operators. A condition like that always branches
//! the same way, which usually means the author meant to reference a
//! variable and wrote a value instead.
//!
//! # Quick Start
//!
//! Use the [`prelude`] module for convenient imports:
//!
//! ```rust,ignore
//! use constcond_core::prelude::*;
//!
//! let analysis = Constcond::new("/path/to/crate").analyze()?;
//!
//! for finding in &analysis.findings {
//!     println!("{}:{}:{} {}", finding.file, finding.line, finding.column, finding.message);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`classify`]: The constant-foldability classifier over expression trees
//! - [`rules`]: Rule contract and the registered rule set
//! - [`check`]: Per-file and multi-file checking driver
//! - [`scan`]: Parallel file discovery
//! - [`config`]: constcond.toml loading
//! - [`report`]: Plaintext and JSON output
//! - [`builder`]: Fluent builder API
//! - [`error`]: Typed error handling

pub mod builder;
pub mod check;
pub mod classify;
pub mod config;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod rules;
pub mod scan;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{ConstcondError, ConstcondResult, IoResultExt};

// Classification
pub use classify::{classify_strict, is_all_constant, MAX_CLASSIFY_DEPTH};

// Rules
pub use rules::{default_rules, ConstantTestRule, Rule};

// Checking
pub use check::{check_file, check_files, Analysis, CheckStats, FileCheckResult, Finding};

// Builder API
pub use builder::Constcond;

// Configuration
pub use config::{load_config, ConstcondConfig, OutputConfig};

// Logging
pub use logging::{init_structured_logging, log_error, log_info, log_warn};

// Reporting
pub use report::{print_json, print_plain};

// File scanning
pub use scan::{gather_rs_files, gather_rs_files_with_excludes};

#[cfg(test)]
mod tests;
