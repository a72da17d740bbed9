//! Prelude module for convenient imports.
//!
//! Import commonly used types with a single line:
//!
//! ```rust,ignore
//! use constcond_core::prelude::*;
//! ```

// Core classification
pub use crate::classify::{classify_strict, is_all_constant, MAX_CLASSIFY_DEPTH};

// Error types
pub use crate::error::{ConstcondError, ConstcondResult};

// Rules
pub use crate::rules::{default_rules, ConstantTestRule, Rule};

// Checking
pub use crate::check::{check_file, check_files, Analysis, CheckStats, FileCheckResult, Finding};

// File scanning
pub use crate::scan::{gather_rs_files, gather_rs_files_with_excludes};

// Configuration
pub use crate::config::{load_config, ConstcondConfig};

// Builder API
pub use crate::builder::Constcond;
