//! constcond CLI - finds conditional tests built entirely from constants.
//!
//! Features:
//! - Recursive scanning with standard directory pruning (target/, .git/, ...)
//! - Rayon-powered parallel file checking
//! - Plain text or JSON output
//! - constcond.toml configuration merged with command-line flags
//! - CI-friendly exit codes (1 when findings exist)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use constcond_core::{
    init_structured_logging, load_config, print_json, print_plain, Constcond, ConstcondConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Find conditional tests that always evaluate the same way")]
pub struct Cli {
    /// Path to the root of the Rust project
    #[arg(default_value = ".")]
    path: String,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// File path patterns whose findings are suppressed
    #[arg(long, num_args = 1..)]
    ignore: Vec<String>,

    /// Directory names to exclude from scanning
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,
}

/// Resolves the output format from the flag and the config file.
///
/// The command-line flag wins; the config only enables JSON when no flag
/// was given.
fn wants_json(flag: bool, config: Option<&ConstcondConfig>) -> bool {
    if flag {
        return true;
    }
    config
        .and_then(|cfg| cfg.output.as_ref())
        .and_then(|out| out.format.as_deref())
        .is_some_and(|format| format.eq_ignore_ascii_case("json"))
}

fn main() -> Result<()> {
    // Global panic guard
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] constcond internal error: {}", info);
        eprintln!("[PANIC] The process will exit safely with code 2.");
    }));

    // Initialize structured logging (JSON to stderr, respects RUST_LOG)
    init_structured_logging();

    let cli = Cli::parse();

    // 1. Resolve the root path
    let root = Path::new(&cli.path)
        .canonicalize()
        .with_context(|| format!("Failed to canonicalize path: {}", cli.path))?;

    // 2. Load config from constcond.toml if present (safe - don't fail on config errors)
    let mut ignore = cli.ignore.clone();
    let mut exclude = cli.exclude.clone();
    let config = match load_config(&root) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[WARN] config load failed: {}", e);
            None
        }
    };
    if let Some(cfg) = &config {
        if let Some(list) = &cfg.ignore {
            ignore.extend(list.iter().cloned());
        }
        if let Some(list) = &cfg.exclude {
            exclude.extend(list.iter().cloned());
        }
    }
    let json = wants_json(cli.json, config.as_ref());

    // 3. Scan and check
    let analysis = Constcond::new(&root)
        .exclude_dirs(exclude)
        .ignore_patterns(ignore)
        .analyze()
        .with_context(|| format!("Failed to analyze {}", root.display()))?;

    // 4. Report results
    if json {
        print_json(&analysis);
    } else {
        print_plain(&analysis);
    }

    // 5. Exit code (CI-friendly)
    std::process::exit(if analysis.findings.is_empty() { 0 } else { 1 });
}
