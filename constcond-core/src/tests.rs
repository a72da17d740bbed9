//! End-to-end test suite for constcond-core.

use crate::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_file(file: &Path, content: &str) {
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, content).unwrap();
}

fn setup_temp_project() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir()
        .join("constcond_tests")
        .join(format!("{}_{}", timestamp, id));

    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(dir.join("src")).unwrap();
    dir
}

// Core Test 1: a constant `if` is reported with its location
#[test]
fn test_end_to_end_constant_if() {
    let root = setup_temp_project();
    write_file(
        &root.join("src/main.rs"),
        "fn main() {\n    if 1 + 1 == 2 {\n        println!(\"always\");\n    }\n}\n",
    );

    let analysis = Constcond::new(&root).analyze().unwrap();
    assert_eq!(analysis.stats.files_scanned, 1);
    assert_eq!(analysis.stats.ifs_checked, 1);
    assert_eq!(analysis.findings.len(), 1);

    let finding = &analysis.findings[0];
    assert_eq!(finding.rule, "constant-test");
    assert_eq!(finding.line, 2);
    assert_eq!(finding.condition, "1 + 1 == 2");

    fs::remove_dir_all(&root).ok();
}

// Core Test 2: variable conditions produce no findings
#[test]
fn test_end_to_end_variable_conditions_clean() {
    let root = setup_temp_project();
    write_file(
        &root.join("src/lib.rs"),
        r#"
pub fn classify(n: i32) -> &'static str {
    if n > 0 {
        "positive"
    } else if n < 0 {
        "negative"
    } else {
        "zero"
    }
}
"#,
    );

    let analysis = Constcond::new(&root).analyze().unwrap();
    assert_eq!(analysis.stats.ifs_checked, 2);
    assert!(analysis.findings.is_empty());

    fs::remove_dir_all(&root).ok();
}

// Core Test 3: findings across multiple files are sorted and counted
#[test]
fn test_end_to_end_multiple_files() {
    let root = setup_temp_project();
    write_file(
        &root.join("src/a.rs"),
        "pub fn a() { if true { x(); } }\nfn x() {}",
    );
    write_file(
        &root.join("src/b.rs"),
        "pub fn b(flag: bool) { if flag && false { y(); } }\nfn y() {}",
    );
    write_file(
        &root.join("src/c.rs"),
        "pub fn c() { if !(2 < 1) { z(); } }\nfn z() {}",
    );

    let analysis = Constcond::new(&root).analyze().unwrap();
    assert_eq!(analysis.stats.files_scanned, 3);
    assert_eq!(analysis.stats.finding_count, 2);
    assert!(analysis.findings[0].file.ends_with("a.rs"));
    assert!(analysis.findings[1].file.ends_with("c.rs"));

    fs::remove_dir_all(&root).ok();
}

// Core Test 4: a file that fails to parse is skipped, the rest still run
#[test]
fn test_end_to_end_parse_failure_resilient() {
    let root = setup_temp_project();
    write_file(&root.join("src/broken.rs"), "fn broken( {");
    write_file(&root.join("src/ok.rs"), "pub fn ok() { if 0 == 0 { x(); } }\nfn x() {}");

    let analysis = Constcond::new(&root).analyze().unwrap();
    assert_eq!(analysis.stats.files_scanned, 2);
    assert_eq!(analysis.stats.files_skipped, 1);
    assert_eq!(analysis.findings.len(), 1);
    assert!(analysis.findings[0].file.ends_with("ok.rs"));

    fs::remove_dir_all(&root).ok();
}

// Core Test 5: ignore patterns suppress findings by file path
#[test]
fn test_end_to_end_ignore_patterns() {
    let root = setup_temp_project();
    write_file(
        &root.join("src/generated.rs"),
        "pub fn g() { if true { x(); } }\nfn x() {}",
    );
    write_file(
        &root.join("src/handwritten.rs"),
        "pub fn h() { if false { x(); } }\nfn x() {}",
    );

    let analysis = Constcond::new(&root)
        .ignore_patterns(["generated"])
        .analyze()
        .unwrap();
    assert_eq!(analysis.findings.len(), 1);
    assert!(analysis.findings[0].file.ends_with("handwritten.rs"));

    fs::remove_dir_all(&root).ok();
}

// Core Test 6: excluded directories are never scanned
#[test]
fn test_end_to_end_exclude_dirs() {
    let root = setup_temp_project();
    write_file(&root.join("src/main.rs"), "fn main() {}");
    write_file(
        &root.join("vendor/dep.rs"),
        "pub fn v() { if true { x(); } }\nfn x() {}",
    );

    let analysis = Constcond::new(&root)
        .exclude_dirs(["vendor"])
        .analyze()
        .unwrap();
    assert_eq!(analysis.stats.files_scanned, 1);
    assert!(analysis.findings.is_empty());

    fs::remove_dir_all(&root).ok();
}

// Core Test 7: conditions inside nested items and closures are found
#[test]
fn test_end_to_end_nested_contexts() {
    let root = setup_temp_project();
    write_file(
        &root.join("src/lib.rs"),
        r#"
pub fn outer() {
    let f = || {
        if 3 > 2 {
            inner();
        }
    };
    f();
}

fn inner() {
    mod nested {
        pub fn g() {
            if "a" == "a" {
                h();
            }
        }
        fn h() {}
    }
}
"#,
    );

    let analysis = Constcond::new(&root).analyze().unwrap();
    assert_eq!(analysis.stats.ifs_checked, 2);
    assert_eq!(analysis.findings.len(), 2);

    fs::remove_dir_all(&root).ok();
}

// Core Test 8: config file is honored by the CLI layers (load only here)
#[test]
fn test_load_config_roundtrip() {
    let root = setup_temp_project();
    write_file(
        &root.join("constcond.toml"),
        "ignore = [\"generated\"]\nexclude = [\"vendor\"]\n\n[output]\nformat = \"json\"\n",
    );

    let cfg = load_config(&root).unwrap().expect("config should load");
    assert_eq!(cfg.ignore.unwrap(), vec!["generated"]);
    assert_eq!(cfg.exclude.unwrap(), vec!["vendor"]);
    assert_eq!(cfg.output.unwrap().format.unwrap(), "json");

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_load_config_absent_is_none() {
    let root = setup_temp_project();
    assert!(load_config(&root).unwrap().is_none());
    fs::remove_dir_all(&root).ok();
}
