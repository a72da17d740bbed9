//! Output formatting - plaintext and JSON.

use serde_json::json;

use crate::check::Analysis;

/// Prints findings in plain text format.
pub fn print_plain(analysis: &Analysis) {
    if analysis.findings.is_empty() {
        println!("No constant conditional tests found.");
    } else {
        println!("CONSTANT CONDITIONAL TESTS ({}):", analysis.findings.len());
        for f in &analysis.findings {
            println!(
                "- {}:{}:{} `{}` [{}] {}",
                f.file, f.line, f.column, f.condition, f.rule, f.message
            );
        }
    }
}

/// Prints findings in JSON format.
///
/// Falls back to a count-only line if serialization fails (should never
/// happen with these plain structs, but every case is handled).
pub fn print_json(analysis: &Analysis) {
    let value = json!({
        "findings": analysis.findings,
        "stats": analysis.stats,
    });
    match serde_json::to_string_pretty(&value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            // Fallback: output in a simpler format
            eprintln!("[WARN] JSON serialization failed: {}", e);
            println!("{{\"finding_count\": {}}}", analysis.findings.len());
        }
    }
}
