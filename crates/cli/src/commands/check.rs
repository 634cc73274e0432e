use std::collections::BTreeMap;
use std::path::Path;
use std::process;

use serde_json::json;

use super::load_or_exit;
use crate::config::Config;
use crate::OutputFormat;

pub(crate) fn cmd_check(
    file: &Path,
    best_effort: bool,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let options = config.parse_options(best_effort);
    let outcome = load_or_exit(file, &options, output, quiet);
    let doc = &outcome.document;

    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for record in doc.records() {
        *kinds.entry(record.tag()).or_default() += 1;
    }

    match output {
        OutputFormat::Json => {
            let errors: Vec<_> = outcome.errors.iter().map(|e| e.to_json_value()).collect();
            let report = json!({
                "file": file.display().to_string(),
                "header": doc.header().is_some(),
                "records": doc.record_count(),
                "kinds": kinds,
                "degraded": outcome.is_degraded(),
                "errors": errors,
            });
            let pretty = serde_json::to_string_pretty(&report)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            for e in &outcome.errors {
                eprintln!("error: {}", e);
            }
            if !quiet {
                println!("{}: {} records", file.display(), doc.record_count());
                for (tag, count) in &kinds {
                    println!("  {:<8} {}", tag, count);
                }
                if outcome.is_degraded() {
                    println!(
                        "  incomplete: {} line(s) skipped",
                        outcome.errors.len()
                    );
                }
            }
        }
    }

    if outcome.is_degraded() {
        process::exit(1);
    }
}
