use std::path::Path;
use std::process;

use gedtree_core::RecordKind;
use serde_json::json;

use super::{load_or_exit, record_title};
use crate::config::Config;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_records(
    file: &Path,
    kind: Option<&str>,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let filter = match kind {
        None => None,
        Some(k) => match RecordKind::parse(k) {
            Some(kind) => Some(kind),
            None => {
                let valid: Vec<&str> = RecordKind::ALL.iter().map(|k| k.tag()).collect();
                let msg = format!("unknown record kind '{}'. Valid: {}", k, valid.join(", "));
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        },
    };

    let outcome = load_or_exit(file, &config.parse_options(false), output, quiet);
    let doc = &outcome.document;
    let selected: Vec<_> = doc
        .records()
        .filter(|r| filter.is_none() || r.record_kind() == filter)
        .collect();

    match output {
        OutputFormat::Json => {
            let rows: Vec<_> = selected
                .iter()
                .map(|r| {
                    json!({
                        "xref": r.xref(),
                        "tag": r.tag(),
                        "kind": r.record_kind().map(|k| k.name()),
                        "title": record_title(*r),
                        "line": r.line(),
                    })
                })
                .collect();
            let pretty = serde_json::to_string_pretty(&rows)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            for r in &selected {
                let xref = r.xref().map(|x| format!("@{}@", x)).unwrap_or_default();
                println!("{:<10} {:<6} {}", xref, r.tag(), record_title(*r));
            }
            if !quiet {
                eprintln!("{} of {} records", selected.len(), doc.record_count());
            }
        }
    }
}
