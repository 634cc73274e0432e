use std::path::Path;
use std::process;

use serde_json::json;

use super::{load_or_exit, write_or_exit};
use crate::config::Config;
use crate::{report_error, OutputFormat};

pub(crate) struct ExportRequest<'a> {
    pub file: &'a Path,
    pub xrefs: &'a [String],
    pub with_links: bool,
    pub out: Option<&'a Path>,
}

pub(crate) fn cmd_export(
    req: ExportRequest<'_>,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let outcome = load_or_exit(req.file, &config.parse_options(false), output, quiet);
    let doc = &outcome.document;

    let mut selected: Vec<String> = Vec::new();
    for xref in req.xrefs {
        let xref = xref.trim_matches('@');
        if !doc.contains_xref(xref) {
            let msg = format!("no record @{}@ in '{}'", xref, req.file.display());
            report_error(&msg, output, quiet);
            process::exit(1);
        }
        let reached: Vec<String> = if req.with_links {
            doc.linked_records(xref)
                .iter()
                .filter_map(|r| r.xref().map(str::to_string))
                .collect()
        } else {
            vec![xref.to_string()]
        };
        for x in reached {
            if !selected.contains(&x) {
                selected.push(x);
            }
        }
    }

    let subset: Vec<&str> = selected.iter().map(String::as_str).collect();
    write_or_exit(doc, Some(&subset), &config.write, req.out, output, quiet);

    // Report only when the records went to a file; stdout holds the export.
    if let Some(path) = req.out {
        match output {
            OutputFormat::Json => {
                println!(
                    "{}",
                    json!({ "out": path.display().to_string(), "records": subset })
                );
            }
            OutputFormat::Text => {
                if !quiet {
                    println!("exported {} records to {}", subset.len(), path.display());
                }
            }
        }
    }
}
