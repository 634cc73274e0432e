pub(crate) mod calendar;
pub(crate) mod check;
pub(crate) mod date;
pub(crate) mod export;
pub(crate) mod normalize;
pub(crate) mod records;
pub(crate) mod show;

use std::fs::File;
use std::io;
use std::path::Path;
use std::process;

use gedtree_core::encoding::write_to;
use gedtree_core::{
    load_file, Document, GedError, NodeRef, ParseOptions, ParseOutcome, WriteOptions,
};

use crate::{report_error, OutputFormat};

/// Print a core error the way every subcommand does: the `{kind, line,
/// message}` object in json mode, `error: ...` in text mode.
pub(crate) fn report_ged_error(e: &GedError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&e.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{:?}\"}}", e));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", e);
            }
        }
    }
}

/// Load `file` or exit with status 1.
pub(crate) fn load_or_exit(
    file: &Path,
    options: &ParseOptions,
    output: OutputFormat,
    quiet: bool,
) -> ParseOutcome {
    match load_file(file, options) {
        Ok(outcome) => outcome,
        Err(GedError::Io(e)) => {
            let msg = format!("error reading file '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
        Err(e) => {
            report_ged_error(&e, output, quiet);
            process::exit(1);
        }
    }
}

/// Write `document` (or the `subset` of its records) to `out`, or to stdout.
pub(crate) fn write_or_exit(
    document: &Document,
    subset: Option<&[&str]>,
    options: &WriteOptions,
    out: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) {
    let result = match out {
        Some(path) => File::create(path)
            .map_err(GedError::from)
            .and_then(|mut f| write_to(document, subset, options, &mut f)),
        None => write_to(document, subset, options, &mut io::stdout().lock()),
    };
    if let Err(e) = result {
        report_ged_error(&e, output, quiet);
        process::exit(1);
    }
    if let Some(path) = out {
        log::info!("wrote {}", path.display());
    }
}

/// NAME for people, TITL for sources and media, else the record's own value.
pub(crate) fn record_title(record: NodeRef<'_>) -> String {
    ["NAME", "TITL"]
        .iter()
        .find_map(|tag| record.get_tag(tag))
        .map(|n| n.value())
        .unwrap_or_else(|| record.value())
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}
