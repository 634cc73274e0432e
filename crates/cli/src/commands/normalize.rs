use std::path::Path;

use serde_json::json;

use super::{load_or_exit, write_or_exit};
use crate::config::Config;
use crate::OutputFormat;

pub(crate) fn cmd_normalize(
    file: &Path,
    out: Option<&Path>,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let outcome = load_or_exit(file, &config.parse_options(false), output, quiet);
    write_or_exit(&outcome.document, None, &config.write, out, output, quiet);

    if let Some(path) = out {
        match output {
            OutputFormat::Json => {
                println!(
                    "{}",
                    json!({
                        "out": path.display().to_string(),
                        "records": outcome.document.record_count(),
                        "max_line_length": config.write.max_line_length,
                    })
                );
            }
            OutputFormat::Text => {
                if !quiet {
                    println!(
                        "wrote {} records to {}",
                        outcome.document.record_count(),
                        path.display()
                    );
                }
            }
        }
    }
}
