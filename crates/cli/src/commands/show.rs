use std::path::Path;
use std::process;

use gedtree_core::{serialize_node, NodeKind, NodeRef};
use serde_json::{json, Value};

use super::load_or_exit;
use crate::config::Config;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_show(
    file: &Path,
    xref: &str,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let outcome = load_or_exit(file, &config.parse_options(false), output, quiet);
    let Some(record) = outcome.document.find_record(xref) else {
        let msg = format!("no record @{}@ in '{}'", xref.trim_matches('@'), file.display());
        report_error(&msg, output, quiet);
        process::exit(1);
    };

    match output {
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&node_json(record))
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            print!("{}", serialize_node(record, &config.write));
        }
    }
}

/// Nested `{tag, xref, value, children}` objects; dates also carry their
/// parsed structure.
fn node_json(node: NodeRef<'_>) -> Value {
    let mut obj = json!({
        "tag": node.tag(),
        "line": node.line(),
    });
    if let Some(xref) = node.xref() {
        obj["xref"] = json!(xref);
    }
    if !node.value().is_empty() {
        obj["value"] = json!(node.value());
    }
    if let NodeKind::Date(date) = node.kind() {
        obj["date"] = serde_json::to_value(date).unwrap_or(Value::Null);
    }
    if node.child_count() > 0 {
        obj["children"] = Value::Array(node.children().map(node_json).collect());
    }
    obj
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_tree_carries_dates() {
        let doc = gedtree_core::parse("0 @I1@ INDI\n1 BIRT\n2 DATE ABT 1950\n").unwrap();
        let value = node_json(doc.find_record("I1").unwrap());
        assert_eq!(value["xref"], "I1");
        let date = &value["children"][0]["children"][0];
        assert_eq!(date["value"], "ABT 1950");
        assert_eq!(date["date"]["kind"], "approximated");
        assert_eq!(date["date"]["date"]["year"], 1950);
    }
}
