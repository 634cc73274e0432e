use std::process;

use gedtree_core::date::{parse_date_value, try_parse_date_value};
use gedtree_core::{DateCalendar, DateValue};
use serde_json::json;

use crate::config::Config;
use crate::{report_error, OutputFormat};

fn kind_name(value: &DateValue) -> &'static str {
    match value {
        DateValue::Exact { .. } => "exact",
        DateValue::Range { .. } => "range",
        DateValue::Period { .. } => "period",
        DateValue::Approximated { .. } => "approximated",
        DateValue::Interpreted { date: Some(_), .. } => "interpreted",
        DateValue::Interpreted { date: None, .. } => "text",
    }
}

pub(crate) fn cmd_date(
    text: &str,
    pattern: Option<&str>,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let format = match config.date_format(pattern) {
        Ok(f) => f,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let value = parse_date_value(text);
    let degraded = try_parse_date_value(text).err().map(|e| e.to_string());
    let display = value.to_display_string(&format);
    let gregorian = value
        .date()
        .filter(|d| d.calendar != DateCalendar::Gregorian)
        .and_then(|d| d.convert_to(DateCalendar::Gregorian));

    match output {
        OutputFormat::Json => {
            let report = json!({
                "input": text,
                "value": value,
                "kind": kind_name(&value),
                "display": display,
                "interchange": value.to_string(),
                "bounds": value.bounds().map(|(lo, hi)| [lo, hi]),
                "gregorian": gregorian.map(|g| g.to_display_string(&format)),
                "degraded": degraded,
            });
            let pretty = serde_json::to_string_pretty(&report)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            println!("{}", display);
            if !quiet {
                println!("  kind:        {}", kind_name(&value));
                println!("  interchange: {}", value);
                if let Some(date) = value.date() {
                    println!("  calendar:    {}", date.calendar.escape_name());
                }
                if let Some(g) = gregorian {
                    println!("  gregorian:   {}", g.to_display_string(&format));
                }
                if let Some((lo, hi)) = value.bounds() {
                    println!("  julian day:  {} .. {}", lo, hi);
                }
                if let Some(reason) = degraded {
                    println!("  kept as text: {}", reason);
                }
            }
        }
    }
}
