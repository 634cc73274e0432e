use std::process;

use gedtree_core::date::{convert_all, weekday, CalendarConverter, Gregorian};
use serde_json::json;
use time::macros::format_description;
use time::Date;

use crate::{report_error, OutputFormat};

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub(crate) fn cmd_calendar(day: &str, output: OutputFormat, quiet: bool) {
    let format = format_description!("[year]-[month]-[day]");
    let date = match Date::parse(day.trim(), format) {
        Ok(d) => d,
        Err(e) => {
            let msg = format!("invalid day '{}': {} (expected YYYY-MM-DD)", day, e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let jd = Gregorian.to_jd(date.year(), u8::from(date.month()), date.day());
    let views = convert_all(jd);
    let weekday_name = WEEKDAYS[weekday(jd)];

    match output {
        OutputFormat::Json => {
            let report = json!({
                "julian_day": jd,
                "weekday": weekday_name,
                "calendars": views,
            });
            let pretty = serde_json::to_string_pretty(&report)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            if !quiet {
                println!("{} ({}), julian day {}", day.trim(), weekday_name, jd);
            }
            for view in &views {
                println!("  {:<13} {}", view.calendar, view.text);
            }
        }
    }
}
