//! Human-readable date rendering.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parse::DateParseError;
use super::value::{DateCalendar, DateValue, GedDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOrder {
    DayMonthYear,
    MonthDayYear,
    YearMonthDay,
    YearOnly,
}

/// Display settings for dates. Parsed from patterns such as `DD.MM.YYYY`,
/// `YYYY.MM.DD`, `MM/DD/YYYY` or `YYYY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pub order: FieldOrder,
    pub separator: char,
    /// Prefix approximations with `~` and open ranges with `<` / `>`.
    pub show_qualifiers: bool,
    /// Append a calendar mark to non-Gregorian dates.
    pub show_calendar: bool,
}

impl Default for DateFormat {
    fn default() -> Self {
        DateFormat {
            order: FieldOrder::DayMonthYear,
            separator: '.',
            show_qualifiers: false,
            show_calendar: false,
        }
    }
}

impl FromStr for DateFormat {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pattern = s.trim().to_ascii_uppercase();
        let unsupported = || DateParseError::Pattern(s.to_string());
        if pattern == "YYYY" {
            return Ok(DateFormat {
                order: FieldOrder::YearOnly,
                ..DateFormat::default()
            });
        }
        let separator = pattern
            .chars()
            .find(|c| !c.is_ascii_alphabetic())
            .ok_or_else(unsupported)?;
        let fields: Vec<&str> = pattern.split(separator).collect();
        let order = match fields.as_slice() {
            ["DD", "MM", "YYYY"] => FieldOrder::DayMonthYear,
            ["MM", "DD", "YYYY"] => FieldOrder::MonthDayYear,
            ["YYYY", "MM", "DD"] => FieldOrder::YearMonthDay,
            _ => return Err(unsupported()),
        };
        Ok(DateFormat {
            order,
            separator,
            ..DateFormat::default()
        })
    }
}

impl DateFormat {
    pub fn with_qualifiers(mut self, show: bool) -> Self {
        self.show_qualifiers = show;
        self
    }

    pub fn with_calendar(mut self, show: bool) -> Self {
        self.show_calendar = show;
        self
    }

    pub fn pattern(&self) -> String {
        let sep = self.separator.to_string();
        match self.order {
            FieldOrder::DayMonthYear => ["DD", "MM", "YYYY"].join(&sep),
            FieldOrder::MonthDayYear => ["MM", "DD", "YYYY"].join(&sep),
            FieldOrder::YearMonthDay => ["YYYY", "MM", "DD"].join(&sep),
            FieldOrder::YearOnly => "YYYY".to_string(),
        }
    }

    /// Absent components are left out, not zero-filled.
    pub fn format_date(&self, date: &GedDate) -> String {
        let year = match date.dual_year {
            Some(dual) => format!("{}/{:02}", date.year.unsigned_abs(), dual),
            None => date.year.unsigned_abs().to_string(),
        };
        let day = date.day.map(|d| format!("{:02}", d));
        let month = date.month.map(|m| format!("{:02}", m));
        let fields = match self.order {
            FieldOrder::DayMonthYear => vec![day, month, Some(year)],
            FieldOrder::MonthDayYear => vec![month, day, Some(year)],
            FieldOrder::YearMonthDay => vec![Some(year), month, day],
            FieldOrder::YearOnly => vec![Some(year)],
        };
        let mut out = fields
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(&self.separator.to_string());
        if date.is_bc() {
            out.push_str(" BC");
        }
        if self.show_calendar && date.calendar != DateCalendar::Gregorian {
            out.push_str(&format!(" [{}]", date.calendar.sign()));
        }
        out
    }

    pub fn format_value(&self, value: &DateValue) -> String {
        let q = self.show_qualifiers;
        let one = |prefix: &str, date: &GedDate| {
            if q {
                format!("{}{}", prefix, self.format_date(date))
            } else {
                self.format_date(date)
            }
        };
        let span = |a: &GedDate, b: &GedDate| {
            format!("{} - {}", self.format_date(a), self.format_date(b))
        };
        match value {
            DateValue::Exact { date } => self.format_date(date),
            DateValue::Approximated { date, .. } => one("~", date),
            DateValue::Range { after, before } => match (after, before) {
                (Some(a), Some(b)) => span(a, b),
                (Some(a), None) => one(">", a),
                (None, Some(b)) => one("<", b),
                (None, None) => String::new(),
            },
            DateValue::Period { from, to } => match (from, to) {
                (Some(a), Some(b)) => span(a, b),
                (Some(a), None) => {
                    let s = self.format_date(a);
                    if q {
                        format!("{} -", s)
                    } else {
                        s
                    }
                }
                (None, Some(b)) => one("- ", b),
                (None, None) => String::new(),
            },
            DateValue::Interpreted { date, phrase } => match date {
                Some(d) => self.format_date(d),
                None => phrase.clone(),
            },
        }
    }
}

impl GedDate {
    pub fn to_display_string(&self, format: &DateFormat) -> String {
        format.format_date(self)
    }
}

impl DateValue {
    pub fn to_display_string(&self, format: &DateFormat) -> String {
        format.format_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{parse_date_value, Approximation};

    fn fmt(pattern: &str) -> DateFormat {
        pattern.parse().unwrap()
    }

    #[test]
    fn patterns_parse() {
        assert_eq!(fmt("DD.MM.YYYY"), DateFormat::default());
        assert_eq!(fmt("mm/dd/yyyy").order, FieldOrder::MonthDayYear);
        assert_eq!(fmt("YYYY-MM-DD").separator, '-');
        assert_eq!(fmt("YYYY").order, FieldOrder::YearOnly);
        assert!("DD.YYYY".parse::<DateFormat>().is_err());
        assert_eq!(fmt("MM/DD/YYYY").pattern(), "MM/DD/YYYY");
    }

    #[test]
    fn full_date_in_each_order() {
        let d = GedDate::ymd(DateCalendar::Gregorian, 1950, 6, 12);
        assert_eq!(d.to_display_string(&fmt("DD.MM.YYYY")), "12.06.1950");
        assert_eq!(d.to_display_string(&fmt("MM/DD/YYYY")), "06/12/1950");
        assert_eq!(d.to_display_string(&fmt("YYYY.MM.DD")), "1950.06.12");
        assert_eq!(d.to_display_string(&fmt("YYYY")), "1950");
    }

    #[test]
    fn missing_components_are_omitted() {
        let v = parse_date_value("JUN 1950");
        assert_eq!(v.to_display_string(&fmt("DD.MM.YYYY")), "06.1950");
        assert_eq!(v.to_display_string(&fmt("YYYY.MM.DD")), "1950.06");
    }

    #[test]
    fn qualifiers_are_optional() {
        let v = parse_date_value("ABT 1950");
        assert_eq!(v.approximation(), Some(Approximation::About));
        assert_eq!(v.to_display_string(&fmt("YYYY")), "1950");
        assert_eq!(
            v.to_display_string(&fmt("YYYY").with_qualifiers(true)),
            "~1950"
        );
        let v = parse_date_value("AFT 1900");
        assert_eq!(
            v.to_display_string(&fmt("YYYY").with_qualifiers(true)),
            ">1900"
        );
        let v = parse_date_value("BET 1900 AND 1910");
        assert_eq!(v.to_display_string(&fmt("YYYY")), "1900 - 1910");
    }

    #[test]
    fn bc_and_calendar_marks() {
        let v = parse_date_value("@#DJULIAN@ 44 B.C.");
        assert_eq!(v.to_display_string(&fmt("YYYY")), "44 BC");
        assert_eq!(
            v.to_display_string(&fmt("YYYY").with_calendar(true)),
            "44 BC [J]"
        );
    }

    #[test]
    fn phrases_display_verbatim() {
        let v = parse_date_value("(before the flood)");
        assert_eq!(v.to_display_string(&DateFormat::default()), "before the flood");
    }
}
