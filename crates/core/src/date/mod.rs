//! Date subsystem: calendar conversion, date-value grammar, display.

pub mod calendar;
mod format;
mod parse;
mod value;

pub use calendar::{
    convert_all, weekday, Bahai, BahaiDate, CalendarConverter, CalendarView, FrenchRepublican,
    Gregorian, Hebrew, IndianCivil, Islamic, Julian, NamedCalendar, Persian, Ymd,
};
pub use format::{DateFormat, FieldOrder};
pub use parse::{parse_date_value, try_parse_date_value, DateParseError, MAX_YEAR};
pub use value::{Approximation, DateCalendar, DateValue, GedDate};
