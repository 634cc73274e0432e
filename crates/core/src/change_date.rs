//! Change-date node: `CHAN` holding a `DATE` (which holds an optional
//! `TIME`) and optional `NOTE`s.
//!
//! The two children are read as one timestamp and written together.

use time::macros::format_description;
use time::{Date, Month, PrimitiveDateTime, Time};

use crate::date::{DateCalendar, DateValue, GedDate};
use crate::error::GedError;
use crate::lexer::{TokenKind, Tokenizer};
use crate::tags::NodeKind;
use crate::tree::{Document, NodeId, NodeRef};

/// `HH:MM[:SS[.fff]]`. Failures carry the given line.
pub fn try_parse_time(text: &str, line: u32) -> Result<Time, GedError> {
    let mut tk = Tokenizer::new(text.trim(), true).with_line(line);
    let hour = tk.require_next_int()?;
    tk.require_next_symbol(':')?;
    let minute = tk.require_next_int()?;
    let mut second = 0;
    let mut millis = 0;
    if tk.next() == TokenKind::Symbol {
        tk.require_symbol(':')?;
        second = tk.require_next_int()?;
        if tk.next() == TokenKind::Symbol {
            tk.require_symbol('.')?;
            tk.require_next_int()?;
            // scale the written digits to milliseconds
            let digits = tk.get_word();
            let padded = format!("{:0<3}", &digits[..digits.len().min(3)]);
            millis = padded.parse::<u16>().unwrap_or(0);
            tk.next();
        }
    }
    if tk.current() != TokenKind::Eol {
        return Err(GedError::required(line, "unexpected text after time"));
    }
    let field = |v: i64| u8::try_from(v).unwrap_or(u8::MAX);
    Time::from_hms_milli(field(hour), field(minute), field(second), millis)
        .map_err(|e| GedError::required(line, format!("invalid time: {}", e)))
}

pub fn parse_time(text: &str) -> Option<Time> {
    try_parse_time(text, 0).ok()
}

/// `HH:MM:SS`, with `.fff` when the time has milliseconds.
pub fn format_time(time: Time) -> String {
    let base = format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    );
    match time.millisecond() {
        0 => base,
        ms => format!("{}.{:03}", base, ms),
    }
}

/// Read-only view of a `CHAN` node.
#[derive(Debug, Clone, Copy)]
pub struct ChangeDate<'a> {
    node: NodeRef<'a>,
}

impl<'a> NodeRef<'a> {
    pub fn as_change_date(&self) -> Option<ChangeDate<'a>> {
        matches!(self.kind(), NodeKind::ChangeDate).then_some(ChangeDate { node: *self })
    }
}

impl<'a> ChangeDate<'a> {
    pub fn node(&self) -> NodeRef<'a> {
        self.node
    }

    /// Date and time of the change; `None` until a complete Gregorian date
    /// has been written. A missing `TIME` reads as midnight.
    pub fn timestamp(&self) -> Option<PrimitiveDateTime> {
        let date_node = self.node.get_tag("DATE")?;
        let date = date_node.date()?.date()?;
        if date.calendar != DateCalendar::Gregorian {
            return None;
        }
        let (month, day) = (date.month?, date.day?);
        let date = Date::from_calendar_date(date.year, Month::try_from(month).ok()?, day).ok()?;
        let time = match date_node.get_tag("TIME").map(|t| t.kind()) {
            Some(NodeKind::Time(Some(t))) => *t,
            _ => Time::MIDNIGHT,
        };
        Some(PrimitiveDateTime::new(date, time))
    }

    /// `YYYY.MM.DD HH:MM:SS`, or empty when never set.
    pub fn to_display_string(&self) -> String {
        let format = format_description!("[year].[month].[day] [hour]:[minute]:[second]");
        self.timestamp()
            .and_then(|ts| ts.format(format).ok())
            .unwrap_or_default()
    }

    pub fn notes(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.node.get_tags("NOTE").map(|n| n.value())
    }
}

impl Document {
    /// Write both children of a `CHAN` node in one call.
    pub fn set_change_date(&mut self, chan: NodeId, at: PrimitiveDateTime) {
        let date = DateValue::exact(GedDate::ymd(
            DateCalendar::Gregorian,
            at.year(),
            u8::from(at.month()),
            at.day(),
        ));
        let time = format_time(at.time());

        let existing = self.node(chan).get_tag("DATE").map(|n| n.id());
        let date_id = match existing {
            Some(id) => id,
            None => self.add_tag(chan, "DATE", ""),
        };
        let existing = self.node(date_id).get_tag("TIME").map(|n| n.id());
        let time_id = match existing {
            Some(id) => id,
            None => self.add_tag(date_id, "TIME", ""),
        };
        self.set_date(date_id, &date);
        self.set_value(time_id, &time);
    }

    /// Stamp a record's `CHAN`, creating it when missing.
    pub fn touch(&mut self, record: NodeId, at: PrimitiveDateTime) -> NodeId {
        let existing = self.node(record).get_tag("CHAN").map(|n| n.id());
        let chan = match existing {
            Some(id) => id,
            None => self.add_tag(record, "CHAN", ""),
        };
        self.set_change_date(chan, at);
        chan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::RecordKind;
    use time::macros::datetime;

    #[test]
    fn times_parse_with_optional_parts() {
        assert_eq!(parse_time("10:15"), Time::from_hms(10, 15, 0).ok());
        assert_eq!(parse_time("10:15:30"), Time::from_hms(10, 15, 30).ok());
        assert_eq!(
            parse_time("10:15:30.5"),
            Time::from_hms_milli(10, 15, 30, 500).ok()
        );
        assert_eq!(parse_time("25:00"), None);
        assert_eq!(parse_time("noon"), None);
    }

    #[test]
    fn time_errors_carry_the_line() {
        let err = try_parse_time("10-15", 7).unwrap_err();
        assert!(matches!(err, GedError::RequiredToken { line: 7, .. }));
    }

    #[test]
    fn times_format() {
        assert_eq!(format_time(Time::from_hms(9, 5, 0).unwrap()), "09:05:00");
        assert_eq!(
            format_time(Time::from_hms_milli(9, 5, 0, 250).unwrap()),
            "09:05:00.250"
        );
    }

    #[test]
    fn write_then_read_timestamp() {
        let mut doc = Document::new();
        let rec = doc.create_record(RecordKind::Individual);
        let chan = doc.touch(rec, datetime!(2024-03-09 14:05:07));
        let view = doc.node(chan).as_change_date().unwrap();
        assert_eq!(view.timestamp(), Some(datetime!(2024-03-09 14:05:07)));
        assert_eq!(view.to_display_string(), "2024.03.09 14:05:07");
        let date = view.node().get_tag("DATE").unwrap();
        assert_eq!(date.value(), "9 MAR 2024");
        assert_eq!(date.get_tag("TIME").unwrap().value(), "14:05:07");
    }

    #[test]
    fn rewriting_updates_both_children() {
        let mut doc = Document::new();
        let rec = doc.create_record(RecordKind::Family);
        let chan = doc.touch(rec, datetime!(2020-01-01 00:00:00));
        doc.set_change_date(chan, datetime!(2021-12-31 23:59:59));
        let view = doc.node(chan).as_change_date().unwrap();
        assert_eq!(view.timestamp(), Some(datetime!(2021-12-31 23:59:59)));
        assert_eq!(view.node().child_count(), 1);
    }

    #[test]
    fn unset_change_date_displays_empty() {
        let mut doc = Document::new();
        let rec = doc.create_record(RecordKind::Individual);
        let chan = doc.add_tag(rec, "CHAN", "");
        let view = doc.node(chan).as_change_date().unwrap();
        assert_eq!(view.timestamp(), None);
        assert_eq!(view.to_display_string(), "");
    }

    #[test]
    fn missing_time_reads_as_midnight() {
        let mut doc = Document::new();
        let rec = doc.create_record(RecordKind::Individual);
        let chan = doc.add_tag(rec, "CHAN", "");
        doc.add_tag(chan, "DATE", "1 JAN 2000");
        doc.add_tag(chan, "NOTE", "imported");
        let view = doc.node(chan).as_change_date().unwrap();
        assert_eq!(view.timestamp(), Some(datetime!(2000-01-01 00:00:00)));
        assert_eq!(view.notes().collect::<Vec<_>>(), vec!["imported"]);
    }
}
