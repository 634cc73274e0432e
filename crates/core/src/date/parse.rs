//! Tolerant reader for date field text.
//!
//! `try_parse_date_value` is strict and reports why a text is not a date;
//! `parse_date_value` never fails and keeps unreadable text as a phrase.

use thiserror::Error;

use crate::error::GedError;
use crate::lexer::{TokenKind, Tokenizer};

use super::value::{Approximation, DateCalendar, DateValue, GedDate};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("unknown month '{0}'")]
    UnknownMonth(String),
    #[error("unknown calendar escape '{0}'")]
    UnknownCalendar(String),
    #[error("unsupported date format pattern '{0}'")]
    Pattern(String),
    #[error("{0}")]
    Malformed(String),
}

impl From<GedError> for DateParseError {
    fn from(e: GedError) -> Self {
        DateParseError::Malformed(e.to_string())
    }
}

fn malformed(msg: impl Into<String>) -> DateParseError {
    DateParseError::Malformed(msg.into())
}

/// Parse a date field, degrading to an interpreted phrase on failure. An
/// unknown month still keeps the year when one can be found.
pub fn parse_date_value(text: &str) -> DateValue {
    match try_parse_date_value(text) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("date {:?} kept as free text: {}", text, e);
            let date = match e {
                DateParseError::UnknownMonth(_) => salvage_year(text),
                _ => None,
            };
            DateValue::Interpreted {
                date,
                phrase: text.trim().to_string(),
            }
        }
    }
}

/// Largest year the parser accepts.
pub const MAX_YEAR: i32 = 9999;

/// Last plausible year number in the text, in the calendar named by the
/// escape before it.
fn salvage_year(text: &str) -> Option<GedDate> {
    let mut tk = Tokenizer::new(text, true);
    let mut calendar = DateCalendar::Gregorian;
    let mut year = None;
    tk.next();
    while tk.current() != TokenKind::Eol {
        if tk.is_symbol('@') {
            // a good escape leaves the cursor on the token after it
            if let Ok(escaped) = parse_escape(&mut tk) {
                calendar = escaped;
                continue;
            }
        }
        if tk.current() == TokenKind::Number
            && (1..=i64::from(MAX_YEAR)).contains(&tk.get_number())
        {
            year = i32::try_from(tk.get_number())
                .ok()
                .map(|y| GedDate::year_only(calendar, y));
        }
        tk.next();
    }
    year
}

/// A run of non-ASCII letters, which the tokenizer reads one symbol at a
/// time. Leaves the cursor on the first token after the run.
fn foreign_word(tk: &mut Tokenizer<'_>) -> Option<String> {
    let mut word = String::new();
    while tk.current() == TokenKind::Symbol && tk.get_symbol().is_alphabetic() {
        word.push(tk.get_symbol());
        tk.next();
    }
    (!word.is_empty()).then_some(word)
}

pub fn try_parse_date_value(text: &str) -> Result<DateValue, DateParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(DateValue::empty());
    }
    if let Some(inner) = text.strip_prefix('(') {
        let phrase = inner
            .strip_suffix(')')
            .ok_or_else(|| malformed("unterminated date phrase"))?;
        return Ok(DateValue::Interpreted {
            date: None,
            phrase: phrase.to_string(),
        });
    }

    let mut tk = Tokenizer::new(text, true);
    tk.next();

    let keyword = if tk.current() == TokenKind::Word {
        tk.get_word().to_ascii_uppercase()
    } else {
        String::new()
    };

    let value = match keyword.as_str() {
        "ABT" | "CAL" | "EST" => {
            let approximation = Approximation::from_keyword(&keyword)
                .ok_or_else(|| malformed("unknown approximation"))?;
            tk.next();
            DateValue::Approximated {
                approximation,
                date: parse_date(&mut tk)?,
            }
        }
        "BEF" => {
            tk.next();
            DateValue::Range {
                after: None,
                before: Some(parse_date(&mut tk)?),
            }
        }
        "AFT" => {
            tk.next();
            DateValue::Range {
                after: Some(parse_date(&mut tk)?),
                before: None,
            }
        }
        "BET" => {
            tk.next();
            let after = parse_date(&mut tk)?;
            if !tk.is_word("AND") {
                return Err(malformed("AND expected in date range"));
            }
            tk.next();
            let before = parse_date(&mut tk)?;
            DateValue::Range {
                after: Some(after),
                before: Some(before),
            }
        }
        "FROM" => {
            tk.next();
            let from = parse_date(&mut tk)?;
            let to = if tk.is_word("TO") {
                tk.next();
                Some(parse_date(&mut tk)?)
            } else {
                None
            };
            DateValue::Period {
                from: Some(from),
                to,
            }
        }
        "TO" => {
            tk.next();
            DateValue::Period {
                from: None,
                to: Some(parse_date(&mut tk)?),
            }
        }
        "INT" => {
            tk.next();
            let date = parse_date(&mut tk)?;
            let phrase = if tk.is_symbol('(') {
                let phrase = tk
                    .get_rest()
                    .trim_end()
                    .strip_suffix(')')
                    .ok_or_else(|| malformed("unterminated date phrase"))?;
                skip_to_end(&mut tk);
                phrase.to_string()
            } else {
                String::new()
            };
            DateValue::Interpreted {
                date: Some(date),
                phrase,
            }
        }
        _ => DateValue::Exact {
            date: parse_date(&mut tk)?,
        },
    };

    if tk.current() != TokenKind::Eol {
        return Err(malformed(format!(
            "unexpected '{}' after date",
            tk.get_word()
        )));
    }
    Ok(value)
}

fn skip_to_end(tk: &mut Tokenizer<'_>) {
    while tk.next() != TokenKind::Eol {}
}

/// Words that may follow a year and so never name a month.
fn ends_date(word: &str) -> bool {
    ["AND", "TO", "B", "BC", "BCE"]
        .iter()
        .any(|w| w.eq_ignore_ascii_case(word))
}

/// `[@#Dcalendar@] [[day] month] year[/yy] [era]`, starting at the current
/// token and leaving the tokenizer on the first token after the date.
fn parse_date(tk: &mut Tokenizer<'_>) -> Result<GedDate, DateParseError> {
    let calendar = if tk.is_symbol('@') {
        parse_escape(tk)?
    } else {
        DateCalendar::Gregorian
    };

    let first = if tk.current() == TokenKind::Number {
        let n = tk.get_number();
        tk.next();
        Some(n)
    } else {
        None
    };

    if let Some(word) = foreign_word(tk) {
        return Err(DateParseError::UnknownMonth(word));
    }

    let mut day = None;
    let mut month = None;
    let year = if tk.current() == TokenKind::Word && !ends_date(tk.get_word()) {
        let word = tk.get_word();
        month = Some(
            calendar
                .month_from_abbreviation(word)
                .ok_or_else(|| DateParseError::UnknownMonth(word.to_string()))?,
        );
        if let Some(d) = first {
            day = Some(
                u8::try_from(d)
                    .ok()
                    .filter(|d| (1..=31).contains(d))
                    .ok_or_else(|| malformed(format!("day {} out of range", d)))?,
            );
        }
        let year = tk.require_next_int()?;
        tk.next();
        year
    } else {
        first.ok_or_else(|| malformed("year expected"))?
    };

    let mut year = i32::try_from(year)
        .ok()
        .filter(|y| (1..=MAX_YEAR).contains(y))
        .ok_or_else(|| malformed(format!("year {} out of range", year)))?;

    let mut dual_year = None;
    if tk.is_symbol('/') {
        let dual = tk.require_next_int()?;
        dual_year = Some(
            u8::try_from(dual)
                .ok()
                .filter(|d| *d < 100)
                .ok_or_else(|| malformed(format!("dual year {} must have two digits", dual)))?,
        );
        tk.next();
    }

    if parse_era(tk)? {
        year = -year;
    }

    let date = GedDate {
        calendar,
        year,
        month,
        day,
        dual_year,
    };
    if let (Some(m), Some(d)) = (month, day) {
        if !calendar
            .converter()
            .is_valid(date.astronomical_year(), m, d)
        {
            return Err(malformed(format!("{} is not a valid day", date)));
        }
    }
    Ok(date)
}

/// `@#DJULIAN@`, `@#DFRENCH R@`, ... Current token is the opening `@`.
fn parse_escape(tk: &mut Tokenizer<'_>) -> Result<DateCalendar, DateParseError> {
    tk.require_next_symbol('#')?;
    tk.next();
    let mut name = match tk.current() {
        TokenKind::Word => match tk.get_word().strip_prefix(['D', 'd']) {
            Some(rest) => rest.to_string(),
            None => return Err(malformed("calendar escape must start with @#D")),
        },
        _ => return Err(malformed("calendar escape must start with @#D")),
    };
    loop {
        match tk.next() {
            TokenKind::Word => {
                name.push(' ');
                name.push_str(tk.get_word());
            }
            TokenKind::Symbol if tk.get_symbol() == '@' => break,
            _ => return Err(malformed("unterminated calendar escape")),
        }
    }
    tk.next();
    DateCalendar::from_escape_name(&name).ok_or(DateParseError::UnknownCalendar(name))
}

/// `BC`, `BCE`, `B.C.` or `(B.C.)` after the year.
fn parse_era(tk: &mut Tokenizer<'_>) -> Result<bool, DateParseError> {
    if tk.is_word("BC") || tk.is_word("BCE") {
        tk.next();
        return Ok(true);
    }
    if tk.is_word("B") {
        tk.require_next_symbol('.')?;
        tk.next();
        if !tk.is_word("C") {
            return Err(malformed("malformed era"));
        }
        tk.require_next_symbol('.')?;
        tk.next();
        return Ok(true);
    }
    let parenthesized = tk.is_symbol('(')
        && tk
            .get_rest()
            .get(..5)
            .is_some_and(|s| s.eq_ignore_ascii_case("B.C.)"));
    if parenthesized {
        // ( B . C . ) and one past
        for _ in 0..6 {
            tk.next();
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(text: &str) -> GedDate {
        match try_parse_date_value(text).unwrap() {
            DateValue::Exact { date } => date,
            other => panic!("expected exact date, got {:?}", other),
        }
    }

    #[test]
    fn full_gregorian_date() {
        let d = exact("12 JUN 1950");
        assert_eq!(d, GedDate::ymd(DateCalendar::Gregorian, 1950, 6, 12));
    }

    #[test]
    fn partial_dates() {
        let d = exact("jun 1950");
        assert_eq!((d.year, d.month, d.day), (1950, Some(6), None));
        let d = exact("1950");
        assert_eq!((d.year, d.month, d.day), (1950, None, None));
    }

    #[test]
    fn approximations() {
        let v = try_parse_date_value("ABT 1950").unwrap();
        assert_eq!(v.approximation(), Some(Approximation::About));
        assert_eq!(v.date().map(|d| d.year), Some(1950));
        let v = try_parse_date_value("EST 3 MAR 1801").unwrap();
        assert_eq!(v.approximation(), Some(Approximation::Estimated));
    }

    #[test]
    fn ranges_and_periods() {
        let v = try_parse_date_value("BET 1900 AND JUN 1910").unwrap();
        match v {
            DateValue::Range {
                after: Some(a),
                before: Some(b),
            } => {
                assert_eq!(a.year, 1900);
                assert_eq!(b.month, Some(6));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            try_parse_date_value("BEF 1900").unwrap(),
            DateValue::Range { after: None, before: Some(_) }
        ));
        assert!(matches!(
            try_parse_date_value("FROM 1900 TO 1910").unwrap(),
            DateValue::Period { from: Some(_), to: Some(_) }
        ));
        assert!(matches!(
            try_parse_date_value("TO 1910").unwrap(),
            DateValue::Period { from: None, to: Some(_) }
        ));
    }

    #[test]
    fn calendar_escapes() {
        let d = exact("@#DJULIAN@ 1 JAN 1700");
        assert_eq!(d.calendar, DateCalendar::Julian);
        let d = exact("@#DHEBREW@ 1 TSH 5760");
        assert_eq!((d.calendar, d.month), (DateCalendar::Hebrew, Some(7)));
        let d = exact("@#DFRENCH R@ 1 VEND 1");
        assert_eq!(d.calendar, DateCalendar::FrenchRepublican);
        assert!(matches!(
            try_parse_date_value("@#DMAYAN@ 1950"),
            Err(DateParseError::UnknownCalendar(_))
        ));
    }

    #[test]
    fn eras_negate_the_year() {
        for text in ["44 BC", "44 B.C.", "44 (B.C.)", "44 bce"] {
            assert_eq!(exact(text).year, -44, "{}", text);
        }
    }

    #[test]
    fn dual_years() {
        let d = exact("11 FEB 1699/00");
        assert_eq!((d.year, d.dual_year), (1699, Some(0)));
        assert_eq!(d.to_string(), "11 FEB 1699/00");
    }

    #[test]
    fn phrases() {
        let v = try_parse_date_value("(during the war)").unwrap();
        assert_eq!(
            v,
            DateValue::Interpreted {
                date: None,
                phrase: "during the war".into()
            }
        );
        let v = try_parse_date_value("INT 12 JUN 1950 (Whit Monday)").unwrap();
        assert_eq!(v.date().map(|d| d.day), Some(Some(12)));
        assert!(matches!(v, DateValue::Interpreted { phrase, .. } if phrase == "Whit Monday"));
    }

    #[test]
    fn invalid_days_are_rejected() {
        assert!(try_parse_date_value("30 FEB 1950").is_err());
        assert!(try_parse_date_value("29 FEB 1900").is_err());
        assert!(try_parse_date_value("29 FEB 2000").is_ok());
    }

    #[test]
    fn unknown_month_keeps_the_year() {
        let v = parse_date_value("12 JUNE 1950");
        assert_eq!(
            v,
            DateValue::Interpreted {
                date: Some(GedDate::year_only(DateCalendar::Gregorian, 1950)),
                phrase: "12 JUNE 1950".into()
            }
        );
    }

    #[test]
    fn unknown_month_keeps_the_escaped_calendar() {
        let v = parse_date_value("@#DHEBREW@ 1 FOO 5760");
        assert_eq!(v.date(), Some(&GedDate::year_only(DateCalendar::Hebrew, 5760)));
        let v = parse_date_value("ABT @#DJULIAN@ 3 XYZ 1700");
        assert_eq!(v.date().map(|d| d.calendar), Some(DateCalendar::Julian));
        let hebrew = parse_date_value("@#DHEBREW@ 5760");
        assert_eq!(
            parse_date_value("@#DHEBREW@ 1 FOO 5760").compare(&hebrew),
            std::cmp::Ordering::Equal
        );
    }

    #[test]
    fn non_latin_month_keeps_the_year() {
        assert!(matches!(
            try_parse_date_value("12 ИЮН 1950"),
            Err(DateParseError::UnknownMonth(m)) if m == "ИЮН"
        ));
        let v = parse_date_value("12 ИЮН 1950");
        assert_eq!(
            v,
            DateValue::Interpreted {
                date: Some(GedDate::year_only(DateCalendar::Gregorian, 1950)),
                phrase: "12 ИЮН 1950".into()
            }
        );
        assert!(parse_date_value("ИЮН 1950").date().is_some());
    }

    #[test]
    fn garbage_becomes_a_phrase() {
        let v = parse_date_value("sometime ?");
        assert!(matches!(v, DateValue::Interpreted { date: None, .. }));
        assert!(parse_date_value("   ").is_empty());
    }

    #[test]
    fn trailing_text_is_an_error() {
        assert!(try_parse_date_value("1950 1951").is_err());
        assert!(try_parse_date_value("BET 1900").is_err());
    }
}
