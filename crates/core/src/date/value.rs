use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::calendar::{
    CalendarConverter, FrenchRepublican, Gregorian, Hebrew, Islamic, Julian, Ymd,
};

/// Calendars a date field may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateCalendar {
    Gregorian,
    Julian,
    Hebrew,
    Islamic,
    FrenchRepublican,
    Roman,
    Unknown,
}

const GREGORIAN_MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

// Indexed by the converter's month number (Nisan = 1).
const HEBREW_MONTHS: [&str; 13] = [
    "NSN", "IYR", "SVN", "TMZ", "AAV", "ELL", "TSH", "CSH", "KSL", "TVT", "SHV", "ADR", "ADS",
];

const ISLAMIC_MONTHS: [&str; 12] = [
    "MUHAR", "SAFAR", "RABIA", "RABIT", "JUMAA", "JUMAT", "RAJAB", "SHAAB", "RAMAD", "SHAWW",
    "DHUAQ", "DHUAH",
];

const FRENCH_MONTHS: [&str; 13] = [
    "VEND", "BRUM", "FRIM", "NIVO", "PLUV", "VENT", "GERM", "FLOR", "PRAI", "MESS", "THER",
    "FRUC", "COMP",
];

impl DateCalendar {
    /// Name inside the `@#D...@` escape.
    pub fn escape_name(self) -> &'static str {
        match self {
            DateCalendar::Gregorian => "GREGORIAN",
            DateCalendar::Julian => "JULIAN",
            DateCalendar::Hebrew => "HEBREW",
            DateCalendar::Islamic => "ISLAMIC",
            DateCalendar::FrenchRepublican => "FRENCH R",
            DateCalendar::Roman => "ROMAN",
            DateCalendar::Unknown => "UNKNOWN",
        }
    }

    pub fn from_escape_name(name: &str) -> Option<DateCalendar> {
        let upper = name.trim().to_ascii_uppercase();
        let calendar = match upper.as_str() {
            "GREGORIAN" => DateCalendar::Gregorian,
            "JULIAN" => DateCalendar::Julian,
            "HEBREW" => DateCalendar::Hebrew,
            "ISLAMIC" | "HIJRI" => DateCalendar::Islamic,
            "FRENCH R" | "FRENCH" => DateCalendar::FrenchRepublican,
            "ROMAN" => DateCalendar::Roman,
            "UNKNOWN" => DateCalendar::Unknown,
            _ => return None,
        };
        Some(calendar)
    }

    pub fn month_abbreviations(self) -> &'static [&'static str] {
        match self {
            DateCalendar::Hebrew => &HEBREW_MONTHS,
            DateCalendar::Islamic => &ISLAMIC_MONTHS,
            DateCalendar::FrenchRepublican => &FRENCH_MONTHS,
            DateCalendar::Gregorian
            | DateCalendar::Julian
            | DateCalendar::Roman
            | DateCalendar::Unknown => &GREGORIAN_MONTHS,
        }
    }

    /// Case-insensitive month lookup, 1-based.
    pub fn month_from_abbreviation(self, word: &str) -> Option<u8> {
        self.month_abbreviations()
            .iter()
            .position(|m| m.eq_ignore_ascii_case(word))
            .map(|i| i as u8 + 1)
    }

    pub fn month_abbreviation(self, month: u8) -> Option<&'static str> {
        self.month_abbreviations()
            .get(usize::from(month).checked_sub(1)?)
            .copied()
    }

    /// Roman and unknown-calendar dates are reckoned as Gregorian.
    pub fn converter(self) -> &'static dyn CalendarConverter {
        match self {
            DateCalendar::Julian => &Julian,
            DateCalendar::Hebrew => &Hebrew,
            DateCalendar::Islamic => &Islamic,
            DateCalendar::FrenchRepublican => &FrenchRepublican,
            DateCalendar::Gregorian | DateCalendar::Roman | DateCalendar::Unknown => &Gregorian,
        }
    }

    /// Calendars that number years around a year zero.
    fn has_eras(self) -> bool {
        !matches!(
            self,
            DateCalendar::Hebrew | DateCalendar::Islamic | DateCalendar::FrenchRepublican
        )
    }

    /// Short mark used by display strings.
    pub fn sign(self) -> &'static str {
        match self {
            DateCalendar::Gregorian => "G",
            DateCalendar::Julian => "J",
            DateCalendar::Hebrew => "H",
            DateCalendar::Islamic => "I",
            DateCalendar::FrenchRepublican => "FR",
            DateCalendar::Roman => "R",
            DateCalendar::Unknown => "U",
        }
    }
}

/// One calendar date. Year is always present; month and day may be missing.
/// Negative years are BC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GedDate {
    pub calendar: DateCalendar,
    pub year: i32,
    pub month: Option<u8>,
    pub day: Option<u8>,
    /// Two trailing digits of a dual-dated year, `1699/00`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dual_year: Option<u8>,
}

impl GedDate {
    pub fn year_only(calendar: DateCalendar, year: i32) -> Self {
        GedDate {
            calendar,
            year,
            month: None,
            day: None,
            dual_year: None,
        }
    }

    pub fn ymd(calendar: DateCalendar, year: i32, month: u8, day: u8) -> Self {
        GedDate {
            calendar,
            year,
            month: Some(month),
            day: Some(day),
            dual_year: None,
        }
    }

    pub fn is_bc(&self) -> bool {
        self.year < 0
    }

    /// Year as the converters count it: 1 BC is year 0.
    pub fn astronomical_year(&self) -> i32 {
        if self.year < 0 && self.calendar.has_eras() {
            self.year + 1
        } else {
            self.year
        }
    }

    fn from_astronomical(calendar: DateCalendar, ymd: Ymd) -> GedDate {
        let year = if ymd.year <= 0 && calendar.has_eras() {
            ymd.year - 1
        } else {
            ymd.year
        };
        GedDate::ymd(calendar, year, ymd.month, ymd.day)
    }

    pub fn is_complete(&self) -> bool {
        self.month.is_some() && self.day.is_some()
    }

    /// Earliest and latest Julian Day the date can stand for. A missing
    /// month spans the whole year and a missing day the whole month.
    pub fn jd_bounds(&self) -> (f64, f64) {
        let c = self.calendar.converter();
        let year = self.astronomical_year();
        match (self.month, self.day) {
            (Some(m), Some(d)) => {
                let jd = c.to_jd(year, m, d);
                (jd, jd)
            }
            (Some(m), None) => {
                let start = c.to_jd(year, m, 1);
                let days = c.days_in_month(year, m).max(1);
                (start, start + f64::from(days) - 1.0)
            }
            (None, _) => (c.year_start(year), c.year_end(year)),
        }
    }

    /// Julian Day of the earliest resolution.
    pub fn to_jd(&self) -> f64 {
        self.jd_bounds().0
    }

    /// Re-express a complete date in another calendar.
    pub fn convert_to(&self, calendar: DateCalendar) -> Option<GedDate> {
        if !self.is_complete() {
            return None;
        }
        let ymd = calendar.converter().from_jd(self.to_jd());
        Some(GedDate::from_astronomical(calendar, ymd))
    }

    /// Complete Gregorian date for a Julian Day.
    pub fn from_jd(calendar: DateCalendar, jd: f64) -> GedDate {
        GedDate::from_astronomical(calendar, calendar.converter().from_jd(jd))
    }

    pub fn compare(&self, other: &GedDate) -> Ordering {
        compare_bounds(self.jd_bounds(), other.jd_bounds())
    }
}

/// Writes the date in the interchange format's own syntax.
impl fmt::Display for GedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.calendar != DateCalendar::Gregorian {
            write!(f, "@#D{}@ ", self.calendar.escape_name())?;
        }
        if let Some(day) = self.day {
            write!(f, "{} ", day)?;
        }
        if let Some(month) = self.month.and_then(|m| self.calendar.month_abbreviation(m)) {
            write!(f, "{} ", month)?;
        }
        write!(f, "{}", self.year.unsigned_abs())?;
        if let Some(dual) = self.dual_year {
            write!(f, "/{:02}", dual)?;
        }
        if self.is_bc() {
            write!(f, " B.C.")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Approximation {
    About,
    Calculated,
    Estimated,
}

impl Approximation {
    pub fn keyword(self) -> &'static str {
        match self {
            Approximation::About => "ABT",
            Approximation::Calculated => "CAL",
            Approximation::Estimated => "EST",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Approximation> {
        match word.to_ascii_uppercase().as_str() {
            "ABT" => Some(Approximation::About),
            "CAL" => Some(Approximation::Calculated),
            "EST" => Some(Approximation::Estimated),
            _ => None,
        }
    }
}

/// A parsed date field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateValue {
    Exact {
        date: GedDate,
    },
    /// `BEF`, `AFT` and `BET .. AND ..`
    Range {
        after: Option<GedDate>,
        before: Option<GedDate>,
    },
    /// `FROM`, `TO` and `FROM .. TO ..`
    Period {
        from: Option<GedDate>,
        to: Option<GedDate>,
    },
    Approximated {
        approximation: Approximation,
        date: GedDate,
    },
    /// `INT date (phrase)`, a bare `(phrase)`, or text no grammar matched.
    Interpreted {
        date: Option<GedDate>,
        phrase: String,
    },
}

fn compare_bounds(a: (f64, f64), b: (f64, f64)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1))
}

impl DateValue {
    pub fn empty() -> Self {
        DateValue::Interpreted {
            date: None,
            phrase: String::new(),
        }
    }

    pub fn exact(date: GedDate) -> Self {
        DateValue::Exact { date }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DateValue::Interpreted { date: None, phrase } if phrase.is_empty())
    }

    pub fn approximation(&self) -> Option<Approximation> {
        match self {
            DateValue::Approximated { approximation, .. } => Some(*approximation),
            _ => None,
        }
    }

    /// The single date of an exact, approximated or interpreted value.
    pub fn date(&self) -> Option<&GedDate> {
        match self {
            DateValue::Exact { date } | DateValue::Approximated { date, .. } => Some(date),
            DateValue::Interpreted { date, .. } => date.as_ref(),
            DateValue::Range { .. } | DateValue::Period { .. } => None,
        }
    }

    /// Earliest and latest Julian Day; open sides of ranges are infinite.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let open = |lo: &Option<GedDate>, hi: &Option<GedDate>| -> Option<(f64, f64)> {
            match (lo, hi) {
                (None, None) => None,
                (lo, hi) => Some((
                    lo.map_or(f64::NEG_INFINITY, |d| d.jd_bounds().0),
                    hi.map_or(f64::INFINITY, |d| d.jd_bounds().1),
                )),
            }
        };
        match self {
            DateValue::Range { after, before } => open(after, before),
            DateValue::Period { from, to } => open(from, to),
            _ => self.date().map(GedDate::jd_bounds),
        }
    }

    /// Total order: by earliest bound, then latest bound. Values with no
    /// structured date sort first.
    pub fn compare(&self, other: &DateValue) -> Ordering {
        match (self.bounds(), other.bounds()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => compare_bounds(a, b),
        }
    }
}

/// Writes the value in the interchange format's own syntax.
impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::Exact { date } => write!(f, "{}", date),
            DateValue::Approximated {
                approximation,
                date,
            } => write!(f, "{} {}", approximation.keyword(), date),
            DateValue::Range { after, before } => match (after, before) {
                (Some(a), Some(b)) => write!(f, "BET {} AND {}", a, b),
                (Some(a), None) => write!(f, "AFT {}", a),
                (None, Some(b)) => write!(f, "BEF {}", b),
                (None, None) => Ok(()),
            },
            DateValue::Period { from, to } => match (from, to) {
                (Some(a), Some(b)) => write!(f, "FROM {} TO {}", a, b),
                (Some(a), None) => write!(f, "FROM {}", a),
                (None, Some(b)) => write!(f, "TO {}", b),
                (None, None) => Ok(()),
            },
            DateValue::Interpreted { date, phrase } => match date {
                Some(d) => write!(f, "INT {} ({})", d, phrase),
                None if phrase.is_empty() => Ok(()),
                None => write!(f, "({})", phrase),
            },
        }
    }
}
