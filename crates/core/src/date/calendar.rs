//! Calendar arithmetic over a continuous Julian Day.
//!
//! Every converter maps `(year, month, day)` to a Julian Day ending in `.5`
//! (midnight) and back. Years are astronomical for Gregorian and Julian
//! (year 0 = 1 BC); the other calendars count from their own epoch.

use serde::Serialize;

pub const GREGORIAN_EPOCH: f64 = 1721425.5;
pub const HEBREW_EPOCH: f64 = 347995.5;
pub const ISLAMIC_EPOCH: f64 = 1948439.5;
pub const PERSIAN_EPOCH: f64 = 1948320.5;
pub const BAHAI_EPOCH: f64 = 2394646.5;
const FRENCH_SDN_OFFSET: i64 = 2375474;

fn modf(a: f64, b: f64) -> f64 {
    a - b * (a / b).floor()
}

/// Day of week for a Julian Day, 0 = Sunday.
pub fn weekday(jd: f64) -> usize {
    modf((jd + 1.5).floor(), 7.0) as usize
}

/// Year/month/day in one calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ymd {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl Ymd {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Ymd { year, month, day }
    }
}

/// A calendar that converts through the Julian Day.
pub trait CalendarConverter {
    fn to_jd(&self, year: i32, month: u8, day: u8) -> f64;

    fn from_jd(&self, jd: f64) -> Ymd;

    /// Month that opens the numbering of a year.
    fn first_month(&self) -> u8 {
        1
    }

    /// Highest month number the calendar knows.
    fn max_month(&self) -> u8 {
        12
    }

    fn is_valid(&self, year: i32, month: u8, day: u8) -> bool {
        if month == 0 || month > self.max_month() || day == 0 || day > 31 {
            return false;
        }
        self.from_jd(self.to_jd(year, month, day)) == Ymd::new(year, month, day)
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        (1..=31u8)
            .rev()
            .find(|d| self.is_valid(year, month, *d))
            .unwrap_or(0)
    }

    /// First day of the year.
    fn year_start(&self, year: i32) -> f64 {
        self.to_jd(year, self.first_month(), 1)
    }

    /// Last day of the year.
    fn year_end(&self, year: i32) -> f64 {
        self.year_start(year + 1) - 1.0
    }
}

/// Month and weekday names for calendars that carry their own.
pub trait NamedCalendar: CalendarConverter {
    fn month_names(&self) -> &'static [&'static str];

    fn weekday_names(&self) -> &'static [&'static str; 7];

    fn month_name(&self, month: u8) -> Option<&'static str> {
        self.month_names()
            .get(usize::from(month).checked_sub(1)?)
            .copied()
    }

    fn weekday_name(&self, jd: f64) -> &'static str {
        self.weekday_names()[weekday(jd)]
    }
}

// ── Gregorian ───────────────────────────────────────────────────────

pub struct Gregorian;

pub fn leap_gregorian(year: i32) -> bool {
    year % 4 == 0 && !(year % 100 == 0 && year % 400 != 0)
}

impl CalendarConverter for Gregorian {
    fn to_jd(&self, year: i32, month: u8, day: u8) -> f64 {
        let y = f64::from(year - 1);
        let m = f64::from(month);
        let leap_adj = if month <= 2 {
            0.0
        } else if leap_gregorian(year) {
            -1.0
        } else {
            -2.0
        };
        (GREGORIAN_EPOCH - 1.0)
            + 365.0 * y
            + (y / 4.0).floor()
            - (y / 100.0).floor()
            + (y / 400.0).floor()
            + ((367.0 * m - 362.0) / 12.0 + leap_adj + f64::from(day)).floor()
    }

    fn from_jd(&self, jd: f64) -> Ymd {
        let wjd = (jd - 0.5).floor() + 0.5;
        let depoch = wjd - GREGORIAN_EPOCH;
        let quadricent = (depoch / 146097.0).floor();
        let dqc = modf(depoch, 146097.0);
        let cent = (dqc / 36524.0).floor();
        let dcent = modf(dqc, 36524.0);
        let quad = (dcent / 1461.0).floor();
        let dquad = modf(dcent, 1461.0);
        let yindex = (dquad / 365.0).floor();
        let mut year = (quadricent * 400.0 + cent * 100.0 + quad * 4.0 + yindex) as i32;
        if !(cent == 4.0 || yindex == 4.0) {
            year += 1;
        }
        let yearday = wjd - self.to_jd(year, 1, 1);
        let leap_adj = if wjd < self.to_jd(year, 3, 1) {
            0.0
        } else if leap_gregorian(year) {
            1.0
        } else {
            2.0
        };
        let month = (((yearday + leap_adj) * 12.0 + 373.0) / 367.0).floor() as u8;
        let day = (wjd - self.to_jd(year, month, 1)) as u8 + 1;
        Ymd::new(year, month, day)
    }
}

// ── Julian ──────────────────────────────────────────────────────────

pub struct Julian;

impl CalendarConverter for Julian {
    fn to_jd(&self, year: i32, month: u8, day: u8) -> f64 {
        let (mut y, mut m) = (f64::from(year), f64::from(month));
        if month <= 2 {
            y -= 1.0;
            m += 12.0;
        }
        (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + f64::from(day) - 1524.5
    }

    fn from_jd(&self, jd: f64) -> Ymd {
        let z = (jd + 0.5).floor();
        let b = z + 1524.0;
        let c = ((b - 122.1) / 365.25).floor();
        let d = (365.25 * c).floor();
        let e = ((b - d) / 30.6001).floor();
        let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
        let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
        let day = b - d - (30.6001 * e).floor();
        Ymd::new(year as i32, month as u8, day as u8)
    }
}

// ── Hebrew ──────────────────────────────────────────────────────────

/// Months are numbered from Nisan (1); the year begins at Tishri (7).
/// Month 12 is Adar (Adar I in leap years), 13 is Adar II.
pub struct Hebrew;

pub const HEBREW_MONTHS: [&str; 13] = [
    "Nisan", "Iyyar", "Sivan", "Tammuz", "Av", "Elul", "Tishri", "Heshvan", "Kislev", "Teveth",
    "Shevat", "Adar", "Veadar",
];

pub const HEBREW_WEEKDAYS: [&str; 7] = [
    "Yom Rishon",
    "Yom Sheni",
    "Yom Shelishi",
    "Yom Revi'i",
    "Yom Hamishi",
    "Yom Shishi",
    "Shabbat",
];

impl Hebrew {
    pub fn is_leap(year: i32) -> bool {
        modf(f64::from(year) * 7.0 + 1.0, 19.0) < 7.0
    }

    pub fn year_months(year: i32) -> u8 {
        if Hebrew::is_leap(year) {
            13
        } else {
            12
        }
    }

    // Molad of Tishri with the first postponement rule.
    fn delay_1(year: i32) -> f64 {
        let months = ((235.0 * f64::from(year) - 234.0) / 19.0).floor();
        let parts = 12084.0 + 13753.0 * months;
        let mut day = months * 29.0 + (parts / 25920.0).floor();
        if modf(3.0 * (day + 1.0), 7.0) < 3.0 {
            day += 1.0;
        }
        day
    }

    fn delay_2(year: i32) -> f64 {
        let last = Hebrew::delay_1(year - 1);
        let present = Hebrew::delay_1(year);
        let next = Hebrew::delay_1(year + 1);
        if next - present == 356.0 {
            2.0
        } else if present - last == 382.0 {
            1.0
        } else {
            0.0
        }
    }

    pub fn year_days(year: i32) -> f64 {
        Hebrew.to_jd(year + 1, 7, 1) - Hebrew.to_jd(year, 7, 1)
    }

    pub fn month_days(year: i32, month: u8) -> u8 {
        match month {
            2 | 4 | 6 | 10 | 13 => 29,
            12 if !Hebrew::is_leap(year) => 29,
            8 if modf(Hebrew::year_days(year), 10.0) != 5.0 => 29,
            9 if modf(Hebrew::year_days(year), 10.0) == 3.0 => 29,
            _ => 30,
        }
    }
}

impl CalendarConverter for Hebrew {
    fn to_jd(&self, year: i32, month: u8, day: u8) -> f64 {
        let months = Hebrew::year_months(year);
        let mut jd =
            HEBREW_EPOCH + Hebrew::delay_1(year) + Hebrew::delay_2(year) + f64::from(day) + 1.0;
        if month < 7 {
            for mon in 7..=months {
                jd += f64::from(Hebrew::month_days(year, mon));
            }
            for mon in 1..month {
                jd += f64::from(Hebrew::month_days(year, mon));
            }
        } else {
            for mon in 7..month {
                jd += f64::from(Hebrew::month_days(year, mon));
            }
        }
        jd
    }

    fn from_jd(&self, jd: f64) -> Ymd {
        let jd = jd.floor() + 0.5;
        let count = (((jd - HEBREW_EPOCH) * 98496.0) / 35975351.0).floor() as i32;
        let mut year = count - 1;
        let mut i = count;
        while jd >= self.to_jd(i, 7, 1) {
            year += 1;
            i += 1;
        }
        let first = if jd < self.to_jd(year, 1, 1) { 7 } else { 1 };
        let mut month = first;
        while jd > self.to_jd(year, month, Hebrew::month_days(year, month)) {
            month += 1;
        }
        let day = (jd - self.to_jd(year, month, 1)) as u8 + 1;
        Ymd::new(year, month, day)
    }

    fn first_month(&self) -> u8 {
        7
    }

    fn max_month(&self) -> u8 {
        13
    }
}

impl NamedCalendar for Hebrew {
    fn month_names(&self) -> &'static [&'static str] {
        &HEBREW_MONTHS
    }

    fn weekday_names(&self) -> &'static [&'static str; 7] {
        &HEBREW_WEEKDAYS
    }
}

// ── Islamic ─────────────────────────────────────────────────────────

pub struct Islamic;

pub const ISLAMIC_MONTHS: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi'al-Awwal",
    "Rabi'ath-Thani",
    "Jumada l-Ula",
    "Jumada t-Tania",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu l-Qa'da",
    "Dhu l-Hijja",
];

pub const ISLAMIC_WEEKDAYS: [&str; 7] = [
    "al-'ahad",
    "al-'ithnayn",
    "ath-thalatha'",
    "al-'arb'a'",
    "al-khamis",
    "al-jum'a",
    "as-sabt",
];

impl Islamic {
    pub fn is_leap(year: i32) -> bool {
        (year * 11 + 14).rem_euclid(30) < 11
    }
}

impl CalendarConverter for Islamic {
    fn to_jd(&self, year: i32, month: u8, day: u8) -> f64 {
        let y = f64::from(year);
        f64::from(day) + (29.5 * (f64::from(month) - 1.0)).ceil() + (y - 1.0) * 354.0
            + ((3.0 + 11.0 * y) / 30.0).floor()
            + ISLAMIC_EPOCH
            - 1.0
    }

    fn from_jd(&self, jd: f64) -> Ymd {
        let jd = jd.floor() + 0.5;
        let year = ((30.0 * (jd - ISLAMIC_EPOCH) + 10646.0) / 10631.0).floor() as i32;
        let month = ((jd - (29.0 + self.to_jd(year, 1, 1))) / 29.5).ceil() + 1.0;
        let month = month.min(12.0) as u8;
        let day = (jd - self.to_jd(year, month, 1)) as u8 + 1;
        Ymd::new(year, month, day)
    }
}

impl NamedCalendar for Islamic {
    fn month_names(&self) -> &'static [&'static str] {
        &ISLAMIC_MONTHS
    }

    fn weekday_names(&self) -> &'static [&'static str; 7] {
        &ISLAMIC_WEEKDAYS
    }
}

// ── Persian (arithmetic, 2820-year cycle) ───────────────────────────

pub struct Persian;

pub const PERSIAN_MONTHS: [&str; 12] = [
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

pub const PERSIAN_WEEKDAYS: [&str; 7] = [
    "Yekshanbeh",
    "Doshanbeh",
    "Seshhanbeh",
    "Chaharshanbeh",
    "Panjshanbeh",
    "Jomeh",
    "Shanbeh",
];

impl CalendarConverter for Persian {
    fn to_jd(&self, year: i32, month: u8, day: u8) -> f64 {
        let epbase = f64::from(year) - if year >= 0 { 474.0 } else { 473.0 };
        let epyear = 474.0 + modf(epbase, 2820.0);
        let month_days = if month <= 7 {
            (f64::from(month) - 1.0) * 31.0
        } else {
            (f64::from(month) - 1.0) * 30.0 + 6.0
        };
        f64::from(day)
            + month_days
            + ((epyear * 682.0 - 110.0) / 2816.0).floor()
            + (epyear - 1.0) * 365.0
            + (epbase / 2820.0).floor() * 1029983.0
            + (PERSIAN_EPOCH - 1.0)
    }

    fn from_jd(&self, jd: f64) -> Ymd {
        let jd = jd.floor() + 0.5;
        let depoch = jd - self.to_jd(475, 1, 1);
        let cycle = (depoch / 1029983.0).floor();
        let cyear = modf(depoch, 1029983.0);
        let ycycle = if cyear == 1029982.0 {
            2820.0
        } else {
            let aux1 = (cyear / 366.0).floor();
            let aux2 = modf(cyear, 366.0);
            ((2134.0 * aux1 + 2816.0 * aux2 + 2815.0) / 1028522.0).floor() + aux1 + 1.0
        };
        let mut year = (ycycle + 2820.0 * cycle + 474.0) as i32;
        if year <= 0 {
            year -= 1;
        }
        let yday = jd - self.to_jd(year, 1, 1) + 1.0;
        let month = if yday <= 186.0 {
            (yday / 31.0).ceil()
        } else {
            ((yday - 6.0) / 30.0).ceil()
        } as u8;
        let day = (jd - self.to_jd(year, month, 1)) as u8 + 1;
        Ymd::new(year, month, day)
    }
}

impl NamedCalendar for Persian {
    fn month_names(&self) -> &'static [&'static str] {
        &PERSIAN_MONTHS
    }

    fn weekday_names(&self) -> &'static [&'static str; 7] {
        &PERSIAN_WEEKDAYS
    }
}

// ── Indian civil (Saka) ─────────────────────────────────────────────

pub struct IndianCivil;

pub const INDIAN_CIVIL_MONTHS: [&str; 12] = [
    "Chaitra",
    "Vaisakha",
    "Jyaishtha",
    "Asadha",
    "Sravana",
    "Bhadra",
    "Asvina",
    "Kartika",
    "Agrahayana",
    "Pausa",
    "Magha",
    "Phalguna",
];

pub const INDIAN_CIVIL_WEEKDAYS: [&str; 7] = [
    "ravivara",
    "somavara",
    "mangalavara",
    "budhavara",
    "brahaspativara",
    "sukravara",
    "sanivara",
];

impl CalendarConverter for IndianCivil {
    fn to_jd(&self, year: i32, month: u8, day: u8) -> f64 {
        let gyear = year + 78;
        let leap = leap_gregorian(gyear);
        let start = Gregorian.to_jd(gyear, 3, if leap { 21 } else { 22 });
        let caitra = if leap { 31.0 } else { 30.0 };
        let day = f64::from(day);
        if month == 1 {
            return start + (day - 1.0);
        }
        let mut jd = start + caitra;
        jd += f64::from((i32::from(month) - 2).min(5)) * 31.0;
        if month >= 8 {
            jd += (f64::from(month) - 7.0) * 30.0;
        }
        jd + day - 1.0
    }

    fn from_jd(&self, jd: f64) -> Ymd {
        const SAKA: i32 = 78;
        const START: f64 = 80.0;
        let jd = jd.floor() + 0.5;
        let greg = Gregorian.from_jd(jd);
        let leap = leap_gregorian(greg.year);
        let mut year = greg.year - SAKA;
        let mut yday = jd - Gregorian.to_jd(greg.year, 1, 1);
        let caitra = if leap { 31.0 } else { 30.0 };
        if yday < START {
            year -= 1;
            yday += caitra + 31.0 * 5.0 + 30.0 * 3.0 + 10.0 + START;
        }
        yday -= START;
        let (month, day) = if yday < caitra {
            (1.0, yday + 1.0)
        } else {
            let mday = yday - caitra;
            if mday < 31.0 * 5.0 {
                ((mday / 31.0).floor() + 2.0, modf(mday, 31.0) + 1.0)
            } else {
                let mday = mday - 31.0 * 5.0;
                ((mday / 30.0).floor() + 7.0, modf(mday, 30.0) + 1.0)
            }
        };
        Ymd::new(year, month as u8, day as u8)
    }
}

impl NamedCalendar for IndianCivil {
    fn month_names(&self) -> &'static [&'static str] {
        &INDIAN_CIVIL_MONTHS
    }

    fn weekday_names(&self) -> &'static [&'static str; 7] {
        &INDIAN_CIVIL_WEEKDAYS
    }
}

// ── Baha'i ──────────────────────────────────────────────────────────

/// Years are counted continuously from 1844 (year 1 = BE 1); see
/// [`BahaiDate`] for the Kull-i-Shay / Vahid / year split. Month 19 is
/// Ayyam-i-Ha (the intercalary days), month 20 is 'Ala.
pub struct Bahai;

pub const BAHAI_MONTHS: [&str; 20] = [
    "Baha",
    "Jalal",
    "Jamal",
    "'Azamat",
    "Nur",
    "Rahmat",
    "Kalimat",
    "Kamal",
    "Asma'",
    "'Izzat",
    "Mashiyyat",
    "'Ilm",
    "Qudrat",
    "Qawl",
    "Masa'il",
    "Sharaf",
    "Sultan",
    "Mulk",
    "Ayyam-i-Ha",
    "'Ala",
];

pub const BAHAI_WEEKDAYS: [&str; 7] = [
    "Jamal", "Kamal", "Fidal", "'Idal", "Istijlal", "Istiqlal", "Jalal",
];

/// A Baha'i date split into its cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BahaiDate {
    /// Kull-i-Shay, a 361-year cycle
    pub major: i32,
    /// Vahid, a 19-year cycle
    pub cycle: i32,
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl Bahai {
    fn start_gregorian_year() -> i32 {
        Gregorian.from_jd(BAHAI_EPOCH).year
    }

    pub fn cycles_to_jd(major: i32, cycle: i32, year: i32, month: u8, day: u8) -> f64 {
        let gy = 361 * (major - 1) + 19 * (cycle - 1) + (year - 1) + Bahai::start_gregorian_year();
        let month_adj = if month != 20 {
            0.0
        } else if leap_gregorian(gy + 1) {
            -14.0
        } else {
            -15.0
        };
        Gregorian.to_jd(gy, 3, 20) + 19.0 * (f64::from(month) - 1.0) + month_adj + f64::from(day)
    }

    pub fn jd_to_cycles(jd: f64) -> BahaiDate {
        let jd = jd.floor() + 0.5;
        let gy = Gregorian.from_jd(jd).year;
        let in_early_year = Gregorian.to_jd(gy, 1, 1) <= jd && jd <= Gregorian.to_jd(gy, 3, 20);
        let bys = gy - (Bahai::start_gregorian_year() + i32::from(in_early_year));
        let major = bys.div_euclid(361) + 1;
        let cycle = bys.rem_euclid(361) / 19 + 1;
        let year = bys.rem_euclid(19) + 1;
        let days = jd - Bahai::cycles_to_jd(major, cycle, year, 1, 1);
        let ala = Bahai::cycles_to_jd(major, cycle, year, 20, 1);
        let month = if jd >= ala {
            20
        } else {
            (days / 19.0).floor() as u8 + 1
        };
        let day = (jd + 1.0 - Bahai::cycles_to_jd(major, cycle, year, month, 1)) as u8;
        BahaiDate {
            major,
            cycle,
            year,
            month,
            day,
        }
    }

    fn split_year(year: i32) -> (i32, i32, i32) {
        let y = year - 1;
        (y.div_euclid(361) + 1, y.rem_euclid(361) / 19 + 1, y.rem_euclid(19) + 1)
    }
}

impl CalendarConverter for Bahai {
    fn to_jd(&self, year: i32, month: u8, day: u8) -> f64 {
        let (major, cycle, y) = Bahai::split_year(year);
        Bahai::cycles_to_jd(major, cycle, y, month, day)
    }

    fn from_jd(&self, jd: f64) -> Ymd {
        let b = Bahai::jd_to_cycles(jd);
        let year = (b.major - 1) * 361 + (b.cycle - 1) * 19 + b.year;
        Ymd::new(year, b.month, b.day)
    }

    fn max_month(&self) -> u8 {
        20
    }
}

impl NamedCalendar for Bahai {
    fn month_names(&self) -> &'static [&'static str] {
        &BAHAI_MONTHS
    }

    fn weekday_names(&self) -> &'static [&'static str; 7] {
        &BAHAI_WEEKDAYS
    }
}

// ── French Republican ───────────────────────────────────────────────

/// Arithmetic French Republican calendar with sextile years 3, 7 and 11,
/// defined for years 1 through 14. Month 13 holds the complementary days.
pub struct FrenchRepublican;

pub const FRENCH_FIRST_YEAR: i32 = 1;
pub const FRENCH_LAST_YEAR: i32 = 14;

impl CalendarConverter for FrenchRepublican {
    fn to_jd(&self, year: i32, month: u8, day: u8) -> f64 {
        let sdn = (i64::from(year) * 1461).div_euclid(4)
            + (i64::from(month) - 1) * 30
            + i64::from(day)
            + FRENCH_SDN_OFFSET;
        sdn as f64 - 0.5
    }

    fn from_jd(&self, jd: f64) -> Ymd {
        let sdn = (jd + 0.5).floor() as i64;
        let temp = (sdn - FRENCH_SDN_OFFSET) * 4 - 1;
        let year = temp.div_euclid(1461);
        let day_of_year = temp.rem_euclid(1461) / 4;
        Ymd::new(
            year as i32,
            (day_of_year / 30 + 1) as u8,
            (day_of_year % 30 + 1) as u8,
        )
    }

    fn max_month(&self) -> u8 {
        13
    }
}

// ── Whole-set rendering ─────────────────────────────────────────────

/// One calendar's view of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarView {
    pub calendar: &'static str,
    pub date: Ymd,
    pub text: String,
}

fn named_view<C: NamedCalendar>(calendar: &'static str, c: &C, jd: f64) -> CalendarView {
    let date = c.from_jd(jd);
    let text = format!(
        "{} {} {}, {}",
        date.day,
        c.month_name(date.month).unwrap_or("?"),
        date.year,
        c.weekday_name(jd)
    );
    CalendarView {
        calendar,
        date,
        text,
    }
}

/// Render one day in every supported calendar.
pub fn convert_all(jd: f64) -> Vec<CalendarView> {
    let g = Gregorian.from_jd(jd);
    let j = Julian.from_jd(jd);
    let b = Bahai::jd_to_cycles(jd);
    let bahai_date = Bahai.from_jd(jd);
    vec![
        CalendarView {
            calendar: "gregorian",
            date: g,
            text: format!("{:02}.{:02}.{}", g.day, g.month, g.year),
        },
        CalendarView {
            calendar: "julian",
            date: j,
            text: format!("{:02}.{:02}.{}", j.day, j.month, j.year),
        },
        named_view("hebrew", &Hebrew, jd),
        named_view("islamic", &Islamic, jd),
        named_view("persian", &Persian, jd),
        named_view("indian_civil", &IndianCivil, jd),
        CalendarView {
            calendar: "bahai",
            date: bahai_date,
            text: format!(
                "Kull-i-Shay {}, Vahid {}, {} {} {}, {}",
                b.major,
                b.cycle,
                b.day,
                Bahai.month_name(b.month).unwrap_or("?"),
                b.year,
                Bahai.weekday_name(jd)
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gregorian_known_days() {
        assert_eq!(Gregorian.to_jd(2000, 1, 1), 2451544.5);
        assert_eq!(Gregorian.to_jd(1950, 6, 12), 2433444.5);
        assert_eq!(Gregorian.from_jd(2451544.5), Ymd::new(2000, 1, 1));
    }

    #[test]
    fn julian_known_days() {
        // 4 October 1582 (Julian) was followed by 15 October 1582 (Gregorian)
        assert_eq!(Julian.to_jd(1582, 10, 4) + 1.0, Gregorian.to_jd(1582, 10, 15));
        assert_eq!(Julian.from_jd(2299159.5), Ymd::new(1582, 10, 4));
    }

    #[test]
    fn weekday_of_known_dates() {
        // 1 January 2000 was a Saturday
        assert_eq!(weekday(Gregorian.to_jd(2000, 1, 1)), 6);
        // 12 June 1950 was a Monday
        assert_eq!(weekday(Gregorian.to_jd(1950, 6, 12)), 1);
    }

    #[test]
    fn hebrew_new_year_5760() {
        // Rosh Hashanah 5760 fell on 11 September 1999
        let jd = Gregorian.to_jd(1999, 9, 11);
        assert_eq!(Hebrew.from_jd(jd), Ymd::new(5760, 7, 1));
        assert_eq!(Hebrew.to_jd(5760, 7, 1), jd);
        assert_eq!(Hebrew.first_month(), 7);
    }

    #[test]
    fn hebrew_leap_years_have_thirteen_months() {
        assert!(Hebrew::is_leap(5760));
        assert_eq!(Hebrew::year_months(5760), 13);
        assert!(!Hebrew::is_leap(5761));
    }

    #[test]
    fn islamic_new_year_1421() {
        // 1 Muharram 1421 fell on 6 April 2000
        let jd = Gregorian.to_jd(2000, 4, 6);
        assert_eq!(Islamic.from_jd(jd), Ymd::new(1421, 1, 1));
    }

    #[test]
    fn persian_nowruz_1379() {
        // Nowruz 1379 fell on 20 March 2000
        let jd = Gregorian.to_jd(2000, 3, 20);
        assert_eq!(Persian.from_jd(jd), Ymd::new(1379, 1, 1));
    }

    #[test]
    fn indian_civil_new_year_1922() {
        // 1 Chaitra 1922 fell on 21 March 2000 (a leap year)
        let jd = Gregorian.to_jd(2000, 3, 21);
        assert_eq!(IndianCivil.from_jd(jd), Ymd::new(1922, 1, 1));
        let jd = Gregorian.to_jd(2001, 1, 1);
        assert_eq!(IndianCivil.from_jd(jd), Ymd::new(1922, 10, 11));
    }

    #[test]
    fn bahai_epoch_is_first_day() {
        let b = Bahai::jd_to_cycles(BAHAI_EPOCH);
        assert_eq!((b.major, b.cycle, b.year, b.month, b.day), (1, 1, 1, 1, 1));
        assert_eq!(Bahai.from_jd(BAHAI_EPOCH), Ymd::new(1, 1, 1));
    }

    #[test]
    fn french_republican_epoch() {
        // 1 Vendemiaire An I was 22 September 1792
        let jd = Gregorian.to_jd(1792, 9, 22);
        assert_eq!(FrenchRepublican.from_jd(jd), Ymd::new(1, 1, 1));
        assert_eq!(FrenchRepublican.to_jd(1, 1, 1), jd);
    }

    #[test]
    fn days_in_month_from_round_trip() {
        assert_eq!(Gregorian.days_in_month(1900, 2), 28);
        assert_eq!(Gregorian.days_in_month(2000, 2), 29);
        assert_eq!(Julian.days_in_month(1900, 2), 29);
        assert_eq!(Bahai.days_in_month(171, 1), 19);
        assert_eq!(FrenchRepublican.days_in_month(3, 13), 6);
        assert_eq!(FrenchRepublican.days_in_month(2, 13), 5);
    }

    #[test]
    fn named_lookups() {
        assert_eq!(Hebrew.month_name(7), Some("Tishri"));
        assert_eq!(Islamic.month_name(9), Some("Ramadan"));
        assert_eq!(Persian.month_name(0), None);
        assert_eq!(Bahai.month_name(19), Some("Ayyam-i-Ha"));
        let jd = Gregorian.to_jd(2000, 1, 1);
        assert_eq!(Persian.weekday_name(jd), "Shanbeh");
    }

    #[test]
    fn convert_all_covers_every_calendar() {
        let views = convert_all(Gregorian.to_jd(2000, 1, 1));
        let names: Vec<_> = views.iter().map(|v| v.calendar).collect();
        assert_eq!(
            names,
            vec!["gregorian", "julian", "hebrew", "islamic", "persian", "indian_civil", "bahai"]
        );
        assert_eq!(views[0].text, "01.01.2000");
        assert_eq!(views[1].text, "19.12.1999");
    }
}
