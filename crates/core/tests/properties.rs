//! Property tests over the tokenizer, calendars, date ordering and the
//! parse / serialize pair.

use gedtree_core::date::{
    parse_date_value, Bahai, CalendarConverter, FrenchRepublican, Gregorian, Hebrew, IndianCivil,
    Islamic, Julian, Persian, Ymd,
};
use gedtree_core::lexer::{TokenKind, Tokenizer};
use gedtree_core::{
    parse, serialize, serialize_with, DateCalendar, DateValue, Document, GedDate, RecordKind,
    WriteOptions,
};
use proptest::prelude::*;
use std::cmp::Ordering;

fn round_trips(calendar: &dyn CalendarConverter, year: i32, month: u8, day: u8) -> bool {
    calendar.from_jd(calendar.to_jd(year, month, day)) == Ymd::new(year, month, day)
}

fn hebrew_date() -> impl Strategy<Value = (i32, u8, u8)> {
    (1i32..7000).prop_flat_map(|y| (Just(y), 1..=Hebrew::year_months(y), 1u8..=29))
}

fn bahai_month() -> impl Strategy<Value = u8> {
    prop_oneof![1u8..=18, Just(20u8)]
}

fn ged_date() -> impl Strategy<Value = GedDate> {
    (
        prop_oneof![Just(DateCalendar::Gregorian), Just(DateCalendar::Julian)],
        1i32..3000,
        proptest::option::of((1u8..=12, proptest::option::of(1u8..=28))),
    )
        .prop_map(|(calendar, year, rest)| match rest {
            None => GedDate::year_only(calendar, year),
            Some((month, None)) => GedDate {
                month: Some(month),
                ..GedDate::year_only(calendar, year)
            },
            Some((month, Some(day))) => GedDate::ymd(calendar, year, month, day),
        })
}

fn date_value() -> impl Strategy<Value = DateValue> {
    prop_oneof![
        ged_date().prop_map(DateValue::exact),
        (ged_date(), ged_date()).prop_map(|(a, b)| DateValue::Range {
            after: Some(a),
            before: Some(b),
        }),
        ged_date().prop_map(|d| DateValue::Range {
            after: None,
            before: Some(d),
        }),
        ged_date().prop_map(|d| DateValue::Period {
            from: Some(d),
            to: None,
        }),
        "[a-z ]{1,12}".prop_map(|phrase| DateValue::Interpreted { date: None, phrase }),
    ]
}

fn value_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 @#é\t\n]{0,160}"
}

fn tag_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("NAME"),
        Just("NOTE"),
        Just("OCCU"),
        Just("PLAC"),
        Just("_UID"),
        Just("EMAIL"),
    ]
}

fn document() -> impl Strategy<Value = Document> {
    let record = (
        prop_oneof![
            Just(RecordKind::Individual),
            Just(RecordKind::Family),
            Just(RecordKind::Note),
            Just(RecordKind::Source),
        ],
        proptest::collection::vec((tag_name(), value_text()), 0..5),
    );
    proptest::collection::vec(record, 0..6).prop_map(|records| {
        let mut doc = Document::new();
        for (kind, children) in records {
            let id = doc.create_record(kind);
            for (tag, value) in children {
                doc.add_tag(id, tag, &value);
            }
        }
        doc
    })
}

proptest! {
    #[test]
    fn tokenizer_always_reaches_end_of_line(input in any::<String>()) {
        let mut tk = Tokenizer::new(&input, false);
        let mut steps = 0;
        while tk.next() != TokenKind::Eol {
            steps += 1;
            prop_assert!(steps <= input.len());
        }
        prop_assert_eq!(tk.next(), TokenKind::Eol);
        prop_assert_eq!(tk.get_rest(), "");
    }

    #[test]
    fn date_parsing_never_fails(input in "[ -~]{0,40}") {
        let value = parse_date_value(&input);
        if input.trim().is_empty() {
            prop_assert!(value.is_empty());
        }
    }

    #[test]
    fn gregorian_and_julian_round_trip(y in -4000i32..4000, m in 1u8..=12, d in 1u8..=28) {
        prop_assert!(round_trips(&Gregorian, y, m, d));
        prop_assert!(round_trips(&Julian, y, m, d));
    }

    #[test]
    fn hebrew_round_trips((y, m, d) in hebrew_date()) {
        prop_assert!(round_trips(&Hebrew, y, m, d));
    }

    #[test]
    fn lunar_and_solar_calendars_round_trip(y in 1i32..3000, m in 1u8..=12, d in 1u8..=29) {
        prop_assert!(round_trips(&Islamic, y, m, d));
        prop_assert!(round_trips(&Persian, y, m, d));
        prop_assert!(round_trips(&IndianCivil, y, m, d));
    }

    #[test]
    fn bahai_round_trips(y in 1i32..1000, m in bahai_month(), d in 1u8..=19) {
        prop_assert!(round_trips(&Bahai, y, m, d));
    }

    #[test]
    fn french_republican_round_trips(y in 1i32..=14, m in 1u8..=12, d in 1u8..=30) {
        prop_assert!(round_trips(&FrenchRepublican, y, m, d));
    }

    #[test]
    fn date_order_is_transitive(a in date_value(), b in date_value(), c in date_value()) {
        let mut sorted = [a, b, c];
        sorted.sort_by(|x, y| x.compare(y));
        prop_assert_ne!(sorted[0].compare(&sorted[1]), Ordering::Greater);
        prop_assert_ne!(sorted[1].compare(&sorted[2]), Ordering::Greater);
        prop_assert_ne!(sorted[0].compare(&sorted[2]), Ordering::Greater);
    }

    #[test]
    fn structured_dates_reparse_from_display(date in ged_date()) {
        let value = DateValue::exact(date);
        let reparsed = parse_date_value(&value.to_string());
        prop_assert_eq!(reparsed, value);
    }

    #[test]
    fn wrapped_values_fold_back(value in value_text(), width in 16usize..80) {
        let mut doc = Document::new();
        let note = doc.create_record(RecordKind::Note);
        doc.set_value(note, &value);
        let options = WriteOptions { max_line_length: width, ..WriteOptions::default() };
        let again = parse(&serialize_with(&doc, None, &options)).unwrap();
        prop_assert_eq!(again.find_record("N1").unwrap().value(), value.as_str());
    }

    #[test]
    fn serialization_is_a_fixed_point(doc in document()) {
        let first = serialize(&doc, None);
        let second = serialize(&parse(&first).unwrap(), None);
        prop_assert_eq!(first, second);
    }
}
