//! End-to-end parsing scenarios over whole documents.

use gedtree_core::{
    load_bytes, parse, parse_with, serialize, serialize_with, Approximation, CharacterSet,
    DateCalendar, DateFormat, Document, GedDate, GedError, NodeKind, ParseOptions, RecordKind,
    WriteOptions,
};

const FAMILY: &str = "\
0 HEAD
1 SOUR gedtree
1 CHAR UTF-8
0 @I1@ INDI
1 NAME John /Doe/
1 SEX M
1 BIRT
2 DATE 12 JUN 1950
2 PLAC Springfield
1 FAMS @F1@
1 CHAN
2 DATE 3 MAR 2021
3 TIME 08:30:00
0 @I2@ INDI
1 NAME Jane /Roe/
1 BIRT
2 DATE ABT 1952
1 FAMS @F1@
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 MARR
2 DATE BET 1970 AND 1972
1 NOTE Married in the
2 CONT old chapel, contact: vicar@@parish.org
0 @S1@ SOUR
1 TITL Parish register
0 TRLR
";

fn record_tags(doc: &Document) -> Vec<(String, String)> {
    doc.records()
        .map(|r| {
            (
                r.xref().unwrap_or_default().to_string(),
                r.tag().to_string(),
            )
        })
        .collect()
}

#[test]
fn individual_with_birth_date() {
    let doc = parse("0 @I1@ INDI\n1 NAME John /Doe/\n1 BIRT\n2 DATE 12 JUN 1950\n").unwrap();
    assert_eq!(doc.record_count(), 1);
    let indi = doc.find_record("I1").unwrap();
    assert_eq!(indi.record_kind(), Some(RecordKind::Individual));
    assert_eq!(indi.get_tag("NAME").unwrap().value(), "John /Doe/");
    let date = indi
        .get_tag("BIRT")
        .and_then(|b| b.get_tag("DATE"))
        .and_then(|d| d.date())
        .and_then(|v| v.date())
        .copied()
        .unwrap();
    assert_eq!(date.calendar, DateCalendar::Gregorian);
    assert_eq!((date.year, date.month, date.day), (1950, Some(6), Some(12)));
}

#[test]
fn approximated_date_displays_year() {
    let doc = parse("0 @I1@ INDI\n1 DATE ABT 1950\n").unwrap();
    let value = doc.find_record("I1").unwrap().get_tag("DATE").unwrap().date().unwrap().clone();
    assert_eq!(value.approximation(), Some(Approximation::About));
    let date = value.date().unwrap();
    assert_eq!((date.year, date.month, date.day), (1950, None, None));
    let format: DateFormat = "YYYY".parse().unwrap();
    assert_eq!(value.to_display_string(&format), "1950");
}

#[test]
fn level_jump_reports_line_two() {
    match parse("0 HEAD\n2 SOUR Test\n") {
        Err(GedError::Structure { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected structure error, got {:?}", other),
    }
}

#[test]
fn full_family_document() {
    let doc = parse(FAMILY).unwrap();
    assert_eq!(
        record_tags(&doc),
        vec![
            ("I1".to_string(), "INDI".to_string()),
            ("I2".to_string(), "INDI".to_string()),
            ("F1".to_string(), "FAM".to_string()),
            ("S1".to_string(), "SOUR".to_string()),
        ]
    );
    assert_eq!(doc.header().unwrap().get_tag("SOUR").unwrap().value(), "gedtree");

    let fam = doc.find_record("@F1@").unwrap();
    let husband = doc.resolve(fam.get_tag("HUSB").unwrap().id()).unwrap();
    assert_eq!(husband.xref(), Some("I1"));
    assert_eq!(
        fam.get_tag("NOTE").unwrap().value(),
        "Married in the\nold chapel, contact: vicar@parish.org"
    );

    let chan = doc.find_record("I1").unwrap().get_tag("CHAN").unwrap();
    assert!(matches!(chan.kind(), NodeKind::ChangeDate));
    assert_eq!(
        chan.as_change_date().unwrap().to_display_string(),
        "2021.03.03 08:30:00"
    );
}

#[test]
fn every_node_sits_one_level_below_its_parent() {
    let doc = parse(FAMILY).unwrap();
    for node in doc.walk() {
        match node.parent() {
            Some(parent) => assert_eq!(node.level(), parent.level() + 1),
            None => assert_eq!(node.level(), 0),
        }
    }
}

#[test]
fn dates_sort_across_qualifiers() {
    let doc = parse(FAMILY).unwrap();
    let mut dates: Vec<_> = doc
        .walk()
        .into_iter()
        .filter(|n| n.parent().is_some_and(|p| p.tag() != "CHAN"))
        .filter_map(|n| n.date().cloned())
        .collect();
    dates.sort_by(|a, b| a.compare(b));
    let text: Vec<_> = dates.iter().map(|d| d.to_string()).collect();
    assert_eq!(text, vec!["12 JUN 1950", "ABT 1952", "BET 1970 AND 1972"]);
}

#[test]
fn serialize_then_parse_is_structurally_equal() {
    let doc = parse(FAMILY).unwrap();
    let again = parse(&serialize(&doc, None)).unwrap();
    let shape = |d: &Document| {
        d.walk()
            .into_iter()
            .map(|n| {
                (
                    n.level(),
                    n.xref().map(str::to_string),
                    n.tag().to_string(),
                    n.value().to_string(),
                )
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(shape(&doc), shape(&again));
}

#[test]
fn narrow_wrap_width_preserves_long_notes() {
    let long = "word ".repeat(120);
    let text = format!("0 @N1@ NOTE {}\n", long);
    let doc = parse(&text).unwrap();
    let options = WriteOptions {
        max_line_length: 32,
        ..WriteOptions::default()
    };
    let written = serialize_with(&doc, None, &options);
    let mut lines = written.lines();
    assert!(lines.next().unwrap().chars().count() <= 32 + "0 @N1@ NOTE ".len());
    assert!(lines.all(|l| l.chars().count() <= 32 + "1 CONC ".len()));
    let again = parse(&written).unwrap();
    assert_eq!(again.find_record("N1").unwrap().value(), long);
}

#[test]
fn subset_export_with_linked_records() {
    let doc = parse(FAMILY).unwrap();
    let linked: Vec<String> = doc
        .linked_records("F1")
        .iter()
        .filter_map(|r| r.xref().map(str::to_string))
        .collect();
    assert_eq!(linked, vec!["F1", "I1", "I2"]);
    let keep: Vec<&str> = linked.iter().map(String::as_str).collect();
    let partial = parse(&serialize(&doc, Some(&keep))).unwrap();
    assert_eq!(partial.record_count(), 3);
    assert!(partial.find_record("S1").is_none());
}

#[test]
fn best_effort_reports_every_bad_line() {
    let text = "0 HEAD\n0 @I1@ INDI\n1 NAME A\n3 NOTE orphan\n0 INDI\n1 NAME lost\n0 @I2@ INDI\n";
    let outcome = parse_with(text, &ParseOptions::best_effort(10)).unwrap();
    let lines: Vec<_> = outcome.errors.iter().filter_map(|e| e.line()).collect();
    assert_eq!(lines, vec![4, 5]);
    assert_eq!(outcome.document.record_count(), 2);
    assert!(parse(text).is_err());
}

#[test]
fn programmatic_edits_survive_serialization() {
    let mut doc = Document::new();
    let head = doc.ensure_header();
    doc.add_tag(head, "CHAR", "UTF-8");
    let indi = doc.create_record(RecordKind::Individual);
    doc.add_tag(indi, "NAME", "Ada /Lovelace/");
    let birth = doc.add_tag(indi, "BIRT", "");
    let date = doc.add_tag(birth, "DATE", "");
    doc.set_date(
        date,
        &gedtree_core::DateValue::exact(GedDate::ymd(DateCalendar::Gregorian, 1815, 12, 10)),
    );
    let text = serialize(&doc, None);
    assert_eq!(
        text,
        "0 HEAD\n1 CHAR UTF-8\n0 @I1@ INDI\n1 NAME Ada /Lovelace/\n1 BIRT\n2 DATE 10 DEC 1815\n0 TRLR\n"
    );
}

#[test]
fn utf16_file_loads() {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in "0 HEAD\n1 CHAR UNICODE\n0 @I1@ INDI\n1 NAME Åsa\n".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let outcome = load_bytes(&bytes, &ParseOptions::default()).unwrap();
    let doc = outcome.document;
    assert_eq!(doc.find_record("I1").unwrap().get_tag("NAME").unwrap().value(), "Åsa");
    let out = gedtree_core::to_bytes(
        &doc,
        &WriteOptions {
            charset: Some(CharacterSet::Utf8),
            ..WriteOptions::default()
        },
    )
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("1 CHAR UTF-8\n"));
}
