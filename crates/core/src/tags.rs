//! Tag vocabulary and the tag-name → node-kind registry.
//!
//! Node kinds are selected by tag name alone. The registry maps an
//! upper-cased tag to a constructor; unregistered tags become
//! [`NodeKind::Generic`] and keep their tag and value verbatim.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::change_date::parse_time;
use crate::date::{parse_date_value, DateValue};

/// Top-level record variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Individual,
    Family,
    Source,
    Note,
    Multimedia,
    Repository,
    Submitter,
    Submission,
    Research,
    Task,
    Communication,
    Group,
    Location,
}

impl RecordKind {
    pub const ALL: [RecordKind; 13] = [
        RecordKind::Individual,
        RecordKind::Family,
        RecordKind::Source,
        RecordKind::Note,
        RecordKind::Multimedia,
        RecordKind::Repository,
        RecordKind::Submitter,
        RecordKind::Submission,
        RecordKind::Research,
        RecordKind::Task,
        RecordKind::Communication,
        RecordKind::Group,
        RecordKind::Location,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            RecordKind::Individual => "INDI",
            RecordKind::Family => "FAM",
            RecordKind::Source => "SOUR",
            RecordKind::Note => "NOTE",
            RecordKind::Multimedia => "OBJE",
            RecordKind::Repository => "REPO",
            RecordKind::Submitter => "SUBM",
            RecordKind::Submission => "SUBN",
            RecordKind::Research => "_RESEARCH",
            RecordKind::Task => "_TASK",
            RecordKind::Communication => "_COMM",
            RecordKind::Group => "_GROUP",
            RecordKind::Location => "_LOC",
        }
    }

    pub fn from_tag(tag: &str) -> Option<RecordKind> {
        RecordKind::ALL
            .into_iter()
            .find(|k| k.tag().eq_ignore_ascii_case(tag))
    }

    /// Prefix of cross-references allocated for new records.
    pub fn xref_prefix(self) -> &'static str {
        match self {
            RecordKind::Individual => "I",
            RecordKind::Family => "F",
            RecordKind::Source => "S",
            RecordKind::Note => "N",
            RecordKind::Multimedia => "O",
            RecordKind::Repository => "R",
            RecordKind::Submitter => "SUB",
            RecordKind::Submission => "SUBN",
            RecordKind::Research => "RS",
            RecordKind::Task => "TK",
            RecordKind::Communication => "CM",
            RecordKind::Group => "G",
            RecordKind::Location => "L",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Individual => "individual",
            RecordKind::Family => "family",
            RecordKind::Source => "source",
            RecordKind::Note => "note",
            RecordKind::Multimedia => "multimedia",
            RecordKind::Repository => "repository",
            RecordKind::Submitter => "submitter",
            RecordKind::Submission => "submission",
            RecordKind::Research => "research",
            RecordKind::Task => "task",
            RecordKind::Communication => "communication",
            RecordKind::Group => "group",
            RecordKind::Location => "location",
        }
    }

    /// Accepts either the tag (`INDI`) or the name (`individual`).
    pub fn parse(text: &str) -> Option<RecordKind> {
        RecordKind::from_tag(text).or_else(|| {
            RecordKind::ALL
                .into_iter()
                .find(|k| k.name().eq_ignore_ascii_case(text))
        })
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed payload of a tag node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Record(RecordKind),
    /// `CHAN`: a `DATE` child plus an optional `TIME` child
    ChangeDate,
    Date(DateValue),
    Time(Option<time::Time>),
    Generic,
}

/// Builds the payload for a tag from its level and complete value.
pub type NodeConstructor = fn(tag: &str, level: usize, value: &str) -> NodeKind;

fn record_node(tag: &str, level: usize, _value: &str) -> NodeKind {
    match RecordKind::from_tag(tag) {
        Some(kind) if level == 0 => NodeKind::Record(kind),
        _ => NodeKind::Generic,
    }
}

fn change_date_node(_tag: &str, _level: usize, _value: &str) -> NodeKind {
    NodeKind::ChangeDate
}

fn date_node(_tag: &str, _level: usize, value: &str) -> NodeKind {
    NodeKind::Date(parse_date_value(value))
}

fn time_node(_tag: &str, _level: usize, value: &str) -> NodeKind {
    NodeKind::Time(parse_time(value))
}

#[derive(Clone)]
pub struct TagRegistry {
    constructors: HashMap<String, NodeConstructor>,
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("TagRegistry").field("tags", &tags).finish()
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        let mut registry = TagRegistry::empty();
        for kind in RecordKind::ALL {
            registry.register(kind.tag(), record_node);
        }
        registry.register("CHAN", change_date_node);
        registry.register("DATE", date_node);
        registry.register("TIME", time_node);
        registry
    }
}

impl TagRegistry {
    /// A registry that knows no tags; everything is generic.
    pub fn empty() -> Self {
        TagRegistry {
            constructors: HashMap::new(),
        }
    }

    /// Add or replace the constructor for a tag.
    pub fn register(&mut self, tag: &str, constructor: NodeConstructor) {
        self.constructors
            .insert(tag.to_ascii_uppercase(), constructor);
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.constructors.contains_key(&tag.to_ascii_uppercase())
    }

    pub fn construct(&self, tag: &str, level: usize, value: &str) -> NodeKind {
        match self.constructors.get(&tag.to_ascii_uppercase()) {
            Some(constructor) => constructor(tag, level, value),
            None => NodeKind::Generic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{DateCalendar, GedDate};

    #[test]
    fn record_tags_only_make_records_at_level_zero() {
        let r = TagRegistry::default();
        assert_eq!(
            r.construct("INDI", 0, ""),
            NodeKind::Record(RecordKind::Individual)
        );
        assert_eq!(r.construct("NOTE", 1, "text"), NodeKind::Generic);
        assert_eq!(r.construct("note", 0, ""), NodeKind::Record(RecordKind::Note));
    }

    #[test]
    fn date_and_time_payloads() {
        let r = TagRegistry::default();
        assert_eq!(
            r.construct("DATE", 2, "12 JUN 1950"),
            NodeKind::Date(DateValue::exact(GedDate::ymd(
                DateCalendar::Gregorian,
                1950,
                6,
                12
            )))
        );
        assert!(matches!(r.construct("TIME", 3, "10:15:00"), NodeKind::Time(Some(_))));
        assert_eq!(r.construct("TIME", 3, "noon"), NodeKind::Time(None));
    }

    #[test]
    fn unknown_tags_are_generic() {
        let r = TagRegistry::default();
        assert_eq!(r.construct("_MILT", 1, "x"), NodeKind::Generic);
        assert!(!r.is_registered("_MILT"));
    }

    #[test]
    fn custom_registration() {
        fn milt(_: &str, _: usize, _: &str) -> NodeKind {
            NodeKind::ChangeDate
        }
        let mut r = TagRegistry::default();
        r.register("_milt", milt);
        assert!(r.is_registered("_MILT"));
        assert_eq!(r.construct("_MILT", 1, ""), NodeKind::ChangeDate);
        assert_eq!(TagRegistry::empty().construct("DATE", 1, "1950"), NodeKind::Generic);
    }

    #[test]
    fn kinds_parse_from_tag_or_name() {
        assert_eq!(RecordKind::parse("fam"), Some(RecordKind::Family));
        assert_eq!(RecordKind::parse("Repository"), Some(RecordKind::Repository));
        assert_eq!(RecordKind::parse("_loc"), Some(RecordKind::Location));
        assert_eq!(RecordKind::parse("PLAC"), None);
    }
}
