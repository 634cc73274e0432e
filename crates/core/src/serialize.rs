//! Line rendering: the inverse of the builder.
//!
//! Newlines in a value become `CONT` lines and any piece longer than the
//! configured width is cut into `CONC` lines. Widths count characters of
//! the value part only. Output is always `HEAD` (when present), the
//! records in order, then `0 TRLR`.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::encoding::CharacterSet;
use crate::line::{escape_literal, escape_value, Continuation};
use crate::tree::{Document, NodeRef};

pub const DEFAULT_MAX_LINE_LENGTH: usize = 248;
pub const MIN_LINE_LENGTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Characters of value text per physical line; values below
    /// [`MIN_LINE_LENGTH`] are raised to it.
    pub max_line_length: usize,
    pub line_ending: LineEnding,
    /// Character set to declare in `HEAD.CHAR` and encode with.
    pub charset: Option<CharacterSet>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            line_ending: LineEnding::Lf,
            charset: None,
        }
    }
}

/// Render with default options; `subset` limits the records written to the
/// listed cross-references.
pub fn serialize(document: &Document, subset: Option<&[&str]>) -> String {
    serialize_with(document, subset, &WriteOptions::default())
}

pub fn serialize_with(
    document: &Document,
    subset: Option<&[&str]>,
    options: &WriteOptions,
) -> String {
    let mut w = LineWriter::new(options);

    if let Some(head) = document.header() {
        w.header(head, options.charset);
    }
    for record in document.records() {
        if let Some(keep) = subset {
            let wanted = record
                .xref()
                .is_some_and(|x| keep.iter().any(|k| k.trim_matches('@') == x));
            if !wanted {
                continue;
            }
        }
        w.node(record, 0);
    }
    w.line(0, None, "TRLR", "");
    w.out
}

/// Render one node and everything below it, starting at the node's own
/// level. No header or trailer is added.
pub fn serialize_node(node: NodeRef<'_>, options: &WriteOptions) -> String {
    let mut w = LineWriter::new(options);
    w.node(node, node.level());
    w.out
}

struct LineWriter {
    out: String,
    width: usize,
    eol: &'static str,
}

/// Split after `n` characters.
fn split_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((i, _)) => s.split_at(i),
        None => (s, ""),
    }
}

impl LineWriter {
    fn new(options: &WriteOptions) -> Self {
        LineWriter {
            out: String::new(),
            width: options.max_line_length.max(MIN_LINE_LENGTH),
            eol: options.line_ending.as_str(),
        }
    }

    fn line(&mut self, level: usize, xref: Option<&str>, tag: &str, value: &str) {
        self.out.push_str(&level.to_string());
        if let Some(x) = xref {
            self.out.push_str(" @");
            self.out.push_str(x);
            self.out.push('@');
        }
        self.out.push(' ');
        self.out.push_str(tag);
        if !value.is_empty() {
            self.out.push(' ');
            self.out.push_str(value);
        }
        self.out.push_str(self.eol);
    }

    /// One logical line cut into a head line and `CONC` tails.
    fn wrapped(
        &mut self,
        level: usize,
        xref: Option<&str>,
        tag: &str,
        text: &str,
        conc_level: usize,
    ) {
        let (head, mut rest) = split_chars(text, self.width);
        self.line(level, xref, tag, head);
        while !rest.is_empty() {
            let (chunk, tail) = split_chars(rest, self.width);
            self.line(conc_level, None, Continuation::Concat.tag(), chunk);
            rest = tail;
        }
    }

    fn value_lines(&mut self, level: usize, xref: Option<&str>, tag: &str, value: &str) {
        self.escaped_lines(level, xref, tag, escape_value(value));
    }

    fn escaped_lines(
        &mut self,
        level: usize,
        xref: Option<&str>,
        tag: &str,
        escaped: Cow<'_, str>,
    ) {
        let mut pieces = escaped.split('\n');
        let first = pieces.next().unwrap_or_default();
        self.wrapped(level, xref, tag, first, level + 1);
        for piece in pieces {
            self.wrapped(level + 1, None, Continuation::Line.tag(), piece, level + 1);
        }
    }

    fn node(&mut self, node: NodeRef<'_>, level: usize) {
        let escaped = if node.is_escaped() {
            escape_literal(node.value())
        } else {
            escape_value(node.value())
        };
        self.escaped_lines(level, node.xref(), node.tag(), escaped);
        for child in node.children() {
            self.node(child, level + 1);
        }
    }

    /// `HEAD`, with `CHAR` rewritten (or added) when a charset is forced.
    fn header(&mut self, head: NodeRef<'_>, charset: Option<CharacterSet>) {
        let Some(charset) = charset else {
            self.node(head, 0);
            return;
        };
        self.value_lines(0, head.xref(), head.tag(), head.value());
        let mut declared = false;
        for child in head.children() {
            if child.tag() == "CHAR" && !declared {
                declared = true;
                self.value_lines(1, None, "CHAR", charset.name());
                for grandchild in child.children() {
                    self.node(grandchild, 2);
                }
            } else {
                self.node(child, 1);
            }
        }
        if !declared {
            self.value_lines(1, None, "CHAR", charset.name());
        }
    }
}
