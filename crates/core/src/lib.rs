//! gedtree-core: genealogical interchange text parser, tag tree model and
//! multi-calendar dates.
//!
//! Text flows lexer → line reader → tree builder → [`Document`]; writing is
//! the reverse through [`serialize()`].
//!
//! # Public API
//!
//! - [`parse()`] / [`parse_with()`] -- text to [`Document`], strict or best-effort
//! - [`serialize()`] / [`serialize_with()`] -- document (or a record subset) to text
//! - [`load_file()`] / [`save_file()`] -- byte-level I/O honoring the header `CHAR`
//! - [`Document`], [`NodeRef`], [`NodeId`] -- the record tree
//! - [`DateValue`], [`GedDate`], [`DateFormat`] -- dates, comparison and display
//! - [`GedError`] -- every failure, with the physical line where one applies

pub mod builder;
pub mod change_date;
pub mod date;
pub mod encoding;
pub mod error;
pub mod lexer;
pub mod line;
pub mod progress;
pub mod serialize;
pub mod tags;
pub mod tree;

// ── Convenience re-exports: key types ────────────────────────────────

pub use builder::{ParseMode, ParseOptions, ParseOutcome, DEFAULT_MAX_ERRORS};
pub use change_date::ChangeDate;
pub use date::{Approximation, DateCalendar, DateFormat, DateValue, GedDate};
pub use encoding::CharacterSet;
pub use error::GedError;
pub use progress::{NoProgress, ProgressFn, ProgressSink};
pub use serialize::{LineEnding, WriteOptions, DEFAULT_MAX_LINE_LENGTH};
pub use tags::{NodeKind, RecordKind, TagRegistry};
pub use tree::{Document, NodeId, NodeRef};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use encoding::{load_bytes, load_file, save_file, to_bytes};
pub use serialize::{serialize, serialize_node, serialize_with};

/// Parse in strict mode: the first malformed line is returned as the error.
pub fn parse(text: &str) -> Result<Document, GedError> {
    parse_with(text, &ParseOptions::default()).map(|outcome| outcome.document)
}

pub fn parse_with(text: &str, options: &ParseOptions) -> Result<ParseOutcome, GedError> {
    builder::build(text, options, &mut NoProgress)
}

/// Like [`parse_with`], reporting progress to `progress`.
pub fn parse_with_progress(
    text: &str,
    options: &ParseOptions,
    progress: &mut dyn ProgressSink,
) -> Result<ParseOutcome, GedError> {
    builder::build(text, options, progress)
}
