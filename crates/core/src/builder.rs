//! Tag tree builder.
//!
//! A stack holds the open node at each level. Each line pops the stack back
//! to its parent's level, attaches as that parent's last child and becomes
//! the new top. `CONT` / `CONC` lines fold into their parent's value and
//! never become nodes. Payloads are derived after the last line, once every
//! value is complete.

use serde::{Deserialize, Serialize};

use crate::error::GedError;
use crate::line::{parse_line, physical_lines, Continuation, RawLine};
use crate::progress::ProgressSink;
use crate::tags::{RecordKind, TagRegistry};
use crate::tree::{Document, NodeId};

/// Default number of errors collected in best-effort mode before giving up.
pub const DEFAULT_MAX_ERRORS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// The first malformed line fails the whole parse.
    #[default]
    Strict,
    /// Malformed lines, and every deeper line hanging off them, are skipped
    /// and reported next to the document.
    BestEffort { max_errors: usize },
}

impl ParseMode {
    pub fn best_effort() -> Self {
        ParseMode::BestEffort {
            max_errors: DEFAULT_MAX_ERRORS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub mode: ParseMode,
    pub registry: TagRegistry,
}

impl ParseOptions {
    pub fn best_effort(max_errors: usize) -> Self {
        ParseOptions {
            mode: ParseMode::BestEffort { max_errors },
            ..ParseOptions::default()
        }
    }
}

/// A parsed document plus the errors skipped in best-effort mode. A
/// non-empty error list means the document is incomplete.
#[derive(Debug)]
pub struct ParseOutcome {
    pub document: Document,
    pub errors: Vec<GedError>,
}

impl ParseOutcome {
    pub fn is_degraded(&self) -> bool {
        !self.errors.is_empty()
    }
}

enum Step {
    Continue,
    Trailer,
}

struct Builder {
    doc: Document,
    stack: Vec<NodeId>,
    skip_deeper_than: Option<usize>,
}

impl Builder {
    fn accept(
        &mut self,
        raw: RawLine<'_>,
        progress: &mut dyn ProgressSink,
    ) -> Result<Step, GedError> {
        if let Some(limit) = self.skip_deeper_than {
            if raw.level > limit {
                return Ok(Step::Continue);
            }
            self.skip_deeper_than = None;
        }
        let level = raw.level;
        let result = self.attach(raw, progress);
        if result.is_err() {
            self.skip_deeper_than = Some(level);
        }
        result
    }

    fn attach(
        &mut self,
        raw: RawLine<'_>,
        progress: &mut dyn ProgressSink,
    ) -> Result<Step, GedError> {
        let line = raw.line;

        if let Some(c) = Continuation::from_tag(raw.tag) {
            if raw.level == 0 {
                return Err(GedError::structure(
                    line,
                    format!("{} at level 0 has nothing to continue", c.tag()),
                ));
            }
            if raw.xref.is_some() {
                return Err(GedError::structure(
                    line,
                    format!("{} may not carry a cross-reference", c.tag()),
                ));
            }
            let Some(&parent) = self.stack.get(raw.level - 1) else {
                return Err(GedError::structure(
                    line,
                    format!("{} at level {} has no parent line", c.tag(), raw.level),
                ));
            };
            self.stack.truncate(raw.level);
            self.doc.fold(parent, c, raw.value);
            return Ok(Step::Continue);
        }

        if raw.level > self.stack.len() {
            let message = match self.stack.len() {
                0 => format!("level {} line has no parent line", raw.level),
                open => format!("level jumps from {} to {}", open - 1, raw.level),
            };
            return Err(GedError::structure(line, message));
        }

        if raw.level > 0 {
            self.stack.truncate(raw.level);
            let parent = self.stack[raw.level - 1];
            let id = self
                .doc
                .attach_child(parent, raw.tag, raw.xref, raw.value, line);
            self.stack.push(id);
            return Ok(Step::Continue);
        }

        self.stack.clear();
        if raw.tag.eq_ignore_ascii_case("TRLR") {
            return Ok(Step::Trailer);
        }
        if raw.tag.eq_ignore_ascii_case("HEAD") && self.doc.header().is_some() {
            return Err(GedError::structure(line, "second HEAD record"));
        }
        if let Some(kind) = RecordKind::from_tag(raw.tag) {
            if raw.xref.is_none() {
                return Err(GedError::structure(
                    line,
                    format!("{} record requires a cross-reference", kind.tag()),
                ));
            }
        }
        if let Some(xref) = raw.xref {
            if self.doc.contains_xref(xref) {
                return Err(GedError::structure(
                    line,
                    format!("duplicate cross-reference @{}@", xref),
                ));
            }
        }
        progress.advance(line as usize);
        let id = self.doc.attach_top(raw.tag, raw.xref, raw.value, line);
        self.stack.push(id);
        Ok(Step::Continue)
    }
}

pub(crate) fn build(
    text: &str,
    options: &ParseOptions,
    progress: &mut dyn ProgressSink,
) -> Result<ParseOutcome, GedError> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let lines: Vec<(u32, &str)> = physical_lines(text).collect();
    progress.begin(lines.len());

    let mut builder = Builder {
        doc: Document::with_registry(options.registry.clone()),
        stack: Vec::new(),
        skip_deeper_than: None,
    };
    let mut errors = Vec::new();

    let mut rest = lines.iter();
    for (line, text) in rest.by_ref() {
        let step = match parse_line(text, *line) {
            Ok(Some(raw)) => builder.accept(raw, progress),
            Ok(None) => Ok(Step::Continue),
            Err(e) => Err(e),
        };
        match step {
            Ok(Step::Continue) => {}
            Ok(Step::Trailer) => break,
            Err(e) => match options.mode {
                ParseMode::Strict => return Err(e),
                ParseMode::BestEffort { max_errors } => {
                    log::warn!("skipping malformed input: {}", e);
                    errors.push(e);
                    if errors.len() >= max_errors {
                        log::warn!("stopped after {} errors", errors.len());
                        break;
                    }
                }
            },
        }
    }

    let ignored = rest.filter(|(_, t)| !t.trim().is_empty()).count();
    if ignored > 0 {
        log::warn!("ignoring {} lines after TRLR", ignored);
    }

    let mut doc = builder.doc;
    doc.finish();
    progress.finish();
    log::debug!(
        "parsed {} records from {} lines ({} errors)",
        doc.record_count(),
        lines.len(),
        errors.len()
    );
    Ok(ParseOutcome {
        document: doc,
        errors,
    })
}
