//! Physical line grammar: `<level> [@XREF@] <TAG> [value]`.

use std::borrow::Cow;

use crate::error::GedError;
use crate::lexer::{TokenKind, Tokenizer};

/// Deepest nesting level accepted before a line is rejected outright.
pub const MAX_LEVEL: usize = 99;

/// One physical line, borrowed from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub line: u32,
    pub level: usize,
    pub xref: Option<&'a str>,
    pub tag: &'a str,
    /// Everything after the single separator following the tag, verbatim.
    pub value: &'a str,
}

/// How a `CONT` / `CONC` line joins its parent's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// `CONT`: newline, then the value
    Line,
    /// `CONC`: the value appended directly
    Concat,
}

impl Continuation {
    pub fn from_tag(tag: &str) -> Option<Continuation> {
        if tag.eq_ignore_ascii_case("CONT") {
            Some(Continuation::Line)
        } else if tag.eq_ignore_ascii_case("CONC") {
            Some(Continuation::Concat)
        } else {
            None
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Continuation::Line => "CONT",
            Continuation::Concat => "CONC",
        }
    }

    pub fn fold_into(self, target: &mut String, value: &str) {
        if self == Continuation::Line {
            target.push('\n');
        }
        target.push_str(value);
    }
}

// ── Value escaping ──────────────────────────────────────────────────

/// Cross-reference named by a pointer value such as `@I1@`.
pub fn pointer_target(value: &str) -> Option<&str> {
    let inner = value.strip_prefix('@')?.strip_suffix('@')?;
    if inner.is_empty() || inner.starts_with('#') || inner.contains('@') {
        return None;
    }
    Some(inner)
}

/// Pointers and calendar-escaped values are stored and written as-is.
pub fn is_verbatim(value: &str) -> bool {
    value.starts_with("@#") || pointer_target(value).is_some()
}

/// `@@` → `@` for values that are not verbatim.
pub fn unescape_value(value: &str) -> Cow<'_, str> {
    if is_verbatim(value) || !value.contains("@@") {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.replace("@@", "@"))
    }
}

/// `@` → `@@` for values that are not verbatim.
pub fn escape_value(value: &str) -> Cow<'_, str> {
    if is_verbatim(value) || !value.contains('@') {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.replace('@', "@@"))
    }
}

/// `@` → `@@` everywhere, for text that only looks verbatim.
pub fn escape_literal(value: &str) -> Cow<'_, str> {
    if value.contains('@') {
        Cow::Owned(value.replace('@', "@@"))
    } else {
        Cow::Borrowed(value)
    }
}

/// Split a buffer into numbered physical lines, dropping `\r` line ends.
pub fn physical_lines(text: &str) -> impl Iterator<Item = (u32, &str)> {
    text.split('\n')
        .enumerate()
        .map(|(i, l)| (i as u32 + 1, l.strip_suffix('\r').unwrap_or(l)))
}

/// Parse one physical line. Blank lines yield `Ok(None)`.
pub fn parse_line(text: &str, line: u32) -> Result<Option<RawLine<'_>>, GedError> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    let mut tk = Tokenizer::new(text, false).with_line(line);
    tk.skip_whitespace();

    let level = tk.require_int().map_err(|_| {
        GedError::required(line, "line must start with a level number")
    })?;
    let level = usize::try_from(level)
        .ok()
        .filter(|l| *l <= MAX_LEVEL)
        .ok_or_else(|| GedError::structure(line, format!("level {} out of range", level)))?;

    if tk.next() != TokenKind::Whitespace {
        return Err(GedError::required(line, "separator expected after level"));
    }
    tk.next();

    let mut xref = None;
    if tk.is_symbol('@') {
        let start = tk.position();
        loop {
            match tk.next() {
                TokenKind::Eol => {
                    return Err(GedError::required(
                        line,
                        "unterminated cross-reference identifier",
                    ))
                }
                TokenKind::Whitespace => {
                    return Err(GedError::required(
                        line,
                        "cross-reference identifier may not contain spaces",
                    ))
                }
                TokenKind::Symbol if tk.get_symbol() == '@' => break,
                _ => {}
            }
        }
        let id = &text[start..tk.token_start()];
        if id.is_empty() {
            return Err(GedError::required(line, "empty cross-reference identifier"));
        }
        xref = Some(id);
        if tk.next() != TokenKind::Whitespace {
            return Err(GedError::required(
                line,
                "separator expected after cross-reference",
            ));
        }
        tk.next();
    }

    if tk.current() != TokenKind::Word {
        return Err(GedError::required(line, "tag name expected"));
    }
    let tag = tk.get_word();

    let value = match tk.next() {
        TokenKind::Eol => "",
        TokenKind::Whitespace => &text[tk.token_start() + 1..],
        _ => {
            return Err(GedError::required(
                line,
                format!("separator expected after tag {}", tag),
            ))
        }
    };

    Ok(Some(RawLine {
        line,
        level,
        xref,
        tag,
        value,
    }))
}
