//! Cursor tokenizer shared by the line reader, the date parser and the time
//! parser.
//!
//! The tokenizer is total: every input, including arbitrary Unicode, reaches
//! [`TokenKind::Eol`] and stays there. Token values are slices of the input
//! and are only materialized when a getter asks for them.

use crate::error::GedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// No token has been read yet
    Unknown,
    /// A run of spaces and tabs
    Whitespace,
    /// Any single character that starts no other token
    Symbol,
    /// `[A-Za-z_][A-Za-z0-9_]*`
    Word,
    /// `[0-9]+`
    Number,
    /// End of input; returned again on every further call
    Eol,
}

pub struct Tokenizer<'a> {
    src: &'a str,
    ignore_whitespace: bool,
    line: u32,
    pos: usize,
    start: usize,
    current: TokenKind,
    number: i64,
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_word_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str, ignore_whitespace: bool) -> Self {
        Tokenizer {
            src,
            ignore_whitespace,
            line: 0,
            pos: 0,
            start: 0,
            current: TokenKind::Unknown,
            number: 0,
        }
    }

    /// Line number reported by `require_*` failures.
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    pub fn current(&self) -> TokenKind {
        self.current
    }

    /// Byte offset just past the current token.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte offset where the current token starts.
    pub fn token_start(&self) -> usize {
        self.start
    }

    fn peek_byte(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    pub fn next(&mut self) -> TokenKind {
        loop {
            let Some(b) = self.peek_byte() else {
                self.start = self.pos;
                self.current = TokenKind::Eol;
                return self.current;
            };

            if is_word_start(b) {
                self.start = self.pos;
                self.pos += 1;
                while self.peek_byte().is_some_and(is_word_char) {
                    self.pos += 1;
                }
                self.current = TokenKind::Word;
                return self.current;
            }

            if b.is_ascii_digit() {
                self.start = self.pos;
                self.number = 0;
                while let Some(d) = self.peek_byte().filter(u8::is_ascii_digit) {
                    self.number = self
                        .number
                        .wrapping_mul(10)
                        .wrapping_add(i64::from(d - b'0'));
                    self.pos += 1;
                }
                self.current = TokenKind::Number;
                return self.current;
            }

            if is_blank(b) {
                if self.ignore_whitespace {
                    self.pos += 1;
                    continue;
                }
                self.start = self.pos;
                while self.peek_byte().is_some_and(is_blank) {
                    self.pos += 1;
                }
                self.current = TokenKind::Whitespace;
                return self.current;
            }

            // Symbols are one character, which may span several bytes.
            self.start = self.pos;
            let width = self.src[self.pos..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.pos += width;
            self.current = TokenKind::Symbol;
            return self.current;
        }
    }

    pub fn skip_whitespace(&mut self) {
        if self.current == TokenKind::Unknown {
            self.next();
        }
        while self.current == TokenKind::Whitespace {
            self.next();
        }
    }

    /// Text of the current token.
    pub fn get_word(&self) -> &'a str {
        &self.src[self.start..self.pos]
    }

    /// Value of the last number token read.
    pub fn get_number(&self) -> i64 {
        self.number
    }

    pub fn get_symbol(&self) -> char {
        self.src[self.start..].chars().next().unwrap_or('\0')
    }

    /// Unconsumed remainder of the input, verbatim.
    pub fn get_rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.current == TokenKind::Symbol && self.get_symbol() == symbol
    }

    /// Case-insensitive check of the current word token.
    pub fn is_word(&self, word: &str) -> bool {
        self.current == TokenKind::Word && self.get_word().eq_ignore_ascii_case(word)
    }

    pub fn require_symbol(&self, symbol: char) -> Result<(), GedError> {
        if self.is_symbol(symbol) {
            Ok(())
        } else {
            Err(GedError::required(
                self.line,
                format!("required symbol '{}' not found", symbol),
            ))
        }
    }

    pub fn require_next_symbol(&mut self, symbol: char) -> Result<(), GedError> {
        self.next();
        self.require_symbol(symbol)
    }

    pub fn require_int(&self) -> Result<i64, GedError> {
        if self.current == TokenKind::Number {
            Ok(self.number)
        } else {
            Err(GedError::required(self.line, "required integer not found"))
        }
    }

    pub fn require_next_int(&mut self) -> Result<i64, GedError> {
        self.next();
        self.require_int()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str, ignore_whitespace: bool) -> Vec<TokenKind> {
        let mut t = Tokenizer::new(src, ignore_whitespace);
        let mut out = Vec::new();
        loop {
            let k = t.next();
            out.push(k);
            if k == TokenKind::Eol {
                break;
            }
        }
        out
    }

    #[test]
    fn classifies_line_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("0 @I1@ INDI", false),
            vec![
                Number, Whitespace, Symbol, Word, Symbol, Whitespace, Word, Eol
            ]
        );
    }

    #[test]
    fn whitespace_runs_coalesce_or_vanish() {
        use TokenKind::*;
        assert_eq!(kinds("a \t b", false), vec![Word, Whitespace, Word, Eol]);
        assert_eq!(kinds("a \t b", true), vec![Word, Word, Eol]);
    }

    #[test]
    fn words_may_contain_digits_and_underscores() {
        let mut t = Tokenizer::new("_UID2 x", false);
        assert_eq!(t.next(), TokenKind::Word);
        assert_eq!(t.get_word(), "_UID2");
    }

    #[test]
    fn number_value_and_text() {
        let mut t = Tokenizer::new("01950.", false);
        assert_eq!(t.next(), TokenKind::Number);
        assert_eq!(t.get_number(), 1950);
        assert_eq!(t.get_word(), "01950");
        assert_eq!(t.next(), TokenKind::Symbol);
        assert_eq!(t.get_symbol(), '.');
    }

    #[test]
    fn eol_is_sticky() {
        let mut t = Tokenizer::new("", false);
        for _ in 0..3 {
            assert_eq!(t.next(), TokenKind::Eol);
        }
    }

    #[test]
    fn multibyte_characters_are_single_symbols() {
        let mut t = Tokenizer::new("é1", false);
        assert_eq!(t.next(), TokenKind::Symbol);
        assert_eq!(t.get_symbol(), 'é');
        assert_eq!(t.next(), TokenKind::Number);
    }

    #[test]
    fn rest_is_verbatim() {
        let mut t = Tokenizer::new("1 NOTE  some  text ", false);
        t.next();
        t.next();
        t.next();
        assert_eq!(t.get_rest(), "  some  text ");
    }

    #[test]
    fn require_helpers() {
        let mut t = Tokenizer::new("12:30", false).with_line(9);
        assert_eq!(t.require_next_int().unwrap(), 12);
        t.require_next_symbol(':').unwrap();
        assert_eq!(t.require_next_int().unwrap(), 30);
        let err = t.require_next_symbol(':').unwrap_err();
        assert_eq!(err.line(), Some(9));
        assert!(matches!(err, GedError::RequiredToken { .. }));
    }

    #[test]
    fn skip_whitespace_reads_first_token() {
        let mut t = Tokenizer::new("   ABT", false);
        t.skip_whitespace();
        assert!(t.is_word("abt"));
    }
}
