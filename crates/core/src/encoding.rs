//! Character sets and byte-level load/save.
//!
//! The header's `1 CHAR` line names the character set of the whole file.
//! A byte order mark, when present, must agree with it. Files with neither
//! are read as UTF-8, falling back to ANSI when the bytes are not UTF-8.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::builder::{ParseOptions, ParseOutcome};
use crate::error::GedError;
use crate::line::parse_line;
use crate::serialize::{serialize_with, WriteOptions};
use crate::tree::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CharacterSet {
    Ascii,
    /// Read and written as Latin-1.
    Ansi,
    Utf8,
    /// UTF-16, little-endian with a byte order mark on output.
    Unicode,
}

impl CharacterSet {
    pub fn name(self) -> &'static str {
        match self {
            CharacterSet::Ascii => "ASCII",
            CharacterSet::Ansi => "ANSI",
            CharacterSet::Utf8 => "UTF-8",
            CharacterSet::Unicode => "UNICODE",
        }
    }

    pub fn from_name(name: &str) -> Result<CharacterSet, GedError> {
        match name.trim().to_ascii_uppercase().as_str() {
            "ASCII" => Ok(CharacterSet::Ascii),
            "ANSI" => Ok(CharacterSet::Ansi),
            "UTF-8" | "UTF8" => Ok(CharacterSet::Utf8),
            "UNICODE" | "UTF-16" => Ok(CharacterSet::Unicode),
            "ANSEL" => Err(GedError::encoding("the ANSEL character set is not supported")),
            other => Err(GedError::encoding(format!("unknown character set '{}'", other))),
        }
    }

    /// Decode a byte stream that carries no byte order mark.
    pub fn decode(self, bytes: &[u8]) -> Result<String, GedError> {
        match self {
            CharacterSet::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(at) => Err(GedError::encoding(format!(
                    "ASCII declared but byte 0x{:02X} found at offset {}",
                    bytes[at], at
                ))),
                None => Ok(bytes.iter().map(|b| char::from(*b)).collect()),
            },
            CharacterSet::Ansi => Ok(bytes.iter().map(|b| char::from(*b)).collect()),
            CharacterSet::Utf8 => decode_utf8(bytes),
            CharacterSet::Unicode => decode_utf16(bytes, u16::from_le_bytes),
        }
    }

    pub fn encode(self, text: &str) -> Result<Vec<u8>, GedError> {
        let unrepresentable = |c: char| {
            GedError::encoding(format!(
                "character '{}' cannot be written as {}",
                c,
                self.name()
            ))
        };
        match self {
            CharacterSet::Ascii => text
                .chars()
                .map(|c| if c.is_ascii() { Ok(c as u8) } else { Err(unrepresentable(c)) })
                .collect(),
            CharacterSet::Ansi => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).map_err(|_| unrepresentable(c)))
                .collect(),
            CharacterSet::Utf8 => Ok(text.as_bytes().to_vec()),
            CharacterSet::Unicode => {
                let mut out = vec![0xFF, 0xFE];
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
                Ok(out)
            }
        }
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for CharacterSet {
    type Error = GedError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        CharacterSet::from_name(&name)
    }
}

impl From<CharacterSet> for String {
    fn from(charset: CharacterSet) -> Self {
        charset.name().to_string()
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String, GedError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| {
        GedError::encoding(format!(
            "invalid UTF-8 at byte {}",
            e.utf8_error().valid_up_to()
        ))
    })
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, GedError> {
    if bytes.len() % 2 != 0 {
        return Err(GedError::encoding("UTF-16 data has an odd number of bytes"));
    }
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|c| c.map_err(|e| GedError::encoding(format!("invalid UTF-16: {}", e))))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bom {
    Utf8,
    Utf16Le,
    Utf16Be,
}

fn detect_bom(bytes: &[u8]) -> (Option<Bom>, &[u8]) {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        (Some(Bom::Utf8), rest)
    } else if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        (Some(Bom::Utf16Le), rest)
    } else if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        (Some(Bom::Utf16Be), rest)
    } else {
        (None, bytes)
    }
}

/// The `1 CHAR` value of the leading `HEAD` record. Only the header is
/// inspected, so any ASCII-compatible encoding works.
fn declared_charset(bytes: &[u8]) -> Result<Option<CharacterSet>, GedError> {
    let mut in_header = false;
    for (n, raw) in bytes.split(|b| *b == b'\n').enumerate() {
        let text = String::from_utf8_lossy(raw);
        let text = text.trim_end_matches('\r');
        let Ok(Some(line)) = parse_line(text, n as u32 + 1) else {
            continue;
        };
        match line.level {
            0 if line.tag.eq_ignore_ascii_case("HEAD") && !in_header => in_header = true,
            0 => break,
            1 if in_header && line.tag.eq_ignore_ascii_case("CHAR") => {
                return CharacterSet::from_name(line.value).map(Some);
            }
            _ => {}
        }
    }
    Ok(None)
}

fn conflict(declared: CharacterSet, found: &str) -> GedError {
    GedError::encoding(format!(
        "header declares {} but the file starts with a {} byte order mark",
        declared, found
    ))
}

/// Decode a whole file, reporting the character set used.
pub fn decode_document(bytes: &[u8]) -> Result<(String, CharacterSet), GedError> {
    let (bom, body) = detect_bom(bytes);
    match bom {
        Some(Bom::Utf16Le) | Some(Bom::Utf16Be) => {
            let text = if bom == Some(Bom::Utf16Le) {
                decode_utf16(body, u16::from_le_bytes)?
            } else {
                decode_utf16(body, u16::from_be_bytes)?
            };
            match declared_charset(text.as_bytes())? {
                None | Some(CharacterSet::Unicode) => Ok((text, CharacterSet::Unicode)),
                Some(other) => Err(conflict(other, "UTF-16")),
            }
        }
        Some(Bom::Utf8) => match declared_charset(body)? {
            None | Some(CharacterSet::Utf8) => Ok((decode_utf8(body)?, CharacterSet::Utf8)),
            Some(other) => Err(conflict(other, "UTF-8")),
        },
        None => match declared_charset(body)? {
            Some(CharacterSet::Unicode) => Err(GedError::encoding(
                "header declares UNICODE but the file has no UTF-16 byte order mark",
            )),
            Some(charset) => Ok((charset.decode(body)?, charset)),
            None => match decode_utf8(body) {
                Ok(text) => Ok((text, CharacterSet::Utf8)),
                Err(_) => {
                    log::warn!("no character set declared and not UTF-8; reading as ANSI");
                    Ok((CharacterSet::Ansi.decode(body)?, CharacterSet::Ansi))
                }
            },
        },
    }
}

pub fn load_bytes(bytes: &[u8], options: &ParseOptions) -> Result<ParseOutcome, GedError> {
    let (text, charset) = decode_document(bytes)?;
    log::debug!("decoded {} bytes as {}", bytes.len(), charset);
    crate::parse_with(&text, options)
}

/// Character set the document will be written in.
pub fn output_charset(
    document: &Document,
    options: &WriteOptions,
) -> Result<CharacterSet, GedError> {
    if let Some(charset) = options.charset {
        return Ok(charset);
    }
    let declared = document
        .header()
        .and_then(|h| h.get_tag("CHAR"))
        .map(|c| CharacterSet::from_name(c.value()))
        .transpose()?;
    Ok(declared.unwrap_or(CharacterSet::Utf8))
}

pub fn encode_document(
    document: &Document,
    subset: Option<&[&str]>,
    options: &WriteOptions,
) -> Result<Vec<u8>, GedError> {
    let charset = output_charset(document, options)?;
    charset.encode(&serialize_with(document, subset, options))
}

pub fn to_bytes(document: &Document, options: &WriteOptions) -> Result<Vec<u8>, GedError> {
    encode_document(document, None, options)
}

pub fn write_to<W: Write>(
    document: &Document,
    subset: Option<&[&str]>,
    options: &WriteOptions,
    out: &mut W,
) -> Result<(), GedError> {
    out.write_all(&encode_document(document, subset, options)?)?;
    out.flush()?;
    Ok(())
}

pub fn load_file(path: &Path, options: &ParseOptions) -> Result<ParseOutcome, GedError> {
    log::info!("loading {}", path.display());
    let bytes = fs::read(path)?;
    load_bytes(&bytes, options)
}

pub fn save_file(document: &Document, path: &Path, options: &WriteOptions) -> Result<(), GedError> {
    let bytes = to_bytes(document, options)?;
    fs::write(path, bytes)?;
    log::info!("saved {} records to {}", document.record_count(), path.display());
    Ok(())
}
