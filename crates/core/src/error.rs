use serde_json::json;

/// Errors raised while reading or writing a document.
///
/// Parse errors always carry the 1-based physical line they were raised on.
/// Unknown tags and unparseable dates are not errors; they degrade to
/// generic nodes and free-text dates respectively.
#[derive(Debug, thiserror::Error)]
pub enum GedError {
    /// An expected symbol or integer was missing.
    #[error("line {line}: {message}")]
    RequiredToken { line: u32, message: String },

    /// Illegal level nesting, a record lacking its cross-reference, or a
    /// continuation line with nothing to continue.
    #[error("line {line}: {message}")]
    Structure { line: u32, message: String },

    /// The declared character set disagrees with the byte stream, or the
    /// output contains characters the target set cannot represent.
    #[error("encoding error: {message}")]
    Encoding { message: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl GedError {
    pub fn required(line: u32, message: impl Into<String>) -> Self {
        GedError::RequiredToken {
            line,
            message: message.into(),
        }
    }

    pub fn structure(line: u32, message: impl Into<String>) -> Self {
        GedError::Structure {
            line,
            message: message.into(),
        }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        GedError::Encoding {
            message: message.into(),
        }
    }

    /// Physical line the error was raised on, when it has one.
    pub fn line(&self) -> Option<u32> {
        match self {
            GedError::RequiredToken { line, .. } | GedError::Structure { line, .. } => Some(*line),
            GedError::Encoding { .. } | GedError::Io(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GedError::RequiredToken { .. } => "required_token",
            GedError::Structure { .. } => "structure",
            GedError::Encoding { .. } => "encoding",
            GedError::Io(_) => "io",
        }
    }

    /// The `{kind, line, message}` object printed by the CLI in json mode.
    pub fn to_json_value(&self) -> serde_json::Value {
        let message = match self {
            GedError::RequiredToken { message, .. }
            | GedError::Structure { message, .. }
            | GedError::Encoding { message } => message.clone(),
            GedError::Io(e) => e.to_string(),
        };
        json!({
            "kind": self.kind(),
            "line": self.line(),
            "message": message,
        })
    }
}
