//! Settings file for `gedtree`.
//!
//! Read from `--config <path>`, or from `gedtree.toml` in the working
//! directory when that file exists. Every section and key is optional.
//!
//! # Example
//!
//! ```toml
//! [parse]
//! best_effort = false
//! max_errors = 10
//!
//! [write]
//! max_line_length = 248
//! line_ending = "lf"
//! charset = "UTF-8"
//!
//! [display]
//! date_format = "DD.MM.YYYY"
//! show_qualifiers = true
//! ```

use std::path::Path;

use gedtree_core::{DateFormat, ParseMode, ParseOptions, WriteOptions, DEFAULT_MAX_ERRORS};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "gedtree.toml";

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub parse: ParseSettings,
    pub write: WriteOptions,
    pub display: DisplaySettings,
}

/// `[parse]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseSettings {
    /// Skip malformed lines instead of failing on the first one.
    pub best_effort: bool,
    /// Errors collected in best-effort mode before parsing stops.
    pub max_errors: usize,
}

impl Default for ParseSettings {
    fn default() -> Self {
        ParseSettings {
            best_effort: false,
            max_errors: DEFAULT_MAX_ERRORS,
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySettings {
    pub date_format: String,
    pub show_qualifiers: bool,
    pub show_calendar: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            date_format: DateFormat::default().pattern(),
            show_qualifiers: false,
            show_calendar: false,
        }
    }
}

// ── Functions ─────────────────────────────────────────────────────────────────

impl Config {
    /// Parse options, with `force_best_effort` overriding the file.
    pub fn parse_options(&self, force_best_effort: bool) -> ParseOptions {
        let mode = if self.parse.best_effort || force_best_effort {
            ParseMode::BestEffort {
                max_errors: self.parse.max_errors.max(1),
            }
        } else {
            ParseMode::Strict
        };
        ParseOptions {
            mode,
            ..ParseOptions::default()
        }
    }

    /// Display format from `[display]`, or from `pattern` when given.
    pub fn date_format(&self, pattern: Option<&str>) -> Result<DateFormat, String> {
        let pattern = pattern.unwrap_or(&self.display.date_format);
        let format: DateFormat = pattern
            .parse()
            .map_err(|e| format!("invalid date format: {}", e))?;
        Ok(format
            .with_qualifiers(self.display.show_qualifiers)
            .with_calendar(self.display.show_calendar))
    }
}

/// Read and parse a config file from `path`.
///
/// Returns a human-readable error string on failure.
pub fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

/// The explicit config when given, else `gedtree.toml` when present, else
/// defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, String> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        log::debug!("using {}", fallback.display());
        return read_config(fallback);
    }
    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gedtree_core::{CharacterSet, LineEnding};

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.parse.best_effort);
        assert_eq!(config.parse.max_errors, DEFAULT_MAX_ERRORS);
        assert_eq!(config.write, WriteOptions::default());
        assert_eq!(config.display.date_format, "DD.MM.YYYY");
    }

    #[test]
    fn all_sections_parse() {
        let config: Config = toml::from_str(
            r#"
[parse]
best_effort = true
max_errors = 3

[write]
max_line_length = 80
line_ending = "crlf"
charset = "ANSI"

[display]
date_format = "YYYY.MM.DD"
show_qualifiers = true
"#,
        )
        .unwrap();
        assert_eq!(
            config.parse_options(false).mode,
            ParseMode::BestEffort { max_errors: 3 }
        );
        assert_eq!(config.write.max_line_length, 80);
        assert_eq!(config.write.line_ending, LineEnding::CrLf);
        assert_eq!(config.write.charset, Some(CharacterSet::Ansi));
        let format = config.date_format(None).unwrap();
        assert_eq!(format.pattern(), "YYYY.MM.DD");
        assert!(format.show_qualifiers);
    }

    #[test]
    fn flag_forces_best_effort() {
        let config = Config::default();
        assert_eq!(config.parse_options(false).mode, ParseMode::Strict);
        assert_eq!(
            config.parse_options(true).mode,
            ParseMode::BestEffort {
                max_errors: DEFAULT_MAX_ERRORS
            }
        );
    }

    #[test]
    fn unknown_charset_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[write]\ncharset = \"EBCDIC\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn bad_pattern_is_reported() {
        let config = Config::default();
        assert!(config.date_format(Some("QQ")).is_err());
    }
}
