//! Delimited regex literals
//!
//! Hook options carry patterns written as `/body/modifiers`, the same literal
//! syntax PCRE-based hook tools accept. Leading whitespace is skipped, the
//! next character is the delimiter, the body runs to the first unescaped
//! closing delimiter (bracket delimiters nest), and anything after it is a
//! modifier list.

use regex::{Regex, RegexBuilder};
use std::fmt;
use thiserror::Error;

/// Why a pattern literal could not be turned into a regex
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("pattern '{pattern}' must be wrapped in delimiters, e.g. /{pattern}/")]
    MissingDelimiter { pattern: String },

    #[error("pattern '{pattern}' has no closing '{delimiter}' delimiter")]
    Unterminated { pattern: String, delimiter: char },

    #[error("pattern '{pattern}' uses unsupported modifier '{modifier}'")]
    UnknownModifier { pattern: String, modifier: char },

    #[error("pattern '{pattern}' is not a valid regular expression")]
    Invalid {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled `/body/modifiers` literal that remembers how it was written
#[derive(Debug, Clone)]
pub struct RegexLiteral {
    literal: String,
    regex: Regex,
}

impl RegexLiteral {
    pub fn parse(literal: &str) -> Result<Self, PatternError> {
        let trimmed = literal.trim_start();
        let open = trimmed.chars().next().ok_or(PatternError::Empty)?;
        if open.is_alphanumeric() || open == '\\' {
            return Err(PatternError::MissingDelimiter {
                pattern: literal.to_string(),
            });
        }

        let close = closing_delimiter(open);
        let rest = &trimmed[open.len_utf8()..];
        let end = body_end(rest, open, close).ok_or_else(|| PatternError::Unterminated {
            pattern: literal.to_string(),
            delimiter: close,
        })?;

        let body = &rest[..end];
        let modifiers = &rest[end + close.len_utf8()..];

        let mut builder = RegexBuilder::new(body);
        for modifier in modifiers.chars() {
            match modifier {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'x' => {
                    builder.ignore_whitespace(true);
                }
                'U' => {
                    builder.swap_greed(true);
                }
                // Unicode is already on; accepted so shared configs keep working
                'u' => {
                    builder.unicode(true);
                }
                ' ' | '\n' | '\r' => {}
                other => {
                    return Err(PatternError::UnknownModifier {
                        pattern: literal.to_string(),
                        modifier: other,
                    });
                }
            }
        }

        let regex = builder.build().map_err(|source| PatternError::Invalid {
            pattern: literal.to_string(),
            source,
        })?;

        tracing::trace!("compiled pattern {} as {:?}", literal, regex.as_str());

        Ok(Self {
            literal: literal.to_string(),
            regex,
        })
    }

    /// Unanchored search: succeeds if the body matches anywhere in `value`
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// The literal exactly as configured, delimiters included
    pub fn as_str(&self) -> &str {
        &self.literal
    }
}

impl fmt::Display for RegexLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// Byte offset of the closing delimiter in `rest`, skipping escaped characters
fn body_end(rest: &str, open: char, close: char) -> Option<usize> {
    let nests = open != close;
    let mut depth = 0usize;
    let mut escaped = false;

    for (idx, c) in rest.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == close {
            if depth == 0 {
                return Some(idx);
            }
            depth -= 1;
        } else if nests && c == open {
            depth += 1;
        }
    }

    None
}

fn closing_delimiter(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        other => other,
    }
}
