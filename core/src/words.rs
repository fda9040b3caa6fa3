//! Three-word addresses and the textual notations they arrive in.
//!
//! # Design
//! The service separates words with `.` in Latin scripts and with `・` or `。`
//! in Japanese, and addresses are often written with a decorative `///`
//! prefix. `ThreeWordAddress::parse` folds every notation into the same three
//! validated fields, so nothing downstream needs to care about the script.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

const LEADING_SLASHES: &str = "///";
const DELIMITERS: [char; 3] = ['・', '.', '。'];

/// One or more characters, none of which is an ASCII digit, whitespace, or
/// one of the symbols the service never uses inside a word.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"^[^0-9`\~!@\#\$%\^\&\*\(\)\+\-_=\[\{\}\\\|'<,\.>\?/";:£§º©®\s]+$"##)
        .expect("word pattern is valid")
});

/// A validated triple of words. Immutable; equality and hashing by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThreeWordAddress {
    first: String,
    second: String,
    third: String,
}

impl ThreeWordAddress {
    /// Parse `first.second.third`, `first・second・third`, `first。second。third`,
    /// each optionally prefixed with `///`. Segments past the third are ignored.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let mut text = text;
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyInput);
        }
        while let Some(rest) = text.strip_prefix(LEADING_SLASHES) {
            if rest.trim().is_empty() {
                return Err(ValidationError::EmptyInput);
            }
            text = rest;
        }

        let mut segments: Vec<&str> = text.split(DELIMITERS).collect();
        // A trailing delimiter does not start another word.
        while segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }
        if segments.len() < 3 {
            return Err(ValidationError::WordCount(segments.len()));
        }
        Self::from_parts(segments[0], segments[1], segments[2])
    }

    pub fn from_parts(first: &str, second: &str, third: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            first: validate_word(first)?,
            second: validate_word(second)?,
            third: validate_word(third)?,
        })
    }

    /// Exactly three words.
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Result<Self, ValidationError> {
        match words {
            [first, second, third] => {
                Self::from_parts(first.as_ref(), second.as_ref(), third.as_ref())
            }
            _ => Err(ValidationError::WordCount(words.len())),
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn third(&self) -> &str {
        &self.third
    }
}

fn validate_word(word: &str) -> Result<String, ValidationError> {
    if word.trim().is_empty() {
        return Err(ValidationError::EmptyWord);
    }
    if !WORD_PATTERN.is_match(word) {
        return Err(ValidationError::InvalidWord(word.to_string()));
    }
    Ok(word.to_string())
}

impl fmt::Display for ThreeWordAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.first, self.second, self.third)
    }
}

impl FromStr for ThreeWordAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
