//! Languages the service can express three-word addresses in.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::ValidationError;

/// A language code with its English and native names.
///
/// Identity is the code alone: two values with the same code compare equal
/// whatever their names, so a `HashSet<Language>` holds one entry per code.
#[derive(Debug, Clone)]
pub struct Language {
    code: String,
    name: String,
    native_name: String,
}

impl Language {
    /// A language known only by its code; both names default to the code.
    pub fn new(code: &str) -> Result<Self, ValidationError> {
        Self::builder().code(code).build()
    }

    pub fn builder() -> LanguageBuilder {
        LanguageBuilder::default()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn native_name(&self) -> &str {
        &self.native_name
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Language {}

impl Hash for Language {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

#[derive(Debug, Default, Clone)]
pub struct LanguageBuilder {
    code: Option<String>,
    name: Option<String>,
    native_name: Option<String>,
}

impl LanguageBuilder {
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn native_name(mut self, native_name: impl Into<String>) -> Self {
        self.native_name = Some(native_name.into());
        self
    }

    /// Fails when the code is absent or blank. Absent names fall back to the code.
    pub fn build(self) -> Result<Language, ValidationError> {
        let code = self
            .code
            .filter(|code| !code.trim().is_empty())
            .ok_or(ValidationError::MissingField("code"))?;
        let name = self.name.unwrap_or_else(|| code.clone());
        let native_name = self.native_name.unwrap_or_else(|| code.clone());
        Ok(Language {
            code,
            name,
            native_name,
        })
    }
}
