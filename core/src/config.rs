//! Client configuration.
//!
//! The service locator and API key are plain configuration values handed
//! to `What3WordsClient`; nothing in the crate reads a process-wide constant.

use std::fmt;

pub const DEFAULT_API_LOCATOR: &str = "https://api.what3words.com";

const LOCATOR_VAR: &str = "W3W_API_LOCATOR";
const KEY_VAR: &str = "W3W_API_KEY";

/// An API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(<{} chars>)", self.0.chars().count())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_locator: String,
    pub api_key: Option<ApiKey>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_locator: DEFAULT_API_LOCATOR.to_string(),
            api_key: None,
        }
    }
}

impl ClientConfig {
    /// Read `W3W_API_LOCATOR` and `W3W_API_KEY`; unset or blank values fall
    /// back to the default locator and no key.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| lookup(name).filter(|value: &String| !value.trim().is_empty());
        Self {
            api_locator: non_blank(LOCATOR_VAR).unwrap_or_else(|| DEFAULT_API_LOCATOR.to_string()),
            api_key: non_blank(KEY_VAR).map(ApiKey::new),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_locator, "https://api.what3words.com");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn reads_locator_and_key() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("W3W_API_LOCATOR", "http://localhost:3000"),
            ("W3W_API_KEY", "qwerty"),
        ]));
        assert_eq!(config.api_locator, "http://localhost:3000");
        assert_eq!(config.api_key.as_ref().map(ApiKey::expose), Some("qwerty"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[("W3W_API_LOCATOR", " "), ("W3W_API_KEY", "")]));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn debug_hides_the_key() {
        let rendered = format!("{:?}", ApiKey::new("qwerty"));
        assert!(!rendered.contains("qwerty"));
        assert_eq!(rendered, "ApiKey(<6 chars>)");
    }
}
