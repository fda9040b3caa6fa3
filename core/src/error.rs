//! Error types for the what3words client core.
//!
//! # Design
//! Two layers. `ValidationError` is raised synchronously by value-type
//! constructors and builders. `ApiError` is returned by the response decoder
//! and the client parse methods; it keeps the service's own error envelope
//! (`Service`) apart from contract mismatches (`EmptyBody`,
//! `MalformedPayload`, `UnsupportedShape`) and transport failures
//! (`HttpError`), so callers can branch on service-level semantics.

use thiserror::Error;

/// Construction-time failures of value types and request holders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A latitude or longitude lies outside its allowed range.
    #[error("{field} must be in the range of -{limit} to {limit}")]
    Range { field: &'static str, limit: u32 },

    /// A required builder field was never supplied.
    #[error("{0} is missing")]
    MissingField(&'static str),

    /// The whole three-word address text is blank.
    #[error("empty words")]
    EmptyInput,

    /// A single word is blank.
    #[error("empty word")]
    EmptyWord,

    /// A word contains a digit, whitespace or a disallowed symbol.
    #[error("bad word: {0}")]
    InvalidWord(String),

    /// Fewer (or, for explicit lists, more) than three words were supplied.
    #[error("3 words are required, got {0}")]
    WordCount(usize),

    /// The map link could not be parsed as a URL.
    #[error("map link: {0}")]
    InvalidUrl(String),

    /// A coordinate component is not a decimal number.
    #[error("not a decimal number: {0}")]
    InvalidNumber(String),
}

/// Errors returned by the response decoder and `What3WordsClient` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The response carried no body at all.
    #[error("Empty body")]
    EmptyBody,

    /// The body is not JSON, or lacks the fields the expected shape needs.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The requested shape is not one the decoder knows.
    #[error("Type {0} is not supported")]
    UnsupportedShape(String),

    /// The service reported an error in its `{"error": {...}}` envelope.
    #[error("what3words error {code} (HTTP {status}): {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },

    /// Non-2xx response without a recognisable error envelope.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A value inside an otherwise well-formed payload failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// The service's machine error code, if this is a domain error.
    pub fn service_code(&self) -> Option<&str> {
        match self {
            ApiError::Service { code, .. } => Some(code),
            _ => None,
        }
    }
}
