//! Stateless request builder and response parser for the what3words API.
//!
//! # Design
//! `What3WordsClient` holds only the API locator and an optional key, and
//! carries no mutable state between calls. Each endpoint is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the actual HTTP
//! round-trip, keeping the core deterministic and free of I/O.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::config::{ApiKey, ClientConfig};
use crate::coordinates::Coordinates;
use crate::decoder::{self, Decoded, Shape};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::language::Language;
use crate::request::{CoordinatesRequest, WordsRequest};
use crate::square::SquaredAddress;
use crate::words::ThreeWordAddress;

pub const AVAILABLE_LANGUAGES: &str = "/v3/available-languages";
pub const CONVERT_TO_ADDRESS: &str = "/v3/convert-to-3wa";
pub const CONVERT_TO_COORDINATES: &str = "/v3/convert-to-coordinates";

pub const API_KEY_HEADER: &str = "X-Api-Key";
pub const API_KEY_QUERY: &str = "key";

/// Synchronous, stateless client for the what3words API.
///
/// When a key is configured it is sent as `X-Api-Key` on every request that
/// does not already carry a key, either as that header or as the `key` query
/// parameter.
#[derive(Debug, Clone)]
pub struct What3WordsClient {
    api_locator: String,
    api_key: Option<ApiKey>,
}

impl What3WordsClient {
    pub fn new(api_locator: &str) -> Self {
        Self {
            api_locator: api_locator.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            ..Self::new(&config.api_locator)
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(ApiKey::new(key));
        self
    }

    pub fn build_available_languages(&self) -> HttpRequest {
        self.build_get(AVAILABLE_LANGUAGES, &[])
    }

    pub fn build_available_languages_with_key(&self, key: &str) -> HttpRequest {
        self.build(AVAILABLE_LANGUAGES, &[], Some(key))
    }

    pub fn build_convert_to_address(&self, request: &WordsRequest) -> HttpRequest {
        self.build_get(CONVERT_TO_ADDRESS, &request.query_pairs())
    }

    pub fn build_convert_to_address_with_key(&self, key: &str, request: &WordsRequest) -> HttpRequest {
        self.build(CONVERT_TO_ADDRESS, &request.query_pairs(), Some(key))
    }

    pub fn build_convert_to_coordinates(&self, request: &CoordinatesRequest) -> HttpRequest {
        self.build_get(CONVERT_TO_COORDINATES, &request.query_pairs())
    }

    pub fn build_convert_to_coordinates_with_key(
        &self,
        key: &str,
        request: &CoordinatesRequest,
    ) -> HttpRequest {
        self.build(CONVERT_TO_COORDINATES, &request.query_pairs(), Some(key))
    }

    /// Build a GET for `endpoint` from raw query parameters, for callers that
    /// assemble the query themselves (e.g. to pass `key` or `format`).
    pub fn build_get(&self, endpoint: &str, query: &[(&str, String)]) -> HttpRequest {
        self.build(endpoint, query, None)
    }

    fn build(&self, endpoint: &str, query: &[(&str, String)], key: Option<&str>) -> HttpRequest {
        let mut path = format!("{}{endpoint}", self.api_locator);
        if !query.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter().map(|(name, value)| (*name, value.as_str())))
                .finish();
            path.push('?');
            path.push_str(&encoded);
        }

        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if let Some(key) = key {
            headers.push((API_KEY_HEADER.to_string(), key.to_string()));
        }
        let mut request = HttpRequest { path, headers };

        let has_query_key = query.iter().any(|(name, _)| *name == API_KEY_QUERY);
        if let Some(key) = &self.api_key {
            if request.header(API_KEY_HEADER).is_none() && !has_query_key {
                request
                    .headers
                    .push((API_KEY_HEADER.to_string(), key.expose().to_string()));
            }
        }

        debug!(endpoint, params = query.len(), "built what3words request");
        request
    }

    pub fn parse_available_languages(&self, response: HttpResponse) -> Result<HashSet<Language>, ApiError> {
        self.parse_with(response, Shape::Languages, decoder::languages)
    }

    pub fn parse_convert_to_address(&self, response: HttpResponse) -> Result<ThreeWordAddress, ApiError> {
        self.parse_with(response, Shape::Words, decoder::words)
    }

    pub fn parse_convert_to_coordinates(&self, response: HttpResponse) -> Result<Coordinates, ApiError> {
        self.parse_with(response, Shape::Coordinates, decoder::coordinates)
    }

    /// The full document either conversion endpoint returns.
    pub fn parse_squared_address(&self, response: HttpResponse) -> Result<SquaredAddress, ApiError> {
        self.parse_with(response, Shape::SquaredAddress, decoder::squared_address)
    }

    /// Non-2xx responses become the domain error when the body holds an
    /// error envelope and a transport error otherwise; 2xx responses go
    /// through the decoder.
    pub fn parse(&self, response: HttpResponse, shape: Shape) -> Result<Decoded, ApiError> {
        self.parse_with(response, shape, |document| decoder::payload(document, shape))
    }

    fn parse_with<T>(
        &self,
        response: HttpResponse,
        shape: Shape,
        payload: impl FnOnce(Value) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let status = response.status;
        let result = if response.is_success() {
            decoder::document(&response.body, status).and_then(payload)
        } else {
            Err(decoder::decode_error(&response.body, status).unwrap_or(ApiError::HttpError {
                status,
                body: response.body,
            }))
        };

        match &result {
            Ok(_) => debug!(status, %shape, "decoded what3words response"),
            Err(ApiError::Service { code, message, .. }) => {
                warn!(status, code = %code, message = %message, "what3words reported an error")
            }
            Err(e) => debug!(status, %shape, error = %e, "what3words response rejected"),
        }
        result
    }
}
