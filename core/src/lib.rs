//! Typed client core for the what3words geocoding API.
//!
//! # Overview
//! Converts coordinates to three-word addresses and back, and lists the
//! languages the service supports. Builds `HttpRequest` values and parses
//! `HttpResponse` values without touching the network (host-does-IO
//! pattern); the caller executes the HTTP round-trip.
//!
//! # Design
//! - Value types (`Coordinates`, `ThreeWordAddress`, `Language`, `Square`,
//!   `SquaredAddress`) validate on construction; an invalid instance never
//!   exists.
//! - `decoder` maps a response body plus an explicit `Shape` to a typed
//!   value, or to `ApiError::Service` when the body is the service's error
//!   envelope.
//! - `What3WordsClient` is stateless; it holds only the locator and key.

pub mod client;
pub mod config;
pub mod coordinates;
pub mod decoder;
pub mod error;
pub mod http;
pub mod language;
pub mod request;
pub mod square;
pub mod words;

pub use client::What3WordsClient;
pub use config::{ApiKey, ClientConfig, DEFAULT_API_LOCATOR};
pub use coordinates::{Coordinates, CoordinatesBuilder, Degrees};
pub use decoder::{decode, decode_error, Decoded, Shape};
pub use error::{ApiError, ValidationError};
pub use http::{HttpRequest, HttpResponse};
pub use language::{Language, LanguageBuilder};
pub use request::{
    CoordinatesRequest, CoordinatesRequestBuilder, ThreeWordAddressRequest, WordsRequest,
    WordsRequestBuilder,
};
pub use square::{Square, SquareBuilder, SquaredAddress, SquaredAddressBuilder};
pub use words::ThreeWordAddress;
