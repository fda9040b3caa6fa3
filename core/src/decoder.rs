//! Turns raw response bodies into typed values or a domain error.
//!
//! # Design
//! The caller always knows which endpoint it called, so it passes the
//! expected `Shape` explicitly and `decode` switches on it. Before any
//! shape-specific extraction the document is checked for the service's
//! `{"error": {"code", "message"}}` envelope, which wins regardless of the
//! requested shape.
//!
//! Numbers are read through serde_json's `arbitrary_precision` so the
//! decimal text of `lat`/`lng` survives untouched into `Degrees`.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Number, Value};

use crate::coordinates::{Coordinates, Degrees};
use crate::error::ApiError;
use crate::language::Language;
use crate::square::{Square, SquaredAddress};
use crate::words::ThreeWordAddress;

/// The kind of document a response body is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Languages,
    Coordinates,
    Words,
    SquaredAddress,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Languages => "language-set",
            Shape::Coordinates => "coordinates",
            Shape::Words => "three-word-address",
            Shape::SquaredAddress => "squared-address",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shape {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "language-set" => Ok(Shape::Languages),
            "coordinates" => Ok(Shape::Coordinates),
            "three-word-address" => Ok(Shape::Words),
            "squared-address" => Ok(Shape::SquaredAddress),
            other => Err(ApiError::UnsupportedShape(other.to_string())),
        }
    }
}

/// A decoded document, one variant per `Shape`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Languages(HashSet<Language>),
    Coordinates(Coordinates),
    Words(ThreeWordAddress),
    SquaredAddress(SquaredAddress),
}

impl Decoded {
    pub fn shape(&self) -> Shape {
        match self {
            Decoded::Languages(_) => Shape::Languages,
            Decoded::Coordinates(_) => Shape::Coordinates,
            Decoded::Words(_) => Shape::Words,
            Decoded::SquaredAddress(_) => Shape::SquaredAddress,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[derive(Deserialize)]
struct LanguagesDocument {
    languages: Vec<LanguageItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LanguageItem {
    code: String,
    name: String,
    native_name: String,
}

#[derive(Deserialize)]
struct CoordinatesDocument {
    coordinates: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: Number,
    lng: Number,
}

#[derive(Deserialize)]
struct WordsDocument {
    words: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SquaredAddressDocument {
    country: String,
    square: Corners,
    nearest_place: String,
    coordinates: LatLng,
    words: String,
    language: String,
    map: String,
}

#[derive(Deserialize)]
struct Corners {
    northeast: LatLng,
    southwest: LatLng,
}

fn lat_lng(wire: LatLng) -> Result<Coordinates, ApiError> {
    let latitude: Degrees = wire.lat.to_string().parse()?;
    let longitude: Degrees = wire.lng.to_string().parse()?;
    Ok(Coordinates::new(latitude, longitude)?)
}

/// Decode `body` as the document `shape` describes.
///
/// `status` is the transport status, carried into `ApiError::Service` when
/// the body is an error envelope.
pub fn decode(body: &str, status: u16, shape: Shape) -> Result<Decoded, ApiError> {
    payload(document(body, status)?, shape)
}

/// Parses `body` and returns the error envelope, if any, ahead of the payload.
pub(crate) fn document(body: &str, status: u16) -> Result<Value, ApiError> {
    let document = parse_document(body)?;
    match service_error(&document, status)? {
        Some(error) => Err(error),
        None => Ok(document),
    }
}

pub(crate) fn payload(document: Value, shape: Shape) -> Result<Decoded, ApiError> {
    match shape {
        Shape::Languages => languages(document).map(Decoded::Languages),
        Shape::Coordinates => coordinates(document).map(Decoded::Coordinates),
        Shape::Words => words(document).map(Decoded::Words),
        Shape::SquaredAddress => squared_address(document).map(Decoded::SquaredAddress),
    }
}

pub(crate) fn languages(document: Value) -> Result<HashSet<Language>, ApiError> {
    let wire: LanguagesDocument = extract(document)?;
    let languages = wire
        .languages
        .into_iter()
        .map(|item| {
            Language::builder()
                .code(item.code)
                .name(item.name)
                .native_name(item.native_name)
                .build()
        })
        .collect::<Result<HashSet<_>, _>>()?;
    Ok(languages)
}

pub(crate) fn coordinates(document: Value) -> Result<Coordinates, ApiError> {
    let wire: CoordinatesDocument = extract(document)?;
    lat_lng(wire.coordinates)
}

pub(crate) fn words(document: Value) -> Result<ThreeWordAddress, ApiError> {
    let wire: WordsDocument = extract(document)?;
    Ok(ThreeWordAddress::parse(&wire.words)?)
}

pub(crate) fn squared_address(document: Value) -> Result<SquaredAddress, ApiError> {
    let wire: SquaredAddressDocument = extract(document)?;
    let square = Square::new(lat_lng(wire.square.northeast)?, lat_lng(wire.square.southwest)?);
    let address = SquaredAddress::builder()
        .country(wire.country)
        .square(square)
        .nearest_place(wire.nearest_place)
        .coordinates(lat_lng(wire.coordinates)?)
        .words_text(&wire.words)?
        .language(Language::new(&wire.language)?)
        .map_link(&wire.map)?
        .build()?;
    Ok(address)
}

/// The domain error in `body`, if it holds a well-formed error envelope.
///
/// Used for non-2xx responses, where anything else in the body is left to
/// the transport error.
pub fn decode_error(body: &str, status: u16) -> Option<ApiError> {
    let document = parse_document(body).ok()?;
    service_error(&document, status).ok().flatten()
}

fn parse_document(body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::EmptyBody);
    }
    serde_json::from_str(body).map_err(|e| ApiError::MalformedPayload(e.to_string()))
}

fn service_error(document: &Value, status: u16) -> Result<Option<ApiError>, ApiError> {
    let Some(error) = document.get("error") else {
        return Ok(None);
    };
    let body = ErrorBody::deserialize(error)
        .map_err(|e| ApiError::MalformedPayload(format!("error envelope: {e}")))?;
    Ok(Some(ApiError::Service {
        status,
        code: body.code,
        message: body.message,
    }))
}

fn extract<T: DeserializeOwned>(document: Value) -> Result<T, ApiError> {
    serde_json::from_value(document).map_err(|e| ApiError::MalformedPayload(e.to_string()))
}
