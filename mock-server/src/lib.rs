use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{debug, info};

#[derive(Clone, Debug, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct SquareBounds {
    pub southwest: LatLng,
    pub northeast: LatLng,
}

impl SquareBounds {
    fn contains(&self, point: &LatLng) -> bool {
        (self.southwest.lat..=self.northeast.lat).contains(&point.lat)
            && (self.southwest.lng..=self.northeast.lng).contains(&point.lng)
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SquaredAddress {
    pub country: String,
    pub square: SquareBounds,
    pub nearest_place: String,
    pub coordinates: LatLng,
    pub words: String,
    pub language: String,
    pub map: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableLanguage {
    pub code: String,
    pub name: String,
    pub native_name: String,
}

#[derive(Debug, Serialize)]
pub struct Languages {
    pub languages: Vec<AvailableLanguage>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// A service-level failure, rendered as the `{"error": {...}}` envelope.
#[derive(Debug)]
pub struct ServiceError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
}

impl ServiceError {
    const fn new(status: StatusCode, code: &'static str, message: &'static str) -> Self {
        Self {
            status,
            code,
            message,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let envelope = ErrorEnvelope {
            error: ErrorBody {
                code: self.code.to_string(),
                message: self.message.to_string(),
            },
        };
        (self.status, Json(envelope)).into_response()
    }
}

const INVALID_KEY: ServiceError = ServiceError::new(
    StatusCode::UNAUTHORIZED,
    "InvalidKey",
    "Authentication failed; invalid API key",
);
const MISSING_WORDS: ServiceError =
    ServiceError::new(StatusCode::BAD_REQUEST, "MissingWords", "words must be specified");
const BAD_WORDS: ServiceError = ServiceError::new(
    StatusCode::BAD_REQUEST,
    "BadWords",
    "Invalid or non-existent 3 word address",
);
const MISSING_COORDINATES: ServiceError = ServiceError::new(
    StatusCode::BAD_REQUEST,
    "MissingCoordinates",
    "coordinates must be specified",
);
const BAD_COORDINATES: ServiceError = ServiceError::new(
    StatusCode::BAD_REQUEST,
    "BadCoordinates",
    "coordinates must be two comma separated lat,lng coordinates",
);
const BAD_LANGUAGE: ServiceError = ServiceError::new(
    StatusCode::BAD_REQUEST,
    "BadLanguage",
    "language must be a supported 2 letter code",
);

/// Read-only data the mock answers from.
#[derive(Debug)]
pub struct Fixtures {
    pub languages: Vec<AvailableLanguage>,
    pub addresses: Vec<SquaredAddress>,
}

pub type Db = Arc<Fixtures>;

fn language(code: &str, name: &str, native_name: &str) -> AvailableLanguage {
    AvailableLanguage {
        code: code.to_string(),
        name: name.to_string(),
        native_name: native_name.to_string(),
    }
}

fn address(
    words: &str,
    language: &str,
    country: &str,
    nearest_place: &str,
    coordinates: (f64, f64),
    southwest: (f64, f64),
    northeast: (f64, f64),
) -> SquaredAddress {
    let lat_lng = |(lat, lng): (f64, f64)| LatLng { lat, lng };
    SquaredAddress {
        country: country.to_string(),
        square: SquareBounds {
            southwest: lat_lng(southwest),
            northeast: lat_lng(northeast),
        },
        nearest_place: nearest_place.to_string(),
        coordinates: lat_lng(coordinates),
        words: words.to_string(),
        language: language.to_string(),
        map: format!("https://w3w.co/{words}"),
    }
}

impl Default for Fixtures {
    fn default() -> Self {
        let bath_sw = (51.381038, -2.359613);
        let bath_ne = (51.381065, -2.359569);
        Self {
            languages: vec![
                language("de", "German", "Deutsch"),
                language("en", "English", "English"),
                language("ja", "Japanese", "日本語"),
            ],
            addresses: vec![
                address(
                    "spring.tops.issued",
                    "en",
                    "GB",
                    "Bath",
                    (51.381051, -2.359591),
                    bath_sw,
                    bath_ne,
                ),
                address(
                    "こくさい・ていか・かざす",
                    "ja",
                    "GB",
                    "バース",
                    (51.381051, -2.359591),
                    bath_sw,
                    bath_ne,
                ),
                address(
                    "filled.count.soap",
                    "en",
                    "GB",
                    "Bayswater, London",
                    (51.520847, -0.195521),
                    (51.520833, -0.195543),
                    (51.52086, -0.195499),
                ),
            ],
        }
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(Fixtures::default());
    Router::new()
        .route("/v3/available-languages", get(available_languages))
        .route("/v3/convert-to-3wa", get(convert_to_address))
        .route("/v3/convert-to-coordinates", get(convert_to_coordinates))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock what3words service listening");
    }
    axum::serve(listener, app()).await
}

type Params = Query<HashMap<String, String>>;

/// Accept a non-blank `X-Api-Key` header or `key` query parameter.
fn authorize(headers: &HeaderMap, params: &HashMap<String, String>) -> Result<(), ServiceError> {
    let header_key = headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .filter(|key| !key.trim().is_empty());
    let query_key = params.get("key").filter(|key| !key.trim().is_empty());
    if header_key.is_none() && query_key.is_none() {
        debug!("request without API key");
        return Err(INVALID_KEY);
    }
    Ok(())
}

async fn available_languages(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Params,
) -> Result<Json<Languages>, ServiceError> {
    authorize(&headers, &params)?;
    Ok(Json(Languages {
        languages: db.languages.clone(),
    }))
}

fn parse_coordinates(text: &str) -> Option<LatLng> {
    let (lat, lng) = text.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)).then_some(LatLng { lat, lng })
}

async fn convert_to_address(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Params,
) -> Result<Json<SquaredAddress>, ServiceError> {
    authorize(&headers, &params)?;
    let text = params.get("coordinates").ok_or(MISSING_COORDINATES)?;
    let point = parse_coordinates(text).ok_or(BAD_COORDINATES)?;
    let language = params.get("language").map(String::as_str).unwrap_or("en");
    if !db.languages.iter().any(|l| l.code == language) {
        return Err(BAD_LANGUAGE);
    }
    db.addresses
        .iter()
        .find(|a| a.language == language && a.square.contains(&point))
        .cloned()
        .map(Json)
        .ok_or(BAD_COORDINATES)
}

/// Japanese addresses may arrive with `.` or with their native delimiters.
fn normalize_words(words: &str) -> String {
    words.replace(['・', '。'], ".")
}

async fn convert_to_coordinates(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Params,
) -> Result<Json<SquaredAddress>, ServiceError> {
    authorize(&headers, &params)?;
    let words = params.get("words").ok_or(MISSING_WORDS)?;
    let words = normalize_words(words.trim_start_matches("///"));
    db.addresses
        .iter()
        .find(|a| normalize_words(&a.words) == words)
        .cloned()
        .map(Json)
        .ok_or(BAD_WORDS)
}
