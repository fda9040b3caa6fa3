use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn keyed_request(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header("X-Api-Key", "test-key")
        .body(String::new())
        .unwrap()
}

fn assert_error(json: &Value, code: &str) {
    assert_eq!(json["error"]["code"], code, "{json}");
    assert!(json["error"]["message"].is_string());
}

// --- authentication ---

#[tokio::test]
async fn missing_key_returns_401_envelope() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/v3/available-languages")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_error(&body_json(resp).await, "InvalidKey");
}

#[tokio::test]
async fn key_query_parameter_is_accepted() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/v3/available-languages?key=test-key")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// --- available languages ---

#[tokio::test]
async fn available_languages_lists_fixtures() {
    let resp = app().oneshot(keyed_request("/v3/available-languages")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let languages = json["languages"].as_array().unwrap();
    assert_eq!(languages.len(), 3);
    assert!(languages
        .iter()
        .any(|l| l["code"] == "de" && l["nativeName"] == "Deutsch"));
}

// --- convert to 3wa ---

#[tokio::test]
async fn convert_to_address_returns_squared_address() {
    let resp = app()
        .oneshot(keyed_request(
            "/v3/convert-to-3wa?coordinates=51.381051%2C-2.359591",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["words"], "spring.tops.issued");
    assert_eq!(json["nearestPlace"], "Bath");
    assert_eq!(json["language"], "en");
}

#[tokio::test]
async fn convert_to_address_in_japanese() {
    let resp = app()
        .oneshot(keyed_request(
            "/v3/convert-to-3wa?coordinates=51.381051,-2.359591&language=ja",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["words"], "こくさい・ていか・かざす");
}

#[tokio::test]
async fn convert_to_address_without_coordinates() {
    let resp = app().oneshot(keyed_request("/v3/convert-to-3wa")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_error(&body_json(resp).await, "MissingCoordinates");
}

#[tokio::test]
async fn convert_to_address_out_of_range() {
    let resp = app()
        .oneshot(keyed_request("/v3/convert-to-3wa?coordinates=91,0"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_error(&body_json(resp).await, "BadCoordinates");
}

#[tokio::test]
async fn convert_to_address_unsupported_language() {
    let resp = app()
        .oneshot(keyed_request(
            "/v3/convert-to-3wa?coordinates=51.381051,-2.359591&language=xx",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_error(&body_json(resp).await, "BadLanguage");
}

// --- convert to coordinates ---

#[tokio::test]
async fn convert_to_coordinates_returns_squared_address() {
    let resp = app()
        .oneshot(keyed_request(
            "/v3/convert-to-coordinates?words=filled.count.soap",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["coordinates"]["lat"], 51.520847);
    assert_eq!(json["coordinates"]["lng"], -0.195521);
    assert_eq!(json["map"], "https://w3w.co/filled.count.soap");
}

#[tokio::test]
async fn convert_to_coordinates_accepts_slash_prefix() {
    let resp = app()
        .oneshot(keyed_request(
            "/v3/convert-to-coordinates?words=%2F%2F%2Fspring.tops.issued",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn convert_to_coordinates_unknown_words() {
    let resp = app()
        .oneshot(keyed_request(
            "/v3/convert-to-coordinates?words=not.a.place",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_error(&body_json(resp).await, "BadWords");
}

#[tokio::test]
async fn convert_to_coordinates_without_words() {
    let resp = app()
        .oneshot(keyed_request("/v3/convert-to-coordinates"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_error(&body_json(resp).await, "MissingWords");
}

// --- routing ---

#[tokio::test]
async fn unknown_route_returns_404_without_body() {
    let resp = app().oneshot(keyed_request("/v3/grid-section")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}
