//! End-to-end conversions against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client
//! operation over real HTTP using ureq. Validates that request building
//! (query encoding, key injection) and response parsing (payloads and error
//! envelopes) agree with an actual server.

use std::net::SocketAddr;

use w3w_core::{
    ApiError, CoordinatesRequest, HttpRequest, HttpResponse, Language, What3WordsClient,
    WordsRequest,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data, letting the core client interpret them.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut builder = agent.get(&req.path);
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    let mut response = builder.call().expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn conversions_round_trip() {
    let addr = start_server();
    let client = What3WordsClient::new(&format!("http://{addr}")).with_api_key("test-key");

    // Step 1: available languages.
    let languages = client
        .parse_available_languages(execute(client.build_available_languages()))
        .unwrap();
    assert_eq!(languages.len(), 3);
    let de = languages.get(&Language::new("de").unwrap()).unwrap();
    assert_eq!(de.native_name(), "Deutsch");

    // Step 2: coordinates to three-word address.
    let request = WordsRequest::builder()
        .coordinates_at(51.381051, -2.359591)
        .unwrap()
        .build()
        .unwrap();
    let words = client
        .parse_convert_to_address(execute(client.build_convert_to_address(&request)))
        .unwrap();
    assert_eq!(words.to_string(), "spring.tops.issued");

    // Step 3: the same request, decoded as the full squared address.
    let address = client
        .parse_squared_address(execute(client.build_convert_to_address(&request)))
        .unwrap();
    assert_eq!(address.country(), "GB");
    assert_eq!(address.nearest_place(), "Bath");
    assert_eq!(address.coordinates(), request.coordinates());
    assert!(address.map().as_str().ends_with("spring.tops.issued"));

    // Step 4: three-word address back to coordinates.
    let request = CoordinatesRequest::new(words);
    let coordinates = client
        .parse_convert_to_coordinates(execute(client.build_convert_to_coordinates(&request)))
        .unwrap();
    assert_eq!(coordinates.to_string(), "51.381051,-2.359591");
}

#[test]
fn japanese_address_round_trip() {
    let addr = start_server();
    let client = What3WordsClient::new(&format!("http://{addr}")).with_api_key("test-key");

    let request = WordsRequest::builder()
        .coordinates_at(51.381051, -2.359591)
        .unwrap()
        .language_code("ja")
        .unwrap()
        .build()
        .unwrap();
    let address = client
        .parse_squared_address(execute(client.build_convert_to_address(&request)))
        .unwrap();
    assert_eq!(address.words().first(), "こくさい");
    assert_eq!(address.language().code(), "ja");

    let request = CoordinatesRequest::new(address.words().clone());
    let coordinates = client
        .parse_convert_to_coordinates(execute(client.build_convert_to_coordinates(&request)))
        .unwrap();
    assert_eq!(&coordinates, address.coordinates());
}

#[test]
fn service_errors_surface_as_domain_errors() {
    let addr = start_server();
    let base = format!("http://{addr}");

    // No key at all: 401 with an error envelope.
    let anonymous = What3WordsClient::new(&base);
    let err = anonymous
        .parse_available_languages(execute(anonymous.build_available_languages()))
        .unwrap_err();
    assert!(matches!(err, ApiError::Service { status: 401, ref code, .. } if code == "InvalidKey"));

    // Per-call key works without a configured one.
    let languages = anonymous
        .parse_available_languages(execute(anonymous.build_available_languages_with_key("k")))
        .unwrap();
    assert!(!languages.is_empty());

    // Unknown address: 400 BadWords.
    let client = What3WordsClient::new(&base).with_api_key("test-key");
    let request = CoordinatesRequest::builder()
        .words_text("///index.home.raft")
        .unwrap()
        .build()
        .unwrap();
    let err = client
        .parse_convert_to_coordinates(execute(client.build_convert_to_coordinates(&request)))
        .unwrap_err();
    assert_eq!(err.service_code(), Some("BadWords"));
}

#[test]
fn unknown_route_is_a_transport_error() {
    let addr = start_server();
    let client = What3WordsClient::new(&format!("http://{addr}")).with_api_key("test-key");

    let req = client.build_get("/v3/grid-section", &[]);
    let err = client.parse_available_languages(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
}
