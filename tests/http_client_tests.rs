//! Integration tests for the request pipeline against a mock server.
//!
//! These tests verify method selection, placeholder resolution, query and
//! body encoding, header defaulting, hooks and error reporting end to end.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rest_resource::{
    ApiUrl, ClientConfig, DataType, HttpError, HttpMethod, HttpResponse, RequestOptions,
    RestClient,
};
use serde_json::json;
use wiremock::matchers::{
    body_json, body_string, header, header_exists, method, path, query_param,
};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches requests that carry no body.
struct EmptyBody;

impl Match for EmptyBody {
    fn matches(&self, request: &Request) -> bool {
        request.body.is_empty()
    }
}

/// Copies a response with a new body.
fn replace_body(res: &HttpResponse, body: &str) -> HttpResponse {
    HttpResponse::new(res.code, res.headers.clone(), body.to_string())
}

/// Creates a client pointed at the mock server.
fn create_client(server: &MockServer) -> RestClient {
    RestClient::new(
        ClientConfig::builder()
            .api(ApiUrl::new(server.uri()).unwrap())
            .build()
            .unwrap(),
    )
}

// ============================================================================
// CRUD dispatch
// ============================================================================

#[tokio::test]
async fn test_read_resolves_placeholders_and_sends_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/42"))
        .and(query_param("id", "42"))
        .and(header("accept", "application/json"))
        .and(EmptyBody)
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":42}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let items = client.register("/items/:id", "items").unwrap();

    let response = items.read(json!({"id": 42})).await.unwrap();
    assert_eq!(response.code, 200);
    assert_eq!(response.body, r#"{"id":42}"#);
    assert_eq!(response.json::<serde_json::Value>().unwrap(), json!({"id": 42}));
}

#[tokio::test]
async fn test_read_without_data_sends_bare_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(EmptyBody)
        .respond_with(ResponseTemplate::new(200).set_body_string("me"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let user = client.register("/user", "user").unwrap();

    let response = user.read(()).await.unwrap();
    assert_eq!(response.body, "me");
}

#[tokio::test]
async fn test_get_payload_becomes_query_string_not_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("a", "1"))
        .and(query_param("b", "2"))
        .and(EmptyBody)
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let search = client.register("/search", "search").unwrap();

    search.read(json!({"a": 1, "b": 2})).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("a=1&b=2"));
}

#[tokio::test]
async fn test_create_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("content-type", "application/json"))
        .and(header("content-length", "13"))
        .and(body_string(r#"{"a":1,"b":2}"#))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let items = client.register("/items", "items").unwrap();

    let response = items.create(json!({"a": 1, "b": 2})).await.unwrap();
    assert_eq!(response.code, 201);
    assert_eq!(response.body, "created");
}

#[tokio::test]
async fn test_update_and_remove_use_put_and_delete() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/items/7"))
        .and(body_json(json!({"id": 7, "name": "renamed"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/items/7"))
        .and(body_json(json!({"id": 7})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let items = client.register("/items/:id", "items").unwrap();

    let updated = items.update(json!({"id": 7, "name": "renamed"})).await.unwrap();
    assert_eq!(updated.code, 200);

    let removed = items.remove(json!({"id": 7})).await.unwrap();
    assert_eq!(removed.code, 204);
    assert!(removed.body.is_empty());
}

// ============================================================================
// Status handling and errors
// ============================================================================

#[tokio::test]
async fn test_non_2xx_status_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-request-id", "req-1")
                .set_body_string(r#"{"message":"404 Not Found"}"#),
        )
        .mount(&server)
        .await;

    let client = create_client(&server);
    let missing = client.register("/missing", "missing").unwrap();

    let response = missing.read(()).await.unwrap();
    assert_eq!(response.code, 404);
    assert!(!response.is_ok());
    assert_eq!(response.header("X-Request-Id"), Some("req-1"));
    assert!(response.body.contains("404 Not Found"));
}

#[tokio::test]
async fn test_transport_failure_is_returned_as_network_error() {
    let client = RestClient::new(
        ClientConfig::builder()
            .api(ApiUrl::new("http://127.0.0.1:1").unwrap())
            .build()
            .unwrap(),
    );
    let items = client.register("/items", "items").unwrap();

    let result = items.read(()).await;
    assert!(matches!(result, Err(HttpError::Network(_))));
}

#[tokio::test]
async fn test_unsupported_protocol_fails_before_any_request() {
    let server = MockServer::start().await;
    let client = create_client(&server);

    let options =
        RequestOptions::builder(HttpMethod::Get, "ftp://files.example.com/a").build();
    let result = client.request(options).await;

    assert!(matches!(result, Err(HttpError::UnsupportedProtocol { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Hooks
// ============================================================================

#[tokio::test]
async fn test_before_request_injects_auth_field_for_read_and_write() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1596/keys"))
        .and(query_param("uid", "1596"))
        .and(query_param("private_token", "secret"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users/1596/keys"))
        .and(body_json(json!({"uid": 1596, "key": "ssh-rsa", "private_token": "secret"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::new(
        ClientConfig::builder()
            .api(ApiUrl::new(server.uri()).unwrap())
            .before_request(|params| params.data.insert("private_token", "secret"))
            .build()
            .unwrap(),
    );
    let users = client.register("/users/:id", "users").unwrap();
    let keys = users.register("/users/:uid/keys", "keys").unwrap();

    assert_eq!(keys.read(json!({"uid": 1596})).await.unwrap().code, 200);
    assert_eq!(
        keys.create(json!({"uid": 1596, "key": "ssh-rsa"}))
            .await
            .unwrap()
            .code,
        201
    );
}

#[tokio::test]
async fn test_before_request_can_add_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("private-token", "abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::new(
        ClientConfig::builder()
            .api(ApiUrl::new(server.uri()).unwrap())
            .before_request(|params| {
                params
                    .headers
                    .insert("PRIVATE-TOKEN".to_string(), "abc".to_string());
            })
            .build()
            .unwrap(),
    );
    let projects = client.register("/projects", "projects").unwrap();

    assert!(projects.read(()).await.unwrap().is_ok());
}

#[tokio::test]
async fn test_after_request_replaces_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("raw"))
        .mount(&server)
        .await;

    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let client = RestClient::new(
        ClientConfig::builder()
            .api(ApiUrl::new(server.uri()).unwrap())
            .after_request(move |res| {
                seen.fetch_add(1, Ordering::SeqCst);
                Some(HttpResponse::new(
                    res.code,
                    res.headers.clone(),
                    res.body.to_uppercase(),
                ))
            })
            .build()
            .unwrap(),
    );
    let items = client.register("/items", "items").unwrap();

    let response = items.read(()).await.unwrap();
    assert_eq!(response.body, "RAW");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_after_request_returning_none_keeps_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("raw"))
        .mount(&server)
        .await;

    let client = RestClient::new(
        ClientConfig::builder()
            .api(ApiUrl::new(server.uri()).unwrap())
            .after_request(|_| None)
            .build()
            .unwrap(),
    );
    let items = client.register("/items", "items").unwrap();

    assert_eq!(items.read(()).await.unwrap().body, "raw");
}

#[tokio::test]
async fn test_call_level_after_request_overrides_client_hook() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("raw"))
        .mount(&server)
        .await;

    let client = RestClient::new(
        ClientConfig::builder()
            .api(ApiUrl::new(server.uri()).unwrap())
            .after_request(|res| Some(replace_body(res, "client")))
            .build()
            .unwrap(),
    );
    let items = client.register("/items", "items").unwrap();

    let options = RequestOptions::builder(HttpMethod::Get, items.url())
        .after_request(|res| Some(replace_body(res, "call")))
        .build();

    assert_eq!(client.request(options).await.unwrap().body, "call");
}

// ============================================================================
// Per-call options
// ============================================================================

#[tokio::test]
async fn test_raw_data_type_sends_text_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .and(body_string("plain note"))
        .and(header("content-length", "10"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let notes = client.register("/notes", "notes").unwrap();

    let options = RequestOptions::builder(HttpMethod::Post, notes.url())
        .data_type(DataType::Raw)
        .content("plain note")
        .header("Content-Type", "text/plain")
        .build();
    assert!(client.request(options).await.unwrap().is_ok());
}

#[tokio::test]
async fn test_basic_auth_header_from_options() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let status = client.register("/status", "status").unwrap();

    let options = RequestOptions::builder(HttpMethod::Head, status.url())
        .auth("user:pass")
        .build();
    assert_eq!(client.request(options).await.unwrap().code, 200);
}

#[tokio::test]
async fn test_user_agent_header_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let ping = client.register("/ping", "ping").unwrap();
    ping.read(()).await.unwrap();
}
