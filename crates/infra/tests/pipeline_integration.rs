//! Signed-request pipeline as seen by the service
//!
//! **Coverage:**
//! - Every request carries the shared access signature and `api-version`
//! - Anonymous and static-token endpoints
//! - Token reuse and renewal driven by a mock clock
//! - Document import, raw verbs and nested operation paths

#![allow(dead_code)]

#[path = "support.rs"]
mod support;

use apim_common::{format_round_trip, Clock, MockClock};
use apim_domain::Entity;
use apim_infra::endpoint::token::compute_signature_base64;
use chrono::Duration;
use serde_json::json;
use support::{anonymous_client, signed_client, signed_client_with_clock, IDENTIFIER, KEY};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn authorization(request: &Request) -> Option<String> {
    request.headers.get("authorization").and_then(|v| v.to_str().ok()).map(str::to_string)
}

fn token_field<'a>(token: &'a str, name: &str) -> &'a str {
    token
        .split('&')
        .find_map(|part| part.strip_prefix(name).and_then(|rest| rest.strip_prefix('=')))
        .expect("token field present")
}

#[tokio::test]
async fn requests_carry_verifiable_signature_and_api_version() {
    let server = MockServer::start().await;
    let clock = MockClock::new();
    let client = signed_client_with_clock(&server, clock.clone());
    Mock::given(method("GET"))
        .and(path("/groups"))
        .and(query_param("api-version", "2014-02-14-preview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [], "count": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let groups = client.groups().list().await.expect("list should succeed");
    assert!(groups.is_empty());

    let requests = server.received_requests().await.unwrap();
    let header = authorization(&requests[0]).expect("authorization header");
    let token = header.strip_prefix("SharedAccessSignature ").expect("signature scheme");

    let expiry = token_field(token, "ex");
    assert_eq!(token_field(token, "uid"), IDENTIFIER);
    assert_eq!(expiry, format_round_trip(clock.now() + Duration::hours(4)));
    assert_eq!(
        token_field(token, "sn"),
        compute_signature_base64(KEY, &format!("{IDENTIFIER}\n{expiry}"))
    );
}

#[tokio::test]
async fn token_is_reused_then_renewed_near_expiry() {
    let server = MockServer::start().await;
    let clock = MockClock::new();
    let client = signed_client_with_clock(&server, clock.clone());
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("ETag", "\"v\""))
        .mount(&server)
        .await;

    let users = client.users();
    users.get_metadata("1").await.unwrap();
    clock.advance(Duration::minutes(30));
    users.get_metadata("1").await.unwrap();
    clock.advance(Duration::hours(3) + Duration::minutes(29) + Duration::seconds(30));
    users.get_metadata("1").await.unwrap();

    let headers: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| authorization(r).expect("authorization header"))
        .collect();

    assert_eq!(headers[0], headers[1]);
    assert_ne!(headers[1], headers[2]);
}

#[tokio::test]
async fn anonymous_endpoint_sends_no_authorization() {
    let server = MockServer::start().await;
    let client = anonymous_client(&server);
    Mock::given(method("GET"))
        .and(path("/products/starter"))
        .respond_with(ResponseTemplate::new(200).insert_header("ETag", "\"p1\"").set_body_json(
            json!({ "id": "/products/starter", "name": "Starter", "state": "published" }),
        ))
        .mount(&server)
        .await;

    let product = client.products().get("starter").await.unwrap().expect("product exists");
    assert!(product.is_published());
    assert_eq!(product.entity_version(), Some("\"p1\""));

    let requests = server.received_requests().await.unwrap();
    assert!(authorization(&requests[0]).is_none());
    assert_eq!(requests[0].url.query(), Some("api-version=2014-02-14-preview"));
}

#[tokio::test]
async fn static_access_token_is_sent_verbatim() {
    support::init_tracing();
    let server = MockServer::start().await;
    let endpoint = apim_infra::Endpoint::from_connection_string(&format!(
        "uri={};accessToken=uid=ops&ex=2099-01-01T00:00:00.0000000Z&sn=abc;version=2015-09-15",
        server.uri()
    ))
    .unwrap();
    let client = apim_infra::ApiManagementClient::new(std::sync::Arc::new(endpoint)).unwrap();

    Mock::given(method("HEAD"))
        .and(path("/apis/echo"))
        .and(header(
            "authorization",
            "SharedAccessSignature uid=ops&ex=2099-01-01T00:00:00.0000000Z&sn=abc",
        ))
        .and(query_param("api-version", "2015-09-15"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.head("/apis/echo").await.unwrap();
    assert!(response.status().is_success());
}

#[tokio::test]
async fn import_document_targets_lower_cased_name() {
    let server = MockServer::start().await;
    let client = signed_client(&server);
    Mock::given(method("PUT"))
        .and(path("/apis/echo-api"))
        .and(query_param("import", "true"))
        .and(query_param("path", "/echo-api"))
        .and(query_param("api-version", "2014-02-14-preview"))
        .and(header("content-type", "application/vnd.sun.wadl+xml"))
        .and(body_string("<application/>"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let response = client
        .import_document("Echo-API", "application/vnd.sun.wadl+xml", "<application/>")
        .await
        .expect("import should be sent");
    assert_eq!(response.status().as_u16(), 201);
}

#[tokio::test]
async fn raw_patch_flows_through_signing() {
    let server = MockServer::start().await;
    let client = signed_client(&server);
    Mock::given(method("PATCH"))
        .and(path("/products/starter"))
        .and(query_param("api-version", "2014-02-14-preview"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = client
        .patch("/products/starter", br#"{"terms":"none"}"#.to_vec())
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let requests = server.received_requests().await.unwrap();
    assert!(authorization(&requests[0]).unwrap().starts_with("SharedAccessSignature uid="));
}

#[tokio::test]
async fn operations_are_addressed_under_their_api() {
    let server = MockServer::start().await;
    let client = signed_client(&server);
    Mock::given(method("GET"))
        .and(path("/apis/echo/operations/get-resource"))
        .respond_with(ResponseTemplate::new(200).insert_header("ETag", "\"o1\"").set_body_json(
            json!({
                "id": "/apis/echo/operations/get-resource",
                "name": "Retrieve resource",
                "method": "GET",
                "urlTemplate": "/resource",
                "templateParameters": []
            }),
        ))
        .expect(2)
        .mount(&server)
        .await;

    let operations = client.operations("/apis/echo").unwrap();
    let by_path = operations
        .get("/apis/echo/operations/get-resource")
        .await
        .unwrap()
        .expect("operation exists");
    let by_short_path = operations.get("operations/get-resource").await.unwrap().expect("exists");

    assert_eq!(by_path.method.as_deref(), Some("GET"));
    assert_eq!(by_path, by_short_path);
    assert!(by_path.extra.contains_key("templateParameters"));
}
