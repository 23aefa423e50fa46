#![allow(dead_code)]

use std::sync::{Arc, Once};

use apim_common::MockClock;
use apim_infra::{ApiManagementClient, Endpoint};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const IDENTIFIER: &str = "integration";
pub const KEY: &str = "c2VjcmV0LWtleS1mb3ItdGVzdHM=";
pub const ETAG: &str = "\"AAAAAAAAEjs=\"";

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness writer.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Descriptor pointing at `server` with signing credentials.
pub fn signed_descriptor(server: &MockServer) -> String {
    format!("uri={};identifier={IDENTIFIER};key={KEY}", server.uri())
}

/// Client for `server` that signs with the test credentials.
pub fn signed_client(server: &MockServer) -> ApiManagementClient {
    signed_client_with_clock(server, MockClock::new())
}

pub fn signed_client_with_clock(server: &MockServer, clock: MockClock) -> ApiManagementClient {
    init_tracing();
    let endpoint = Endpoint::from_connection_string(&signed_descriptor(server))
        .expect("endpoint should build");
    ApiManagementClient::builder()
        .endpoint(Arc::new(endpoint))
        .clock(Arc::new(clock))
        .build()
        .expect("client should build")
}

/// Client for `server` with no credentials.
pub fn anonymous_client(server: &MockServer) -> ApiManagementClient {
    init_tracing();
    let endpoint = Endpoint::parse(&server.uri()).expect("endpoint should build");
    ApiManagementClient::new(Arc::new(endpoint)).expect("client should build")
}

/// User payload as the service returns it.
pub fn user_json(id: &str) -> Value {
    json!({
        "id": format!("/users/{id}"),
        "firstName": "Testy",
        "lastName": "McTesterson",
        "email": "no-reply@noreply.org",
        "state": "active",
        "note": null,
        "registrationDate": "2014-06-24T20:46:56.123Z"
    })
}

/// Service error envelope.
pub fn error_json(code: &str, message: &str) -> Value {
    json!({ "error": { "code": code, "message": message, "details": null } })
}
