// crates/data-integrate-clients/tests/http_clients.rs
// ============================================================================
// Module: HTTP Client Tests
// Description: Catalog and streaming clients against local tiny_http servers.
// ============================================================================
//! ## Overview
//! Each test serves canned JSON from a background thread and inspects the
//! request the client sent.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use data_integrate_clients::HttpCatalogClient;
use data_integrate_clients::HttpFailure;
use data_integrate_clients::HttpStreamingClient;
use data_integrate_clients::OFFLINE_ASSET_ID;
use data_integrate_clients::OFFLINE_DATA_SOURCE_ID;
use data_integrate_clients::OfflineCatalogClient;
use data_integrate_core::AssetRequest;
use data_integrate_core::CatalogClient;
use data_integrate_core::CatalogError;
use data_integrate_core::DataSourceRequest;
use data_integrate_core::StreamError;
use data_integrate_core::StreamReadRequest;
use data_integrate_core::StreamWriteRequest;
use data_integrate_core::StreamingClient;
use serde_json::Value;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Test Server
// ============================================================================

struct Captured {
    method: String,
    url: String,
    body: String,
}

/// Serves `responses` in order and reports each request on the channel.
fn serve(responses: Vec<(u16, &'static str)>) -> (u16, mpsc::Receiver<Captured>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for (status, body) in responses {
            let Ok(mut request) = server.recv() else { return };
            let mut content = String::new();
            let _ = request.as_reader().read_to_string(&mut content);
            let _ = tx.send(Captured {
                method: request.method().to_string(),
                url: request.url().to_string(),
                body: content,
            });
            let header =
                Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
            let response = Response::from_string(body).with_status_code(status).with_header(header);
            let _ = request.respond(response);
        }
    });
    (port, rx)
}

fn timeout() -> Duration {
    Duration::from_secs(5)
}

fn data_source() -> DataSourceRequest {
    DataSourceRequest {
        name: "test_datasource_ns".to_string(),
        host: "db.local".to_string(),
        port: 3306,
        db_type: 1,
        username: "root".to_string(),
        password: "secret".to_string(),
        database_name: "it_mysql".to_string(),
    }
}

fn asset() -> AssetRequest {
    AssetRequest {
        asset_name: "ns_orders".to_string(),
        asset_en_name: "ns_orders".to_string(),
        data_source_id: 7,
        database_name: "it_mysql".to_string(),
        table_name: "ns_test_table".to_string(),
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

#[tokio::test]
async fn data_source_registration_posts_json() {
    let (port, rx) = serve(vec![(200, r#"{"id":41,"success":true,"message":"ok"}"#)]);
    let client = HttpCatalogClient::new("127.0.0.1", port, timeout()).unwrap();
    let registration = client.create_data_source(&data_source()).await.unwrap();
    assert_eq!(registration.id, 41);
    assert!(registration.success);

    let captured = rx.recv().unwrap();
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.url, "/v1/datasources");
    let body: Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body["db_type"], 1);
    assert_eq!(body["database_name"], "it_mysql");
}

#[tokio::test]
async fn unsuccessful_registration_is_returned_not_raised() {
    let (port, _rx) = serve(vec![(200, r#"{"id":0,"success":false,"message":"duplicate"}"#)]);
    let client = HttpCatalogClient::new("127.0.0.1", port, timeout()).unwrap();
    let registration = client.create_asset(&asset()).await.unwrap();
    assert!(!registration.success);
    assert_eq!(registration.message, "duplicate");
}

#[tokio::test]
async fn error_status_maps_to_rejected() {
    let (port, _rx) = serve(vec![(503, "catalog unavailable")]);
    let client = HttpCatalogClient::new("127.0.0.1", port, timeout()).unwrap();
    let err = client.create_asset(&asset()).await.unwrap_err();
    match err {
        CatalogError::Rejected(message) => {
            assert_eq!(message, "status 503: catalog unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_invalid_response() {
    let (port, _rx) = serve(vec![(200, "not json")]);
    let client = HttpCatalogClient::new("127.0.0.1", port, timeout()).unwrap();
    let err = client.create_data_source(&data_source()).await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidResponse(_)));
}

#[tokio::test]
async fn delete_targets_the_data_source_id() {
    let (port, rx) = serve(vec![(204, "")]);
    let client = HttpCatalogClient::new("127.0.0.1", port, timeout()).unwrap();
    client.delete_data_source(1000).await.unwrap();
    let captured = rx.recv().unwrap();
    assert_eq!(captured.method, "DELETE");
    assert_eq!(captured.url, "/v1/datasources/1000");
}

#[tokio::test]
async fn unreachable_catalog_is_a_transport_error() {
    let port = {
        let server = Server::http("127.0.0.1:0").unwrap();
        server.server_addr().to_ip().unwrap().port()
    };
    let client = HttpCatalogClient::new("127.0.0.1", port, timeout()).unwrap();
    let err = client.delete_data_source(1).await.unwrap_err();
    assert!(matches!(err, CatalogError::Transport(_)));
}

#[tokio::test]
async fn offline_catalog_returns_fixed_ids() {
    let client = OfflineCatalogClient::new();
    let source = client.create_data_source(&data_source()).await.unwrap();
    let asset = client.create_asset(&asset()).await.unwrap();
    assert_eq!((source.id, asset.id), (OFFLINE_DATA_SOURCE_ID, OFFLINE_ASSET_ID));
    assert!(source.success && asset.success);
    client.delete_data_source(source.id).await.unwrap();
    assert_eq!(client.deleted(), vec![OFFLINE_DATA_SOURCE_ID]);
}

// ============================================================================
// SECTION: Streaming
// ============================================================================

#[tokio::test]
async fn stream_read_returns_row_count() {
    let (port, rx) = serve(vec![(200, r#"{"row_count":1000}"#)]);
    let client = HttpStreamingClient::new("127.0.0.1", port, timeout()).unwrap();
    let request = StreamReadRequest {
        asset_name: "ns_orders".to_string(),
        chain_info_id: "test_chain".to_string(),
        request_id: "read_1".to_string(),
        db_fields: Vec::new(),
    };
    assert_eq!(client.read_row_count(&request).await.unwrap(), 1000);

    let captured = rx.recv().unwrap();
    assert_eq!(captured.url, "/v1/stream/read");
    let body: Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body["chain_info_id"], "test_chain");
}

#[tokio::test]
async fn stream_write_returns_rows_written() {
    let (port, rx) = serve(vec![(200, r#"{"rows_written":25}"#)]);
    let client = HttpStreamingClient::new("127.0.0.1", port, timeout()).unwrap();
    let request = StreamWriteRequest {
        asset_name: "ns_orders".to_string(),
        request_id: "write_1".to_string(),
        table_name: "ns_test_table".to_string(),
        row_count: 25,
    };
    assert_eq!(client.write_rows(&request).await.unwrap(), 25);
    assert_eq!(rx.recv().unwrap().url, "/v1/stream/write");
}

#[tokio::test]
async fn stream_error_status_is_rejected() {
    let (port, _rx) = serve(vec![(400, r#"{"error":"unknown asset"}"#)]);
    let client = HttpStreamingClient::new("127.0.0.1", port, timeout()).unwrap();
    let request = StreamReadRequest {
        asset_name: "missing".to_string(),
        chain_info_id: "test_chain".to_string(),
        request_id: "read_2".to_string(),
        db_fields: vec!["id".to_string()],
    };
    let err = client.read_row_count(&request).await.unwrap_err();
    assert!(matches!(
        err,
        StreamError::Rejected(ref message) if message.starts_with("status 400")
    ));
}

#[test]
fn http_failures_render_status_and_body() {
    let with_body = HttpFailure::Status { code: 502, body: "bad gateway".to_string() };
    assert_eq!(with_body.to_string(), "status 502: bad gateway");
    let bare = HttpFailure::Status { code: 404, body: String::new() };
    assert_eq!(bare.to_string(), "status 404");
    assert_eq!(HttpFailure::Decode("eof".to_string()).to_string(), "eof");
    let source: &dyn std::error::Error = &bare;
    assert!(source.source().is_none());
}
