// crates/data-integrate-clients/src/streaming.rs
// ============================================================================
// Module: Streaming Client
// Description: HTTP implementation of `StreamingClient`.
// Purpose: Count streamed rows and push synthetic writes through the data service.
// Dependencies: async-trait, serde, data-integrate-core, crate::http
// ============================================================================

//! ## Overview
//! `POST /v1/stream/read` takes a [`StreamReadRequest`] and answers
//! `{"row_count": n}` once the stream has been drained server-side.
//! `POST /v1/stream/write` takes a [`StreamWriteRequest`] and answers
//! `{"rows_written": n}`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use data_integrate_core::StreamError;
use data_integrate_core::StreamReadRequest;
use data_integrate_core::StreamWriteRequest;
use data_integrate_core::StreamingClient;
use serde::Deserialize;

use crate::http::HttpEndpoint;
use crate::http::HttpFailure;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Streaming read path.
pub const STREAM_READ_PATH: &str = "/v1/stream/read";
/// Streaming write path.
pub const STREAM_WRITE_PATH: &str = "/v1/stream/write";

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// Read response body.
#[derive(Debug, Deserialize)]
struct ReadResponse {
    /// Rows received from the stream.
    row_count: u64,
}

/// Write response body.
#[derive(Debug, Deserialize)]
struct WriteResponse {
    /// Rows accepted by the service.
    rows_written: u64,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// JSON streaming client.
#[derive(Debug, Clone)]
pub struct HttpStreamingClient {
    /// Data service endpoint.
    endpoint: HttpEndpoint,
}

impl HttpStreamingClient {
    /// Creates a client for the data service at `host:port`.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Transport`] when the HTTP client cannot be built.
    pub fn new(host: &str, port: u16, timeout: Duration) -> Result<Self, StreamError> {
        let endpoint = HttpEndpoint::new(host, port, timeout).map_err(stream_error)?;
        Ok(Self { endpoint })
    }
}

#[async_trait]
impl StreamingClient for HttpStreamingClient {
    async fn read_row_count(&self, request: &StreamReadRequest) -> Result<u64, StreamError> {
        let response: ReadResponse =
            self.endpoint.post_json(STREAM_READ_PATH, request).await.map_err(stream_error)?;
        Ok(response.row_count)
    }

    async fn write_rows(&self, request: &StreamWriteRequest) -> Result<u64, StreamError> {
        let response: WriteResponse =
            self.endpoint.post_json(STREAM_WRITE_PATH, request).await.map_err(stream_error)?;
        Ok(response.rows_written)
    }
}

/// Maps an HTTP failure into the stream error space.
fn stream_error(failure: HttpFailure) -> StreamError {
    match failure {
        HttpFailure::Transport(message) => StreamError::Transport(message),
        HttpFailure::Status { .. } | HttpFailure::Decode(_) => {
            StreamError::Rejected(failure.to_string())
        }
    }
}
